use anyhow::anyhow;
use directories::ProjectDirs;

use std::path::PathBuf;

/// Store for all of the paths that are used throughout the application
#[derive(Debug, Clone)]
pub struct Paths {
	/// Holds data
	pub data: PathBuf,
	/// Holds log files
	pub logs: PathBuf,
}

impl Paths {
	/// Create a new Paths object. This will create all of the directories
	/// referenced in the paths if they do not already exist.
	pub fn new() -> anyhow::Result<Paths> {
		let project = ProjectDirs::from("", "starling", "starling")
			.ok_or(anyhow!("Failed to create project directories"))?;

		let data = project.data_dir().to_owned();
		let logs = data.join("logs");

		std::fs::create_dir_all(&data)?;
		std::fs::create_dir_all(&logs)?;

		Ok(Paths { data, logs })
	}
}
