use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use starling_core::launch::{LaunchConfiguration, WrapperCommand};
use starling_core::resolve::RawLaunchConfig;
use starling_shared::util::DeserListOrSingle;

/// Filename of the launcher config that is picked up from the working directory
pub const LAUNCHER_CONFIG_FILENAME: &str = "starling.json";

/// Deserialization struct for the launcher config file. Every field is optional
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LauncherConfig {
	/// Classpath entries, which may be glob patterns
	pub classpath: DeserListOrSingle<String>,
	/// Path to the Java executable
	pub java: Option<String>,
	/// Working directory for the server
	pub dir: Option<String>,
	/// Extra environment variables for the server
	pub env: HashMap<String, String>,
	/// Commands to wrap the Java command in
	pub wrappers: Vec<WrapperCommand>,
	/// Whether to hide secrets in printed commands
	pub censor_secrets: Option<bool>,
	/// The server launch settings
	#[serde(flatten)]
	pub server: RawLaunchConfig,
}

impl LauncherConfig {
	/// Read the config from JSON
	pub fn read(reader: impl Read) -> anyhow::Result<Self> {
		serde_json::from_reader(reader).context("Failed to parse launcher config")
	}

	/// Load the config from a file
	pub fn load(path: &Path) -> anyhow::Result<Self> {
		let file = File::open(path)
			.with_context(|| format!("Failed to open launcher config {}", path.display()))?;
		Self::read(BufReader::new(file))
	}

	/// Create the process launch configuration from this config
	pub fn create_launch_configuration(&self, dir: Option<PathBuf>) -> LaunchConfiguration {
		let mut builder = LaunchConfiguration::builder()
			.env(self.env.clone())
			.censor_secrets(self.censor_secrets.unwrap_or(true));
		for wrapper in &self.wrappers {
			builder = builder.wrapper(wrapper.clone());
		}
		if let Some(dir) = dir {
			builder = builder.cwd(dir);
		}

		builder.build()
	}
}

/// Get the launcher config to use. An explicit path must exist, otherwise
/// `starling.json` in the directory is used if it is there
pub fn find_launcher_config(
	explicit: Option<&Path>,
	dir: &Path,
) -> anyhow::Result<Option<LauncherConfig>> {
	if let Some(path) = explicit {
		return LauncherConfig::load(path).map(Some);
	}

	let default = dir.join(LAUNCHER_CONFIG_FILENAME);
	if default.is_file() {
		LauncherConfig::load(&default).map(Some)
	} else {
		Ok(None)
	}
}
