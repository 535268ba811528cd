use std::path::{Path, PathBuf};

use starling_shared::util::CLASSPATH_SEP;

use crate::error::LaunchError;

/// A utility for working with Java classpaths
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Classpath {
	entries: Vec<String>,
}

impl Classpath {
	/// Create a new empty classpath
	pub fn new() -> Self {
		Self {
			entries: Vec::new(),
		}
	}

	/// Appends a string to the end of the classpath
	pub fn add(&mut self, string: &str) {
		self.entries.push(string.to_string());
	}

	/// Converts a path to a string and appends it to the classpath
	pub fn add_path(&mut self, path: &Path) {
		self.add(&path.to_string_lossy());
	}

	/// Adds an entry that may be a glob pattern such as `lib/*.jar`. Patterns are
	/// expanded to their matches in sorted order, and plain entries are added even if
	/// they don't exist. Relative entries are taken relative to `base` when it is given
	pub fn add_pattern(&mut self, entry: &str, base: Option<&Path>) -> Result<(), LaunchError> {
		let base = base.filter(|_| Path::new(entry).is_relative());
		if !entry.contains(['*', '?', '[']) {
			match base {
				Some(base) => self.add_path(&base.join(entry)),
				None => self.add(entry),
			}
			return Ok(());
		}

		// The base is a literal path, so it can't add pattern characters of its own
		let pattern = match base {
			Some(base) => format!("{}/{entry}", glob::Pattern::escape(&base.to_string_lossy())),
			None => entry.to_string(),
		};
		let matches = glob::glob(&pattern).map_err(|source| LaunchError::Classpath {
			entry: entry.to_string(),
			source,
		})?;
		let mut paths: Vec<PathBuf> = matches.filter_map(Result::ok).collect();
		paths.sort();
		for path in paths {
			self.add_path(&path);
		}

		Ok(())
	}

	/// Obtain the classpath as a string
	pub fn get_str(&self) -> String {
		let mut buf = [0; 4];
		self.entries.join(CLASSPATH_SEP.encode_utf8(&mut buf))
	}

	/// Get the classpath as a list of entries
	pub fn get_entries(&self) -> &[String] {
		&self.entries
	}

	/// Split the classpath into a vector of paths
	pub fn get_paths(&self) -> Vec<PathBuf> {
		self.entries.iter().map(PathBuf::from).collect()
	}
}
