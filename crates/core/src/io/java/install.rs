use std::ffi::OsString;
use std::path::{Path, PathBuf};

use starling_shared::util::JAVA_EXECUTABLE;

use crate::error::LaunchError;

/// Finds the Java executable to launch with. An explicit path is used if given,
/// then JAVA_HOME, then whatever `java` is on the PATH
pub fn find_java(explicit: Option<&Path>) -> Result<PathBuf, LaunchError> {
	let java_home = std::env::var_os("JAVA_HOME");
	find_java_with(explicit, java_home, || which::which(JAVA_EXECUTABLE).ok())
}

/// Implementation of find_java with the environment passed in
fn find_java_with(
	explicit: Option<&Path>,
	java_home: Option<OsString>,
	on_path: impl FnOnce() -> Option<PathBuf>,
) -> Result<PathBuf, LaunchError> {
	if let Some(explicit) = explicit {
		if explicit.is_file() {
			return Ok(explicit.to_path_buf());
		}
		return Err(LaunchError::JavaPathMissing(explicit.to_path_buf()));
	}

	if let Some(home) = java_home {
		let path = get_java_home_executable(Path::new(&home));
		if path.is_file() {
			return Ok(path);
		}
	}

	on_path().ok_or(LaunchError::JavaNotFound)
}

/// Get the path to the Java executable inside a Java home directory
pub fn get_java_home_executable(home: &Path) -> PathBuf {
	home.join("bin").join(JAVA_EXECUTABLE)
}
