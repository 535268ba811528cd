use std::path::PathBuf;

use thiserror::Error;

/// Boxed error used for failures that come from collaborators
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can end a server launch. None of these are retried
#[derive(Debug, Error)]
pub enum LaunchError {
	/// The properties resource could not be found on the classpath
	#[error("Unable to find classpath resource: {0}")]
	ResourceNotFound(String),
	/// The properties resource exists but could not be read or parsed
	#[error("Unable to read classpath resource: {resource}")]
	ResourceRead {
		/// Name of the resource
		resource: String,
		/// The underlying failure
		#[source]
		source: BoxedError,
	},
	/// No config file was set after resolution
	#[error("Unable to run server, no configFile set")]
	MissingConfigFile,
	/// The startup logging level was not one of the known levels
	#[error("Invalid value for startupLogging: {0}")]
	InvalidStartupLogging(String),
	/// An argument string had a quote that was never closed
	#[error("Unable to build arguments from '{0}': unbalanced quotes")]
	ArgumentBuild(String),
	/// A classpath entry was invalid
	#[error("Invalid classpath entry '{entry}'")]
	Classpath {
		/// The entry that failed
		entry: String,
		/// The glob failure
		#[source]
		source: glob::PatternError,
	},
	/// An explicitly given Java executable does not exist
	#[error("Java executable {0:?} does not exist")]
	JavaPathMissing(PathBuf),
	/// No Java executable could be found
	#[error("Unable to find a Java executable. Set JAVA_HOME or pass the path to java")]
	JavaNotFound,
	/// The process could not be started
	#[error("Failed to start process {program}")]
	Launch {
		/// The program that was run
		program: String,
		/// The underlying failure
		#[source]
		source: std::io::Error,
	},
}

impl LaunchError {
	/// Create a ResourceRead error from any error type
	pub fn resource_read(resource: &str, source: impl Into<BoxedError>) -> Self {
		Self::ResourceRead {
			resource: resource.to_string(),
			source: source.into(),
		}
	}
}
