#![warn(missing_docs)]

//! This library is used by starling to turn a set of server launch settings into a
//! Java command line and start it. Settings can come straight from the caller or be
//! overridden by a `starling-maven-plugin.properties` resource found on the classpath.
//!
//! The pipeline is: resolve the configuration, build the VM and application arguments,
//! then hand them to a [ProcessLauncher]

/// Building of the VM and application argument strings
pub mod args;
/// The error type for the library
pub mod error;
/// Input / output with data formats and the system
pub mod io;
/// Launching of the server process
pub mod launch;
/// Logging levels and their mapping to arguments
pub mod logging;
/// Resolution of launch configuration
pub mod resolve;

pub use args::{build_launch_arguments, LaunchArguments};
pub use error::LaunchError;
pub use io::java::classpath::Classpath;
pub use launch::{
	launch_server, JavaProcessLauncher, LaunchConfiguration, LaunchOutcome, LaunchRequest,
	ProcessLauncher, WrapperCommand,
};
pub use logging::{LogLevel, ServerLogging};
pub use resolve::{
	resolve_config, FileExists, LocalFileSystem, RawLaunchConfig, ResourceLoader,
	ServerLaunchConfig,
};
