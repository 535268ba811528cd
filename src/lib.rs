#![warn(missing_docs)]

//! starling launches Java component servers. Settings come from a launcher config
//! file, the command line, and optionally a `starling-maven-plugin.properties`
//! resource on the server's classpath. They are resolved into a Java command line
//! which is run in the foreground or spawned in the background.

pub use starling_core as core;
pub use starling_shared as shared;

/// The version of the starling library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reading of the launcher config file
pub mod config;
/// File input / output and application paths
pub mod io;
/// Preparing and running a launch from all of the configuration sources
pub mod launch;
