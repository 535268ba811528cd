use std::fmt::Display;

use crate::error::LaunchError;

/// The logging level used when none is configured
pub const DEFAULT_LOGGING: &str = "WARN";

/// One of the fixed logging levels understood by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
	/// Only errors
	Error,
	/// Warnings and errors
	Warn,
	/// Informational messages
	Info,
	/// Everything, including debug output
	Debug,
}

impl LogLevel {
	/// Parse a level from its exact uppercase name
	pub fn parse(string: &str) -> Option<Self> {
		match string {
			"ERROR" => Some(Self::Error),
			"WARN" => Some(Self::Warn),
			"INFO" => Some(Self::Info),
			"DEBUG" => Some(Self::Debug),
			_ => None,
		}
	}

	/// Parse the level used for server startup output
	pub fn parse_startup(string: &str) -> Result<Self, LaunchError> {
		Self::parse(string).ok_or_else(|| LaunchError::InvalidStartupLogging(string.to_string()))
	}

	/// The uppercase name of the level
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Error => "ERROR",
			Self::Warn => "WARN",
			Self::Info => "INFO",
			Self::Debug => "DEBUG",
		}
	}

	/// The command line flag the server takes for this startup level, if any
	pub fn startup_flag(&self) -> Option<&'static str> {
		match self {
			Self::Error => Some("-q"),
			Self::Warn | Self::Info => None,
			Self::Debug => Some("-v"),
		}
	}

	/// The built-in logback configuration resource for this level
	pub fn logback_resource(&self) -> &'static str {
		match self {
			Self::Error => "com/opengamma/util/error-logback.xml",
			Self::Warn => "com/opengamma/util/warn-logback.xml",
			Self::Info => "com/opengamma/util/info-logback.xml",
			Self::Debug => "com/opengamma/util/debug-logback.xml",
		}
	}
}

impl Display for LogLevel {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

/// Logging setting for the running server. Anything that isn't a known
/// level is a path to a logback configuration file and is passed through as is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerLogging {
	/// One of the built-in levels
	Level(LogLevel),
	/// A custom logback configuration file
	File(String),
}

impl ServerLogging {
	/// Parse server logging. This never fails
	pub fn parse(string: &str) -> Self {
		match LogLevel::parse(string) {
			Some(level) => Self::Level(level),
			None => Self::File(string.to_string()),
		}
	}

	/// The logback configuration file or resource to give to the server
	pub fn configuration_file(&self) -> &str {
		match self {
			Self::Level(level) => level.logback_resource(),
			Self::File(path) => path,
		}
	}
}

impl Display for ServerLogging {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Level(level) => write!(f, "{level}"),
			Self::File(path) => write!(f, "{path}"),
		}
	}
}
