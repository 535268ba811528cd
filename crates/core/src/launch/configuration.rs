use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

/// Options for how the server process is run
#[derive(Debug, Clone)]
pub struct LaunchConfiguration {
	/// Environment variables
	pub env: HashMap<String, String>,
	/// Wrapper commands
	pub wrappers: Vec<WrapperCommand>,
	/// Working directory of the process. Inherited if not set
	pub cwd: Option<PathBuf>,
	/// Whether to hide secrets when printing the launch command
	pub censor_secrets: bool,
}

impl LaunchConfiguration {
	/// Create a new LaunchConfiguration with default settings
	pub fn new() -> Self {
		Self {
			env: HashMap::new(),
			wrappers: Vec::new(),
			cwd: None,
			censor_secrets: true,
		}
	}

	/// Get a builder for the configuration
	pub fn builder() -> LaunchConfigBuilder {
		LaunchConfigBuilder::new()
	}
}

impl Default for LaunchConfiguration {
	fn default() -> Self {
		Self::new()
	}
}

/// Builder for the launch configuration
pub struct LaunchConfigBuilder {
	config: LaunchConfiguration,
}

impl LaunchConfigBuilder {
	/// Start a new LaunchConfigBuilder with default configuration
	pub fn new() -> Self {
		Self {
			config: LaunchConfiguration::new(),
		}
	}

	/// Finish building and get the configuration
	pub fn build(self) -> LaunchConfiguration {
		self.config
	}

	/// Set environment variables for the command
	pub fn env(mut self, env: HashMap<String, String>) -> Self {
		self.config.env = env;
		self
	}

	/// Add a wrapper command that encloses the normal command
	pub fn wrapper(mut self, wrapper: WrapperCommand) -> Self {
		self.config.wrappers.push(wrapper);
		self
	}

	/// Set the working directory
	pub fn cwd(mut self, cwd: PathBuf) -> Self {
		self.config.cwd = Some(cwd);
		self
	}

	/// Set whether to censor secrets in output
	pub fn censor_secrets(mut self, censor_secrets: bool) -> Self {
		self.config.censor_secrets = censor_secrets;
		self
	}
}

impl Default for LaunchConfigBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// A wrapper command that can be used to
/// enclose the normal launch command in another
/// program, such as `nice` or `taskset`
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct WrapperCommand {
	/// The command to run
	pub cmd: String,
	/// The command's arguments. These will be put before the
	/// normal launch command.
	#[serde(default)]
	pub args: Vec<String>,
}
