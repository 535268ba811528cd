/// Configuration for launch settings
mod configuration;
/// Actual launching of the server process
mod process;

use starling_shared::output::{MessageContents, MessageLevel, StarlingOutput};

use crate::args::{build_launch_arguments, LaunchArguments};
use crate::error::LaunchError;
use crate::io::java::classpath::Classpath;
use crate::resolve::ServerLaunchConfig;

pub use self::configuration::{LaunchConfigBuilder, LaunchConfiguration, WrapperCommand};
pub use self::process::JavaProcessLauncher;

/// Everything a launcher needs to start the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
	/// The runtime classpath
	pub classpath: String,
	/// The class to run
	pub class_name: String,
	/// VM arguments, as a single line
	pub vm_args: String,
	/// Application arguments, as a single line
	pub app_args: String,
	/// Whether to detach the process
	pub spawn: bool,
}

impl LaunchRequest {
	/// Create a request from built arguments and a classpath
	pub fn new(args: LaunchArguments, classpath: &Classpath) -> Self {
		Self {
			classpath: classpath.get_str(),
			class_name: args.class_name,
			vm_args: args.vm_args,
			app_args: args.app_args,
			spawn: args.spawn,
		}
	}
}

/// The result of a launch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
	/// The process was detached and is still running
	Spawned {
		/// The process ID
		pid: u32,
	},
	/// The process ran in the foreground and finished
	Exited {
		/// Exit code of the process. None if it was ended by a signal
		code: Option<i32>,
	},
}

/// Something that can start the server process
pub trait ProcessLauncher {
	/// Launch a process for the request
	fn launch(
		&mut self,
		request: &LaunchRequest,
		o: &mut impl StarlingOutput,
	) -> Result<LaunchOutcome, LaunchError>;
}

/// Build the arguments for a resolved config and hand them to a launcher
pub fn launch_server(
	config: &ServerLaunchConfig,
	classpath: &Classpath,
	spawn: bool,
	launcher: &mut impl ProcessLauncher,
	o: &mut impl StarlingOutput,
) -> Result<LaunchOutcome, LaunchError> {
	let args = build_launch_arguments(config, spawn);
	o.display(
		MessageContents::Property(
			"Running component server".into(),
			Box::new(MessageContents::Copyable(args.command_line.clone())),
		),
		MessageLevel::Important,
	);

	let request = LaunchRequest::new(args, classpath);
	launcher.launch(&request, o)
}
