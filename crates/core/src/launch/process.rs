use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use starling_shared::output::{MessageContents, MessageLevel, StarlingOutput};

use crate::error::LaunchError;

use super::{LaunchConfiguration, LaunchOutcome, LaunchRequest, ProcessLauncher, WrapperCommand};

/// The start of the spawn secret argument, used to censor it
const SECRET_ARG_START: &str = "-Dcommandmonitor.secret=";

/// Launches the server as a child Java process
#[derive(Debug, Clone)]
pub struct JavaProcessLauncher {
	java: PathBuf,
	config: LaunchConfiguration,
}

impl JavaProcessLauncher {
	/// Create a launcher for a Java executable
	pub fn new(java: PathBuf, config: LaunchConfiguration) -> Self {
		Self { java, config }
	}
}

impl ProcessLauncher for JavaProcessLauncher {
	fn launch(
		&mut self,
		request: &LaunchRequest,
		o: &mut impl StarlingOutput,
	) -> Result<LaunchOutcome, LaunchError> {
		let mut cmd = create_command(self.java.as_os_str(), request, &self.config)?;
		output_launch_command(&cmd, self.config.censor_secrets, o);

		let program = cmd.get_program().to_string_lossy().to_string();
		let launch_err = |source| LaunchError::Launch {
			program: program.clone(),
			source,
		};

		if request.spawn {
			detach(&mut cmd);
			let child = cmd.spawn().map_err(launch_err)?;
			o.display(
				MessageContents::Simple("Server starting...".into()),
				MessageLevel::Important,
			);
			// The child is intentionally not waited on
			Ok(LaunchOutcome::Spawned { pid: child.id() })
		} else {
			let mut child = cmd.spawn().map_err(launch_err)?;
			let status = child.wait().map_err(launch_err)?;
			if !status.success() {
				o.display(
					MessageContents::Warning(format!("Server process exited with {status}")),
					MessageLevel::Important,
				);
			}
			Ok(LaunchOutcome::Exited {
				code: status.code(),
			})
		}
	}
}

/// Create the full command for a launch request
pub(crate) fn create_command(
	program: &OsStr,
	request: &LaunchRequest,
	config: &LaunchConfiguration,
) -> Result<Command, LaunchError> {
	let vm_args = split_args(&request.vm_args)?;
	let app_args = split_args(&request.app_args)?;

	let mut cmd = Command::new(program);
	cmd.args(vm_args);
	if !request.classpath.is_empty() {
		cmd.arg("-cp");
		cmd.arg(&request.classpath);
	}
	cmd.arg(&request.class_name);
	cmd.args(app_args);

	let mut cmd = create_wrapped_command(cmd, &config.wrappers);
	if let Some(cwd) = &config.cwd {
		cmd.current_dir(cwd);
	}
	cmd.envs(&config.env);

	Ok(cmd)
}

/// Split an argument line into separate arguments. Whitespace separates arguments and
/// single or double quotes group them. Backslashes have no special meaning, so Windows
/// paths pass through untouched
fn split_args(line: &str) -> Result<Vec<String>, LaunchError> {
	let mut out = Vec::new();
	let mut current = String::new();
	// Set right after a closing quote so that "" still makes an argument
	let mut quoted = false;
	let mut quote = None;

	for c in line.chars() {
		if let Some(open) = quote {
			if c == open {
				quote = None;
				quoted = true;
			} else {
				current.push(c);
			}
			continue;
		}

		match c {
			'\'' | '"' => quote = Some(c),
			c if c.is_whitespace() => {
				if quoted || !current.is_empty() {
					out.push(std::mem::take(&mut current));
				}
			}
			c => current.push(c),
		}
		quoted = false;
	}

	if quote.is_some() {
		return Err(LaunchError::ArgumentBuild(line.to_string()));
	}
	if quoted || !current.is_empty() {
		out.push(current);
	}

	Ok(out)
}

/// Disconnect the command from our terminal so that it can outlive us
fn detach(cmd: &mut Command) {
	cmd.stdin(Stdio::null());
	cmd.stdout(Stdio::null());
	cmd.stderr(Stdio::null());
	#[cfg(unix)]
	{
		use std::os::unix::process::CommandExt;
		cmd.process_group(0);
	}
}

/// Display the launch command in our own way,
/// censoring the spawn secret if needed
fn output_launch_command(command: &Command, censor_secrets: bool, o: &mut impl StarlingOutput) {
	o.end_process();
	o.display(
		MessageContents::Property(
			"Launch command".into(),
			Box::new(MessageContents::Simple(
				command.get_program().to_string_lossy().into(),
			)),
		),
		MessageLevel::Debug,
	);

	o.display(
		MessageContents::Header("Launch command arguments".into()),
		MessageLevel::Debug,
	);

	for arg in command.get_args() {
		let arg = arg.to_string_lossy().to_string();
		let arg = if censor_secrets && arg.starts_with(SECRET_ARG_START) {
			format!("{SECRET_ARG_START}***")
		} else {
			arg
		};
		o.display(
			MessageContents::ListItem(Box::new(MessageContents::Simple(arg))),
			MessageLevel::Debug,
		);
	}

	o.display(
		MessageContents::Header("Launch command environment".into()),
		MessageLevel::Debug,
	);

	for (env, val) in command.get_envs() {
		let Some(val) = val else { continue };
		o.display(
			MessageContents::ListItem(Box::new(MessageContents::Property(
				env.to_string_lossy().into(),
				Box::new(MessageContents::Simple(val.to_string_lossy().into())),
			))),
			MessageLevel::Debug,
		);
	}

	if let Some(dir) = command.get_current_dir() {
		o.display(
			MessageContents::Property(
				"Launch command directory".into(),
				Box::new(MessageContents::Simple(dir.to_string_lossy().into())),
			),
			MessageLevel::Debug,
		);
	}
}

/// Encloses a command in multiple wrappers, with the last wrapper on the outside
fn create_wrapped_command(command: Command, wrappers: &[WrapperCommand]) -> Command {
	let mut cmd = command;
	for wrapper in wrappers {
		cmd = wrap_single(cmd, wrapper);
	}
	cmd
}

/// Wraps a single command in a wrapper
fn wrap_single(command: Command, wrapper: &WrapperCommand) -> Command {
	let mut new_cmd = Command::new(&wrapper.cmd);
	new_cmd.args(&wrapper.args);
	new_cmd.arg(command.get_program());
	new_cmd.args(command.get_args());
	new_cmd
}

#[cfg(test)]
mod tests {
	use starling_shared::output::{Collect, NoOp};

	use super::*;

	fn request(spawn: bool) -> LaunchRequest {
		LaunchRequest {
			classpath: "config:lib/server.jar".into(),
			class_name: "com.example.Server".into(),
			vm_args: "-Dlogback.configurationFile=warn.xml -Xmx1g -Dname='two words' ".into(),
			app_args: "-v classpath:app.cfg".into(),
			spawn,
		}
	}

	fn args_of(cmd: &Command) -> Vec<String> {
		cmd.get_args()
			.map(|x| x.to_string_lossy().to_string())
			.collect()
	}

	#[test]
	fn test_command_order() {
		let cmd = create_command(OsStr::new("java"), &request(false), &LaunchConfiguration::new())
			.unwrap();
		assert_eq!(cmd.get_program(), OsStr::new("java"));
		assert_eq!(
			args_of(&cmd),
			vec![
				"-Dlogback.configurationFile=warn.xml",
				"-Xmx1g",
				"-Dname=two words",
				"-cp",
				"config:lib/server.jar",
				"com.example.Server",
				"-v",
				"classpath:app.cfg",
			]
		);
	}

	#[test]
	fn test_empty_classpath_is_omitted() {
		let mut request = request(false);
		request.classpath = String::new();
		let cmd =
			create_command(OsStr::new("java"), &request, &LaunchConfiguration::new()).unwrap();
		assert!(!args_of(&cmd).contains(&"-cp".to_string()));
	}

	#[test]
	fn test_unbalanced_quotes() {
		let mut request = request(false);
		request.vm_args = "-Dname='oops ".into();
		let err = create_command(OsStr::new("java"), &request, &LaunchConfiguration::new())
			.unwrap_err();
		assert!(matches!(err, LaunchError::ArgumentBuild(..)));
	}

	#[test]
	fn test_split_args() {
		assert_eq!(split_args("").unwrap(), Vec::<String>::new());
		assert_eq!(split_args("  -Xmx1g \t -Da=b  ").unwrap(), vec!["-Xmx1g", "-Da=b"]);
		assert_eq!(
			split_args(r#"-Dname="two words" -Dx='it"s'"#).unwrap(),
			vec!["-Dname=two words", "-Dx=it\"s"]
		);
		assert_eq!(split_args(r#"a "" b"#).unwrap(), vec!["a", "", "b"]);
		assert_eq!(split_args(r#"pre"mid dle"post"#).unwrap(), vec!["premid dlepost"]);
		assert!(matches!(
			split_args("-Dname=\"oops"),
			Err(LaunchError::ArgumentBuild(..))
		));
	}

	#[test]
	fn test_backslash_paths_kept() {
		let request = LaunchRequest {
			classpath: String::new(),
			class_name: "Main".into(),
			vm_args: r"-Dlogback.configurationFile=C:\logs\custom.xml ".into(),
			app_args: r"file:C:\srv\app.ini".into(),
			spawn: false,
		};
		let cmd =
			create_command(OsStr::new("java"), &request, &LaunchConfiguration::new()).unwrap();
		assert_eq!(
			args_of(&cmd),
			vec![
				r"-Dlogback.configurationFile=C:\logs\custom.xml",
				"Main",
				r"file:C:\srv\app.ini",
			]
		);
	}

	#[test]
	fn test_wrappers_and_environment() {
		let config = LaunchConfiguration::builder()
			.wrapper(WrapperCommand {
				cmd: "nice".into(),
				args: vec!["-n".into(), "10".into()],
			})
			.wrapper(WrapperCommand {
				cmd: "taskset".into(),
				args: vec!["-c".into(), "0".into()],
			})
			.cwd(PathBuf::from("/srv/app"))
			.env([("APP_ENV".to_string(), "dev".to_string())].into())
			.build();
		let cmd = create_command(OsStr::new("java"), &request(false), &config).unwrap();

		assert_eq!(cmd.get_program(), OsStr::new("taskset"));
		let args = args_of(&cmd);
		assert_eq!(&args[..6], &["-c", "0", "nice", "-n", "10", "java"]);
		assert_eq!(args.last().map(String::as_str), Some("classpath:app.cfg"));
		assert_eq!(cmd.get_current_dir(), Some(std::path::Path::new("/srv/app")));
		assert_eq!(
			cmd.get_envs().next(),
			Some((OsStr::new("APP_ENV"), Some(OsStr::new("dev"))))
		);
	}

	#[test]
	fn test_secret_is_censored() {
		let mut request = request(true);
		request.vm_args.push_str("-Dcommandmonitor.secret=OpenGammaMojo ");
		let cmd =
			create_command(OsStr::new("java"), &request, &LaunchConfiguration::new()).unwrap();

		let mut o = Collect::new();
		output_launch_command(&cmd, true, &mut o);
		let lines = o.lines();
		assert!(lines.iter().any(|x| x == " - -Dcommandmonitor.secret=***"));
		assert!(!lines.iter().any(|x| x.contains("OpenGammaMojo")));

		let mut o = Collect::new();
		output_launch_command(&cmd, false, &mut o);
		assert!(o.lines().iter().any(|x| x.contains("OpenGammaMojo")));
	}

	#[cfg(unix)]
	#[test]
	fn test_launch_blocking_and_spawned() {
		let Ok(program) = which::which("true") else {
			return;
		};
		let mut launcher = JavaProcessLauncher::new(program, LaunchConfiguration::new());

		let outcome = launcher.launch(&request(false), &mut NoOp).unwrap();
		assert_eq!(outcome, LaunchOutcome::Exited { code: Some(0) });

		let mut o = Collect::new();
		let outcome = launcher.launch(&request(true), &mut o).unwrap();
		assert!(matches!(outcome, LaunchOutcome::Spawned { .. }));
		assert!(o.lines().iter().any(|x| x == "Server starting..."));
	}

	#[test]
	fn test_launch_missing_program() {
		let mut launcher = JavaProcessLauncher::new(
			PathBuf::from("/definitely/not/a/java"),
			LaunchConfiguration::new(),
		);
		let err = launcher.launch(&request(false), &mut NoOp).unwrap_err();
		assert!(matches!(err, LaunchError::Launch { .. }));
	}
}
