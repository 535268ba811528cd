use crate::resolve::ServerLaunchConfig;

/// System property that selects the server's logback configuration
pub const LOGBACK_PROPERTY: &str = "-Dlogback.configurationFile=";

/// VM property appended when the server is spawned, used by the server's command
/// monitor to authenticate control requests. The value is fixed and callers rely on it
pub const SPAWN_SECRET_ARG: &str = "-Dcommandmonitor.secret=OpenGammaMojo ";

/// Build the application arguments: the startup logging flag, if any, followed by
/// the config file
pub fn build_application_arguments(config: &ServerLaunchConfig) -> String {
	let mut out = String::new();
	if let Some(flag) = config.startup_logging.startup_flag() {
		out.push_str(flag);
		out.push(' ');
	}
	out.push_str(&config.config_file);

	out
}

/// Build the VM arguments: the logging property, then memory args, then extra args.
/// Later arguments can override earlier memory defaults, so the order must be kept.
/// Every part ends with a space
pub fn build_vm_arguments(config: &ServerLaunchConfig) -> String {
	let mut out = format!(
		"{LOGBACK_PROPERTY}{} ",
		config.server_logging.configuration_file()
	);
	if let Some(memory) = &config.vm_memory_args {
		out.push_str(memory);
		out.push(' ');
	}
	if let Some(args) = &config.vm_args {
		out.push_str(args);
		out.push(' ');
	}

	out
}

/// The arguments for a launch, ready to give to a launcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchArguments {
	/// The class to run
	pub class_name: String,
	/// The VM argument string, including the spawn secret when spawning
	pub vm_args: String,
	/// The application argument string
	pub app_args: String,
	/// The command line shown to the user. This never includes the spawn secret
	pub command_line: String,
	/// Whether the process is detached
	pub spawn: bool,
}

/// Build and compose all of the arguments for a launch
pub fn build_launch_arguments(config: &ServerLaunchConfig, spawn: bool) -> LaunchArguments {
	let app_args = build_application_arguments(config);
	let mut vm_args = build_vm_arguments(config);
	let command_line = format!("{vm_args} {} {app_args}", config.class_name);
	if spawn {
		vm_args.push_str(SPAWN_SECRET_ARG);
	}

	LaunchArguments {
		class_name: config.class_name.clone(),
		vm_args,
		app_args,
		command_line,
		spawn,
	}
}

#[cfg(test)]
mod tests {
	use crate::logging::{LogLevel, ServerLogging};

	use super::*;

	fn config() -> ServerLaunchConfig {
		ServerLaunchConfig {
			config: None,
			class_name: "com.example.Server".into(),
			config_file: "classpath:app.cfg".into(),
			startup_logging: LogLevel::Warn,
			server_logging: ServerLogging::Level(LogLevel::Warn),
			vm_memory_args: Some("-Xmx1g".into()),
			vm_args: None,
		}
	}

	#[test]
	fn test_application_arguments() {
		let cases = [
			(LogLevel::Error, "-q classpath:app.cfg"),
			(LogLevel::Warn, "classpath:app.cfg"),
			(LogLevel::Info, "classpath:app.cfg"),
			(LogLevel::Debug, "-v classpath:app.cfg"),
		];
		for (level, expected) in cases {
			let config = ServerLaunchConfig {
				startup_logging: level,
				..config()
			};
			assert_eq!(build_application_arguments(&config), expected);
		}
	}

	#[test]
	fn test_vm_arguments_for_levels() {
		let cases = [
			(LogLevel::Error, "error"),
			(LogLevel::Warn, "warn"),
			(LogLevel::Info, "info"),
			(LogLevel::Debug, "debug"),
		];
		for (level, name) in cases {
			let config = ServerLaunchConfig {
				server_logging: ServerLogging::Level(level),
				vm_memory_args: None,
				..config()
			};
			assert_eq!(
				build_vm_arguments(&config),
				format!("-Dlogback.configurationFile=com/opengamma/util/{name}-logback.xml ")
			);
		}
	}

	#[test]
	fn test_vm_arguments_custom_file_and_order() {
		let config = ServerLaunchConfig {
			server_logging: ServerLogging::File("/custom/path.xml".into()),
			vm_args: Some("-Xmx2g -Dfoo=bar".into()),
			..config()
		};
		let args = build_vm_arguments(&config);
		assert_eq!(
			args,
			"-Dlogback.configurationFile=/custom/path.xml -Xmx1g -Xmx2g -Dfoo=bar "
		);
		assert!(args
			.split(' ')
			.any(|x| x == "-Dlogback.configurationFile=/custom/path.xml"));
	}

	#[test]
	fn test_compose_without_spawn() {
		let args = build_launch_arguments(&config(), false);
		assert_eq!(args.class_name, "com.example.Server");
		assert!(!args.vm_args.contains("commandmonitor.secret"));
		assert_eq!(
			args.command_line,
			concat!(
				"-Dlogback.configurationFile=com/opengamma/util/warn-logback.xml -Xmx1g ",
				" com.example.Server classpath:app.cfg"
			)
		);
	}

	#[test]
	fn test_compose_with_spawn() {
		let args = build_launch_arguments(&config(), true);
		assert!(args.spawn);
		assert!(args
			.vm_args
			.ends_with("-Xmx1g -Dcommandmonitor.secret=OpenGammaMojo "));
		assert!(!args.command_line.contains("commandmonitor.secret"));
	}
}
