use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use color_print::cprintln;
use itertools::Itertools;
use starling::config::find_launcher_config;
use starling::core::launch::LaunchOutcome;
use starling::core::resolve::RawLaunchConfig;
use starling::launch::{prepare_launch, LaunchParameters};
use starling::shared::output::{MessageContents, MessageLevel, StarlingOutput};

use super::CmdData;
use crate::output::HYPHEN_POINT;

/// Options shared by every command that launches a server
#[derive(Debug, Args)]
pub struct ServerArgs {
	/// Classpath directory containing starling-maven-plugin.properties, whose
	/// settings override the other options
	#[arg(long)]
	pub config: Option<String>,
	/// The class to run
	#[arg(long)]
	pub class_name: Option<String>,
	/// The configuration file to give to the server
	#[arg(long)]
	pub config_file: Option<String>,
	/// Startup logging level: ERROR, WARN, INFO or DEBUG
	#[arg(long)]
	pub startup_logging: Option<String>,
	/// Server logging level (ERROR, WARN, INFO or DEBUG) or a logback config file
	#[arg(long)]
	pub server_logging: Option<String>,
	/// Memory and GC arguments for the VM
	#[arg(long, allow_hyphen_values = true)]
	pub vm_memory_args: Option<String>,
	/// Additional arguments for the VM
	#[arg(long, allow_hyphen_values = true)]
	pub vm_args: Option<String>,
	/// Classpath entries. Glob patterns like lib/*.jar are expanded
	#[arg(short, long)]
	pub classpath: Vec<String>,
	/// Path to the Java executable
	#[arg(long)]
	pub java: Option<PathBuf>,
	/// Working directory for the server
	#[arg(long)]
	pub dir: Option<PathBuf>,
	/// Launcher config file. Defaults to starling.json in the current directory
	#[arg(long)]
	pub launcher_config: Option<PathBuf>,
}

impl ServerArgs {
	/// Settings given directly on the command line
	fn overrides(&self) -> RawLaunchConfig {
		RawLaunchConfig {
			config: self.config.clone(),
			class_name: self.class_name.clone(),
			config_file: self.config_file.clone(),
			startup_logging: self.startup_logging.clone(),
			server_logging: self.server_logging.clone(),
			vm_memory_args: self.vm_memory_args.clone(),
			vm_args: self.vm_args.clone(),
		}
	}

	/// Gather the launch parameters, reading the launcher config if there is one
	fn into_params(self) -> anyhow::Result<LaunchParameters> {
		let cwd = std::env::current_dir().context("Failed to get current directory")?;
		let launcher_config = find_launcher_config(self.launcher_config.as_deref(), &cwd)
			.context("Failed to read launcher config")?
			.unwrap_or_default();

		Ok(LaunchParameters {
			launcher_config,
			overrides: self.overrides(),
			classpath: self.classpath,
			java: self.java,
			dir: self.dir,
		})
	}
}

/// Launch the server, either waiting for it or spawning it
pub fn launch(server: ServerArgs, spawn: bool, data: &mut CmdData) -> anyhow::Result<()> {
	let params = server.into_params()?;
	let prepared = prepare_launch(params, &mut data.output)?;
	let outcome = prepared.launch(spawn, &mut data.output)?;

	match outcome {
		LaunchOutcome::Spawned { pid } => data.output.display(
			MessageContents::Success(format!("Server started with PID {pid}")),
			MessageLevel::Important,
		),
		LaunchOutcome::Exited { code } => data.output.display(
			MessageContents::Property(
				"Server exited with code".into(),
				Box::new(MessageContents::Simple(
					code.map(|x| x.to_string()).unwrap_or("none".into()),
				)),
			),
			MessageLevel::Extra,
		),
	}

	Ok(())
}

/// Print the resolved arguments without launching
pub fn print_args(server: ServerArgs, spawn: bool, data: &mut CmdData) -> anyhow::Result<()> {
	let params = server.into_params()?;
	let prepared = prepare_launch(params, &mut data.output)?;
	let args = prepared.arguments(spawn);

	cprintln!("<s>Class:</> {}", args.class_name);
	cprintln!("<s>Config file:</> {}", prepared.config.config_file);
	cprintln!("<s>VM arguments:</> {}", args.vm_args.trim_end());
	cprintln!("<s>Application arguments:</> {}", args.app_args);
	cprintln!("<s>Classpath:</>");
	for entry in prepared.classpath.get_entries() {
		println!("{HYPHEN_POINT}{entry}");
	}
	cprintln!("<s>Command:</> {}", args.command_line);
	data.output.display(
		MessageContents::Property(
			"Classpath".into(),
			Box::new(MessageContents::Simple(
				prepared.classpath.get_entries().iter().join(", "),
			)),
		),
		MessageLevel::Debug,
	);

	Ok(())
}

#[cfg(test)]
mod tests {
	use clap::Parser;

	use super::*;

	#[derive(Debug, Parser)]
	struct TestCli {
		#[command(flatten)]
		server: ServerArgs,
	}

	#[test]
	fn test_server_args() {
		let cli = TestCli::try_parse_from([
			"starling",
			"--config-file",
			"fullstack.ini",
			"--vm-args",
			"-Dfoo=bar -Xss4m",
			"--vm-memory-args",
			"-Xmx2g",
			"-c",
			"config",
			"--classpath",
			"lib/*.jar",
			"--startup-logging",
			"DEBUG",
		])
		.unwrap();

		let raw = cli.server.overrides();
		assert_eq!(raw.config_file.as_deref(), Some("fullstack.ini"));
		assert_eq!(raw.vm_args.as_deref(), Some("-Dfoo=bar -Xss4m"));
		assert_eq!(raw.vm_memory_args.as_deref(), Some("-Xmx2g"));
		assert_eq!(raw.startup_logging.as_deref(), Some("DEBUG"));
		assert_eq!(raw.server_logging, None);
		assert_eq!(cli.server.classpath, vec!["config", "lib/*.jar"]);
	}

	#[test]
	fn test_explicit_launcher_config() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("server.json");
		std::fs::write(&path, r#"{"classpath": "config", "configFile": "a.ini"}"#).unwrap();

		let cli = TestCli::try_parse_from([
			"starling",
			"--launcher-config",
			&path.to_string_lossy(),
			"-c",
			"extra",
		])
		.unwrap();
		let params = cli.server.into_params().unwrap();
		assert_eq!(params.launcher_config.server.config_file.as_deref(), Some("a.ini"));
		assert_eq!(params.classpath, vec!["extra"]);
	}
}
