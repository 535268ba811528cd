mod server;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use color_print::{cformat, cprintln};

use starling::io::paths::Paths;
use starling::shared::output::{MessageContents, MessageLevel, StarlingOutput};

use self::server::ServerArgs;

use super::output::TerminalOutput;

#[derive(Debug, Subcommand)]
pub enum Command {
	#[command(about = "Run the server in the foreground and wait for it to exit")]
	Run {
		#[command(flatten)]
		server: ServerArgs,
	},
	#[command(about = "Start the server in the background")]
	Start {
		#[command(flatten)]
		server: ServerArgs,
	},
	#[command(about = "Print the resolved launch command without running it")]
	Args {
		#[command(flatten)]
		server: ServerArgs,
		/// Show the arguments as they would be for a background start
		#[arg(long)]
		spawn: bool,
	},
	#[command(about = "Print the starling version")]
	Version,
}

#[derive(Debug, Parser)]
#[command(name = "starling")]
pub struct Cli {
	#[command(subcommand)]
	command: Command,
	#[arg(short, long)]
	debug: bool,
	#[arg(short = 'D', long)]
	trace: bool,
}

/// Run the command line interface
pub fn run_cli() -> anyhow::Result<()> {
	// Parse the CLI
	let cli = Cli::try_parse();
	if let Err(e) = &cli {
		if let clap::error::ErrorKind::DisplayHelp
		| clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
		| clap::error::ErrorKind::DisplayVersion = e.kind()
		{
			println!("{e}");
			return Ok(());
		} else {
			eprintln!("{}", cformat!("<r>{e}"));
			bail!("");
		}
	}
	let cli = cli?;

	// Prepare the command data
	let mut data = CmdData::new()?;
	let log_level = get_log_level(&cli);
	data.output.set_log_level(log_level);

	let res = match cli.command {
		Command::Run { server } => server::launch(server, false, &mut data),
		Command::Start { server } => server::launch(server, true, &mut data),
		Command::Args { server, spawn } => server::print_args(server, spawn, &mut data),
		Command::Version => {
			print_version();
			Ok(())
		}
	};

	if let Err(e) = &res {
		data.output.display(
			MessageContents::Error(format!("{e:?}")),
			MessageLevel::Important,
		);
	}

	res
}

/// Get the log level based on the debug options
fn get_log_level(cli: &Cli) -> MessageLevel {
	if cli.trace {
		MessageLevel::Trace
	} else if cli.debug {
		MessageLevel::Debug
	} else {
		MessageLevel::Important
	}
}

/// Data passed to commands
pub struct CmdData {
	pub output: TerminalOutput,
}

impl CmdData {
	pub fn new() -> anyhow::Result<Self> {
		let paths = Paths::new().context("Failed to set up system paths")?;
		let output = TerminalOutput::new(&paths).context("Failed to set up output")?;
		Ok(Self { output })
	}
}

/// Print the starling version
fn print_version() {
	let version = env!("CARGO_PKG_VERSION");
	cprintln!("CLI version: <g>{}</g>", version);
	cprintln!("starling version: <g>{}</g>", starling::VERSION);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_log_level_flags() {
		let cli = Cli::try_parse_from(["starling", "-d", "version"]).unwrap();
		assert_eq!(get_log_level(&cli), MessageLevel::Debug);
		let cli = Cli::try_parse_from(["starling", "--trace", "-d", "version"]).unwrap();
		assert_eq!(get_log_level(&cli), MessageLevel::Trace);
		let cli = Cli::try_parse_from(["starling", "version"]).unwrap();
		assert_eq!(get_log_level(&cli), MessageLevel::Important);
	}

	#[test]
	fn test_args_subcommand() {
		let cli = Cli::try_parse_from(["starling", "args", "--spawn", "--config-file", "a.ini"])
			.unwrap();
		let Command::Args { server, spawn } = cli.command else {
			panic!("Wrong subcommand parsed");
		};
		assert!(spawn);
		assert_eq!(server.config_file.as_deref(), Some("a.ini"));
	}
}
