mod commands;
mod output;

use commands::run_cli;

fn main() -> anyhow::Result<()> {
	run_cli()
}
