use std::io::Write;
use std::{fs::File, path::PathBuf};

use anyhow::Context;
use color_print::{cformat, cstr};
use starling::io::paths::Paths;
use starling::shared::output::{Message, MessageContents, MessageLevel, StarlingOutput};
use starling::shared::util::print::ReplPrinter;
use starling::shared::util::utc_timestamp;

/// A nice colored bullet point for terminal output
pub const HYPHEN_POINT: &str = cstr!("<k!> - </k!>");

/// Terminal StarlingOutput that also writes everything to a log file
pub struct TerminalOutput {
	printer: ReplPrinter,
	level: MessageLevel,
	in_process: bool,
	log_file: File,
	latest_log_file: File,
}

impl StarlingOutput for TerminalOutput {
	fn display_text(&mut self, text: String, level: MessageLevel) {
		let _ = self.log_message(&text, level);
		self.display_text_impl(text, level);
	}

	fn display_message(&mut self, message: Message) {
		let _ = self.log_message(
			&format_message_log(message.contents.clone()),
			message.level,
		);
		self.display_text_impl(format_message(message.contents), message.level);
	}

	fn start_process(&mut self) {
		if self.in_process {
			self.printer.newline();
		} else {
			self.in_process = true;
		}
	}

	fn end_process(&mut self) {
		if self.in_process {
			self.printer.newline();
		}
		self.in_process = false;
	}
}

impl TerminalOutput {
	pub fn new(paths: &Paths) -> anyhow::Result<Self> {
		let path = get_log_file_path(paths).context("Failed to get log file path")?;
		let file = File::create(path).context("Failed to open log file")?;
		let latest_file = File::create(get_latest_log_file_path(paths))
			.context("Failed to open latest.txt log file")?;
		Ok(Self {
			printer: ReplPrinter::new(true),
			level: MessageLevel::Important,
			in_process: false,
			log_file: file,
			latest_log_file: latest_file,
		})
	}

	/// Display text
	fn display_text_impl(&mut self, text: String, level: MessageLevel) {
		if !level.at_least(&self.level) {
			return;
		}

		self.printer.print(&text);
		if !self.in_process {
			self.printer.newline();
		}
	}

	/// Log a message to the log file
	pub fn log_message(&mut self, text: &str, level: MessageLevel) -> anyhow::Result<()> {
		let level_indicator = match level {
			MessageLevel::Important => "I",
			MessageLevel::Extra => "E",
			MessageLevel::Debug => "D",
			MessageLevel::Trace => "T",
		};
		writeln!(self.log_file, "[{level_indicator}] {text}")?;
		writeln!(self.latest_log_file, "[{level_indicator}] {text}")?;

		Ok(())
	}

	/// Set the log level of the output
	pub fn set_log_level(&mut self, level: MessageLevel) {
		self.level = level;
	}
}

/// Formatting for messages in the terminal
fn format_message(contents: MessageContents) -> String {
	match contents {
		MessageContents::Simple(text) => text,
		MessageContents::Warning(text) => cformat!("<y><s>Warning:</> {}", text),
		MessageContents::Error(text) => cformat!("<r><s,u>Error:</> {}", text),
		MessageContents::Success(text) => cformat!("<g>{}", add_period(text)),
		MessageContents::Property(key, value) => {
			cformat!("<s>{}:</> {}", key, format_message(*value))
		}
		MessageContents::Header(text) => cformat!("<s>{}", text),
		MessageContents::StartProcess(text) => cformat!("{text}..."),
		MessageContents::ListItem(item) => HYPHEN_POINT.to_string() + &format_message(*item),
		MessageContents::Copyable(text) => cformat!("<u>{}", text),
		contents => contents.default_format(),
	}
}

/// Formatting for messages in the log file
fn format_message_log(contents: MessageContents) -> String {
	match contents {
		MessageContents::Simple(text) => text,
		MessageContents::Warning(text) => format!("[WARN] {}", text),
		MessageContents::Error(text) => format!("[ERR] {}", text),
		MessageContents::Success(text) => format!("[SUCCESS] {}", add_period(text)),
		MessageContents::Property(key, value) => {
			format!("{}: {}", key, format_message_log(*value))
		}
		MessageContents::Header(text) => format!("### {} ###", text),
		MessageContents::ListItem(item) => " - ".to_string() + &format_message_log(*item),
		contents => contents.default_format(),
	}
}

/// Get the path to a log file
fn get_log_file_path(paths: &Paths) -> anyhow::Result<PathBuf> {
	Ok(paths.logs.join(format!("log-{}.txt", utc_timestamp()?)))
}

/// Get the path to the latest log file
fn get_latest_log_file_path(paths: &Paths) -> PathBuf {
	paths.logs.join("latest.txt")
}

/// Adds a period to the end of a string if it isn't punctuated already
fn add_period(string: String) -> String {
	if string.ends_with(['.', ',', ';', ':', '!', '?']) {
		string
	} else {
		string + "."
	}
}
