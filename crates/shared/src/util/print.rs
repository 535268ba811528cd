use std::io::{Stdout, Write};

/// Used to print text that is replaced
#[derive(Debug)]
pub struct ReplPrinter {
	stdout: Stdout,
	chars_written: usize,
	finished: bool,
	verbose: bool,
}

impl ReplPrinter {
	/// Make a new ReplPrinter with a verbosity option.
	/// If that option is false, then nothing will be printed
	pub fn new(verbose: bool) -> Self {
		Self {
			stdout: std::io::stdout(),
			chars_written: 0,
			finished: false,
			verbose,
		}
	}

	/// Print text to the output, replacing the current line
	pub fn print(&mut self, text: &str) {
		if !self.verbose {
			return;
		}

		let _ = write!(self.stdout, "\r{text}");

		let written = get_terminal_width(text);

		// Clear leftover characters from the last print
		let clear_count = self.chars_written.saturating_sub(written);
		let _ = write!(self.stdout, "{}", " ".repeat(clear_count));

		self.chars_written = written;
		let _ = self.stdout.flush();
	}

	/// Print text on a new line
	pub fn println(&mut self, text: &str) {
		self.chars_written = 0;
		let _ = writeln!(self.stdout);
		self.print(text);
	}

	/// Finish printing and make a newline
	pub fn finish(&mut self) {
		if self.finished {
			return;
		}
		if self.chars_written != 0 {
			self.newline();
		}
		self.finished = true;
	}

	/// Make a line break
	pub fn newline(&mut self) {
		self.println("");
	}
}

impl Drop for ReplPrinter {
	fn drop(&mut self) {
		self.finish();
	}
}

/// Calculate how many characters long something will appear to be in the terminal,
/// skipping over escape sequences
pub fn get_terminal_width(text: &str) -> usize {
	let esc = 0o33 as char;
	let mut out = 0;
	let mut in_escape = false;
	for c in text.chars() {
		if c == esc {
			in_escape = true;
		}

		if !in_escape {
			out += 1;
		}

		if in_escape && c == 'm' {
			in_escape = false;
		}
	}
	out
}
