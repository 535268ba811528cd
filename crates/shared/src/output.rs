use serde::{Deserialize, Serialize};

/// Trait for a type that can output information about starling processes
pub trait StarlingOutput {
	/// Base function for a simple message. Used as a fallback
	fn display_text(&mut self, text: String, level: MessageLevel);

	/// Function to display a message to the user
	fn display_message(&mut self, message: Message) {
		self.display_text(message.contents.default_format(), message.level);
	}

	/// Convenience function to remove the need to construct a message
	fn display(&mut self, contents: MessageContents, level: MessageLevel) {
		self.display_message(Message { contents, level })
	}

	/// Start a process of multiple messages. Implementations can use this to replace a line
	/// multiple times
	fn start_process(&mut self) {}

	/// End an existing process
	fn end_process(&mut self) {}
}

/// A message supplied to the output
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Message {
	/// The contents of the message
	pub contents: MessageContents,
	/// The printing level of the message
	pub level: MessageLevel,
}

/// Contents of a message. Different types represent different formatting
#[non_exhaustive]
#[derive(Clone, Debug, Deserialize, Serialize)]
pub enum MessageContents {
	/// Simple message with no formatting
	Simple(String),
	/// A warning to the user
	Warning(String),
	/// An error
	Error(String),
	/// A success / finish message
	Success(String),
	/// A key-value property
	Property(String, Box<MessageContents>),
	/// A header / big message
	Header(String),
	/// An start of some long running process. Usually ends with ...
	StartProcess(String),
	/// An item in an unordered list
	ListItem(Box<MessageContents>),
	/// Text that can be copied, such as a full command line
	Copyable(String),
}

impl MessageContents {
	/// Message formatting for the default implementation
	pub fn default_format(self) -> String {
		match self {
			MessageContents::Simple(text)
			| MessageContents::Success(text)
			| MessageContents::Copyable(text) => text,
			MessageContents::Warning(text) => format!("Warning: {text}"),
			MessageContents::Error(text) => format!("Error: {text}"),
			MessageContents::Property(key, value) => {
				format!("{key}: {}", value.default_format())
			}
			MessageContents::Header(text) => text.to_uppercase(),
			MessageContents::StartProcess(text) => format!("{text}..."),
			MessageContents::ListItem(item) => format!(" - {}", item.default_format()),
		}
	}
}

/// The level of logging that a message has
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageLevel {
	/// Messages that should always be displayed
	Important,
	/// Messages that can be displayed but are not required
	Extra,
	/// Debug-level messages. Good for logging but should not be displayed to
	/// the user unless they ask
	Debug,
	/// Very Debug-level messages. Should only be used for logging
	Trace,
}

impl MessageLevel {
	/// Checks if this level is at least another level
	pub fn at_least(&self, other: &Self) -> bool {
		match &self {
			Self::Important => matches!(
				other,
				Self::Important | Self::Extra | Self::Debug | Self::Trace
			),
			Self::Extra => matches!(other, Self::Extra | Self::Debug | Self::Trace),
			Self::Debug => matches!(other, Self::Debug | Self::Trace),
			Self::Trace => matches!(other, Self::Trace),
		}
	}
}

/// Dummy StarlingOutput that doesn't print anything
pub struct NoOp;

impl StarlingOutput for NoOp {
	fn display_text(&mut self, _text: String, _level: MessageLevel) {}
}

/// StarlingOutput that keeps every message it is given. Useful for inspecting
/// what a routine reported
#[derive(Debug, Default)]
pub struct Collect {
	/// The messages that were displayed, in order
	pub messages: Vec<Message>,
}

impl Collect {
	/// Create a new empty collector
	pub fn new() -> Self {
		Self::default()
	}

	/// Get the default formatting of all collected messages
	pub fn lines(&self) -> Vec<String> {
		self.messages
			.iter()
			.map(|x| x.contents.clone().default_format())
			.collect()
	}
}

impl StarlingOutput for Collect {
	fn display_text(&mut self, text: String, level: MessageLevel) {
		self.messages.push(Message {
			contents: MessageContents::Simple(text),
			level,
		});
	}

	fn display_message(&mut self, message: Message) {
		self.messages.push(message);
	}
}

/// RAII struct that opens and closes an output process
pub struct OutputProcess<'a, O: StarlingOutput>(pub &'a mut O);

impl<'a, O> OutputProcess<'a, O>
where
	O: StarlingOutput,
{
	/// Create a new OutputProcess from a StarlingOutput
	pub fn new(o: &'a mut O) -> Self {
		o.start_process();
		Self(o)
	}
}

impl<'a, O> Drop for OutputProcess<'a, O>
where
	O: StarlingOutput,
{
	fn drop(&mut self) {
		self.0.end_process();
	}
}
