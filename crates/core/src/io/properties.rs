use std::collections::HashMap;

use itertools::Itertools;
use thiserror::Error;

/// Failure to parse a properties file
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PropertiesError {
	/// A \uXXXX escape did not have four hex digits
	#[error("Malformed \\uXXXX escape in entry starting on line {line}")]
	MalformedUnicodeEscape {
		/// The line number, starting at 1
		line: usize,
	},
}

/// A set of key-value pairs read from a Java properties file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
	entries: HashMap<String, String>,
}

impl Properties {
	/// Create an empty set of properties
	pub fn new() -> Self {
		Self::default()
	}

	/// Parse properties from raw file bytes. Properties files are ISO-8859-1 encoded,
	/// so every byte maps directly to a character
	pub fn parse(bytes: &[u8]) -> Result<Self, PropertiesError> {
		let text: String = bytes.iter().map(|x| *x as char).collect();
		Self::parse_str(&text)
	}

	/// Parse properties from text
	pub fn parse_str(text: &str) -> Result<Self, PropertiesError> {
		let mut out = Self::new();
		for (line_num, line) in logical_lines(text) {
			let (key, value) = split_entry(&line);
			let malformed = PropertiesError::MalformedUnicodeEscape { line: line_num };
			let key = unescape(key).ok_or(malformed.clone())?;
			let value = unescape(value).ok_or(malformed)?;
			out.entries.insert(key, value);
		}

		Ok(out)
	}

	/// Get the value of a key
	pub fn get(&self, key: &str) -> Option<&str> {
		self.entries.get(key).map(|x| x.as_str())
	}

	/// Iterate over the entries, sorted by key
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries
			.iter()
			.sorted_by_key(|x| x.0)
			.map(|(key, value)| (key.as_str(), value.as_str()))
	}
}

fn is_blank(c: char) -> bool {
	matches!(c, ' ' | '\t' | '\x0c')
}

/// Join natural lines into logical entries, dropping comments and blank lines.
/// Each entry is paired with the line number it started on
fn logical_lines(text: &str) -> Vec<(usize, String)> {
	let mut out = Vec::new();
	let mut current: Option<(usize, String)> = None;

	for (i, line) in text.lines().enumerate() {
		let trimmed = line.trim_start_matches(is_blank);
		let continuing = current.is_some();
		if !continuing && (trimmed.is_empty() || trimmed.starts_with(['#', '!'])) {
			continue;
		}

		let trailing = trimmed.chars().rev().take_while(|x| *x == '\\').count();
		let continues = trailing % 2 == 1;
		let content = if continues {
			&trimmed[..trimmed.len() - 1]
		} else {
			trimmed
		};

		let (start, mut buf) = current.take().unwrap_or((i + 1, String::new()));
		buf.push_str(content);
		if continues {
			current = Some((start, buf));
		} else {
			out.push((start, buf));
		}
	}

	// A continuation on the last line just ends the entry
	if let Some(entry) = current {
		out.push(entry);
	}

	out
}

/// Split a logical line into its raw key and value
fn split_entry(line: &str) -> (&str, &str) {
	let mut escaped = false;
	let mut key_end = line.len();
	for (i, c) in line.char_indices() {
		if escaped {
			escaped = false;
			continue;
		}
		if c == '\\' {
			escaped = true;
			continue;
		}
		if c == '=' || c == ':' || is_blank(c) {
			key_end = i;
			break;
		}
	}

	let key = &line[..key_end];
	let mut rest = line[key_end..].trim_start_matches(is_blank);
	if let Some(stripped) = rest.strip_prefix(['=', ':']) {
		rest = stripped.trim_start_matches(is_blank);
	}

	(key, rest)
}

/// Process escape sequences. Returns None if a unicode escape is malformed
fn unescape(raw: &str) -> Option<String> {
	let mut out = String::with_capacity(raw.len());
	let mut chars = raw.chars();
	while let Some(c) = chars.next() {
		if c != '\\' {
			out.push(c);
			continue;
		}

		let Some(escaped) = chars.next() else {
			break;
		};
		match escaped {
			't' => out.push('\t'),
			'n' => out.push('\n'),
			'r' => out.push('\r'),
			'f' => out.push('\x0c'),
			'u' => {
				let hex: String = chars.by_ref().take(4).collect();
				if hex.len() != 4 || !hex.chars().all(|x| x.is_ascii_hexdigit()) {
					return None;
				}
				let code = u32::from_str_radix(&hex, 16).ok()?;
				out.push(char::from_u32(code)?);
			}
			other => out.push(other),
		}
	}

	Some(out)
}
