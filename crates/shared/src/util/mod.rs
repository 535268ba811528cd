/// Printing and output utilities
pub mod print;

use std::time::{SystemTime, UNIX_EPOCH};

use cfg_match::cfg_match;
use serde::Deserialize;

cfg_match! {
	target_os = "windows" => {
		/// The separator for entries in a Java classpath on this platform
		pub const CLASSPATH_SEP: char = ';';
	}
	_ => {
		/// The separator for entries in a Java classpath on this platform
		pub const CLASSPATH_SEP: char = ':';
	}
}

cfg_match! {
	target_os = "windows" => {
		/// Filename of the Java executable on this platform
		pub const JAVA_EXECUTABLE: &str = "java.exe";
	}
	_ => {
		/// Filename of the Java executable on this platform
		pub const JAVA_EXECUTABLE: &str = "java";
	}
}

/// Merges two options together with the right one taking precedence
///
/// Right takes precedence when they are both some
/// ```
/// use starling_shared::util::merge_options;
///
/// let x = Some(7);
/// let y = Some(8);
/// assert_eq!(merge_options(x, y), Some(8));
/// ```
/// Uses left because right is none:
/// ```
/// use starling_shared::util::merge_options;
///
/// let x = Some(5);
/// let y = None;
/// assert_eq!(merge_options(x, y), Some(5));
/// ```
pub fn merge_options<T>(left: Option<T>, right: Option<T>) -> Option<T> {
	if right.is_some() {
		right
	} else {
		left
	}
}

/// Gets the current UTC timestamp in seconds
pub fn utc_timestamp() -> anyhow::Result<u64> {
	Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs())
}

/// Utility enum for deserialization that lets you do a list that can be one item
/// without the braces
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum DeserListOrSingle<T> {
	/// Only one item, specified without braces
	Single(T),
	/// A list of items, specified with braces
	List(Vec<T>),
}

impl<T> Default for DeserListOrSingle<T> {
	fn default() -> Self {
		Self::List(Vec::default())
	}
}

impl<T> DeserListOrSingle<T> {
	/// Iterates over the items
	pub fn iter(&self) -> impl Iterator<Item = &T> {
		match self {
			Self::Single(val) => std::slice::from_ref(val).iter(),
			Self::List(list) => list.iter(),
		}
	}

	/// Checks if there are no items
	pub fn is_empty(&self) -> bool {
		match self {
			Self::Single(..) => false,
			Self::List(list) => list.is_empty(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_list_or_single_iter() {
		let single = DeserListOrSingle::Single("foo");
		assert_eq!(single.iter().collect::<Vec<_>>(), vec![&"foo"]);
		assert!(!single.is_empty());

		let list = DeserListOrSingle::List(vec!["a", "b"]);
		assert_eq!(list.iter().count(), 2);
		assert!(DeserListOrSingle::<String>::default().is_empty());
	}

	#[test]
	fn test_merge_options_both_none() {
		assert_eq!(merge_options::<u8>(None, None), None);
	}
}
