use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use zip::result::ZipError;
use zip::ZipArchive;

use crate::resolve::ResourceLoader;

use super::classpath::Classpath;

/// Finds resources by searching classpath entries in order, like a Java class loader.
/// Directory entries are searched for the resource file and `.jar` / `.zip`
/// entries are searched for an archive member with the resource name
#[derive(Debug, Clone)]
pub struct ClasspathResourceLoader {
	entries: Vec<PathBuf>,
}

impl ClasspathResourceLoader {
	/// Create a loader that searches the entries of a classpath
	pub fn new(classpath: &Classpath) -> Self {
		Self {
			entries: classpath.get_paths(),
		}
	}
}

impl ResourceLoader for ClasspathResourceLoader {
	fn read_resource(&self, name: &str) -> std::io::Result<Option<Vec<u8>>> {
		let name = name.trim_start_matches('/');
		for entry in &self.entries {
			let found = if entry.is_dir() {
				read_from_dir(entry, name)?
			} else if is_archive(entry) && entry.is_file() {
				read_from_archive(entry, name)?
			} else {
				None
			};

			if found.is_some() {
				return Ok(found);
			}
		}

		Ok(None)
	}
}

/// Checks if a classpath entry is an archive based on its extension
fn is_archive(path: &Path) -> bool {
	path.extension()
		.is_some_and(|x| x.eq_ignore_ascii_case("jar") || x.eq_ignore_ascii_case("zip"))
}

/// Look for a resource in a classpath directory
fn read_from_dir(dir: &Path, name: &str) -> std::io::Result<Option<Vec<u8>>> {
	let path = name.split('/').fold(dir.to_path_buf(), |acc, x| acc.join(x));
	if !path.is_file() {
		return Ok(None);
	}

	std::fs::read(path).map(Some)
}

/// Look for a resource inside a jar or zip archive
fn read_from_archive(archive: &Path, name: &str) -> std::io::Result<Option<Vec<u8>>> {
	let file = BufReader::new(File::open(archive)?);
	let mut archive = ZipArchive::new(file).map_err(std::io::Error::other)?;
	let mut member = match archive.by_name(name) {
		Ok(member) => member,
		Err(ZipError::FileNotFound) => return Ok(None),
		Err(e) => return Err(std::io::Error::other(e)),
	};

	let mut out = Vec::new();
	member.read_to_end(&mut out)?;

	Ok(Some(out))
}
