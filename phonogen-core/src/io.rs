use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::{env, fs, io};

/// Extension of engine snapshot files.
pub(crate) const SNAPSHOT_EXTENSION: &str = "bin";

/// Reads a whole binary file into memory.
pub(crate) fn read_bytes<P: AsRef<Path>>(filename: P) -> io::Result<Vec<u8>> {
	let mut contents = Vec::new();
	File::open(filename)?.read_to_end(&mut contents)?;
	Ok(contents)
}

/// Writes `bytes` to `filename`, replacing any previous content.
///
/// The parent directory is created when missing.
pub(crate) fn write_bytes<P: AsRef<Path>>(filename: P, bytes: &[u8]) -> io::Result<()> {
	let path = filename.as_ref();
	if let Some(parent) = path.parent() {
		if !parent.as_os_str().is_empty() {
			fs::create_dir_all(parent)?;
		}
	}
	let mut file = File::create(path)?;
	file.write_all(bytes)?;
	file.flush()
}

/// Builds the snapshot path of a named engine inside a folder.
///
/// Example:
/// `data` + `"metropolitan_french"` → `data/metropolitan_french.bin`
pub(crate) fn snapshot_path<P: AsRef<Path>>(dir: P, name: &str) -> PathBuf {
	let mut output = PathBuf::from(dir.as_ref());
	output.push(name);
	output.set_extension(SNAPSHOT_EXTENSION);
	output
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub(crate) fn normalize_folder<P: AsRef<Path>>(input: P) -> PathBuf {
	let input = input.as_ref();
	if input == Path::new(".") || input == Path::new("./") {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		input.to_path_buf()
	}
}
