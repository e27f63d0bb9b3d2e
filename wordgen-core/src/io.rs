use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::LoadError;

/// Dictionary file layout: a list of entries, each with a written form.
///
/// Extra fields (translations, tags, ...) are ignored.
#[derive(Deserialize)]
struct DictionaryFile {
	words: Vec<DictionaryWord>,
}

#[derive(Deserialize)]
struct DictionaryWord {
	entry: DictionaryEntry,
}

#[derive(Deserialize)]
struct DictionaryEntry {
	form: String,
}

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Splits on `\n` / `\r\n`
/// - Blank lines are dropped
pub fn read_file<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let contents = fs::read_to_string(filename)?;
	Ok(contents
		.lines()
		.map(str::trim)
		.filter(|line| !line.is_empty())
		.map(str::to_owned)
		.collect())
}

/// Parses a JSON dictionary and returns the written forms of its entries.
///
/// Forms containing a space (multi-word expressions) are skipped.
pub fn parse_dictionary(json: &str) -> Result<Vec<String>, serde_json::Error> {
	let file: DictionaryFile = serde_json::from_str(json)?;
	Ok(file
		.words
		.into_iter()
		.map(|word| word.entry.form)
		.filter(|form| !form.contains(' '))
		.collect())
}

/// Loads training words from a file.
///
/// `.json` files are parsed as dictionaries; anything else is read as one
/// word per line.
pub fn load_words<P: AsRef<Path>>(path: P) -> Result<Vec<String>, LoadError> {
	let path = path.as_ref();
	if path.extension().is_some_and(|ext| ext == "json") {
		let json = fs::read_to_string(path)?;
		Ok(parse_dictionary(&json)?)
	} else {
		Ok(read_file(path)?)
	}
}

/// Loads and concatenates the words of several files, in order.
///
/// In append mode the `existing` words come first, followed by the newly
/// loaded ones. Otherwise `existing` is discarded.
pub fn load_training_set<P: AsRef<Path>>(
	paths: &[P],
	existing: &[String],
	append: bool,
) -> Result<Vec<String>, LoadError> {
	let mut words = if append { existing.to_vec() } else { Vec::new() };
	for path in paths {
		words.extend(load_words(path)?);
	}
	Ok(words)
}

/// Path of the model cache stored next to a training file.
///
/// `data/words.txt` with `"bin"` gives `data/words.bin`.
pub(crate) fn cache_path<P: AsRef<Path>>(training_path: P, extension: &str) -> io::Result<PathBuf> {
	let training_path = training_path.as_ref();
	let stem = training_path.file_stem().ok_or_else(|| {
		io::Error::new(io::ErrorKind::InvalidInput, "Training path has no file name")
	})?;

	let mut cache = training_path.parent().map(Path::to_path_buf).unwrap_or_default();
	cache.push(stem);
	cache.set_extension(extension);
	Ok(cache)
}

/// Resolves the directory holding training files.
///
/// `"."` and `"./"` become the current working directory; anything else is
/// kept as given.
pub fn resolve_data_dir(dir: &str) -> PathBuf {
	match dir {
		"." | "./" => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
		_ => PathBuf::from(dir),
	}
}

/// Lists all files with one of the given extensions in a directory.
///
/// Returns file names only (no paths), sorted.
pub fn list_files<P: AsRef<Path>>(dir: P, extensions: &[&str]) -> io::Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();
		if !path.is_file() {
			continue;
		}
		let matches = path
			.extension()
			.and_then(|ext| ext.to_str())
			.is_some_and(|ext| extensions.contains(&ext));
		if matches {
			if let Some(name) = path.file_name() {
				files.push(name.to_string_lossy().to_string());
			}
		}
	}

	files.sort();
	Ok(files)
}
