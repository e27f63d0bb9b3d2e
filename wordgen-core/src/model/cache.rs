use std::fs;
use std::path::Path;

use log::{debug, warn};

use super::config::WordgenConfig;
use super::generator::{WordGenerator, build_model};
use super::strategy::Strategy;
use crate::error::LoadError;
use crate::io::{cache_path, load_words};

impl WordGenerator {
	/// Serializes the generator with `postcard` and writes it to `path`.
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), LoadError> {
		let bytes = postcard::to_stdvec(self)?;
		fs::write(path, bytes)?;
		Ok(())
	}

	/// Reads a generator previously written by [`WordGenerator::save`].
	///
	/// # Errors
	/// Fails on I/O or decoding errors, and if the stored configuration does
	/// not satisfy its invariants.
	pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
		let bytes = fs::read(path)?;
		let generator: WordGenerator = postcard::from_bytes(&bytes)?;
		generator.config().validate()?;
		Ok(generator)
	}
}

/// Loads a generator for a training file, using a binary cache when possible.
///
/// # Parameters
/// - `filepath`: word list (one word per line) or `.json` dictionary.
/// - `config`, `strategy`: requested model parameters.
///
/// # Behavior
/// - Looks for `<stem>.bin` next to `filepath`.
/// - Reuses it if it decodes and was built with the same strategy and config.
/// - Otherwise builds the model from `filepath` and (re)writes the cache.
pub fn load_or_build<P: AsRef<Path>>(
	filepath: P,
	config: WordgenConfig,
	strategy: Strategy,
) -> Result<WordGenerator, LoadError> {
	let filepath = filepath.as_ref();
	let binary_data_path = cache_path(filepath, "bin")?;

	if binary_data_path.exists() {
		match WordGenerator::load(&binary_data_path) {
			Ok(cached) if cached.strategy() == strategy && *cached.config() == config => {
				debug!("loaded cached model {}", binary_data_path.display());
				return Ok(cached);
			}
			Ok(_) => warn!(
				"cached model {} was built with other parameters, rebuilding",
				binary_data_path.display()
			),
			Err(e) => warn!("ignoring unreadable model cache {}: {}", binary_data_path.display(), e),
		}
	}

	let words = load_words(filepath)?;
	let generator = build_model(&words, config, strategy)?;
	generator.save(&binary_data_path)?;
	Ok(generator)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::io::tests::scratch_dir;
	use crate::tests::ZeroRng;

	#[test]
	fn save_then_load_keeps_generation_identical() {
		let dir = scratch_dir("save-load");
		let path = dir.join("model.bin");
		let generator = build_model(&["kalina", "toremu", "salika"], WordgenConfig::default(), Strategy::Pruned).unwrap();
		generator.save(&path).unwrap();

		let loaded = WordGenerator::load(&path).unwrap();
		assert_eq!(loaded.table(), generator.table());
		assert_eq!(loaded.prefix_extremes(), generator.prefix_extremes());
		assert_eq!(loaded.generate_with(&mut ZeroRng), generator.generate_with(&mut ZeroRng));
	}

	#[test]
	fn cache_is_reused_only_for_matching_parameters() {
		let dir = scratch_dir("load-or-build");
		let source = dir.join("words.txt");
		fs::write(&source, "kalina\ntoremu\n").unwrap();

		let first = load_or_build(&source, WordgenConfig::default(), Strategy::Normal).unwrap();
		assert!(dir.join("words.bin").exists());

		// Source changes are not picked up while the cache matches
		fs::write(&source, "sumera\n").unwrap();
		let cached = load_or_build(&source, WordgenConfig::default(), Strategy::Normal).unwrap();
		assert_eq!(cached.table(), first.table());

		// A different strategy forces a rebuild from the new source
		let rebuilt = load_or_build(&source, WordgenConfig::default(), Strategy::ReverseFrequency).unwrap();
		assert_eq!(rebuilt.strategy(), Strategy::ReverseFrequency);
		assert!(rebuilt.table().contains_key("sum"));
		assert!(!rebuilt.table().contains_key("kal"));
	}

	#[test]
	fn corrupt_cache_is_rebuilt() {
		let dir = scratch_dir("corrupt");
		let source = dir.join("words.txt");
		fs::write(&source, "kalina\n").unwrap();
		fs::write(dir.join("words.bin"), [0xff, 0xff, 0xff]).unwrap();

		let generator = load_or_build(&source, WordgenConfig::default(), Strategy::Normal).unwrap();
		assert!(generator.table().contains_key("kal"));
		assert!(WordGenerator::load(dir.join("words.bin")).is_ok());
	}

	#[test]
	fn invalid_config_is_reported() {
		let dir = scratch_dir("bad-config");
		let source = dir.join("words.txt");
		fs::write(&source, "kalina\n").unwrap();
		let config: WordgenConfig = serde_json::from_str(r#"{"retry_count": 0}"#).unwrap();
		let result = load_or_build(&source, config, Strategy::Normal);
		assert!(matches!(result, Err(LoadError::Config(_))));
	}
}
