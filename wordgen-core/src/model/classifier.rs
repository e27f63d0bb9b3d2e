use std::collections::HashSet;

use serde::Serialize;

use super::config::WordgenConfig;

/// A generated word with its batch-level flags.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct GeneratedWord {
	pub word: String,
	/// The word equals one of the training words.
	pub has_original: bool,
	/// An earlier word of the same batch is identical.
	pub is_duplicated: bool,
	/// The word length lies outside `[min, max]`.
	pub is_invalid: bool,
}

/// Flags for every word of a batch, plus summary counts.
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Classification {
	pub words: Vec<GeneratedWord>,
	pub has_original_count: usize,
	pub duplication_count: usize,
	pub invalid_count: usize,
}

impl Classification {
	/// Classifies `batch` against the `training` list.
	///
	/// The first occurrence of a word within the batch is never a duplicate;
	/// only later repetitions are flagged. Lengths are counted in characters.
	pub fn new<S: AsRef<str>>(training: &[S], batch: Vec<String>, config: &WordgenConfig) -> Self {
		let originals: HashSet<&str> = training.iter().map(AsRef::<str>::as_ref).collect();
		let mut seen: HashSet<String> = HashSet::with_capacity(batch.len());
		let mut classification = Self::default();

		for word in batch {
			let has_original = originals.contains(word.as_str());
			let is_duplicated = !seen.insert(word.clone());
			let is_invalid = !config.accepts_len(word.chars().count());

			classification.has_original_count += usize::from(has_original);
			classification.duplication_count += usize::from(is_duplicated);
			classification.invalid_count += usize::from(is_invalid);
			classification.words.push(GeneratedWord { word, has_original, is_duplicated, is_invalid });
		}

		classification
	}

	pub fn len(&self) -> usize {
		self.words.len()
	}

	pub fn is_empty(&self) -> bool {
		self.words.is_empty()
	}

	/// `count` as a percentage of the batch size. `0.0` for an empty batch.
	pub fn percent(&self, count: usize) -> f64 {
		if self.words.is_empty() {
			return 0.0;
		}
		count as f64 / self.words.len() as f64 * 100.0
	}

	pub fn has_original_percent(&self) -> f64 {
		self.percent(self.has_original_count)
	}

	pub fn duplication_percent(&self) -> f64 {
		self.percent(self.duplication_count)
	}

	pub fn invalid_percent(&self) -> f64 {
		self.percent(self.invalid_count)
	}
}
