use log::{debug, trace};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::config::WordgenConfig;
use super::strategy::{PrefixExtremes, Strategy};
use super::table::{HeadTable, TransitionTable};
use super::walker::{ChainWalker, StartFrom};
use crate::error::ConfigError;

/// Result of a single word generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
	/// The generated word. May lie outside `[min, max]` if every attempt did.
	pub word: String,
	/// Number of walks performed, in `1..=retry_count`.
	pub attempts: usize,
}

/// Word generator built from a list of training words.
///
/// # Responsibilities
/// - Own the transition table (and head table) produced by one `Strategy`
/// - Rebuild them wholesale on every `build` call
/// - Generate words by random walks, retrying until the length constraint of
///   the `WordgenConfig` is met
///
/// # Notes
/// - Generation never fails. When no attempt fits `[min, max]`, the last
///   attempt is returned and the caller flags it by re-checking its length.
/// - Generation takes `&self`: a built generator can be shared read-only.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct WordGenerator {
	strategy: Strategy,
	config: WordgenConfig,
	table: TransitionTable,
	heads: HeadTable,
	prefix_extremes: Option<PrefixExtremes>,
}

/// Validates `config` and builds a generator from `words`.
///
/// # Errors
/// Returns a [`ConfigError`] if the configuration violates its invariants.
pub fn build_model<S: AsRef<str>>(
	words: &[S],
	config: WordgenConfig,
	strategy: Strategy,
) -> Result<WordGenerator, ConfigError> {
	let mut generator = WordGenerator::new(strategy, config)?;
	generator.build(words);
	Ok(generator)
}

impl WordGenerator {
	/// Creates a generator with empty tables.
	///
	/// # Errors
	/// Returns a [`ConfigError`] if the configuration violates its invariants.
	pub fn new(strategy: Strategy, config: WordgenConfig) -> Result<Self, ConfigError> {
		config.validate()?;
		Ok(Self {
			strategy,
			config,
			table: TransitionTable::new(),
			heads: HeadTable::new(),
			prefix_extremes: None,
		})
	}

	/// Replaces the model with one learned from `words`.
	///
	/// Any previously built table is discarded; nothing is merged.
	pub fn build<S: AsRef<str>>(&mut self, words: &[S]) {
		let built = self.strategy.build(words, self.config.depth());
		self.table = built.table;
		self.heads = built.heads;
		self.prefix_extremes = built.prefix_extremes;

		debug!(
			"built {} model from {} words: {} transitions, {} heads",
			self.strategy,
			words.len(),
			self.table.len(),
			self.heads.len()
		);
	}

	pub fn strategy(&self) -> Strategy {
		self.strategy
	}

	pub fn config(&self) -> &WordgenConfig {
		&self.config
	}

	pub fn table(&self) -> &TransitionTable {
		&self.table
	}

	/// Word openings. Empty for strategies that do not record them.
	pub fn heads(&self) -> &HeadTable {
		&self.heads
	}

	/// 2-gram prefix extremes found by the `Pruned` strategy.
	pub fn prefix_extremes(&self) -> Option<&PrefixExtremes> {
		self.prefix_extremes.as_ref()
	}

	/// Generates one word using the thread-local random generator.
	pub fn generate(&self) -> String {
		self.generate_with(&mut rand::rng())
	}

	/// Generates one word using `rng`.
	pub fn generate_with<R: Rng>(&self, rng: &mut R) -> String {
		self.generate_outcome_with(rng).word
	}

	/// Generates one word and reports how many attempts it took.
	pub fn generate_outcome(&self) -> Outcome {
		self.generate_outcome_with(&mut rand::rng())
	}

	/// Generates one word using `rng` and reports how many attempts it took.
	///
	/// # Behavior
	/// - Performs up to `retry_count` walks.
	/// - Returns the first walk whose length lies in `[min, max]`.
	/// - Otherwise returns the last walk.
	pub fn generate_outcome_with<R: Rng>(&self, rng: &mut R) -> Outcome {
		let walker = ChainWalker::new(&self.table, self.config.depth());
		let start = if self.strategy.starts_from_heads() {
			StartFrom::Heads(&self.heads)
		} else {
			StartFrom::FullKeys
		};

		let mut word = String::new();
		let mut attempts = 0;
		while attempts < self.config.retry_count() {
			word = walker.walk(start, rng);
			attempts += 1;
			trace!("attempt {}: {:?}", attempts, word);

			if self.config.accepts_len(word.chars().count()) {
				break;
			}
		}

		Outcome { word, attempts }
	}

	/// Generates `count` words using the thread-local random generator.
	pub fn generate_batch(&self, count: usize) -> Vec<String> {
		self.generate_batch_with(count, &mut rand::rng())
	}

	/// Generates `count` words using `rng`.
	pub fn generate_batch_with<R: Rng>(&self, count: usize, rng: &mut R) -> Vec<String> {
		(0..count).map(|_| self.generate_with(rng)).collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::strategy::ALL_STRATEGIES;
	use crate::tests::{CountingRng, ZeroRng};
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	const CORPUS: [&str; 12] = [
		"kalina", "toremu", "salika", "meroti", "kanu", "lisamo", "tokaru", "namire", "ronika", "sumera",
		"katimo", "relana",
	];

	fn config(min: usize, max: usize, retry_count: usize) -> WordgenConfig {
		WordgenConfig::new(3, min, max, retry_count).unwrap()
	}

	#[test]
	fn build_model_rejects_bad_config() {
		// Deserialization bypasses the setters, so validation happens at build time
		let inverted: WordgenConfig = serde_json::from_str(r#"{"min": 9, "max": 4}"#).unwrap();
		assert_eq!(
			build_model(&CORPUS, inverted, Strategy::Normal).unwrap_err(),
			ConfigError::InvertedBounds { min: 9, max: 4 }
		);

		let no_retry: WordgenConfig = serde_json::from_str(r#"{"retry_count": 0}"#).unwrap();
		assert_eq!(
			build_model(&CORPUS, no_retry, Strategy::Pruned).unwrap_err(),
			ConfigError::InvalidRetryCount
		);

		let shallow: WordgenConfig = serde_json::from_str(r#"{"depth": 1}"#).unwrap();
		assert_eq!(
			build_model(&CORPUS, shallow, Strategy::ReverseFrequency).unwrap_err(),
			ConfigError::InvalidDepth(1)
		);
	}

	#[test]
	fn empty_training_set_generates_empty_strings() {
		for strategy in ALL_STRATEGIES {
			let generator = build_model::<&str>(&[], config(3, 10, 20), strategy).unwrap();
			assert!(generator.table().is_empty());
			for _ in 0..5 {
				let outcome = generator.generate_outcome();
				assert_eq!(outcome.word, "");
				assert_eq!(outcome.attempts, 20);
			}
		}
	}

	#[test]
	fn returns_last_attempt_when_nothing_fits() {
		let generator = build_model(&["abc"], config(5, 5, 1), Strategy::Normal).unwrap();
		let outcome = generator.generate_outcome_with(&mut ZeroRng);
		assert_eq!(outcome, Outcome { word: "abc".to_owned(), attempts: 1 });
		assert_eq!(generator.generate(), "abc");
	}

	#[test]
	fn exhausts_every_retry_before_giving_up() {
		let generator = build_model(&["abc"], config(5, 5, 7), Strategy::Normal).unwrap();
		let outcome = generator.generate_outcome_with(&mut StdRng::seed_from_u64(1));
		assert_eq!(outcome.word, "abc");
		assert_eq!(outcome.attempts, 7);
	}

	#[test]
	fn stops_at_first_fitting_attempt() {
		let generator = build_model(&["abc"], config(3, 3, 7), Strategy::Normal).unwrap();
		assert_eq!(generator.generate_outcome_with(&mut ZeroRng).attempts, 1);
	}

	#[test]
	fn attempts_never_exceed_retry_count() {
		let mut rng = StdRng::seed_from_u64(99);
		for strategy in ALL_STRATEGIES {
			let generator = build_model(&CORPUS, config(6, 6, 4), strategy).unwrap();
			for _ in 0..200 {
				let outcome = generator.generate_outcome_with(&mut rng);
				assert!((1..=4).contains(&outcome.attempts));
				let len = outcome.word.chars().count();
				assert!(len == 6 || outcome.attempts == 4, "{:?}", outcome);
			}
		}
	}

	#[test]
	fn same_seed_same_batch() {
		for strategy in ALL_STRATEGIES {
			let generator = build_model(&CORPUS, WordgenConfig::default(), strategy).unwrap();
			let first = generator.generate_batch_with(50, &mut StdRng::seed_from_u64(2024));
			let second = generator.generate_batch_with(50, &mut StdRng::seed_from_u64(2024));
			assert_eq!(first, second);
			assert_eq!(first.len(), 50);
		}
	}

	#[test]
	fn rebuild_discards_previous_model() {
		let mut generator = WordGenerator::new(Strategy::Normal, WordgenConfig::default()).unwrap();
		generator.build(&["xyzzy"]);
		assert!(generator.table().contains_key("xyz"));

		generator.build(&["abc"]);
		assert!(!generator.table().contains_key("xyz"));
		assert!(!generator.heads().contains_key("xy"));
		assert_eq!(generator.generate_with(&mut ZeroRng), "abc");
	}

	#[test]
	fn build_is_idempotent() {
		let mut generator = WordGenerator::new(Strategy::Pruned, WordgenConfig::default()).unwrap();
		generator.build(&CORPUS);
		let table = generator.table().clone();
		let extremes = generator.prefix_extremes().cloned();

		generator.build(&CORPUS);
		assert_eq!(generator.table(), &table);
		assert_eq!(generator.prefix_extremes().cloned(), extremes);
	}

	/// The normal strategy records word openings but, unlike the head-weighted
	/// strategy, never draws from them: a walk over `["abc"]` costs exactly one
	/// draw for the start and one for the terminal fragment.
	#[test]
	fn normal_strategy_does_not_draw_from_head_table() {
		let normal = build_model(&["abc"], config(3, 3, 1), Strategy::Normal).unwrap();
		assert!(!normal.heads().is_empty());
		let mut rng = CountingRng { inner: ZeroRng, draws: 0 };
		assert_eq!(normal.generate_with(&mut rng), "abc");
		assert_eq!(rng.draws, 2);

		let weighted = build_model(&["abc"], config(3, 3, 1), Strategy::HeadWeighted).unwrap();
		let mut rng = CountingRng { inner: ZeroRng, draws: 0 };
		assert_eq!(weighted.generate_with(&mut rng), "abc");
		assert_eq!(rng.draws, 3);
	}

	#[test]
	fn generated_words_only_use_known_transitions() {
		let generator = build_model(&CORPUS, WordgenConfig::default(), Strategy::Normal).unwrap();
		let mut rng = StdRng::seed_from_u64(5);
		for word in generator.generate_batch_with(100, &mut rng) {
			let chars: Vec<char> = word.chars().collect();
			for window in chars.windows(3) {
				let key: String = window.iter().collect();
				assert!(generator.table().contains_key(&key), "{} not learned (in {})", key, word);
			}
		}
	}
}
