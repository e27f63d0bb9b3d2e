use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::table::{HeadTable, TransitionTable, WeightTable};
use crate::error::ConfigError;

/// Words shorter than this never contribute to the frequency-based tables.
const MIN_FREQUENCY_WORD_LEN: usize = 3;

/// Transition table construction strategy.
///
/// Every strategy shares the same sliding window and differs only in how the
/// resulting keys are weighted, and in where the walk starts.
///
/// # Variants
/// - `Normal`: raw occurrence counts. Also records word openings in a head
///   table, which generation does not consume.
/// - `HeadWeighted`: same counts as `Normal`; the walk starts from a word
///   opening drawn from the head table.
/// - `Pruned`: raw counts, plus one bonus for every key whose 2-char prefix
///   has the corpus-wide maximum 2-gram frequency.
/// - `ReverseFrequency`: counts inverted against the peak, so rare k-grams
///   become common and common ones become rare.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
	#[default]
	#[serde(alias = "append")]
	Normal,
	#[serde(alias = "headplus")]
	HeadWeighted,
	#[serde(alias = "prunning")]
	Pruned,
	#[serde(alias = "reverse")]
	ReverseFrequency,
}

/// Every strategy, in display order.
pub const ALL_STRATEGIES: [Strategy; 4] = [
	Strategy::Normal,
	Strategy::HeadWeighted,
	Strategy::Pruned,
	Strategy::ReverseFrequency,
];

/// 2-gram prefixes found at the extremes of the corpus 2-gram frequencies.
///
/// Only `max_prefixes` influences weights. `min_prefixes` is recorded for
/// inspection. Both lists are in discovery order and hold each prefix once.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct PrefixExtremes {
	pub min_frequency: usize,
	pub max_frequency: usize,
	pub min_prefixes: Vec<String>,
	pub max_prefixes: Vec<String>,
}

/// Output of a strategy build.
#[derive(Clone, Debug, Default)]
pub struct BuiltTables {
	pub table: TransitionTable,
	pub heads: HeadTable,
	pub prefix_extremes: Option<PrefixExtremes>,
}

impl Strategy {
	/// Short machine name, accepted back by `FromStr`.
	pub fn name(&self) -> &'static str {
		match self {
			Strategy::Normal => "normal",
			Strategy::HeadWeighted => "head-weighted",
			Strategy::Pruned => "pruned",
			Strategy::ReverseFrequency => "reverse-frequency",
		}
	}

	/// Whether the walk starts from a word opening in the head table instead
	/// of from any full-length key.
	pub fn starts_from_heads(&self) -> bool {
		matches!(self, Strategy::HeadWeighted)
	}

	/// Shortest word (in characters) this strategy learns from.
	pub fn min_word_len(&self, depth: usize) -> usize {
		match self {
			Strategy::Pruned => depth,
			_ => depth.max(MIN_FREQUENCY_WORD_LEN),
		}
	}

	/// Builds fresh tables from `words` using k-grams of length `depth`.
	///
	/// Words shorter than [`Strategy::min_word_len`] are ignored. `depth` is
	/// expected to be validated (`>= 2`) by the caller.
	pub fn build<S: AsRef<str>>(&self, words: &[S], depth: usize) -> BuiltTables {
		let min_len = self.min_word_len(depth);
		let accepted = || {
			words
				.iter()
				.map(AsRef::<str>::as_ref)
				.filter(move |word| word.chars().count() >= min_len)
		};

		match self {
			Strategy::Normal | Strategy::HeadWeighted => BuiltTables {
				table: frequency_table(accepted(), depth),
				heads: head_table(accepted(), depth),
				prefix_extremes: None,
			},
			Strategy::Pruned => {
				let (table, extremes) = pruned_table(words, accepted(), depth);
				BuiltTables { table, heads: HeadTable::new(), prefix_extremes: extremes }
			}
			Strategy::ReverseFrequency => {
				let mut table = frequency_table(accepted(), depth);
				if let Some(max) = table.max_weight() {
					let peak = max + 1;
					table.map_weights(|_, weight| peak - weight);
				}
				BuiltTables { table, heads: HeadTable::new(), prefix_extremes: None }
			}
		}
	}
}

impl fmt::Display for Strategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Strategy {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"normal" | "append" => Ok(Strategy::Normal),
			"headplus" | "head-weighted" | "head_weighted" => Ok(Strategy::HeadWeighted),
			"prunning" | "pruned" | "pruning" => Ok(Strategy::Pruned),
			"reverse" | "reverse-frequency" | "reverse_frequency" => Ok(Strategy::ReverseFrequency),
			_ => Err(ConfigError::UnknownStrategy(s.to_owned())),
		}
	}
}

/// Splits a word into its sliding windows.
///
/// For a word of `L` characters, yields `word[i .. i + depth]` for every `i`
/// in `0 ..= L - depth + 1`. The last window runs past the end of the word and
/// is therefore the `depth - 1` long terminal fragment that marks the end of a
/// word during the walk.
///
/// UTF-8 safe: windows are counted in characters.
pub(crate) fn windows(word: &str, depth: usize) -> Vec<String> {
	let chars: Vec<char> = word.chars().collect();
	if chars.len() + 1 < depth {
		return Vec::new();
	}

	(0..=chars.len() + 1 - depth)
		.map(|i| chars[i..(i + depth).min(chars.len())].iter().collect())
		.collect()
}

/// Raw occurrence counts of every window.
fn frequency_table<'a>(words: impl Iterator<Item = &'a str>, depth: usize) -> TransitionTable {
	let mut table = TransitionTable::new();
	for word in words {
		for key in windows(word, depth) {
			table.increment(&key);
		}
	}
	table
}

/// Occurrence counts of word openings (`max(2, depth - 1)` characters).
fn head_table<'a>(words: impl Iterator<Item = &'a str>, depth: usize) -> HeadTable {
	let head_len = depth.saturating_sub(1).max(2);
	let mut heads = HeadTable::new();
	for word in words {
		let head: String = word.chars().take(head_len).collect();
		heads.increment(&head);
	}
	heads
}

/// First two characters of `key`, if it has at least two.
fn bigram_prefix(key: &str) -> Option<String> {
	let prefix: String = key.chars().take(2).collect();
	(prefix.chars().count() == 2).then_some(prefix)
}

/// Raw counts plus a single +1 for each key led by a maximum-frequency 2-gram.
///
/// The 2-gram map is built from every word, including those too short to
/// contribute k-grams.
fn pruned_table<'a, S: AsRef<str>>(
	all_words: &[S],
	accepted: impl Iterator<Item = &'a str>,
	depth: usize,
) -> (TransitionTable, Option<PrefixExtremes>) {
	let mut bigrams = WeightTable::new();
	for word in all_words {
		let word: &str = word.as_ref();
		let chars: Vec<char> = word.chars().collect();
		for pair in chars.windows(2) {
			bigrams.increment(&pair.iter().collect::<String>());
		}
	}

	let mut table = TransitionTable::new();
	let (Some(min_frequency), Some(max_frequency)) = (bigrams.min_weight(), bigrams.max_weight()) else {
		return (table, None);
	};

	let mut extremes = PrefixExtremes {
		min_frequency,
		max_frequency,
		..PrefixExtremes::default()
	};

	for word in accepted {
		for key in windows(word, depth) {
			if let Some(prefix) = bigram_prefix(&key) {
				let frequency = bigrams.get(&prefix).unwrap_or(0);
				if frequency == min_frequency && !extremes.min_prefixes.contains(&prefix) {
					extremes.min_prefixes.push(prefix.clone());
				}
				if frequency == max_frequency && !extremes.max_prefixes.contains(&prefix) {
					extremes.max_prefixes.push(prefix);
				}
			}
			table.increment(&key);
		}
	}

	table.map_weights(|key, weight| match bigram_prefix(key) {
		Some(prefix) if extremes.max_prefixes.contains(&prefix) => weight + 1,
		_ => weight,
	});

	(table, Some(extremes))
}
