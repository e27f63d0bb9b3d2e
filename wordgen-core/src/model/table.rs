use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Weighted map from string keys to occurrence-derived weights.
///
/// Used both as the transition table (k-grams and their terminal fragments)
/// and as the head table (word openings).
///
/// Iteration follows first-insertion order, so that weighted sampling with a
/// deterministic random source always produces the same walk.
///
/// ## Invariants
/// - Keys are unique
/// - `index[key]` is the position of `key` in `entries`
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(from = "Vec<(String, usize)>", into = "Vec<(String, usize)>")]
pub struct WeightTable {
	/// Keys and weights, in first-insertion order.
	entries: Vec<(String, usize)>,
	/// Position of each key in `entries`.
	index: HashMap<String, usize>,
}

/// Table of k-grams (and shorter terminal fragments) to weights.
pub type TransitionTable = WeightTable;

/// Table of word openings to occurrence counts.
pub type HeadTable = WeightTable;

impl WeightTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Removes every entry.
	pub fn clear(&mut self) {
		self.entries.clear();
		self.index.clear();
	}

	/// Adds `amount` to the weight of `key`, inserting it with weight 0 first
	/// if it is not present yet.
	pub fn add(&mut self, key: &str, amount: usize) {
		match self.index.get(key) {
			Some(&position) => self.entries[position].1 += amount,
			None => {
				self.index.insert(key.to_owned(), self.entries.len());
				self.entries.push((key.to_owned(), amount));
			}
		}
	}

	/// Records one occurrence of `key`.
	pub fn increment(&mut self, key: &str) {
		self.add(key, 1);
	}

	pub fn get(&self, key: &str) -> Option<usize> {
		self.index.get(key).map(|&position| self.entries[position].1)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.index.contains_key(key)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterates over `(key, weight)` pairs in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
		self.entries.iter().map(|(key, weight)| (key.as_str(), *weight))
	}

	/// Largest weight in the table, `None` if empty.
	pub fn max_weight(&self) -> Option<usize> {
		self.entries.iter().map(|(_, weight)| *weight).max()
	}

	/// Smallest weight in the table, `None` if empty.
	pub fn min_weight(&self) -> Option<usize> {
		self.entries.iter().map(|(_, weight)| *weight).min()
	}

	/// Rewrites every weight in place. Keys and order are unchanged.
	pub fn map_weights<F: FnMut(&str, usize) -> usize>(&mut self, mut f: F) {
		for (key, weight) in &mut self.entries {
			*weight = f(key, *weight);
		}
	}

	/// Candidates whose key is exactly `len` characters long.
	pub(crate) fn with_char_len(&self, len: usize) -> Vec<(&str, usize)> {
		self.iter().filter(|(key, _)| key.chars().count() == len).collect()
	}

	/// Candidates whose key starts with `prefix`.
	pub(crate) fn starting_with(&self, prefix: &str) -> Vec<(&str, usize)> {
		self.iter().filter(|(key, _)| key.starts_with(prefix)).collect()
	}
}

impl From<Vec<(String, usize)>> for WeightTable {
	fn from(entries: Vec<(String, usize)>) -> Self {
		let mut table = Self::new();
		for (key, weight) in entries {
			table.add(&key, weight);
		}
		table
	}
}

impl From<WeightTable> for Vec<(String, usize)> {
	fn from(table: WeightTable) -> Self {
		table.entries
	}
}
