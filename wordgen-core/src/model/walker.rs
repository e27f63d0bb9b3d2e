use rand::Rng;

use super::sampler::sample_weighted;
use super::table::{HeadTable, TransitionTable};

/// Upper bound on continuation steps in a single walk.
///
/// A corpus such as `aaaa` produces a key that continues into itself; with a
/// constant random source such a walk would never draw the terminal fragment.
pub const MAX_CHAIN_STEPS: usize = 1024;

/// Where a walk draws its first full-length key from.
#[derive(Clone, Copy, Debug)]
pub enum StartFrom<'a> {
	/// Any key of exactly `depth` characters.
	FullKeys,
	/// A word opening drawn from the head table, then a full-length key
	/// starting with that opening.
	Heads(&'a HeadTable),
}

/// Random walk over a transition table.
///
/// The walk starts from a full-length k-gram and repeatedly appends the tail of
/// a k-gram that overlaps the last `depth - 1` characters of the chain. It
/// stops when the drawn key is shorter than `depth` (the terminal fragment of a
/// training word) or when no key continues the chain.
#[derive(Debug)]
pub struct ChainWalker<'a> {
	table: &'a TransitionTable,
	depth: usize,
}

impl<'a> ChainWalker<'a> {
	pub fn new(table: &'a TransitionTable, depth: usize) -> Self {
		Self { table, depth }
	}

	/// Performs one walk. Returns an empty string if no start can be drawn.
	pub fn walk<R: Rng>(&self, start: StartFrom<'_>, rng: &mut R) -> String {
		let Some(first) = self.draw_start(start, rng) else {
			return String::new();
		};

		let overlap = self.depth - 1;
		let mut chain = first.to_owned();

		for _ in 0..MAX_CHAIN_STEPS {
			let suffix = last_n_chars(&chain, overlap);
			let Some(next) = sample_weighted(&self.table.starting_with(suffix), rng) else {
				break;
			};

			chain.extend(next.chars().skip(overlap));
			if next.chars().count() < self.depth {
				break;
			}
		}

		chain
	}

	fn draw_start<R: Rng>(&self, start: StartFrom<'_>, rng: &mut R) -> Option<&'a str> {
		match start {
			StartFrom::FullKeys => sample_weighted(&self.table.with_char_len(self.depth), rng),
			StartFrom::Heads(heads) => {
				let head = sample_weighted(&heads.iter().collect::<Vec<_>>(), rng)?;
				let openings: Vec<(&str, usize)> = self
					.table
					.with_char_len(self.depth)
					.into_iter()
					.filter(|(key, _)| key.starts_with(head))
					.collect();
				sample_weighted(&openings, rng)
			}
		}
	}
}

/// Returns the last `n` characters of a string, or the whole string if it is
/// shorter.
fn last_n_chars(s: &str, n: usize) -> &str {
	match s.char_indices().rev().nth(n.saturating_sub(1)) {
		Some((index, _)) if n > 0 => &s[index..],
		Some(_) => "",
		None => s,
	}
}
