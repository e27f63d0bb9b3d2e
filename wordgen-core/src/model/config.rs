use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default k-gram length.
pub const DEFAULT_DEPTH: usize = 3;

/// Default number of generation attempts per word.
pub const DEFAULT_RETRY_COUNT: usize = 20;

/// Default minimal accepted word length.
pub const DEFAULT_MIN_LENGTH: usize = DEFAULT_DEPTH;

/// Default maximal accepted word length.
pub const DEFAULT_MAX_LENGTH: usize = 10;

/// Default number of words generated per batch.
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// Largest batch a single request may ask for.
pub const MAX_BATCH_SIZE: usize = 100_000;

/// Generation parameters shared by every strategy.
///
/// # Invariants
/// - `depth >= 2`
/// - `min <= max`
/// - `retry_count >= 1`
///
/// Fields are private so that the invariants hold after construction; use
/// [`WordgenConfig::new`] or the validated setters. Deserialized values are
/// validated through [`WordgenConfig::validate`] when a model is built.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct WordgenConfig {
	/// Length of the k-grams used as transition keys.
	depth: usize,

	/// Minimal accepted word length (in characters).
	min: usize,

	/// Maximal accepted word length (in characters).
	max: usize,

	/// Maximum number of walks attempted per generated word.
	retry_count: usize,
}

impl Default for WordgenConfig {
	fn default() -> Self {
		Self {
			depth: DEFAULT_DEPTH,
			min: DEFAULT_MIN_LENGTH,
			max: DEFAULT_MAX_LENGTH,
			retry_count: DEFAULT_RETRY_COUNT,
		}
	}
}

impl WordgenConfig {
	/// Creates a validated configuration.
	///
	/// # Errors
	/// Returns a [`ConfigError`] if any invariant is violated.
	pub fn new(depth: usize, min: usize, max: usize, retry_count: usize) -> Result<Self, ConfigError> {
		let config = Self { depth, min, max, retry_count };
		config.validate()?;
		Ok(config)
	}

	/// Checks the configuration invariants.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.depth < 2 {
			return Err(ConfigError::InvalidDepth(self.depth));
		}
		if self.min > self.max {
			return Err(ConfigError::InvertedBounds { min: self.min, max: self.max });
		}
		if self.retry_count < 1 {
			return Err(ConfigError::InvalidRetryCount);
		}
		Ok(())
	}

	pub fn depth(&self) -> usize {
		self.depth
	}

	pub fn min(&self) -> usize {
		self.min
	}

	pub fn max(&self) -> usize {
		self.max
	}

	pub fn retry_count(&self) -> usize {
		self.retry_count
	}

	/// Sets the k-gram length.
	///
	/// # Errors
	/// Returns an error if `depth < 2`.
	pub fn set_depth(&mut self, depth: usize) -> Result<(), ConfigError> {
		if depth < 2 {
			return Err(ConfigError::InvalidDepth(depth));
		}
		self.depth = depth;
		Ok(())
	}

	/// Sets the accepted length range `[min, max]`.
	///
	/// # Errors
	/// Returns an error if `min > max`. The previous bounds are kept.
	pub fn set_bounds(&mut self, min: usize, max: usize) -> Result<(), ConfigError> {
		if min > max {
			return Err(ConfigError::InvertedBounds { min, max });
		}
		self.min = min;
		self.max = max;
		Ok(())
	}

	/// Sets the number of attempts per generated word.
	///
	/// # Errors
	/// Returns an error if `retry_count` is zero.
	pub fn set_retry_count(&mut self, retry_count: usize) -> Result<(), ConfigError> {
		if retry_count < 1 {
			return Err(ConfigError::InvalidRetryCount);
		}
		self.retry_count = retry_count;
		Ok(())
	}

	/// Returns `true` if a word of `len` characters lies within `[min, max]`.
	pub fn accepts_len(&self, len: usize) -> bool {
		len >= self.min && len <= self.max
	}
}
