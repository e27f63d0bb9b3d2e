//! N-gram transition-table word generator for constructed languages.
//!
//! This crate learns weighted k-gram tables from a list of example words and
//! synthesizes new words by random walks over them:
//! - Four table construction strategies sharing one sliding window
//! - Weighted sampling and chain walking with a bounded retry loop
//! - Batch classification (duplicates, original words, invalid lengths)
//! - Word list / dictionary loading and a binary model cache
//!
//! ```
//! use wordgen_core::{build_model, Classification, Strategy, WordgenConfig};
//!
//! let words = ["kalina", "toremu", "salika", "meroti"];
//! let config = WordgenConfig::default();
//! let generator = build_model(&words, config, Strategy::Normal).unwrap();
//!
//! let batch = generator.generate_batch(10);
//! let classification = Classification::new(&words, batch, &config);
//! assert_eq!(classification.len(), 10);
//! ```

/// Core tables, strategies and generation logic.
pub mod model;

/// Word list, dictionary and path helpers.
pub mod io;

/// Error types.
pub mod error;

#[cfg(test)]
mod tests;

pub use error::{ConfigError, LoadError};
pub use model::cache::load_or_build;
pub use model::classifier::{Classification, GeneratedWord};
pub use model::config::WordgenConfig;
pub use model::generator::{Outcome, WordGenerator, build_model};
pub use model::strategy::{ALL_STRATEGIES, PrefixExtremes, Strategy};
pub use model::table::{HeadTable, TransitionTable, WeightTable};
