//! Top-level module for the n-gram word generation system.
//!
//! This module provides:
//! - Weighted tables of k-grams and word openings (`WeightTable`)
//! - Four table construction strategies (`Strategy`)
//! - Weighted sampling and the chain walk over a table
//! - A word generator facade with a bounded retry loop (`WordGenerator`)
//! - Batch classification against the training words (`Classification`)

/// Generation parameters and tool defaults.
pub mod config;

/// Table construction strategies (normal, head-weighted, pruned, reverse-frequency).
pub mod strategy;

/// Insertion-ordered weighted tables.
pub mod table;

/// Weighted random selection over `(key, weight)` pairs.
pub mod sampler;

/// Random walk producing one candidate word.
pub mod walker;

/// Build-once, generate-many facade.
pub mod generator;

/// Binary model cache (`postcard`).
pub mod cache;

/// Duplicate / has-original / invalid-length flags for generated batches.
pub mod classifier;
