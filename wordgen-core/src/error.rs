use std::io;

/// Invalid generator configuration.
///
/// Returned synchronously when a model is constructed or a setting is changed.
/// Generation itself never fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
	#[error("depth must be >= 2, got {0}")]
	InvalidDepth(usize),
	#[error("min length {min} is greater than max length {max}")]
	InvertedBounds { min: usize, max: usize },
	#[error("retry count must be >= 1")]
	InvalidRetryCount,
	#[error("unknown strategy '{0}', expected normal, headplus, prunning or reverse")]
	UnknownStrategy(String),
}

/// Errors raised while loading training data or cached models from disk.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
	#[error("I/O error: {0}")]
	Io(#[from] io::Error),
	#[error("malformed dictionary: {0}")]
	Json(#[from] serde_json::Error),
	#[error("malformed model cache: {0}")]
	Cache(#[from] postcard::Error),
	#[error(transparent)]
	Config(#[from] ConfigError),
}
