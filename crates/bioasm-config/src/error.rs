use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while resolving the read filtering policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
  #[error("filter mode is 'custom' but no custom arguments were provided")]
  MissingCustomArgs,

  #[error("unknown filter mode: {0} (expected: standard, strict, lenient, custom)")]
  UnknownMode(String),
}

/// Errors produced while validating a run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("sample identifier must not be empty")]
  EmptySampleId,

  #[error("sample identifier must be a single directory name (no path separators, not . or ..): {0}")]
  InvalidSampleId(String),

  #[error("{field} must be a positive integer")]
  NotPositive { field: &'static str },

  #[error("{what} not found: {}", path.display())]
  MissingFile { what: &'static str, path: PathBuf },

  #[error(transparent)]
  Filter(#[from] FilterError),
}
