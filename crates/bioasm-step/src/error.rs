//! Step errors.

use std::path::{Path, PathBuf};

use bioasm_config::FilterError;
use bioasm_invoker::InvokeError;

/// Errors that can occur while running a step.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
  /// A required input file does not exist.
  #[error("{what} not found: {}", .path.display())]
  MissingInput { what: &'static str, path: PathBuf },

  /// The filtering policy could not be resolved from configuration.
  #[error(transparent)]
  Filter(#[from] FilterError),

  /// An output directory could not be created.
  #[error("failed to create output directory {}: {source}", .path.display())]
  CreateDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The external tool failed to start or exited unsuccessfully.
  #[error("{tool} command failed: {source}")]
  Tool {
    tool: &'static str,
    #[source]
    source: InvokeError,
  },

  /// The tool reported success but declared outputs are absent.
  #[error("{tool} failed, expected files not found: {}", join_paths(.paths))]
  MissingOutput {
    tool: &'static str,
    paths: Vec<PathBuf>,
  },

  /// The tool reported success but declared outputs fail validation.
  #[error("{tool} produced invalid outputs (possible truncation): {}", join_paths(.paths))]
  InvalidOutput {
    tool: &'static str,
    paths: Vec<PathBuf>,
  },

  /// The background output check could not complete.
  #[error("output check failed: {message}")]
  Task { message: String },
}

impl StepError {
  pub(crate) fn missing_input(what: &'static str, path: &Path) -> Self {
    StepError::MissingInput {
      what,
      path: path.to_path_buf(),
    }
  }
}

fn join_paths(paths: &[PathBuf]) -> String {
  paths
    .iter()
    .map(|p| p.display().to_string())
    .collect::<Vec<_>>()
    .join(", ")
}
