//! Error types for pipeline runs.

use bioasm_step::StepError;
use thiserror::Error;

/// The failure that ended a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
  /// A step returned an error.
  #[error("step '{step}' failed: {source}")]
  StepFailed {
    step: String,
    #[source]
    source: StepError,
  },

  /// A step's task panicked or was aborted before returning.
  #[error("step '{step}' panicked: {message}")]
  StepPanicked { step: String, message: String },
}

impl PipelineError {
  /// Name of the step that failed.
  pub fn step(&self) -> &str {
    match self {
      PipelineError::StepFailed { step, .. } | PipelineError::StepPanicked { step, .. } => step,
    }
  }
}
