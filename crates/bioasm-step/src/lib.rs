//! bio-assembler steps
//!
//! A [`Step`] wraps one stage of the assembly pipeline: it knows its inputs,
//! its declared output artifacts, and how to build the external tool
//! invocation(s) that produce them.
//!
//! Every step's `run` follows the same contract:
//!
//! 1. Fail fast on missing inputs or invalid configuration, before any
//!    process is spawned.
//! 2. Skip if every declared output is present and valid. If an output is
//!    present but corrupt, delete the step's outputs (best-effort) and redo
//!    the work.
//! 3. Run the tool(s) through the [`ToolRunner`] in the [`StepContext`].
//! 4. Re-validate the declared outputs. A tool that exits zero without
//!    producing them still fails the step.
//!
//! Steps are independent of scheduling; ordering and concurrency belong to
//! the pipeline crate.

mod error;
mod outcome;
mod outputs;
mod progress;
mod steps;

use std::sync::Arc;

use async_trait::async_trait;
use bioasm_artifact::Artifact;
use bioasm_invoker::ToolRunner;

pub use error::StepError;
pub use outcome::StepOutcome;
pub use progress::Spinner;
pub use steps::{
  AssemblyStep, AssessmentStep, DownloadStep, PolishStep, QualityReportStep, TrimStep,
};

/// One stage of the pipeline.
#[async_trait]
pub trait Step: Send + Sync {
  /// Stable, human-readable name, unique within a run.
  fn name(&self) -> &str;

  /// Output artifacts this step is responsible for.
  fn outputs(&self) -> Vec<Artifact>;

  /// Execute the step, or skip it if its outputs are already valid.
  async fn run(&self) -> Result<StepOutcome, StepError>;
}

/// Services shared by every step of a run.
#[derive(Clone)]
pub struct StepContext {
  runner: Arc<dyn ToolRunner>,
  progress: bool,
}

impl StepContext {
  /// Create a context with progress display disabled.
  pub fn new(runner: Arc<dyn ToolRunner>) -> Self {
    Self {
      runner,
      progress: false,
    }
  }

  /// Enable or disable the terminal spinner for long-running steps.
  pub fn with_progress(mut self, enabled: bool) -> Self {
    self.progress = enabled;
    self
  }

  pub fn runner(&self) -> &dyn ToolRunner {
    self.runner.as_ref()
  }

  pub fn progress_enabled(&self) -> bool {
    self.progress
  }
}
