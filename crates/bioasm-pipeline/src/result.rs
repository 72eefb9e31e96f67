//! Run results.

use bioasm_step::StepOutcome;
use serde::{Deserialize, Serialize};

/// How one step of a run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
  pub step: String,
  pub outcome: StepOutcome,
  pub elapsed_ms: u64,
}

/// Result of a successful pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
  /// Unique run ID.
  pub run_id: String,
  /// One record per step, in the order the steps finished their phase.
  pub steps: Vec<StepRecord>,
}

impl RunReport {
  pub fn step(&self, name: &str) -> Option<&StepRecord> {
    self.steps.iter().find(|r| r.step == name)
  }

  /// Number of steps that actually invoked their tools.
  pub fn completed_count(&self) -> usize {
    self
      .steps
      .iter()
      .filter(|r| r.outcome == StepOutcome::Completed)
      .count()
  }
}
