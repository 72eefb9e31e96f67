//! Pipeline events and notifiers.
//!
//! Events are emitted while a run progresses so that callers can observe it
//! without parsing logs: drive a progress display, persist step history, etc.

use bioasm_step::StepOutcome;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Events emitted during a pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PipelineEvent {
  /// The run has started.
  RunStarted { run_id: String },

  /// A concurrent group is about to start its members.
  GroupStarted { run_id: String, steps: Vec<String> },

  /// A step has started.
  StepStarted { run_id: String, step: String },

  /// A step ran its tools and produced valid outputs.
  StepCompleted {
    run_id: String,
    step: String,
    elapsed_ms: u64,
  },

  /// A step found valid outputs from an earlier run.
  StepSkipped { run_id: String, step: String },

  /// A step failed or panicked.
  StepFailed {
    run_id: String,
    step: String,
    error: String,
  },

  /// Every phase completed.
  RunCompleted { run_id: String },

  /// The run stopped at a failed step.
  RunFailed { run_id: String, error: String },
}

impl PipelineEvent {
  pub(crate) fn finished(run_id: &str, step: &str, outcome: StepOutcome, elapsed_ms: u64) -> Self {
    match outcome {
      StepOutcome::Completed => PipelineEvent::StepCompleted {
        run_id: run_id.to_string(),
        step: step.to_string(),
        elapsed_ms,
      },
      StepOutcome::Skipped => PipelineEvent::StepSkipped {
        run_id: run_id.to_string(),
        step: step.to_string(),
      },
    }
  }
}

/// Receives pipeline events.
///
/// The pipeline calls `notify` from its own task, in order; implementations
/// must not block.
pub trait PipelineNotifier: Send + Sync {
  fn notify(&self, event: PipelineEvent);
}

/// Discards all events.
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

impl PipelineNotifier for NoopNotifier {
  fn notify(&self, _event: PipelineEvent) {}
}

/// Sends events to an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
  // Unbounded; a run emits a few dozen events at most.
  sender: mpsc::UnboundedSender<PipelineEvent>,
}

impl ChannelNotifier {
  pub fn new(sender: mpsc::UnboundedSender<PipelineEvent>) -> Self {
    Self { sender }
  }
}

impl PipelineNotifier for ChannelNotifier {
  fn notify(&self, event: PipelineEvent) {
    // Receiver may have been dropped
    let _ = self.sender.send(event);
  }
}
