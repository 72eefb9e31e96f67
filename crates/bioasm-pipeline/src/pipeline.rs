//! Phase scheduler.

use std::any::Any;
use std::sync::Arc;
use std::time::{Duration, Instant};

use bioasm_step::{Step, StepError, StepOutcome};
use futures::future::join_all;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info, instrument};

use crate::error::PipelineError;
use crate::events::{NoopNotifier, PipelineEvent, PipelineNotifier};
use crate::result::{RunReport, StepRecord};

/// A scheduling unit.
#[derive(Clone)]
pub enum Phase {
  /// One step, run on its own.
  Sequential(Arc<dyn Step>),
  /// Steps that run concurrently; the phase ends when all of them have.
  Concurrent(Vec<Arc<dyn Step>>),
}

impl Phase {
  /// Names of the steps in this phase, in declaration order.
  pub fn step_names(&self) -> Vec<&str> {
    match self {
      Phase::Sequential(step) => vec![step.name()],
      Phase::Concurrent(steps) => steps.iter().map(|s| s.name()).collect(),
    }
  }
}

type StepRun = (Result<StepOutcome, StepError>, Duration);

/// An ordered list of phases.
///
/// Every step runs on its own tokio task, so a panicking step surfaces as
/// [`PipelineError::StepPanicked`] instead of tearing down the run.
pub struct Pipeline<N = NoopNotifier> {
  phases: Vec<Phase>,
  parallel: bool,
  notifier: N,
}

impl Pipeline<NoopNotifier> {
  /// Create an empty pipeline with parallelism enabled.
  pub fn new() -> Self {
    Self {
      phases: Vec::new(),
      parallel: true,
      notifier: NoopNotifier,
    }
  }
}

impl Default for Pipeline<NoopNotifier> {
  fn default() -> Self {
    Self::new()
  }
}

impl<N: PipelineNotifier> Pipeline<N> {
  /// Replace the event notifier.
  pub fn with_notifier<M: PipelineNotifier>(self, notifier: M) -> Pipeline<M> {
    Pipeline {
      phases: self.phases,
      parallel: self.parallel,
      notifier,
    }
  }

  /// When disabled, concurrent groups run their members one after another in
  /// declaration order.
  pub fn with_parallelism(mut self, enabled: bool) -> Self {
    self.parallel = enabled;
    self
  }

  /// Append a sequential phase.
  pub fn then(mut self, step: impl Step + 'static) -> Self {
    self.phases.push(Phase::Sequential(Arc::new(step)));
    self
  }

  /// Append a concurrent group.
  pub fn concurrently(mut self, steps: impl IntoIterator<Item = Arc<dyn Step>>) -> Self {
    self.phases.push(Phase::Concurrent(steps.into_iter().collect()));
    self
  }

  pub fn phases(&self) -> &[Phase] {
    &self.phases
  }

  pub fn parallelism(&self) -> bool {
    self.parallel
  }

  /// Run every phase in order under a fresh run ID.
  pub async fn run(&self) -> Result<RunReport, PipelineError> {
    let run_id = uuid::Uuid::new_v4().to_string();
    self.execute(run_id).await
  }

  #[instrument(name = "pipeline_run", skip(self, run_id), fields(run_id = %run_id))]
  async fn execute(&self, run_id: String) -> Result<RunReport, PipelineError> {
    info!(
      phases = self.phases.len(),
      parallel = self.parallel,
      "pipeline_started"
    );
    self.notifier.notify(PipelineEvent::RunStarted {
      run_id: run_id.clone(),
    });

    let mut records = Vec::new();
    let result = self.run_phases(&run_id, &mut records).await;

    match result {
      Ok(()) => {
        info!(steps = records.len(), "pipeline_completed");
        self.notifier.notify(PipelineEvent::RunCompleted {
          run_id: run_id.clone(),
        });
        Ok(RunReport {
          run_id,
          steps: records,
        })
      }
      Err(e) => {
        error!(step = %e.step(), error = %e, "pipeline_failed");
        self.notifier.notify(PipelineEvent::RunFailed {
          run_id,
          error: e.to_string(),
        });
        Err(e)
      }
    }
  }

  async fn run_phases(
    &self,
    run_id: &str,
    records: &mut Vec<StepRecord>,
  ) -> Result<(), PipelineError> {
    for phase in &self.phases {
      match phase {
        Phase::Sequential(step) => {
          records.push(self.run_sequential(run_id, step).await?);
        }
        Phase::Concurrent(steps) if !self.parallel => {
          for step in steps {
            records.push(self.run_sequential(run_id, step).await?);
          }
        }
        Phase::Concurrent(steps) => {
          records.extend(self.run_concurrent(run_id, steps).await?);
        }
      }
    }
    Ok(())
  }

  async fn run_sequential(
    &self,
    run_id: &str,
    step: &Arc<dyn Step>,
  ) -> Result<StepRecord, PipelineError> {
    let name = step.name();
    info!("=== RUNNING STEP: {} ===", name);
    self.notify_started(run_id, name);

    let joined = spawn_step(step).await;
    let record = self.settle(run_id, name, joined)?;

    info!("=== COMPLETED STEP: {} ===", name);
    Ok(record)
  }

  /// Start every member, wait for all of them, then report the first failure
  /// in declaration order. A failing member never cancels its siblings.
  async fn run_concurrent(
    &self,
    run_id: &str,
    steps: &[Arc<dyn Step>],
  ) -> Result<Vec<StepRecord>, PipelineError> {
    let names: Vec<&str> = steps.iter().map(|s| s.name()).collect();
    info!("=== RUNNING IN PARALLEL: {} ===", names.join(" & "));
    self.notifier.notify(PipelineEvent::GroupStarted {
      run_id: run_id.to_string(),
      steps: names.iter().map(|n| n.to_string()).collect(),
    });
    for name in &names {
      self.notify_started(run_id, name);
    }

    let handles: Vec<JoinHandle<StepRun>> = steps.iter().map(spawn_step).collect();
    let results = join_all(handles).await;

    let mut records = Vec::with_capacity(steps.len());
    let mut first_failure = None;
    for (name, joined) in names.iter().zip(results) {
      match self.settle(run_id, name, joined) {
        Ok(record) => records.push(record),
        Err(e) => {
          first_failure.get_or_insert(e);
        }
      }
    }
    if let Some(e) = first_failure {
      return Err(e);
    }

    info!("=== COMPLETED PARALLEL GROUP ===");
    Ok(records)
  }

  fn notify_started(&self, run_id: &str, name: &str) {
    self.notifier.notify(PipelineEvent::StepStarted {
      run_id: run_id.to_string(),
      step: name.to_string(),
    });
  }

  /// Turn a joined step task into a record, logging and emitting the result.
  fn settle(
    &self,
    run_id: &str,
    name: &str,
    joined: Result<StepRun, JoinError>,
  ) -> Result<StepRecord, PipelineError> {
    let failure = match joined {
      Ok((Ok(outcome), elapsed)) => {
        let elapsed_ms = elapsed.as_millis() as u64;
        info!(step = %name, outcome = ?outcome, elapsed_ms, "step_finished");
        self
          .notifier
          .notify(PipelineEvent::finished(run_id, name, outcome, elapsed_ms));
        return Ok(StepRecord {
          step: name.to_string(),
          outcome,
          elapsed_ms,
        });
      }
      Ok((Err(source), _)) => PipelineError::StepFailed {
        step: name.to_string(),
        source,
      },
      Err(e) => PipelineError::StepPanicked {
        step: name.to_string(),
        message: join_error_message(e),
      },
    };

    error!(step = %name, error = %failure, "step_failed");
    self.notifier.notify(PipelineEvent::StepFailed {
      run_id: run_id.to_string(),
      step: name.to_string(),
      error: failure.to_string(),
    });
    Err(failure)
  }
}

fn spawn_step(step: &Arc<dyn Step>) -> JoinHandle<StepRun> {
  let step = Arc::clone(step);
  tokio::spawn(async move {
    let started = Instant::now();
    let result = step.run().await;
    (result, started.elapsed())
  })
}

fn join_error_message(err: JoinError) -> String {
  if !err.is_panic() {
    return err.to_string();
  }
  panic_message(err.into_panic())
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
  if let Some(s) = payload.downcast_ref::<&str>() {
    s.to_string()
  } else if let Some(s) = payload.downcast_ref::<String>() {
    s.clone()
  } else {
    "unknown panic payload".to_string()
  }
}
