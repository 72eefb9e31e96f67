//! Scripted steps for scheduler tests.
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bioasm_artifact::Artifact;
use bioasm_step::{Step, StepError, StepOutcome};

/// Shared, ordered record of `start:<name>` / `end:<name>` entries.
#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
  pub fn push(&self, entry: String) {
    self.0.lock().unwrap().push(entry);
  }

  pub fn entries(&self) -> Vec<String> {
    self.0.lock().unwrap().clone()
  }

  pub fn position(&self, entry: &str) -> Option<usize> {
    self.entries().iter().position(|e| e == entry)
  }

  pub fn contains(&self, entry: &str) -> bool {
    self.position(entry).is_some()
  }
}

#[derive(Clone, Copy)]
pub enum Script {
  Complete,
  Skip,
  Fail,
  Panic,
}

pub struct ScriptedStep {
  name: String,
  script: Script,
  delay: Duration,
  journal: Journal,
}

impl ScriptedStep {
  pub fn new(name: &str, script: Script, journal: &Journal) -> Self {
    Self {
      name: name.to_string(),
      script,
      delay: Duration::ZERO,
      journal: journal.clone(),
    }
  }

  pub fn delayed(mut self, millis: u64) -> Self {
    self.delay = Duration::from_millis(millis);
    self
  }

  pub fn shared(self) -> Arc<dyn Step> {
    Arc::new(self)
  }
}

#[async_trait]
impl Step for ScriptedStep {
  fn name(&self) -> &str {
    &self.name
  }

  fn outputs(&self) -> Vec<Artifact> {
    vec![Artifact::file(format!("/nonexistent/{}.out", self.name))]
  }

  async fn run(&self) -> Result<StepOutcome, StepError> {
    self.journal.push(format!("start:{}", self.name));
    if !self.delay.is_zero() {
      tokio::time::sleep(self.delay).await;
    }
    self.journal.push(format!("end:{}", self.name));

    match self.script {
      Script::Complete => Ok(StepOutcome::Completed),
      Script::Skip => Ok(StepOutcome::Skipped),
      Script::Fail => Err(StepError::MissingInput {
        what: "input FASTQ",
        path: PathBuf::from(format!("/nonexistent/{}.fastq.gz", self.name)),
      }),
      Script::Panic => panic!("{} exploded", self.name),
    }
  }
}
