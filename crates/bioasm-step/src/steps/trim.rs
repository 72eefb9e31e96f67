use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bioasm_artifact::Artifact;
use bioasm_config::{FilterPolicy, RunConfig};
use bioasm_invoker::ToolCommand;
use tracing::info;

use crate::error::StepError;
use crate::outcome::StepOutcome;
use crate::outputs::{create_dirs, require_inputs, resume_check, verify_outputs};
use crate::{Step, StepContext};

const TOOL: &str = "trimmomatic";

/// Adapter clipping and quality trimming of the raw read pair.
pub struct TrimStep {
  reads: (PathBuf, PathBuf),
  paired: (PathBuf, PathBuf),
  unpaired: (PathBuf, PathBuf),
  adapter_fasta: PathBuf,
  threads: u32,
  filter_mode: String,
  filter_custom_args: Option<String>,
  ctx: StepContext,
}

impl TrimStep {
  /// The filter mode is kept as given and resolved when the step runs.
  pub fn new(config: &RunConfig, ctx: StepContext) -> Self {
    let layout = config.layout();
    Self {
      reads: layout.raw_reads(),
      paired: layout.trimmed_paired(),
      unpaired: layout.trimmed_unpaired(),
      adapter_fasta: config.adapter_fasta.clone(),
      threads: config.threads,
      filter_mode: config.filter_mode.clone(),
      filter_custom_args: config.filter_custom_args.clone(),
      ctx,
    }
  }

  pub fn filter_policy(&self) -> Result<FilterPolicy, StepError> {
    Ok(FilterPolicy::resolve(
      &self.filter_mode,
      self.filter_custom_args.as_deref(),
    )?)
  }

  pub fn command(&self, policy: &FilterPolicy) -> ToolCommand {
    ToolCommand::new(TOOL)
      .arg("PE")
      .arg("-threads")
      .arg(self.threads.to_string())
      .arg("-phred33")
      .arg(&self.reads.0)
      .arg(&self.reads.1)
      .arg(&self.paired.0)
      .arg(&self.unpaired.0)
      .arg(&self.paired.1)
      .arg(&self.unpaired.1)
      .arg(format!(
        "ILLUMINACLIP:{}:2:30:10",
        self.adapter_fasta.display()
      ))
      .args(policy.trimmomatic_args())
  }

  fn cleanup_paths(&self) -> Vec<PathBuf> {
    vec![
      self.paired.0.clone(),
      self.paired.1.clone(),
      self.unpaired.0.clone(),
      self.unpaired.1.clone(),
    ]
  }

  fn output_dirs(&self) -> BTreeSet<&Path> {
    [&self.paired.0, &self.paired.1, &self.unpaired.0, &self.unpaired.1]
      .into_iter()
      .filter_map(|p| p.parent())
      .collect()
  }
}

#[async_trait]
impl Step for TrimStep {
  fn name(&self) -> &str {
    "Trimmomatic"
  }

  /// Only the paired reads are declared; downstream steps never read the
  /// unpaired files.
  fn outputs(&self) -> Vec<Artifact> {
    vec![Artifact::gzip(&self.paired.0), Artifact::gzip(&self.paired.1)]
  }

  async fn run(&self) -> Result<StepOutcome, StepError> {
    require_inputs([
      ("input FASTQ", self.reads.0.as_path()),
      ("input FASTQ", self.reads.1.as_path()),
      ("adapter FASTA", self.adapter_fasta.as_path()),
    ])?;
    let policy = self.filter_policy()?;

    let outputs = self.outputs();
    if resume_check(self.name(), outputs.clone(), &self.cleanup_paths()).await? {
      return Ok(StepOutcome::Skipped);
    }

    info!(mode = %policy.mode(), "running Trimmomatic for read trimming");
    create_dirs(self.output_dirs()).await?;

    self
      .ctx
      .runner()
      .run(&self.command(&policy))
      .await
      .map_err(|source| StepError::Tool { tool: TOOL, source })?;

    verify_outputs(TOOL, outputs).await?;
    info!("Trimmomatic trimming completed");
    Ok(StepOutcome::Completed)
  }
}
