use std::path::PathBuf;

use async_trait::async_trait;
use bioasm_artifact::Artifact;
use bioasm_config::RunConfig;
use bioasm_invoker::ToolCommand;
use tracing::info;

use crate::error::StepError;
use crate::outcome::StepOutcome;
use crate::outputs::{create_dirs, paths_of, resume_check, verify_outputs};
use crate::progress::Spinner;
use crate::{Step, StepContext};

const TOOL: &str = "fastq-dump";

/// Fetches the paired raw reads for a sample from SRA.
pub struct DownloadStep {
  sample_id: String,
  raw_dir: PathBuf,
  reads: (PathBuf, PathBuf),
  ctx: StepContext,
}

impl DownloadStep {
  pub fn new(config: &RunConfig, ctx: StepContext) -> Self {
    let layout = config.layout();
    Self {
      sample_id: config.sample_id.clone(),
      raw_dir: layout.raw_dir(),
      reads: layout.raw_reads(),
      ctx,
    }
  }

  pub fn command(&self) -> ToolCommand {
    ToolCommand::new(TOOL)
      .args(["--split-files", "--gzip", "-O"])
      .arg(&self.raw_dir)
      .arg(&self.sample_id)
  }
}

#[async_trait]
impl Step for DownloadStep {
  fn name(&self) -> &str {
    "Download Raw Data"
  }

  fn outputs(&self) -> Vec<Artifact> {
    vec![Artifact::gzip(&self.reads.0), Artifact::gzip(&self.reads.1)]
  }

  async fn run(&self) -> Result<StepOutcome, StepError> {
    let outputs = self.outputs();
    if resume_check(self.name(), outputs.clone(), &paths_of(&outputs)).await? {
      return Ok(StepOutcome::Skipped);
    }

    info!(sample_id = %self.sample_id, "downloading raw data");
    create_dirs([self.raw_dir.as_path()]).await?;

    let spinner = self
      .ctx
      .progress_enabled()
      .then(|| Spinner::start(format!("Downloading {} ({})", self.sample_id, TOOL)));

    let result = self.ctx.runner().run(&self.command()).await;

    if let Some(spinner) = spinner {
      spinner
        .stop(if result.is_ok() { "done" } else { "failed" })
        .await;
    }
    result.map_err(|source| StepError::Tool { tool: TOOL, source })?;

    verify_outputs(TOOL, outputs).await?;
    info!(sample_id = %self.sample_id, "data download completed");
    Ok(StepOutcome::Completed)
  }
}
