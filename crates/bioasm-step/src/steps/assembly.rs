use std::path::PathBuf;

use async_trait::async_trait;
use bioasm_artifact::Artifact;
use bioasm_config::RunConfig;
use bioasm_invoker::ToolCommand;
use tracing::info;

use crate::error::StepError;
use crate::outcome::StepOutcome;
use crate::outputs::{create_dirs, paths_of, require_inputs, resume_check, verify_outputs};
use crate::{Step, StepContext};

const TOOL: &str = "spades";

/// De novo assembly of the trimmed read pair with SPAdes.
pub struct AssemblyStep {
  reads: (PathBuf, PathBuf),
  out_dir: PathBuf,
  contigs: PathBuf,
  threads: u32,
  memory_gb: u32,
  ctx: StepContext,
}

impl AssemblyStep {
  pub fn new(config: &RunConfig, ctx: StepContext) -> Self {
    let layout = config.layout();
    Self {
      reads: layout.trimmed_paired(),
      out_dir: layout.assembly_dir(),
      contigs: layout.contigs(),
      threads: config.threads,
      memory_gb: config.memory_gb,
      ctx,
    }
  }

  pub fn command(&self) -> ToolCommand {
    ToolCommand::new("spades.py")
      .args(["--only-assembler", "--careful"])
      .arg("-t")
      .arg(self.threads.to_string())
      .arg("-m")
      .arg(self.memory_gb.to_string())
      .arg("--pe1-1")
      .arg(&self.reads.0)
      .arg("--pe1-2")
      .arg(&self.reads.1)
      .arg("-o")
      .arg(&self.out_dir)
  }
}

#[async_trait]
impl Step for AssemblyStep {
  fn name(&self) -> &str {
    "SPAdes Assembly"
  }

  fn outputs(&self) -> Vec<Artifact> {
    vec![Artifact::file(&self.contigs)]
  }

  async fn run(&self) -> Result<StepOutcome, StepError> {
    require_inputs([
      ("trimmed FASTQ", self.reads.0.as_path()),
      ("trimmed FASTQ", self.reads.1.as_path()),
    ])?;

    let outputs = self.outputs();
    if resume_check(self.name(), outputs.clone(), &paths_of(&outputs)).await? {
      return Ok(StepOutcome::Skipped);
    }

    info!(threads = self.threads, memory_gb = self.memory_gb, "running SPAdes for de novo assembly");
    create_dirs([self.out_dir.as_path()]).await?;

    self
      .ctx
      .runner()
      .run(&self.command())
      .await
      .map_err(|source| StepError::Tool { tool: TOOL, source })?;

    verify_outputs(TOOL, outputs).await?;
    info!(contigs = %self.contigs.display(), "SPAdes assembly completed");
    Ok(StepOutcome::Completed)
  }
}
