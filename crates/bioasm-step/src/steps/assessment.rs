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

const TOOL: &str = "qualimap";

/// Final alignment quality assessment with Qualimap `bamqc`.
pub struct AssessmentStep {
  bam: PathBuf,
  out_dir: PathBuf,
  report: PathBuf,
  genome_results: PathBuf,
  memory_gb: u32,
  ctx: StepContext,
}

impl AssessmentStep {
  pub fn new(config: &RunConfig, ctx: StepContext) -> Self {
    let layout = config.layout();
    Self {
      bam: layout.sorted_bam(),
      out_dir: layout.qualimap_dir(),
      report: layout.qualimap_report(),
      genome_results: layout.qualimap_genome_results(),
      memory_gb: config.memory_gb,
      ctx,
    }
  }

  pub fn command(&self) -> ToolCommand {
    ToolCommand::new(TOOL)
      .args(["bamqc", "-bam"])
      .arg(&self.bam)
      .arg("-outdir")
      .arg(&self.out_dir)
      .arg(format!("--java-mem-size={}G", self.memory_gb))
  }
}

#[async_trait]
impl Step for AssessmentStep {
  fn name(&self) -> &str {
    "Qualimap Quality Assessment"
  }

  fn outputs(&self) -> Vec<Artifact> {
    vec![
      Artifact::file(&self.report),
      Artifact::file(&self.genome_results),
    ]
  }

  async fn run(&self) -> Result<StepOutcome, StepError> {
    require_inputs([("sorted BAM", self.bam.as_path())])?;

    let outputs = self.outputs();
    if resume_check(self.name(), outputs.clone(), &paths_of(&outputs)).await? {
      return Ok(StepOutcome::Skipped);
    }

    info!("running Qualimap for quality assessment");
    create_dirs([self.out_dir.as_path()]).await?;

    self
      .ctx
      .runner()
      .run(&self.command())
      .await
      .map_err(|source| StepError::Tool { tool: TOOL, source })?;

    verify_outputs(TOOL, outputs).await?;
    info!(report = %self.report.display(), "Qualimap quality assessment completed");
    Ok(StepOutcome::Completed)
  }
}
