use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bioasm_artifact::Artifact;
use bioasm_config::RunConfig;
use bioasm_invoker::ToolCommand;
use tracing::info;

use crate::error::StepError;
use crate::outcome::StepOutcome;
use crate::outputs::{create_dirs, paths_of, require_inputs, resume_check, verify_outputs};
use crate::{Step, StepContext};

const TOOL: &str = "fastqc";

/// FastQC report over a pair of read files.
///
/// Used twice in a run: once on the raw reads and once on the trimmed reads.
pub struct QualityReportStep {
  name: &'static str,
  reads: (PathBuf, PathBuf),
  out_dir: PathBuf,
  threads: u32,
  ctx: StepContext,
}

impl QualityReportStep {
  /// Report on the downloaded reads.
  pub fn raw(config: &RunConfig, ctx: StepContext) -> Self {
    let layout = config.layout();
    Self {
      name: "FastQC Analysis",
      reads: layout.raw_reads(),
      out_dir: layout.fastqc_raw_dir(),
      threads: config.threads,
      ctx,
    }
  }

  /// Report on the trimmed, paired reads.
  pub fn trimmed(config: &RunConfig, ctx: StepContext) -> Self {
    let layout = config.layout();
    Self {
      name: "FastQC Analysis on Trimmed Reads",
      reads: layout.trimmed_paired(),
      out_dir: layout.fastqc_trimmed_dir(),
      threads: config.threads,
      ctx,
    }
  }

  pub fn command(&self) -> ToolCommand {
    ToolCommand::new(TOOL)
      .arg(&self.reads.0)
      .arg(&self.reads.1)
      .arg("-o")
      .arg(&self.out_dir)
      .arg("-t")
      .arg(self.threads.to_string())
  }
}

#[async_trait]
impl Step for QualityReportStep {
  fn name(&self) -> &str {
    self.name
  }

  fn outputs(&self) -> Vec<Artifact> {
    [&self.reads.0, &self.reads.1]
      .into_iter()
      .flat_map(|read| {
        let stem = fastqc_stem(read);
        [
          Artifact::file(self.out_dir.join(format!("{}_fastqc.html", stem))),
          Artifact::file(self.out_dir.join(format!("{}_fastqc.zip", stem))),
        ]
      })
      .collect()
  }

  async fn run(&self) -> Result<StepOutcome, StepError> {
    require_inputs([
      ("input FASTQ", self.reads.0.as_path()),
      ("input FASTQ", self.reads.1.as_path()),
    ])?;

    let outputs = self.outputs();
    if resume_check(self.name, outputs.clone(), &paths_of(&outputs)).await? {
      return Ok(StepOutcome::Skipped);
    }

    info!(step = %self.name, "running FastQC");
    create_dirs([self.out_dir.as_path()]).await?;

    self
      .ctx
      .runner()
      .run(&self.command())
      .await
      .map_err(|source| StepError::Tool { tool: TOOL, source })?;

    verify_outputs(TOOL, outputs).await?;
    info!(step = %self.name, "FastQC analysis completed");
    Ok(StepOutcome::Completed)
  }
}

/// Report name prefix FastQC derives from an input file name.
fn fastqc_stem(path: &Path) -> String {
  let name = path
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_default();
  let name = [".gz", ".bz2"]
    .iter()
    .find_map(|ext| name.strip_suffix(*ext))
    .unwrap_or(&name);
  [".fastq", ".fq", ".txt", ".sam", ".bam"]
    .iter()
    .find_map(|ext| name.strip_suffix(*ext))
    .unwrap_or(name)
    .to_string()
}
