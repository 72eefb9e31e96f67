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

const PILON_OUTPUT: &str = "pilon_r1";

/// One round of reference-guided polishing with Pilon.
///
/// Runs four tools in order: index the contigs, align the trimmed reads and
/// sort the alignment (one piped command), index the alignment, then Pilon.
/// The first failing invocation ends the step. Whatever it and its
/// predecessors wrote is left on disk for inspection.
pub struct PolishStep {
  contigs: PathBuf,
  reads: (PathBuf, PathBuf),
  pilon_dir: PathBuf,
  bam: PathBuf,
  pilon_fasta: PathBuf,
  pilon_changes: PathBuf,
  pilon_jar: PathBuf,
  threads: u32,
  memory_gb: u32,
  ctx: StepContext,
}

impl PolishStep {
  pub fn new(config: &RunConfig, ctx: StepContext) -> Self {
    let layout = config.layout();
    Self {
      contigs: layout.contigs(),
      reads: layout.trimmed_paired(),
      pilon_dir: layout.pilon_dir(),
      bam: layout.sorted_bam(),
      pilon_fasta: layout.pilon_contigs(),
      pilon_changes: layout.pilon_changes(),
      pilon_jar: config.pilon_jar.clone(),
      threads: config.threads,
      memory_gb: config.memory_gb,
      ctx,
    }
  }

  /// The sub-invocations, each labelled with the tool name used in errors.
  pub fn commands(&self) -> Vec<(&'static str, ToolCommand)> {
    let threads = self.threads.to_string();

    let index_contigs = ToolCommand::new("bwa").arg("index").arg(&self.contigs);

    let align_and_sort = ToolCommand::shell(format!(
      "bwa mem -t {threads} {contigs} {r1} {r2} | samtools sort -@ {threads} -o {bam} -",
      threads = threads,
      contigs = shell_quote(&self.contigs),
      r1 = shell_quote(&self.reads.0),
      r2 = shell_quote(&self.reads.1),
      bam = shell_quote(&self.bam),
    ));

    let index_bam = ToolCommand::new("samtools").arg("index").arg(&self.bam);

    let pilon = ToolCommand::new("java")
      .arg(format!("-Xmx{}G", self.memory_gb))
      .arg("-jar")
      .arg(&self.pilon_jar)
      .arg("--genome")
      .arg(&self.contigs)
      .arg("--frags")
      .arg(&self.bam)
      .args(["--output", PILON_OUTPUT, "--outdir"])
      .arg(&self.pilon_dir)
      .args(["--changes", "--fix", "snps,indels", "--threads"])
      .arg(&threads);

    vec![
      ("bwa index", index_contigs),
      ("bwa mem and samtools sort", align_and_sort),
      ("samtools index", index_bam),
      ("pilon", pilon),
    ]
    .into_iter()
    .map(|(tool, cmd)| (tool, cmd.current_dir(&self.pilon_dir)))
    .collect()
  }
}

#[async_trait]
impl Step for PolishStep {
  fn name(&self) -> &str {
    "Pilon Polishing"
  }

  /// The sorted alignment is declared too: the assessment step reads it.
  fn outputs(&self) -> Vec<Artifact> {
    vec![
      Artifact::file(&self.pilon_fasta),
      Artifact::file(&self.pilon_changes),
      Artifact::file(&self.bam),
    ]
  }

  async fn run(&self) -> Result<StepOutcome, StepError> {
    require_inputs([
      ("assembly contigs", self.contigs.as_path()),
      ("trimmed FASTQ", self.reads.0.as_path()),
      ("trimmed FASTQ", self.reads.1.as_path()),
      ("pilon jar", self.pilon_jar.as_path()),
    ])?;

    let outputs = self.outputs();
    if resume_check(self.name(), outputs.clone(), &paths_of(&outputs)).await? {
      return Ok(StepOutcome::Skipped);
    }

    info!("running Pilon for assembly polishing");
    create_dirs([self.pilon_dir.as_path()]).await?;

    for (tool, command) in self.commands() {
      info!(tool = %tool, "polishing sub-step started");
      self
        .ctx
        .runner()
        .run(&command)
        .await
        .map_err(|source| StepError::Tool { tool, source })?;
    }

    verify_outputs("pilon", outputs).await?;
    info!(contigs = %self.pilon_fasta.display(), "Pilon polishing completed");
    Ok(StepOutcome::Completed)
  }
}

/// Single-quote a path for `bash -c`.
fn shell_quote(path: &Path) -> String {
  format!("'{}'", path.display().to_string().replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_shell_quote() {
    assert_eq!(shell_quote(Path::new("/data/a b.fa")), "'/data/a b.fa'");
    assert_eq!(shell_quote(Path::new("/data/it's.fa")), r"'/data/it'\''s.fa'");
  }
}
