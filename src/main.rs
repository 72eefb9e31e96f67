use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use bioasm_artifact::{count_fasta_records, count_lines};
use bioasm_config::{
  DEFAULT_MEMORY_GB, DEFAULT_THREADS, RunConfig, SampleLayout, validate_sample_id,
};
use bioasm_invoker::ProcessRunner;
use bioasm_pipeline::assembly_pipeline;
use bioasm_step::StepContext;

/// bio-assembler - genome assembly from raw sequencing reads
#[derive(Parser)]
#[command(name = "bio-assembler")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Root directory for per-sample data
  #[arg(long, global = true, default_value = "data")]
  data_dir: PathBuf,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Download, trim, assemble, polish and assess one sample
  Run(RunArgs),

  /// Summarize the outputs of a completed run
  Report {
    /// SRA run accession
    #[arg(short = 's', long = "srr")]
    sample_id: String,
  },
}

#[derive(Args)]
struct RunArgs {
  /// SRA run accession (e.g. SRR1234567)
  #[arg(short = 's', long = "srr")]
  sample_id: String,

  /// Threads passed to every tool
  #[arg(short, long, default_value_t = DEFAULT_THREADS)]
  threads: u32,

  /// Memory budget in GB for SPAdes, Pilon and Qualimap
  #[arg(short, long, default_value_t = DEFAULT_MEMORY_GB)]
  memory: u32,

  /// Path to the Pilon jar
  #[arg(long)]
  pilon_jar: PathBuf,

  /// Adapter FASTA for Trimmomatic ILLUMINACLIP
  #[arg(long)]
  adapter_fasta: PathBuf,

  /// Run raw QC and trimming one after the other
  #[arg(long)]
  no_parallel: bool,

  /// Read filtering preset: standard, strict, lenient or custom
  #[arg(long, default_value = "standard")]
  filter_mode: String,

  /// Trimmomatic arguments used when --filter-mode is custom
  #[arg(long)]
  filter_custom_args: Option<String>,
}

fn main() -> Result<()> {
  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(io::stderr))
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let cli = Cli::parse();
  let data_dir = absolute(&cli.data_dir)?;

  match cli.command {
    Some(Commands::Run(args)) => {
      run_pipeline(args, data_dir)?;
    }
    Some(Commands::Report { sample_id }) => {
      validate_sample_id(&sample_id).context("invalid sample id")?;
      print_report(&SampleLayout::new(&data_dir, sample_id));
    }
    None => {
      println!("bio-assembler - use --help to see available commands");
    }
  }

  Ok(())
}

/// Tools run in their output directories, so every path handed to them must
/// be absolute.
fn absolute(path: &Path) -> Result<PathBuf> {
  std::path::absolute(path).with_context(|| format!("failed to resolve path: {}", path.display()))
}

fn run_pipeline(args: RunArgs, data_dir: PathBuf) -> Result<()> {
  let mut config = RunConfig::new(
    args.sample_id,
    data_dir,
    absolute(&args.pilon_jar)?,
    absolute(&args.adapter_fasta)?,
  );
  config.threads = args.threads;
  config.memory_gb = args.memory;
  config.no_parallel = args.no_parallel;
  config.filter_mode = args.filter_mode;
  config.filter_custom_args = args.filter_custom_args;

  config.validate().context("invalid run configuration")?;

  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(async { run_pipeline_async(config).await })
}

async fn run_pipeline_async(config: RunConfig) -> Result<()> {
  info!(
    sample_id = %config.sample_id,
    config = %serde_json::to_string(&config)?,
    "starting genome assembly"
  );

  let runner = Arc::new(ProcessRunner::new());
  let ctx = StepContext::new(runner).with_progress(io::stderr().is_terminal());

  let report = assembly_pipeline(&config, ctx)
    .run()
    .await
    .with_context(|| format!("genome assembly of {} failed", config.sample_id))?;

  let layout = config.layout();
  info!(
    sample_id = %config.sample_id,
    run_id = %report.run_id,
    polished_contigs = %layout.pilon_contigs().display(),
    qualimap_report = %layout.qualimap_report().display(),
    "genome assembly complete"
  );

  println!("{}", serde_json::to_string_pretty(&report)?);

  Ok(())
}

fn print_report(layout: &SampleLayout) {
  println!("Report for sample {}", layout.sample_id());
  println!();
  println!("FastQC reports (raw):     {}", layout.fastqc_raw_dir().display());
  println!("FastQC reports (trimmed): {}", layout.fastqc_trimmed_dir().display());
  println!("SPAdes contigs:           {}", describe(count_fasta_records(layout.contigs())));
  println!("Pilon contigs:            {}", describe(count_fasta_records(layout.pilon_contigs())));
  println!("Pilon changes:            {}", describe(count_lines(layout.pilon_changes())));
  println!("Qualimap report:          {}", layout.qualimap_report().display());
}

fn describe(count: io::Result<usize>) -> String {
  match count {
    Ok(n) => n.to_string(),
    Err(_) => "unavailable".to_string(),
  }
}
