//! The assembly stage graph, run end to end against a simulated toolchain.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bioasm_config::{RunConfig, SampleLayout};
use bioasm_invoker::{InvokeError, ToolCommand, ToolRunner};
use bioasm_pipeline::{PipelineError, assembly_pipeline};
use bioasm_step::{StepContext, StepError, StepOutcome};
use flate2::Compression;
use flate2::write::GzEncoder;

const FASTQ: &[u8] = b"@r1\nACGTACGTAC\n+\nIIIIIIIIII\n";

/// Writes what each real tool would write, keyed on the program name.
struct SimulatedTools {
  layout: SampleLayout,
  calls: AtomicUsize,
  programs: Mutex<Vec<String>>,
  fail_program: Option<&'static str>,
}

impl SimulatedTools {
  fn new(layout: SampleLayout) -> Arc<Self> {
    Self::failing_at(layout, None)
  }

  fn failing_at(layout: SampleLayout, fail_program: Option<&'static str>) -> Arc<Self> {
    Arc::new(Self {
      layout,
      calls: AtomicUsize::new(0),
      programs: Mutex::new(Vec::new()),
      fail_program,
    })
  }

  fn programs(&self) -> Vec<String> {
    self.programs.lock().unwrap().clone()
  }
}

fn write_gzip(path: &Path) {
  std::fs::create_dir_all(path.parent().unwrap()).unwrap();
  let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
  encoder.write_all(FASTQ).unwrap();
  std::fs::write(path, encoder.finish().unwrap()).unwrap();
}

fn write_text(path: &Path, content: &str) {
  std::fs::create_dir_all(path.parent().unwrap()).unwrap();
  std::fs::write(path, content).unwrap();
}

fn fastqc_reports(out_dir: &Path, inputs: &[PathBuf]) {
  for input in inputs {
    let name = input.file_name().unwrap().to_string_lossy();
    let stem = name.trim_end_matches(".fastq.gz");
    write_text(&out_dir.join(format!("{}_fastqc.html", stem)), "<html/>");
    write_text(&out_dir.join(format!("{}_fastqc.zip", stem)), "PK");
  }
}

#[async_trait]
impl ToolRunner for SimulatedTools {
  async fn run(&self, command: &ToolCommand) -> Result<(), InvokeError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    let argv = command.argv();
    self.programs.lock().unwrap().push(argv[0].clone());

    if self.fail_program == Some(argv[0].as_str()) {
      return Err(InvokeError::Exit {
        command: command.to_string(),
        code: Some(1),
      });
    }

    let layout = &self.layout;
    match argv[0].as_str() {
      "fastq-dump" => {
        let (r1, r2) = layout.raw_reads();
        write_gzip(&r1);
        write_gzip(&r2);
      }
      "fastqc" => {
        let inputs = [PathBuf::from(&argv[1]), PathBuf::from(&argv[2])];
        fastqc_reports(Path::new(&argv[4]), &inputs);
      }
      "trimmomatic" => {
        let (p1, p2) = layout.trimmed_paired();
        let (u1, u2) = layout.trimmed_unpaired();
        for path in [p1, p2, u1, u2] {
          write_gzip(&path);
        }
      }
      "spades.py" => write_text(&layout.contigs(), ">NODE_1\nACGT\n>NODE_2\nGGCC\n"),
      "bash" => write_text(&layout.sorted_bam(), "BAM"),
      "java" => {
        write_text(&layout.pilon_contigs(), ">NODE_1_pilon\nACGT\n");
        write_text(&layout.pilon_changes(), "NODE_1:2 NODE_1_pilon:2 C T\n");
      }
      "qualimap" => {
        let out_dir = Path::new(&argv[5]);
        write_text(&out_dir.join("qualimapReport.html"), "<html/>");
        write_text(&out_dir.join("genome_results.txt"), "mean coverageData = 42.1X\n");
      }
      _ => {}
    }
    Ok(())
  }
}

fn config(dir: &Path) -> RunConfig {
  let jar = dir.join("pilon.jar");
  let adapters = dir.join("adapters.fa");
  std::fs::write(&jar, b"PK").unwrap();
  std::fs::write(&adapters, b">a\nAGATCGGAAGAGC\n").unwrap();
  RunConfig::new("SRR7", dir.join("data"), jar, adapters)
}

const STAGES: [&str; 7] = [
  "Download Raw Data",
  "FastQC Analysis",
  "Trimmomatic",
  "FastQC Analysis on Trimmed Reads",
  "SPAdes Assembly",
  "Pilon Polishing",
  "Qualimap Quality Assessment",
];

#[test]
fn test_stage_graph() {
  let dir = tempfile::tempdir().unwrap();
  let config = config(dir.path());
  let tools = SimulatedTools::new(config.layout());
  let pipeline = assembly_pipeline(&config, StepContext::new(tools));

  let phases: Vec<Vec<&str>> = pipeline.phases().iter().map(|p| p.step_names()).collect();
  assert_eq!(
    phases,
    vec![
      vec![STAGES[0]],
      vec![STAGES[1], STAGES[2]],
      vec![STAGES[3]],
      vec![STAGES[4]],
      vec![STAGES[5]],
      vec![STAGES[6]],
    ]
  );
  assert!(pipeline.parallelism());
}

#[test]
fn test_no_parallel_flag_disables_parallelism() {
  let dir = tempfile::tempdir().unwrap();
  let mut config = config(dir.path());
  config.no_parallel = true;
  let tools = SimulatedTools::new(config.layout());

  assert!(!assembly_pipeline(&config, StepContext::new(tools)).parallelism());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_full_run_then_resume_skips_everything() {
  let dir = tempfile::tempdir().unwrap();
  let config = config(dir.path());
  let tools = SimulatedTools::new(config.layout());
  let pipeline = assembly_pipeline(&config, StepContext::new(tools.clone()));

  let report = pipeline.run().await.unwrap();
  let names: Vec<&str> = report.steps.iter().map(|r| r.step.as_str()).collect();
  assert_eq!(names, STAGES);
  assert!(report.steps.iter().all(|r| r.outcome == StepOutcome::Completed));
  // download, 2x fastqc, trimmomatic, spades, 4x polishing, qualimap
  assert_eq!(tools.calls.load(Ordering::SeqCst), 10);

  let again = pipeline.run().await.unwrap();
  assert!(again.steps.iter().all(|r| r.outcome == StepOutcome::Skipped));
  assert_eq!(tools.calls.load(Ordering::SeqCst), 10);
  assert_ne!(report.run_id, again.run_id);
}

#[tokio::test]
async fn test_failure_in_assembly_stops_before_polishing() {
  let dir = tempfile::tempdir().unwrap();
  let config = config(dir.path());
  let tools = SimulatedTools::failing_at(config.layout(), Some("spades.py"));
  let pipeline = assembly_pipeline(&config, StepContext::new(tools.clone()));

  let err = pipeline.run().await.unwrap_err();

  assert_eq!(err.step(), "SPAdes Assembly");
  assert!(matches!(
    err,
    PipelineError::StepFailed {
      source: StepError::Tool { tool: "spades", .. },
      ..
    }
  ));
  let programs = tools.programs();
  assert_eq!(programs.last().map(String::as_str), Some("spades.py"));
  assert!(!programs.iter().any(|p| p == "bwa" || p == "java"));
}
