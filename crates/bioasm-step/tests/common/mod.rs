//! Shared fixtures for step tests.
#![allow(dead_code)]

use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bioasm_config::RunConfig;
use bioasm_invoker::{InvokeError, ToolCommand, ToolRunner};
use bioasm_step::StepContext;
use flate2::Compression;
use flate2::write::GzEncoder;

type Behavior = Box<dyn Fn(&ToolCommand) -> Result<(), InvokeError> + Send + Sync>;

/// A ToolRunner that records every command and delegates to a closure
/// instead of spawning a process.
pub struct FakeRunner {
  calls: Mutex<Vec<ToolCommand>>,
  behavior: Behavior,
}

impl FakeRunner {
  pub fn new(
    behavior: impl Fn(&ToolCommand) -> Result<(), InvokeError> + Send + Sync + 'static,
  ) -> Arc<Self> {
    Arc::new(Self {
      calls: Mutex::new(Vec::new()),
      behavior: Box::new(behavior),
    })
  }

  /// Exits zero without producing anything.
  pub fn noop() -> Arc<Self> {
    Self::new(|_| Ok(()))
  }

  pub fn calls(&self) -> Vec<ToolCommand> {
    self.calls.lock().unwrap().clone()
  }

  pub fn call_count(&self) -> usize {
    self.calls.lock().unwrap().len()
  }
}

#[async_trait]
impl ToolRunner for FakeRunner {
  async fn run(&self, command: &ToolCommand) -> Result<(), InvokeError> {
    self.calls.lock().unwrap().push(command.clone());
    (self.behavior)(command)
  }
}

pub fn context(runner: &Arc<FakeRunner>) -> StepContext {
  StepContext::new(runner.clone())
}

pub fn exit_failure(command: &ToolCommand) -> InvokeError {
  InvokeError::Exit {
    command: command.to_string(),
    code: Some(1),
  }
}

/// A config rooted in `dir` with existing pilon jar and adapter files.
pub fn config(dir: &Path) -> RunConfig {
  let jar = dir.join("pilon.jar");
  let adapters = dir.join("TruSeq3-PE.fa");
  std::fs::write(&jar, b"PK").unwrap();
  std::fs::write(&adapters, b">PrefixPE/1\nTACACTCTTTCCCTACACGACGCTCTTCCGATCT\n").unwrap();
  RunConfig::new("SRR42", dir.join("data"), jar, adapters)
}

pub fn gzip_bytes(content: &[u8]) -> Vec<u8> {
  let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
  encoder.write_all(content).unwrap();
  encoder.finish().unwrap()
}

pub fn write_gzip(path: &Path, content: &[u8]) {
  write_file(path, &gzip_bytes(content));
}

pub fn write_file(path: &Path, content: &[u8]) {
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent).unwrap();
  }
  std::fs::write(path, content).unwrap();
}

pub const FASTQ: &[u8] = b"@r1\nACGTACGTAC\n+\nIIIIIIIIII\n@r2\nTTGGCCAATT\n+\nIIIIIIIIII\n";

/// The same reads, cut off mid-stream.
pub fn truncated_gzip() -> Vec<u8> {
  let reads: Vec<u8> = FASTQ.iter().copied().cycle().take(20_000).collect();
  let full = gzip_bytes(&reads);
  full[..full.len() / 2].to_vec()
}
