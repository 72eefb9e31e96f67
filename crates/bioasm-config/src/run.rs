use std::path::{MAIN_SEPARATOR, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::filter::FilterPolicy;
use crate::layout::SampleLayout;

pub const DEFAULT_THREADS: u32 = 4;
pub const DEFAULT_MEMORY_GB: u32 = 16;

/// Immutable configuration for a single pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
  /// Sequencing run accession (e.g. `SRR1234567`).
  pub sample_id: String,
  /// Root under which the per-sample directory is created.
  pub data_dir: PathBuf,
  pub threads: u32,
  pub memory_gb: u32,
  pub pilon_jar: PathBuf,
  pub adapter_fasta: PathBuf,
  /// Run the quality-report / trimming group sequentially.
  #[serde(default)]
  pub no_parallel: bool,
  #[serde(default = "default_filter_mode")]
  pub filter_mode: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub filter_custom_args: Option<String>,
}

/// Check that a sample identifier names exactly one directory under the data
/// directory: non-empty, no path separators, and not `.` or `..`.
pub fn validate_sample_id(sample_id: &str) -> Result<(), ConfigError> {
  if sample_id.trim().is_empty() {
    return Err(ConfigError::EmptySampleId);
  }
  if sample_id.contains(MAIN_SEPARATOR)
    || sample_id.contains('/')
    || sample_id == "."
    || sample_id == ".."
  {
    return Err(ConfigError::InvalidSampleId(sample_id.to_string()));
  }
  Ok(())
}

fn default_filter_mode() -> String {
  "standard".to_string()
}

impl RunConfig {
  /// Create a configuration with default resources and the `standard` filter.
  pub fn new(
    sample_id: impl Into<String>,
    data_dir: impl Into<PathBuf>,
    pilon_jar: impl Into<PathBuf>,
    adapter_fasta: impl Into<PathBuf>,
  ) -> Self {
    Self {
      sample_id: sample_id.into(),
      data_dir: data_dir.into(),
      threads: DEFAULT_THREADS,
      memory_gb: DEFAULT_MEMORY_GB,
      pilon_jar: pilon_jar.into(),
      adapter_fasta: adapter_fasta.into(),
      no_parallel: false,
      filter_mode: default_filter_mode(),
      filter_custom_args: None,
    }
  }

  pub fn layout(&self) -> SampleLayout {
    SampleLayout::new(&self.data_dir, &self.sample_id)
  }

  pub fn filter_policy(&self) -> Result<FilterPolicy, crate::FilterError> {
    FilterPolicy::resolve(&self.filter_mode, self.filter_custom_args.as_deref())
  }

  /// Check every value a step will rely on before anything is started.
  pub fn validate(&self) -> Result<(), ConfigError> {
    validate_sample_id(&self.sample_id)?;
    if self.threads == 0 {
      return Err(ConfigError::NotPositive { field: "threads" });
    }
    if self.memory_gb == 0 {
      return Err(ConfigError::NotPositive { field: "memory" });
    }
    if !self.pilon_jar.is_file() {
      return Err(ConfigError::MissingFile {
        what: "pilon jar",
        path: self.pilon_jar.clone(),
      });
    }
    if !self.adapter_fasta.is_file() {
      return Err(ConfigError::MissingFile {
        what: "adapter FASTA",
        path: self.adapter_fasta.clone(),
      });
    }
    self.filter_policy()?;
    Ok(())
  }
}
