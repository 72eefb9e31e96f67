//! Shared input/output handling for step runs.

use std::path::{Path, PathBuf};

use bioasm_artifact::{Artifact, OutputState, artifact_ready, inspect, remove_if_exists};
use tokio::fs;
use tracing::{info, warn};

use crate::error::StepError;

/// Inspect artifacts off the async runtime; gzip checks decode whole files.
pub(crate) async fn inspect_outputs(outputs: Vec<Artifact>) -> Result<OutputState, StepError> {
  tokio::task::spawn_blocking(move || inspect(&outputs))
    .await
    .map_err(|e| StepError::Task {
      message: e.to_string(),
    })
}

/// Fail unless every `(description, path)` input exists as a file.
pub(crate) fn require_inputs<'a>(
  inputs: impl IntoIterator<Item = (&'static str, &'a Path)>,
) -> Result<(), StepError> {
  for (what, path) in inputs {
    if path.as_os_str().is_empty() || !artifact_ready(path) {
      return Err(StepError::missing_input(what, path));
    }
  }
  Ok(())
}

/// Decide whether a step can be skipped.
///
/// Returns `true` when all outputs are valid. Corrupt outputs cause every
/// path in `cleanup` to be removed; removal failures are logged and ignored.
pub(crate) async fn resume_check(
  step: &str,
  outputs: Vec<Artifact>,
  cleanup: &[PathBuf],
) -> Result<bool, StepError> {
  match inspect_outputs(outputs).await? {
    OutputState::Ready => {
      info!(step = %step, "outputs already exist and passed integrity check, skipping");
      Ok(true)
    }
    OutputState::Stale(paths) => {
      warn!(
        step = %step,
        stale = ?paths,
        "existing outputs appear corrupted or unfinished, regenerating"
      );
      for path in cleanup {
        if let Err(e) = remove_if_exists(path) {
          warn!(step = %step, path = %path.display(), error = %e, "failed to remove stale output");
        }
      }
      Ok(false)
    }
    OutputState::Missing(_) => Ok(false),
  }
}

pub(crate) async fn create_dirs<'a>(
  dirs: impl IntoIterator<Item = &'a Path>,
) -> Result<(), StepError> {
  for dir in dirs {
    fs::create_dir_all(dir)
      .await
      .map_err(|source| StepError::CreateDir {
        path: dir.to_path_buf(),
        source,
      })?;
  }
  Ok(())
}

/// Postcondition: after a successful invocation every output must be valid.
pub(crate) async fn verify_outputs(
  tool: &'static str,
  outputs: Vec<Artifact>,
) -> Result<(), StepError> {
  match inspect_outputs(outputs).await? {
    OutputState::Ready => Ok(()),
    OutputState::Missing(paths) => Err(StepError::MissingOutput { tool, paths }),
    OutputState::Stale(paths) => Err(StepError::InvalidOutput { tool, paths }),
  }
}

/// Paths of a set of artifacts, for use as a cleanup list.
pub(crate) fn paths_of(outputs: &[Artifact]) -> Vec<PathBuf> {
  outputs.iter().map(|a| a.path.clone()).collect()
}
