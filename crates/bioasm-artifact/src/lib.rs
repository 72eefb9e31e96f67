//! bio-assembler artifacts
//!
//! An artifact is a file on disk written by exactly one pipeline step. This
//! crate decides whether a step's declared artifacts are already present and
//! structurally valid, which is what makes resuming an interrupted run safe:
//! a step only skips its work when [`inspect`] reports [`OutputState::Ready`].
//!
//! All checks are read-only and synchronous. Gzip validation decodes the whole
//! stream, so its cost is proportional to the compressed size.

mod count;
mod validate;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use count::{count_fasta_records, count_lines};
pub use validate::{artifact_ready, gzip_integrity_ok, remove_if_exists};

/// How an artifact's validity is judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
  /// Valid when present.
  File,
  /// Valid when present, non-empty and fully decodable as gzip.
  Gzip,
}

/// A declared output file of a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
  pub path: PathBuf,
  pub kind: ArtifactKind,
}

impl Artifact {
  pub fn file(path: impl Into<PathBuf>) -> Self {
    Self {
      path: path.into(),
      kind: ArtifactKind::File,
    }
  }

  pub fn gzip(path: impl Into<PathBuf>) -> Self {
    Self {
      path: path.into(),
      kind: ArtifactKind::Gzip,
    }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  pub fn is_present(&self) -> bool {
    artifact_ready(&self.path)
  }

  pub fn is_valid(&self) -> bool {
    match self.kind {
      ArtifactKind::File => artifact_ready(&self.path),
      ArtifactKind::Gzip => gzip_integrity_ok(&self.path),
    }
  }
}

/// Result of inspecting a set of declared artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputState {
  /// Every artifact is present and valid.
  Ready,
  /// No artifact is invalid, but these are absent.
  Missing(Vec<PathBuf>),
  /// These artifacts are present but fail validation (e.g. truncated gzip).
  Stale(Vec<PathBuf>),
}

impl OutputState {
  pub fn is_ready(&self) -> bool {
    matches!(self, OutputState::Ready)
  }
}

/// Inspect a set of artifacts.
///
/// Present-but-invalid artifacts take precedence over missing ones: if any
/// artifact is corrupt the state is [`OutputState::Stale`].
pub fn inspect(artifacts: &[Artifact]) -> OutputState {
  let mut missing = Vec::new();
  let mut stale = Vec::new();

  for artifact in artifacts {
    if !artifact.is_present() {
      missing.push(artifact.path.clone());
    } else if !artifact.is_valid() {
      stale.push(artifact.path.clone());
    }
  }

  if !stale.is_empty() {
    OutputState::Stale(stale)
  } else if !missing.is_empty() {
    OutputState::Missing(missing)
  } else {
    OutputState::Ready
  }
}
