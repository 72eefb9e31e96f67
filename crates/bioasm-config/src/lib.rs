//! bio-assembler config
//!
//! This crate holds the immutable run configuration for one assembly run.
//! A [`RunConfig`] is built once from CLI input, validated, and then shared by
//! reference with every pipeline step constructor.
//!
//! It also owns the two pieces of policy that steps read from configuration:
//! - [`FilterPolicy`]: the read trimming thresholds (preset or custom)
//! - [`SampleLayout`]: the fixed per-sample directory and file names

mod error;
mod filter;
mod layout;
mod run;

pub use error::{ConfigError, FilterError};
pub use filter::{FILTER_MODES, FilterPolicy, FilterPreset};
pub use layout::SampleLayout;
pub use run::{DEFAULT_MEMORY_GB, DEFAULT_THREADS, RunConfig, validate_sample_id};
