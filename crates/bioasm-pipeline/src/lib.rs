//! bio-assembler pipeline
//!
//! Runs [`Step`](bioasm_step::Step)s in an ordered list of phases. A phase is
//! either a single step or a group of steps that run concurrently and are
//! awaited together before the next phase starts. The first failure ends the
//! run; no later phase is started.

mod error;
mod events;
mod pipeline;
mod result;
mod stages;

pub use error::PipelineError;
pub use events::{ChannelNotifier, NoopNotifier, PipelineEvent, PipelineNotifier};
pub use pipeline::{Phase, Pipeline};
pub use result::{RunReport, StepRecord};
pub use stages::assembly_pipeline;
