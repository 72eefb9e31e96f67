//! External tool invocation.
//!
//! Every pipeline step ultimately runs one or more command-line tools. This
//! crate describes such an invocation ([`ToolCommand`]) and defines the
//! [`ToolRunner`] seam steps call through. [`ProcessRunner`] is the production
//! implementation: it spawns the child with the operator's terminal as its
//! stdout/stderr so tool output streams through in real time.
//!
//! Invocations are never retried. A non-zero exit or a spawn failure is
//! reported once as an [`InvokeError`] carrying the command line.

mod command;
mod error;
mod runner;

pub use command::ToolCommand;
pub use error::InvokeError;
pub use runner::{ProcessRunner, ToolRunner};
