use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, error, instrument};

use crate::command::ToolCommand;
use crate::error::InvokeError;

/// Runs external tools on behalf of steps.
///
/// Implementations must not retry. Tests substitute a fake runner to observe
/// invocations without spawning processes.
#[async_trait]
pub trait ToolRunner: Send + Sync {
  /// Run the command to completion.
  async fn run(&self, command: &ToolCommand) -> Result<(), InvokeError>;
}

/// Spawns real child processes.
///
/// stdout and stderr are inherited from this process, stdin is closed. The
/// child is not killed if the awaiting future is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
  pub fn new() -> Self {
    Self
  }
}

#[async_trait]
impl ToolRunner for ProcessRunner {
  #[instrument(name = "tool_run", skip(self, command), fields(command = %command))]
  async fn run(&self, command: &ToolCommand) -> Result<(), InvokeError> {
    let mut cmd = Command::new(command.get_program());
    cmd
      .args(command.get_args())
      .stdin(Stdio::null())
      .stdout(Stdio::inherit())
      .stderr(Stdio::inherit());
    if let Some(dir) = command.get_current_dir() {
      cmd.current_dir(dir);
    }

    debug!("tool started");
    let status = cmd.status().await.map_err(|source| {
      error!(error = %source, "tool failed to start");
      InvokeError::Spawn {
        command: command.to_string(),
        source,
      }
    })?;

    if status.success() {
      debug!("tool completed");
      Ok(())
    } else {
      error!(status = ?status.code(), "tool exited unsuccessfully");
      Err(InvokeError::Exit {
        command: command.to_string(),
        code: status.code(),
      })
    }
  }
}
