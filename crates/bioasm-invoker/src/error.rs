//! Tool invocation errors.

/// Errors that can occur while running an external tool.
#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
  /// The process could not be started (e.g. program not on `PATH`).
  #[error("failed to start `{command}`: {source}")]
  Spawn {
    command: String,
    #[source]
    source: std::io::Error,
  },

  /// The process ran and exited unsuccessfully.
  #[error("`{command}` {}", describe_exit(.code))]
  Exit { command: String, code: Option<i32> },
}

impl InvokeError {
  /// The command line of the failed invocation.
  pub fn command(&self) -> &str {
    match self {
      InvokeError::Spawn { command, .. } | InvokeError::Exit { command, .. } => command,
    }
  }
}

fn describe_exit(code: &Option<i32>) -> String {
  match code {
    Some(code) => format!("exited with status {}", code),
    None => "was terminated by a signal".to_string(),
  }
}
