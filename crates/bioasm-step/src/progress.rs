//! Terminal progress spinner.

use std::io::{self, Write};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

const FRAMES: [char; 4] = ['|', '/', '-', '\\'];
const FRAME_INTERVAL: Duration = Duration::from_millis(120);

/// An animated `prefix |` line redrawn in place on a background task.
///
/// [`Spinner::stop`] cancels the task and waits for it to exit before writing
/// the final status, so nothing logged after `stop` returns can interleave
/// with a spinner frame.
pub struct Spinner<W: Write + Send + 'static = io::Stderr> {
  prefix: String,
  cancel: CancellationToken,
  handle: JoinHandle<W>,
}

impl Spinner<io::Stderr> {
  /// Start a spinner on stderr.
  pub fn start(prefix: impl Into<String>) -> Self {
    Self::start_with_writer(prefix, io::stderr())
  }
}

impl<W: Write + Send + 'static> Spinner<W> {
  /// Start a spinner drawing to `writer`. Must be called inside a tokio runtime.
  pub fn start_with_writer(prefix: impl Into<String>, writer: W) -> Self {
    let prefix = prefix.into();
    let cancel = CancellationToken::new();
    let token = cancel.clone();
    let line = prefix.clone();

    let handle = tokio::spawn(async move {
      let mut writer = writer;
      let mut ticker = tokio::time::interval(FRAME_INTERVAL);
      let mut frame = 0usize;
      loop {
        tokio::select! {
          biased;
          _ = token.cancelled() => break,
          _ = ticker.tick() => {
            // Terminal write errors only affect the animation.
            let _ = write!(writer, "\r{} {}", line, FRAMES[frame % FRAMES.len()]);
            let _ = writer.flush();
            frame += 1;
          }
        }
      }
      writer
    });

    Self {
      prefix,
      cancel,
      handle,
    }
  }

  /// Stop the spinner, wait for its task, and print `prefix status`.
  ///
  /// Returns the writer, or `None` if the spinner task panicked.
  pub async fn stop(self, status: &str) -> Option<W> {
    self.cancel.cancel();
    let mut writer = self.handle.await.ok()?;
    let _ = writeln!(writer, "\r{} {}", self.prefix, status);
    let _ = writer.flush();
    Some(writer)
  }
}
