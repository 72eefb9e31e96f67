use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

/// A single external tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
  program: OsString,
  args: Vec<OsString>,
  current_dir: Option<PathBuf>,
}

impl ToolCommand {
  pub fn new(program: impl AsRef<OsStr>) -> Self {
    Self {
      program: program.as_ref().to_owned(),
      args: Vec::new(),
      current_dir: None,
    }
  }

  /// A composite command run through `bash`, e.g. two tools joined by a pipe.
  ///
  /// `pipefail` is set so the composite fails if any side of the pipe fails.
  pub fn shell(script: impl AsRef<OsStr>) -> Self {
    Self::new("bash").args(["-o", "pipefail", "-c"]).arg(script)
  }

  pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
    self.args.push(arg.as_ref().to_owned());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
  {
    self
      .args
      .extend(args.into_iter().map(|a| a.as_ref().to_owned()));
    self
  }

  pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.current_dir = Some(dir.into());
    self
  }

  pub fn get_program(&self) -> &OsStr {
    &self.program
  }

  pub fn get_args(&self) -> &[OsString] {
    &self.args
  }

  pub fn get_current_dir(&self) -> Option<&Path> {
    self.current_dir.as_deref()
  }

  /// Program followed by its arguments, lossily converted to UTF-8.
  pub fn argv(&self) -> Vec<String> {
    std::iter::once(&self.program)
      .chain(self.args.iter())
      .map(|s| s.to_string_lossy().into_owned())
      .collect()
  }
}

impl fmt::Display for ToolCommand {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, part) in self.argv().iter().enumerate() {
      if i > 0 {
        f.write_str(" ")?;
      }
      if part.is_empty() || part.contains(char::is_whitespace) {
        write!(f, "'{}'", part)?;
      } else {
        f.write_str(part)?;
      }
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_builder() {
    let cmd = ToolCommand::new("fastqc")
      .arg("reads_1.fastq.gz")
      .args(["-o", "out", "-t", "4"])
      .current_dir("/tmp");

    assert_eq!(cmd.get_program(), "fastqc");
    assert_eq!(
      cmd.argv(),
      vec!["fastqc", "reads_1.fastq.gz", "-o", "out", "-t", "4"]
    );
    assert_eq!(cmd.get_current_dir(), Some(Path::new("/tmp")));
  }

  #[test]
  fn test_shell_command() {
    let cmd = ToolCommand::shell("bwa mem ref.fa r1 r2 | samtools sort -o out.bam -");
    assert_eq!(
      cmd.argv(),
      vec![
        "bash",
        "-o",
        "pipefail",
        "-c",
        "bwa mem ref.fa r1 r2 | samtools sort -o out.bam -"
      ]
    );
  }

  #[test]
  fn test_display_quotes_whitespace() {
    let cmd = ToolCommand::new("bash").args(["-c", "echo hi", ""]);
    assert_eq!(cmd.to_string(), "bash -c 'echo hi' ''");
  }
}
