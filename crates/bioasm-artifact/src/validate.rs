use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;

/// Check that a path exists and is not a directory.
pub fn artifact_ready(path: impl AsRef<Path>) -> bool {
  fs::metadata(path).map(|m| !m.is_dir()).unwrap_or(false)
}

/// Verify that a gzip file can be decompressed completely.
///
/// The whole stream (every member) is decoded and discarded, so a truncated
/// body or a missing trailer is detected. Zero-length files are rejected.
/// The file is only read.
pub fn gzip_integrity_ok(path: impl AsRef<Path>) -> bool {
  let path = path.as_ref();
  let file = match File::open(path) {
    Ok(f) => f,
    Err(_) => return false,
  };

  match file.metadata() {
    Ok(meta) if meta.is_file() && meta.len() > 0 => {}
    _ => return false,
  }

  let mut decoder = MultiGzDecoder::new(BufReader::new(file));
  io::copy(&mut decoder, &mut io::sink()).is_ok()
}

/// Delete a file if it exists. Directories are left alone.
pub fn remove_if_exists(path: impl AsRef<Path>) -> io::Result<()> {
  let path = path.as_ref();
  if artifact_ready(path) {
    fs::remove_file(path)?;
  }
  Ok(())
}
