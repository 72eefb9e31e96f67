use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// Count FASTA records (lines starting with `>`).
pub fn count_fasta_records(path: impl AsRef<Path>) -> io::Result<usize> {
  let reader = BufReader::new(File::open(path)?);
  let mut count = 0;
  for line in reader.split(b'\n') {
    if line?.first() == Some(&b'>') {
      count += 1;
    }
  }
  Ok(count)
}

/// Count newline characters, like `wc -l`.
pub fn count_lines(path: impl AsRef<Path>) -> io::Result<usize> {
  let mut reader = BufReader::new(File::open(path)?);
  let mut buf = [0u8; 64 * 1024];
  let mut count = 0;
  loop {
    let n = reader.read(&mut buf)?;
    if n == 0 {
      break;
    }
    count += buf[..n].iter().filter(|&&b| b == b'\n').count();
  }
  Ok(count)
}
