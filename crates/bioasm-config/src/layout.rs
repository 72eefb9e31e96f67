use std::path::{Path, PathBuf};

/// Per-sample directory layout.
///
/// The directory and file names are read back by the `report` command and by
/// operators, so they must stay stable:
/// ```text
/// {data_dir}/{sample_id}/
/// ├── raw_data/{sample_id}_1.fastq.gz, {sample_id}_2.fastq.gz
/// ├── 01_fastqc_raw/
/// ├── 02_trimmed_reads/trimmed_{paired,unpaired}_{1,2}.fastq.gz
/// ├── 03_fastqc_trimmed/
/// ├── 04_spades_assembly/contigs.fasta
/// ├── 05_pilon_correction/round1/
/// │   ├── mapped_reads.sorted.bam
/// │   ├── pilon_r1.fasta
/// │   └── pilon_r1.changes
/// └── 08_qualimap_report/
///     ├── qualimapReport.html
///     └── genome_results.txt
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleLayout {
  sample_id: String,
  root: PathBuf,
}

impl SampleLayout {
  pub fn new(data_dir: impl AsRef<Path>, sample_id: impl Into<String>) -> Self {
    let sample_id = sample_id.into();
    let root = data_dir.as_ref().join(&sample_id);
    Self { sample_id, root }
  }

  pub fn sample_id(&self) -> &str {
    &self.sample_id
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn raw_dir(&self) -> PathBuf {
    self.root.join("raw_data")
  }

  pub fn raw_reads(&self) -> (PathBuf, PathBuf) {
    let dir = self.raw_dir();
    (
      dir.join(format!("{}_1.fastq.gz", self.sample_id)),
      dir.join(format!("{}_2.fastq.gz", self.sample_id)),
    )
  }

  pub fn fastqc_raw_dir(&self) -> PathBuf {
    self.root.join("01_fastqc_raw")
  }

  pub fn trimmed_dir(&self) -> PathBuf {
    self.root.join("02_trimmed_reads")
  }

  pub fn trimmed_paired(&self) -> (PathBuf, PathBuf) {
    let dir = self.trimmed_dir();
    (
      dir.join("trimmed_paired_1.fastq.gz"),
      dir.join("trimmed_paired_2.fastq.gz"),
    )
  }

  pub fn trimmed_unpaired(&self) -> (PathBuf, PathBuf) {
    let dir = self.trimmed_dir();
    (
      dir.join("trimmed_unpaired_1.fastq.gz"),
      dir.join("trimmed_unpaired_2.fastq.gz"),
    )
  }

  pub fn fastqc_trimmed_dir(&self) -> PathBuf {
    self.root.join("03_fastqc_trimmed")
  }

  pub fn assembly_dir(&self) -> PathBuf {
    self.root.join("04_spades_assembly")
  }

  pub fn contigs(&self) -> PathBuf {
    self.assembly_dir().join("contigs.fasta")
  }

  /// Polishing output for the first (and only) round.
  pub fn pilon_dir(&self) -> PathBuf {
    self.root.join("05_pilon_correction").join("round1")
  }

  pub fn sorted_bam(&self) -> PathBuf {
    self.pilon_dir().join("mapped_reads.sorted.bam")
  }

  pub fn pilon_contigs(&self) -> PathBuf {
    self.pilon_dir().join("pilon_r1.fasta")
  }

  pub fn pilon_changes(&self) -> PathBuf {
    self.pilon_dir().join("pilon_r1.changes")
  }

  pub fn qualimap_dir(&self) -> PathBuf {
    self.root.join("08_qualimap_report")
  }

  /// HTML report written by `qualimap bamqc`; the name is fixed by the tool.
  pub fn qualimap_report(&self) -> PathBuf {
    self.qualimap_dir().join("qualimapReport.html")
  }

  /// Plain-text summary written by `qualimap bamqc` next to the report.
  pub fn qualimap_genome_results(&self) -> PathBuf {
    self.qualimap_dir().join("genome_results.txt")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_layout_paths() {
    let layout = SampleLayout::new("/data", "SRR123");

    assert_eq!(layout.root(), Path::new("/data/SRR123"));
    assert_eq!(
      layout.raw_reads().0,
      PathBuf::from("/data/SRR123/raw_data/SRR123_1.fastq.gz")
    );
    assert_eq!(
      layout.trimmed_unpaired().1,
      PathBuf::from("/data/SRR123/02_trimmed_reads/trimmed_unpaired_2.fastq.gz")
    );
    assert_eq!(
      layout.contigs(),
      PathBuf::from("/data/SRR123/04_spades_assembly/contigs.fasta")
    );
    assert_eq!(
      layout.pilon_changes(),
      PathBuf::from("/data/SRR123/05_pilon_correction/round1/pilon_r1.changes")
    );
    assert_eq!(
      layout.qualimap_report(),
      PathBuf::from("/data/SRR123/08_qualimap_report/qualimapReport.html")
    );
    assert_eq!(
      layout.qualimap_genome_results(),
      PathBuf::from("/data/SRR123/08_qualimap_report/genome_results.txt")
    );
  }
}
