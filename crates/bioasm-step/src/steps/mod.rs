mod assembly;
mod assessment;
mod download;
mod polish;
mod quality;
mod trim;

pub use assembly::AssemblyStep;
pub use assessment::AssessmentStep;
pub use download::DownloadStep;
pub use polish::PolishStep;
pub use quality::QualityReportStep;
pub use trim::TrimStep;
