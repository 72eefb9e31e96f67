//! The fixed assembly stage graph.

use std::sync::Arc;

use bioasm_config::RunConfig;
use bioasm_step::{
  AssemblyStep, AssessmentStep, DownloadStep, PolishStep, QualityReportStep, Step, StepContext,
  TrimStep,
};

use crate::pipeline::Pipeline;

/// Download, then raw QC alongside trimming, then trimmed QC, assembly,
/// polishing and assessment.
///
/// Trimmed QC and assembly stay sequential: both read the trimmed reads.
pub fn assembly_pipeline(config: &RunConfig, ctx: StepContext) -> Pipeline {
  let raw_qc: Arc<dyn Step> = Arc::new(QualityReportStep::raw(config, ctx.clone()));
  let trim: Arc<dyn Step> = Arc::new(TrimStep::new(config, ctx.clone()));

  Pipeline::new()
    .with_parallelism(!config.no_parallel)
    .then(DownloadStep::new(config, ctx.clone()))
    .concurrently([raw_qc, trim])
    .then(QualityReportStep::trimmed(config, ctx.clone()))
    .then(AssemblyStep::new(config, ctx.clone()))
    .then(PolishStep::new(config, ctx.clone()))
    .then(AssessmentStep::new(config, ctx))
}
