use serde::{Deserialize, Serialize};

/// How a successful step run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
  /// The external tool(s) ran and produced valid outputs.
  Completed,
  /// Valid outputs from an earlier run were found; nothing was invoked.
  Skipped,
}
