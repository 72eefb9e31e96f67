use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// Accepted values for the filter mode selector.
pub const FILTER_MODES: [&str; 4] = ["standard", "strict", "lenient", "custom"];

/// A named, fixed set of Trimmomatic quality thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterPreset {
  Standard,
  Strict,
  Lenient,
}

impl FilterPreset {
  /// Returns `(leading, trailing, window_size, window_quality, min_len)`.
  pub fn thresholds(self) -> (u32, u32, u32, u32, u32) {
    match self {
      FilterPreset::Standard => (20, 20, 4, 25, 30),
      FilterPreset::Strict => (30, 30, 4, 30, 50),
      FilterPreset::Lenient => (3, 3, 4, 20, 30),
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      FilterPreset::Standard => "standard",
      FilterPreset::Strict => "strict",
      FilterPreset::Lenient => "lenient",
    }
  }
}

/// Resolved read filtering policy for the trimming step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FilterPolicy {
  Preset { preset: FilterPreset },
  /// Raw Trimmomatic arguments, passed through without validation.
  Custom { args: Vec<String> },
}

impl FilterPolicy {
  /// Resolve a mode string (and the custom argument string, if any) into a policy.
  ///
  /// An empty mode is treated as `standard`. The custom argument string is
  /// split on whitespace and must yield at least one argument.
  pub fn resolve(mode: &str, custom_args: Option<&str>) -> Result<Self, FilterError> {
    let preset = match mode {
      "" | "standard" => FilterPreset::Standard,
      "strict" => FilterPreset::Strict,
      "lenient" => FilterPreset::Lenient,
      "custom" => {
        let args: Vec<String> = custom_args
          .unwrap_or_default()
          .split_whitespace()
          .map(str::to_string)
          .collect();
        if args.is_empty() {
          return Err(FilterError::MissingCustomArgs);
        }
        return Ok(FilterPolicy::Custom { args });
      }
      other => return Err(FilterError::UnknownMode(other.to_string())),
    };
    Ok(FilterPolicy::Preset { preset })
  }

  /// Name of the mode this policy was resolved from.
  pub fn mode(&self) -> &'static str {
    match self {
      FilterPolicy::Preset { preset } => preset.as_str(),
      FilterPolicy::Custom { .. } => "custom",
    }
  }

  /// Trimmomatic step arguments appended after the adapter clipping step.
  pub fn trimmomatic_args(&self) -> Vec<String> {
    match self {
      FilterPolicy::Preset { preset } => {
        let (leading, trailing, window, quality, min_len) = preset.thresholds();
        vec![
          format!("LEADING:{}", leading),
          format!("TRAILING:{}", trailing),
          format!("SLIDINGWINDOW:{}:{}", window, quality),
          format!("MINLEN:{}", min_len),
        ]
      }
      FilterPolicy::Custom { args } => args.clone(),
    }
  }
}
