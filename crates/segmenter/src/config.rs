#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("maxDurationMs must be positive")]
    NonPositiveMaxDuration,
    #[error("duration parameters must be non-negative")]
    NegativeDuration,
    #[error("gapThresholdMultiplier must be at least 1")]
    ZeroGapThresholdMultiplier,
    #[error("minDurationMs must not exceed maxDurationMs")]
    MinExceedsMax,
    #[error("minMultiDurationMs must not exceed maxDurationMs")]
    MultiMinExceedsMax,
}

/// Segmentation policy knobs.
///
/// Field names and defaults match the upstream service's request payload, so
/// a partial JSON config deserializes with the remaining fields defaulted.
///
/// The two boolean switches capture behaviors the deployed algorithm
/// variants disagreed on:
///
/// - `enable_gap_break`: whether a large same-speaker silence alone closes
///   the open accumulator. Off by default — speaker change is the one
///   authoritative break.
/// - `reuse_on_cap_hit`: whether an accumulator finalized at the duration
///   cap stays alive in reuse mode, so following same-speaker utterances map
///   to the already-extracted clip instead of producing more audio. On by
///   default.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SegmenterConfig {
    /// Silence inserted between non-adjacent time ranges at extraction time.
    pub gap_duration_ms: i64,
    /// Hard cap on accumulated segment duration, inserted gaps included.
    pub max_duration_ms: i64,
    /// Keep floor for single-utterance segments.
    pub min_duration_ms: i64,
    /// Looser keep floor for merged multi-utterance segments.
    pub min_multi_duration_ms: i64,
    /// Merge-vs-new-range threshold is `gap_duration_ms * gap_threshold_multiplier`.
    pub gap_threshold_multiplier: i64,
    pub enable_gap_break: bool,
    pub reuse_on_cap_hit: bool,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            gap_duration_ms: 500,
            max_duration_ms: 12_000,
            min_duration_ms: 1_000,
            min_multi_duration_ms: 1_000,
            gap_threshold_multiplier: 3,
            enable_gap_break: false,
            reuse_on_cap_hit: true,
        }
    }
}

impl SegmenterConfig {
    /// Gap at or below this merges into the previous time range; above it
    /// opens a new range.
    pub fn gap_threshold_ms(&self) -> i64 {
        self.gap_duration_ms * self.gap_threshold_multiplier
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_duration_ms <= 0 {
            return Err(ConfigError::NonPositiveMaxDuration);
        }
        if self.gap_duration_ms < 0 || self.min_duration_ms < 0 || self.min_multi_duration_ms < 0 {
            return Err(ConfigError::NegativeDuration);
        }
        if self.gap_threshold_multiplier < 1 {
            return Err(ConfigError::ZeroGapThresholdMultiplier);
        }
        if self.min_duration_ms > self.max_duration_ms {
            return Err(ConfigError::MinExceedsMax);
        }
        if self.min_multi_duration_ms > self.max_duration_ms {
            return Err(ConfigError::MultiMinExceedsMax);
        }
        Ok(())
    }
}
