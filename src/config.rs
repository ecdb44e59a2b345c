use std::{path::Path, time::Duration};

use crate::{
    animation::keyframes::{MAX_SAMPLE_STEPS, MIN_SAMPLE_STEPS},
    foundation::{
        core::secs_to_duration,
        error::{FoldError, FoldResult},
    },
    geometry::FoldDirection,
};

/// Tunables for fold transitions.
///
/// Missing JSON fields fall back to [`FoldConfig::default`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FoldConfig {
    /// Reject fold counts and durations outside the bounds below.
    pub bounds_checking: bool,
    pub min_folds: u32,
    pub max_folds: u32,
    pub min_duration_secs: f64,
    pub max_duration_secs: f64,
    pub default_folds: u32,
    pub default_direction: FoldDirection,
    pub default_duration_secs: f64,
    /// Keyframe intervals per strip; clamped to `[2, 100]` when sampling.
    pub sample_steps: u32,
    /// Viewer distance used for the perspective term (`m34 = -1 / eye_distance`).
    pub eye_distance: f64,
}

impl Default for FoldConfig {
    fn default() -> Self {
        Self {
            bounds_checking: true,
            min_folds: 1,
            max_folds: 20,
            min_duration_secs: 0.2,
            max_duration_secs: 10.0,
            default_folds: 3,
            default_direction: FoldDirection::FromLeft,
            default_duration_secs: 1.0,
            sample_steps: 16,
            eye_distance: 500.0,
        }
    }
}

impl FoldConfig {
    pub fn from_json_str(s: &str) -> FoldResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| FoldError::config(format!("parse fold config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file(path: &Path) -> FoldResult<Self> {
        let s = std::fs::read_to_string(path)
            .map_err(|e| FoldError::config(format!("read '{}': {e}", path.display())))?;
        Self::from_json_str(&s)
    }

    pub fn validate(&self) -> FoldResult<()> {
        if self.min_folds == 0 {
            return Err(FoldError::config("min_folds must be >= 1"));
        }
        if self.min_folds > self.max_folds {
            return Err(FoldError::config("min_folds must be <= max_folds"));
        }
        if !(self.min_duration_secs.is_finite() && self.min_duration_secs > 0.0) {
            return Err(FoldError::config("min_duration_secs must be > 0"));
        }
        if !(self.max_duration_secs.is_finite() && self.min_duration_secs <= self.max_duration_secs)
        {
            return Err(FoldError::config(
                "max_duration_secs must be finite and >= min_duration_secs",
            ));
        }
        if self.default_folds == 0 {
            return Err(FoldError::config("default_folds must be >= 1"));
        }
        secs_to_duration(self.default_duration_secs)
            .map_err(|_| FoldError::config("default_duration_secs must be > 0"))?;
        if !(MIN_SAMPLE_STEPS..=MAX_SAMPLE_STEPS).contains(&self.sample_steps) {
            return Err(FoldError::config(format!(
                "sample_steps must be within [{MIN_SAMPLE_STEPS}, {MAX_SAMPLE_STEPS}]"
            )));
        }
        if !(self.eye_distance.is_finite() && self.eye_distance > 0.0) {
            return Err(FoldError::config("eye_distance must be > 0"));
        }
        Ok(())
    }

    pub fn default_duration(&self) -> FoldResult<Duration> {
        secs_to_duration(self.default_duration_secs)
    }

    /// Check a fold count and duration against this configuration.
    pub fn check_parameters(&self, fold_count: u32, duration: Duration) -> FoldResult<()> {
        if fold_count == 0 {
            return Err(FoldError::invalid_parameter("fold count must be >= 1"));
        }
        if duration.is_zero() {
            return Err(FoldError::invalid_parameter("duration must be > 0"));
        }
        if !self.bounds_checking {
            return Ok(());
        }

        if !(self.min_folds..=self.max_folds).contains(&fold_count) {
            return Err(FoldError::invalid_parameter(format!(
                "fold count {fold_count} outside [{}, {}]",
                self.min_folds, self.max_folds
            )));
        }
        let secs = duration.as_secs_f64();
        if secs < self.min_duration_secs || secs > self.max_duration_secs {
            return Err(FoldError::invalid_parameter(format!(
                "duration {secs}s outside [{}s, {}s]",
                self.min_duration_secs, self.max_duration_secs
            )));
        }
        Ok(())
    }
}
