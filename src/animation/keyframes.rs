use std::time::Duration;

use crate::{
    animation::ease::Easing,
    foundation::{
        core::DMat4,
        error::{FoldError, FoldResult},
    },
    geometry::{FoldPose, StripGeometry},
};

/// Fewest and most sample steps a sequence may use.
pub const MIN_SAMPLE_STEPS: u32 = 2;
pub const MAX_SAMPLE_STEPS: u32 = 100;

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    // Weighted form so that lerp(a, b, t) and lerp(b, a, 1 - t) agree bit-for-bit on dyadic t.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a * (1.0 - t) + b * t
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Keyframe {
    /// Normalized time in `[0, 1]`.
    pub key_time: f64,
    pub pose: FoldPose,
    /// `pose` resolved against the strip geometry.
    pub transform: DMat4,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct KeyframeSequence {
    pub strip: usize,
    pub duration_secs: f64,
    pub keys: Vec<Keyframe>, // sorted by key_time
}

impl KeyframeSequence {
    pub fn validate(&self) -> FoldResult<()> {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return Err(FoldError::invalid_parameter(
                "keyframe sequence must have at least one key",
            ));
        };
        if first.key_time != 0.0 || last.key_time != 1.0 {
            return Err(FoldError::invalid_parameter(
                "keyframe sequence must span key times 0..=1",
            ));
        }
        if !self.keys.windows(2).all(|w| w[0].key_time < w[1].key_time) {
            return Err(FoldError::invalid_parameter(
                "keyframe key times must be strictly increasing",
            ));
        }
        Ok(())
    }

    pub fn time_secs(&self, key: &Keyframe) -> f64 {
        key.key_time * self.duration_secs
    }

    pub fn start_pose(&self) -> FoldPose {
        self.keys.first().map(|k| k.pose).unwrap_or_default()
    }

    pub fn end_pose(&self) -> FoldPose {
        self.keys.last().map(|k| k.pose).unwrap_or_default()
    }

    /// The same motion played backwards.
    ///
    /// Key times stay on the original grid and key `i` takes the pose of key `n - 1 - i`, so
    /// `reversed().sample(t)` matches `sample(1 - t)` on every key without re-evaluating the
    /// easing curve.
    pub fn reversed(&self) -> Self {
        let keys = self
            .keys
            .iter()
            .zip(self.keys.iter().rev())
            .map(|(slot, src)| Keyframe {
                key_time: slot.key_time,
                pose: src.pose,
                transform: src.transform,
            })
            .collect();
        Self {
            strip: self.strip,
            duration_secs: self.duration_secs,
            keys,
        }
    }

    /// Pose at normalized time `key_time`, interpolating linearly between neighbouring keys.
    pub fn sample(&self, key_time: f64) -> FoldPose {
        if self.keys.is_empty() {
            return FoldPose::REST;
        }

        let idx = self.keys.partition_point(|k| k.key_time <= key_time);
        if idx == 0 {
            return self.keys[0].pose;
        }
        if idx >= self.keys.len() {
            return self.keys[self.keys.len() - 1].pose;
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let span = b.key_time - a.key_time;
        if span <= 0.0 {
            return a.pose;
        }
        FoldPose::lerp(&a.pose, &b.pose, (key_time - a.key_time) / span)
    }
}

/// Sample `from -> to` for one strip at `steps + 1` evenly spaced key times.
///
/// Progress at each key is `easing(i / steps)`; angle and perspective are interpolated
/// independently.
pub fn sample_keyframes(
    strip: &StripGeometry,
    from: FoldPose,
    to: FoldPose,
    easing: &Easing,
    steps: u32,
    duration: Duration,
) -> KeyframeSequence {
    let steps = steps.clamp(MIN_SAMPLE_STEPS, MAX_SAMPLE_STEPS);
    let keys = (0..=steps)
        .map(|i| {
            let key_time = f64::from(i) / f64::from(steps);
            let pose = FoldPose::lerp(&from, &to, easing.progress(key_time));
            Keyframe {
                key_time,
                pose,
                transform: strip.transform(pose),
            }
        })
        .collect();

    KeyframeSequence {
        strip: strip.index,
        duration_secs: duration.as_secs_f64(),
        keys,
    }
}
