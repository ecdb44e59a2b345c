use std::{f64::consts::FRAC_PI_2, fmt, sync::Arc};

/// Overshoot constant of the back curve (about 10% past the target).
const BACK_OVERSHOOT: f64 = 1.70158;

/// Preset easing curves over normalized time `t` in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Constant fold speed.
    Linear,
    /// `t^2`.
    InQuad,
    /// Mirror of `InQuad`: fast start, settles into the end pose.
    OutQuad,
    InOutQuad,
    /// `t^3`.
    InCubic,
    OutCubic,
    /// Cubic ease-in for the first half, mirrored ease-out for the second.
    InOutCubic,
    /// `1 - cos(t * pi/2)`: slow start, used for closing folds.
    SineIn,
    /// `sin(t * pi/2)`: slow finish, used for opening folds.
    SineOut,
    /// Runs past the end pose by roughly 10% before settling back.
    OutBack,
}

impl Ease {
    pub const ALL: [Ease; 10] = [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::SineIn,
        Ease::SineOut,
        Ease::OutBack,
    ];

    /// Whether progress can leave `[0, 1]` between the endpoints.
    pub fn overshoots(self) -> bool {
        matches!(self, Self::OutBack)
    }

    /// Fold progress at normalized time `t`. Input is clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        let rem = 1.0 - t;
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - rem * rem,
            Self::InOutQuad if t < 0.5 => 2.0 * t * t,
            Self::InOutQuad => 1.0 - 2.0 * rem * rem,
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - rem * rem * rem,
            Self::InOutCubic if t < 0.5 => 4.0 * t * t * t,
            Self::InOutCubic => 1.0 - 4.0 * rem * rem * rem,
            // cos(x) written as sin(pi/2 - x) so both endpoints are exact.
            Self::SineIn => 1.0 - (rem * FRAC_PI_2).sin(),
            Self::SineOut => (t * FRAC_PI_2).sin(),
            // 1 + (c1 + 1)u^3 + c1 u^2 with u = t - 1, grouped so that f(0) is exactly 0.
            Self::OutBack => {
                let u = t - 1.0;
                1.0 + u * u * (BACK_OVERSHOOT * (u + 1.0) + u)
            }
        }
    }
}

/// Progress function attached to a single fold animation.
///
/// Input is normalized elapsed time in `[0, 1]` (clamped); output is fold progress, nominally
/// `[0, 1]`. Custom curves may overshoot but must be deterministic.
#[derive(Clone)]
pub enum Easing {
    Preset(Ease),
    Custom(Arc<dyn Fn(f64) -> f64 + Send + Sync>),
}

impl Easing {
    pub fn custom(f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(f))
    }

    pub fn progress(&self, t: f64) -> f64 {
        match self {
            Self::Preset(ease) => ease.apply(t),
            Self::Custom(f) => f(t.clamp(0.0, 1.0)),
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Self::Preset(Ease::Linear)
    }
}

impl From<Ease> for Easing {
    fn from(ease: Ease) -> Self {
        Self::Preset(ease)
    }
}

impl fmt::Debug for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preset(ease) => f.debug_tuple("Preset").field(ease).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
