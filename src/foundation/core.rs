use std::time::Duration;

use crate::foundation::error::{FoldError, FoldResult};

pub use glam::{DMat4, DVec3};
pub use kurbo::Rect;

/// Axis along which a surface is subdivided into strips.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Width is subdivided; strips hinge about the vertical (y) axis.
    Horizontal,
    /// Height is subdivided; strips hinge about the horizontal (x) axis.
    Vertical,
}

impl Axis {
    /// Extent of `rect` along this axis.
    pub fn extent(self, rect: Rect) -> f64 {
        match self {
            Self::Horizontal => rect.width(),
            Self::Vertical => rect.height(),
        }
    }

    /// `(min, max)` coordinates of `rect` along this axis.
    pub fn span(self, rect: Rect) -> (f64, f64) {
        match self {
            Self::Horizontal => (rect.x0, rect.x1),
            Self::Vertical => (rect.y0, rect.y1),
        }
    }

    /// Build a rect that takes `[lo, hi]` along this axis and the full cross extent of `rect`.
    pub fn slice(self, rect: Rect, lo: f64, hi: f64) -> Rect {
        match self {
            Self::Horizontal => Rect::new(lo, rect.y0, hi, rect.y1),
            Self::Vertical => Rect::new(rect.x0, lo, rect.x1, hi),
        }
    }
}

/// Reject zero-area or non-finite bounds.
pub fn ensure_surface_bounds(bounds: Rect) -> FoldResult<()> {
    let (w, h) = (bounds.width(), bounds.height());
    if !(w.is_finite() && h.is_finite()) {
        return Err(FoldError::degenerate("surface bounds must be finite"));
    }
    if w <= 0.0 || h <= 0.0 {
        return Err(FoldError::degenerate(format!(
            "surface has zero extent ({w}x{h})"
        )));
    }
    Ok(())
}

/// Convert a positive seconds value into a `Duration`.
pub fn secs_to_duration(secs: f64) -> FoldResult<Duration> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(FoldError::invalid_parameter(format!(
            "duration must be a positive number of seconds, got {secs}"
        )));
    }
    Duration::try_from_secs_f64(secs)
        .map_err(|e| FoldError::invalid_parameter(format!("duration {secs}s: {e}")))
}
