//! Strip layout and hinge transforms for accordion folds.
//!
//! A surface is cut into `n` strips along one axis. Strip 0 touches the anchored edge and the
//! folded stack collapses onto that edge. Even strips hinge on the edge they share with the next
//! strip, odd strips on the edge they share with the previous one, so every hinge is a receding
//! joint and every non-hinge joint stays in the surface plane.

use std::{f64::consts::FRAC_PI_2, str::FromStr};

use crate::{
    animation::keyframes::Lerp,
    foundation::{
        core::{Axis, DMat4, DVec3, Rect, ensure_surface_bounds},
        error::{FoldError, FoldResult},
        math::with_perspective_about,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoldDirection {
    FromRight,
    FromLeft,
    FromTop,
    FromBottom,
}

impl FoldDirection {
    pub const ALL: [FoldDirection; 4] = [
        FoldDirection::FromRight,
        FoldDirection::FromLeft,
        FoldDirection::FromTop,
        FoldDirection::FromBottom,
    ];

    /// Map the integer codes used by older callers (0 = right, 1 = left, 2 = top, 3 = bottom).
    pub fn from_code(code: u32) -> FoldResult<Self> {
        match code {
            0 => Ok(Self::FromRight),
            1 => Ok(Self::FromLeft),
            2 => Ok(Self::FromTop),
            3 => Ok(Self::FromBottom),
            other => Err(FoldError::invalid_parameter(format!(
                "unknown fold direction code {other}"
            ))),
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Self::FromLeft | Self::FromRight => Axis::Horizontal,
            Self::FromTop | Self::FromBottom => Axis::Vertical,
        }
    }

    /// `true` when the right/bottom edge stays fixed.
    pub fn anchors_far_edge(self) -> bool {
        matches!(self, Self::FromRight | Self::FromBottom)
    }

    /// Sign of strip 0's folded angle. Chosen so that hinges recede (negative z).
    pub fn rotation_sign(self) -> f64 {
        match self {
            Self::FromLeft | Self::FromBottom => 1.0,
            Self::FromRight | Self::FromTop => -1.0,
        }
    }
}

impl FromStr for FoldDirection {
    type Err = FoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        if s.is_empty() {
            return Err(FoldError::invalid_parameter(
                "fold direction must be non-empty",
            ));
        }
        match s.as_str() {
            "from_right" | "fromright" | "right" | "rtl" => Ok(Self::FromRight),
            "from_left" | "fromleft" | "left" | "ltr" => Ok(Self::FromLeft),
            "from_top" | "fromtop" | "top" | "ttb" => Ok(Self::FromTop),
            "from_bottom" | "frombottom" | "bottom" | "btt" => Ok(Self::FromBottom),
            other => match other.parse::<u32>() {
                Ok(code) => Self::from_code(code),
                Err(_) => Err(FoldError::invalid_parameter(format!(
                    "unknown fold direction '{other}'"
                ))),
            },
        }
    }
}

/// Animatable state of one strip.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FoldPose {
    /// Signed hinge rotation in radians.
    pub angle: f64,
    /// Perspective depth term (`m34`); zero when flat.
    pub perspective: f64,
}

impl FoldPose {
    pub const REST: FoldPose = FoldPose {
        angle: 0.0,
        perspective: 0.0,
    };

    pub fn is_flat(self) -> bool {
        self.angle == 0.0 && self.perspective == 0.0
    }
}

impl Lerp for FoldPose {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            angle: <f64 as Lerp>::lerp(&a.angle, &b.angle, t),
            perspective: <f64 as Lerp>::lerp(&a.perspective, &b.perspective, t),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StripGeometry {
    pub index: usize,
    pub direction: FoldDirection,
    /// Bounds of the whole surface.
    pub bounds: Rect,
    /// This strip, in surface coordinates.
    pub region: Rect,
    /// Distance from the anchored edge to the strip's anchor-side edge.
    pub offset: f64,
    pub extent: f64,
    /// Distance from the anchored edge to the hinge at rest.
    pub hinge_offset: f64,
    /// Extent of the even strip sharing this strip's hinge; sets the hinge depth.
    pub pair_extent: f64,
    pub rest: FoldPose,
    pub folded: FoldPose,
}

impl StripGeometry {
    /// Rotation sign of the folded pose: alternates between adjacent strips.
    pub fn fold_sign(&self) -> f64 {
        let base = self.direction.rotation_sign();
        if self.index % 2 == 0 { base } else { -base }
    }

    /// Resolve `pose` into a matrix mapping strip-local points (origin at the strip's top-left
    /// corner) into surface space, including the perspective term.
    pub fn transform(&self, pose: FoldPose) -> DMat4 {
        let axis = self.direction.axis();
        let origin = DVec3::new(self.region.x0, self.region.y0, 0.0);
        if pose.is_flat() {
            return DMat4::from_translation(origin);
        }

        let (sin, cos) = pose.angle.abs().sin_cos();
        let (lo, hi) = axis.span(self.bounds);
        let far = self.direction.anchors_far_edge();
        let to_axis = |dist: f64| if far { hi - dist } else { lo + dist };

        let (region_lo, _) = axis.span(self.region);
        let hinge_local = to_axis(self.hinge_offset) - region_lo;
        let hinge_now = to_axis(self.hinge_offset * cos);
        let depth = -self.pair_extent * sin;

        let folded = match axis {
            Axis::Horizontal => {
                DMat4::from_translation(DVec3::new(hinge_now, self.region.y0, depth))
                    * DMat4::from_rotation_y(pose.angle)
                    * DMat4::from_translation(DVec3::new(-hinge_local, 0.0, 0.0))
            }
            Axis::Vertical => {
                DMat4::from_translation(DVec3::new(self.region.x0, hinge_now, depth))
                    * DMat4::from_rotation_x(pose.angle)
                    * DMat4::from_translation(DVec3::new(0.0, -hinge_local, 0.0))
            }
        };

        let c = self.bounds.center();
        with_perspective_about(folded, pose.perspective, DVec3::new(c.x, c.y, 0.0))
    }
}

/// Split `bounds` into `fold_count` strips for `direction`.
///
/// Strips are `floor(extent / fold_count)` wide; the strip farthest from the anchor takes the
/// remainder. Surfaces thinner than `fold_count` units are split evenly without flooring.
pub fn build_strips(
    bounds: Rect,
    fold_count: u32,
    direction: FoldDirection,
    eye_distance: f64,
) -> FoldResult<Vec<StripGeometry>> {
    ensure_surface_bounds(bounds)?;
    if fold_count == 0 {
        return Err(FoldError::invalid_parameter("fold count must be >= 1"));
    }
    if !(eye_distance.is_finite() && eye_distance > 0.0) {
        return Err(FoldError::invalid_parameter(
            "perspective eye distance must be > 0",
        ));
    }

    let axis = direction.axis();
    let total = axis.extent(bounds);
    let (lo, hi) = axis.span(bounds);
    let n = fold_count as usize;
    let nf = f64::from(fold_count);
    let base = if total >= nf {
        (total / nf).floor()
    } else {
        total / nf
    };
    let far = direction.anchors_far_edge();
    let perspective = -1.0 / eye_distance;

    let mut strips = Vec::with_capacity(n);
    for index in 0..n {
        let last = index + 1 == n;
        let offset = base * index as f64;
        let extent = if last { total - offset } else { base };

        let region = match (far, last) {
            (false, false) => axis.slice(bounds, lo + offset, lo + offset + extent),
            (false, true) => axis.slice(bounds, lo + offset, hi),
            (true, false) => axis.slice(bounds, hi - offset - extent, hi - offset),
            (true, true) => axis.slice(bounds, lo, hi - offset),
        };

        let even = index % 2 == 0;
        let hinge_offset = if even { offset + extent } else { offset };
        let pair_extent = if even { extent } else { base };

        let mut strip = StripGeometry {
            index,
            direction,
            bounds,
            region,
            offset,
            extent,
            hinge_offset,
            pair_extent,
            rest: FoldPose::REST,
            folded: FoldPose::REST,
        };
        strip.folded = FoldPose {
            angle: strip.fold_sign() * FRAC_PI_2,
            perspective,
        };
        strips.push(strip);
    }

    tracing::debug!(
        ?direction,
        fold_count,
        strip_extent = base,
        last_extent = ?strips.last().map(|s| s.extent),
        "built fold strips"
    );
    Ok(strips)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::project_point;

    const EYE: f64 = 500.0;

    fn close(a: DVec3, b: DVec3) -> bool {
        (a - b).length() < 1e-9
    }

    /// Fully folded pose without the perspective term, to check raw hinge geometry.
    fn flat_folded(s: &StripGeometry) -> FoldPose {
        FoldPose {
            angle: s.folded.angle,
            perspective: 0.0,
        }
    }

    #[test]
    fn direction_parses_aliases_and_codes() {
        assert_eq!("ttb".parse::<FoldDirection>().unwrap(), FoldDirection::FromTop);
        assert_eq!(
            " From_Right ".parse::<FoldDirection>().unwrap(),
            FoldDirection::FromRight
        );
        assert_eq!("1".parse::<FoldDirection>().unwrap(), FoldDirection::FromLeft);
        assert!("sideways".parse::<FoldDirection>().is_err());
        assert!("".parse::<FoldDirection>().is_err());
        assert!(FoldDirection::from_code(4).is_err());
    }

    #[test]
    fn three_folds_from_left() {
        let bounds = Rect::new(0.0, 0.0, 300.0, 100.0);
        let strips = build_strips(bounds, 3, FoldDirection::FromLeft, EYE).unwrap();
        assert_eq!(strips.len(), 3);
        for (i, s) in strips.iter().enumerate() {
            assert_eq!(s.extent, 100.0);
            assert_eq!(s.region.x0, 100.0 * i as f64);
        }
        assert_eq!(strips[0].folded.angle, FRAC_PI_2);
        assert_eq!(strips[1].folded.angle, -FRAC_PI_2);
        assert_eq!(strips[2].folded.angle, FRAC_PI_2);
        assert_eq!(strips[0].hinge_offset, 100.0);
        assert_eq!(strips[1].hinge_offset, 100.0);
        assert_eq!(strips[0].transform(strips[0].rest), DMat4::IDENTITY);
    }

    #[test]
    fn remainder_goes_to_the_far_strip() {
        let bounds = Rect::new(0.0, 0.0, 300.0, 50.0);
        let strips = build_strips(bounds, 7, FoldDirection::FromRight, EYE).unwrap();
        let extents: Vec<f64> = strips.iter().map(|s| s.extent).collect();
        assert_eq!(extents, vec![42.0, 42.0, 42.0, 42.0, 42.0, 42.0, 48.0]);
        assert_eq!(strips[0].region.x1, 300.0);
        assert_eq!(strips[6].region.x0, 0.0);
        assert_eq!(strips[6].region.x1, 48.0);
    }

    #[test]
    fn single_fold_is_a_flip_about_the_far_edge() {
        let bounds = Rect::new(0.0, 0.0, 80.0, 60.0);
        let strips = build_strips(bounds, 1, FoldDirection::FromTop, EYE).unwrap();
        assert_eq!(strips.len(), 1);
        let s = &strips[0];
        assert_eq!(s.hinge_offset, 60.0);
        assert_ne!(s.rest, s.folded);

        let m = s.transform(flat_folded(s));
        let top = project_point(m, DVec3::new(40.0, 0.0, 0.0));
        let bottom = project_point(m, DVec3::new(40.0, 60.0, 0.0));
        assert!(close(top, DVec3::new(40.0, 0.0, 0.0)));
        assert!(close(bottom, DVec3::new(40.0, 0.0, -60.0)));
    }

    #[test]
    fn folded_strips_collapse_onto_the_anchor() {
        let bounds = Rect::new(0.0, 0.0, 240.0, 120.0);
        for direction in FoldDirection::ALL {
            let strips = build_strips(bounds, 4, direction, EYE).unwrap();
            let axis = direction.axis();
            let anchor = if direction.anchors_far_edge() {
                axis.span(bounds).1
            } else {
                axis.span(bounds).0
            };
            for s in &strips {
                let m = s.transform(flat_folded(s));
                let w = s.region.width();
                let h = s.region.height();
                for corner in [
                    DVec3::new(0.0, 0.0, 0.0),
                    DVec3::new(w, 0.0, 0.0),
                    DVec3::new(0.0, h, 0.0),
                    DVec3::new(w, h, 0.0),
                ] {
                    let p = project_point(m, corner);
                    let along = match axis {
                        Axis::Horizontal => p.x,
                        Axis::Vertical => p.y,
                    };
                    assert!((along - anchor).abs() < 1e-9, "{direction:?} strip {}", s.index);
                    assert!(p.z <= 1e-9, "{direction:?} strip {} faces the viewer", s.index);
                }
            }
        }
    }

    #[test]
    fn neighbours_stay_joined_mid_fold() {
        let bounds = Rect::new(0.0, 0.0, 400.0, 100.0);
        let strips = build_strips(bounds, 4, FoldDirection::FromLeft, EYE).unwrap();
        let t = 0.37;
        let pose = |s: &StripGeometry| FoldPose {
            angle: s.folded.angle * t,
            perspective: 0.0,
        };
        for pair in strips.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let a_right = project_point(a.transform(pose(a)), DVec3::new(100.0, 50.0, 0.0));
            let b_left = project_point(b.transform(pose(b)), DVec3::new(0.0, 50.0, 0.0));
            assert!(close(a_right, b_left), "strips {} and {}", a.index, b.index);
        }
        let first_left = project_point(strips[0].transform(pose(&strips[0])), DVec3::ZERO);
        assert!(close(first_left, DVec3::ZERO));
    }

    #[test]
    fn zero_extent_is_degenerate() {
        let flat = Rect::new(0.0, 0.0, 300.0, 0.0);
        let err = build_strips(flat, 3, FoldDirection::FromLeft, EYE).unwrap_err();
        assert!(matches!(err, FoldError::DegenerateGeometry(_)));
        let square = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(build_strips(square, 0, FoldDirection::FromLeft, EYE).is_err());
    }

    #[test]
    fn thin_surfaces_split_evenly() {
        let bounds = Rect::new(0.0, 0.0, 2.0, 10.0);
        let strips = build_strips(bounds, 4, FoldDirection::FromLeft, EYE).unwrap();
        assert!(strips.iter().all(|s| s.extent == 0.5));
    }
}
