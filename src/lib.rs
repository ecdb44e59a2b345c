//! foldview folds a surface into accordion strips to reveal or conceal another surface.
//!
//! - [`geometry`] cuts a surface into strips and resolves hinge poses into 4x4 transforms
//! - [`animation`] maps time through an easing curve and samples per-strip keyframes
//! - [`transition`] runs show/hide transitions against a host [`RenderTree`]
#![forbid(unsafe_code)]

pub mod animation;
pub mod config;
pub mod foundation;
pub mod geometry;
pub mod transition;

pub use animation::ease::{Ease, Easing};
pub use animation::keyframes::{Keyframe, KeyframeSequence, Lerp, sample_keyframes};
pub use config::FoldConfig;
pub use foundation::core::{Axis, DMat4, DVec3, Rect};
pub use foundation::error::{FoldError, FoldResult};
pub use geometry::{FoldDirection, FoldPose, StripGeometry, build_strips};
pub use transition::engine::{
    Completion, FoldMode, FoldSpec, FoldStrip, FoldTransition, RenderTree,
};
pub use transition::headless::{HeadlessTree, ProxyId, SurfaceId};
pub use transition::state::{StateGuard, TransitionState};
