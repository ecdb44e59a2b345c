use std::{fmt, time::Duration};

use crate::{
    animation::{
        ease::Easing,
        keyframes::{KeyframeSequence, sample_keyframes},
    },
    config::FoldConfig,
    foundation::{
        core::Rect,
        error::{FoldError, FoldResult},
    },
    geometry::{FoldDirection, StripGeometry, build_strips},
    transition::state::{StateGuard, TransitionState},
};

/// Host render tree that displays fold strips.
///
/// The engine never advances time itself: after [`RenderTree::play`] the host's scheduler is
/// expected to call [`FoldTransition::complete`] exactly once.
pub trait RenderTree {
    type Surface: Copy + fmt::Debug;
    type Proxy: Copy + fmt::Debug;

    fn bounds(&self, surface: Self::Surface) -> Rect;

    /// Create a proxy showing `region` of `source`, parented where `source` sits in the tree.
    fn create_proxy(&mut self, source: Self::Surface, region: Rect) -> Self::Proxy;

    fn attach_keyframes(&mut self, proxy: Self::Proxy, keyframes: &KeyframeSequence);

    fn destroy_proxy(&mut self, proxy: Self::Proxy);

    fn set_visible(&mut self, surface: Self::Surface, visible: bool);

    fn play(&mut self, duration: Duration);
}

pub type Completion = Box<dyn FnOnce(bool)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoldMode {
    /// Unfold the overlay over the target (folded -> flat).
    Show,
    /// Fold the overlay away to reveal the target (flat -> folded).
    Hide,
}

impl FoldMode {
    /// Keyframes for one strip.
    ///
    /// Both modes sample the same flat -> folded curve; show plays it backwards, so a show and a
    /// hide with the same easing are exact time reverses of each other even for asymmetric curves.
    pub fn keyframes(
        self,
        strip: &StripGeometry,
        easing: &Easing,
        steps: u32,
        duration: Duration,
    ) -> KeyframeSequence {
        let folding = sample_keyframes(strip, strip.rest, strip.folded, easing, steps, duration);
        match self {
            Self::Show => folding.reversed(),
            Self::Hide => folding,
        }
    }

    fn overlay_visible_after(self) -> bool {
        matches!(self, Self::Show)
    }
}

/// Parameters of a single show or hide.
pub struct FoldSpec {
    pub fold_count: u32,
    pub direction: FoldDirection,
    pub duration: Duration,
    pub easing: Easing,
    completion: Option<Completion>,
}

impl FoldSpec {
    pub fn new(fold_count: u32, direction: FoldDirection, duration: Duration) -> Self {
        Self {
            fold_count,
            direction,
            duration,
            easing: Easing::default(),
            completion: None,
        }
    }

    /// Fold request populated from the configured defaults.
    pub fn from_config(cfg: &FoldConfig) -> FoldResult<Self> {
        Ok(Self::new(
            cfg.default_folds,
            cfg.default_direction,
            cfg.default_duration()?,
        ))
    }

    pub fn with_easing(mut self, easing: impl Into<Easing>) -> Self {
        self.easing = easing.into();
        self
    }

    pub fn on_completion(mut self, f: impl FnOnce(bool) + 'static) -> Self {
        self.completion = Some(Box::new(f));
        self
    }

    pub fn validate(&self, cfg: &FoldConfig) -> FoldResult<()> {
        cfg.check_parameters(self.fold_count, self.duration)
    }
}

impl fmt::Debug for FoldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FoldSpec")
            .field("fold_count", &self.fold_count)
            .field("direction", &self.direction)
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .field("completion", &self.completion.is_some())
            .finish()
    }
}

/// One strip of an in-flight transition.
#[derive(Clone, Debug)]
pub struct FoldStrip<P> {
    pub geometry: StripGeometry,
    pub proxy: P,
    pub keyframes: KeyframeSequence,
}

struct ActiveFold<R: RenderTree> {
    mode: FoldMode,
    overlay: R::Surface,
    strips: Vec<FoldStrip<R::Proxy>>,
    completion: Option<Completion>,
}

/// Transition context for one surface pair.
///
/// Owns the [`TransitionState`] and the strips of the transition in flight. Independent
/// surfaces use independent contexts.
pub struct FoldTransition<R: RenderTree> {
    config: FoldConfig,
    guard: StateGuard,
    active: Option<ActiveFold<R>>,
}

impl<R: RenderTree> FoldTransition<R> {
    pub fn new(config: FoldConfig) -> Self {
        Self {
            config,
            guard: StateGuard::new(),
            active: None,
        }
    }

    pub fn config(&self) -> &FoldConfig {
        &self.config
    }

    pub fn state(&self) -> TransitionState {
        self.guard.state()
    }

    /// Strips of the transition in flight; empty when idle.
    pub fn strips(&self) -> &[FoldStrip<R::Proxy>] {
        self.active
            .as_ref()
            .map(|a| a.strips.as_slice())
            .unwrap_or_default()
    }

    /// Unfold `overlay` on top of `target`.
    pub fn show(
        &mut self,
        tree: &mut R,
        target: R::Surface,
        overlay: R::Surface,
        spec: FoldSpec,
    ) -> FoldResult<()> {
        self.begin(tree, FoldMode::Show, target, overlay, spec)
    }

    /// Fold `overlay` away, revealing `target`.
    pub fn hide(
        &mut self,
        tree: &mut R,
        target: R::Surface,
        overlay: R::Surface,
        spec: FoldSpec,
    ) -> FoldResult<()> {
        self.begin(tree, FoldMode::Hide, target, overlay, spec)
    }

    /// [`FoldTransition::show`] with the configured default folds, direction and duration.
    pub fn show_default(
        &mut self,
        tree: &mut R,
        target: R::Surface,
        overlay: R::Surface,
        completion: Option<Completion>,
    ) -> FoldResult<()> {
        let spec = self.default_spec(completion)?;
        self.show(tree, target, overlay, spec)
    }

    /// [`FoldTransition::hide`] with the configured default folds, direction and duration.
    pub fn hide_default(
        &mut self,
        tree: &mut R,
        target: R::Surface,
        overlay: R::Surface,
        completion: Option<Completion>,
    ) -> FoldResult<()> {
        let spec = self.default_spec(completion)?;
        self.hide(tree, target, overlay, spec)
    }

    fn default_spec(&self, completion: Option<Completion>) -> FoldResult<FoldSpec> {
        let mut spec = FoldSpec::from_config(&self.config)?;
        spec.completion = completion;
        Ok(spec)
    }

    #[tracing::instrument(
        skip(self, tree, spec),
        fields(folds = spec.fold_count, direction = ?spec.direction)
    )]
    fn begin(
        &mut self,
        tree: &mut R,
        mode: FoldMode,
        target: R::Surface,
        overlay: R::Surface,
        spec: FoldSpec,
    ) -> FoldResult<()> {
        let state = self.guard.state();
        if state != TransitionState::Idle {
            return Err(FoldError::TransitionInProgress { state });
        }
        spec.validate(&self.config)?;
        let geometry = build_strips(
            tree.bounds(overlay),
            spec.fold_count,
            spec.direction,
            self.config.eye_distance,
        )?;

        self.guard.advance(TransitionState::Updating)?;

        let sequences: Vec<KeyframeSequence> = geometry
            .iter()
            .map(|strip| {
                let steps = self.config.sample_steps;
                mode.keyframes(strip, &spec.easing, steps, spec.duration)
            })
            .collect();

        let mut strips = Vec::with_capacity(geometry.len());
        for (geometry, keyframes) in geometry.into_iter().zip(sequences) {
            let proxy = tree.create_proxy(overlay, geometry.region);
            tree.attach_keyframes(proxy, &keyframes);
            strips.push(FoldStrip {
                geometry,
                proxy,
                keyframes,
            });
        }

        tree.set_visible(target, true);
        tree.set_visible(overlay, false);
        self.active = Some(ActiveFold {
            mode,
            overlay,
            strips,
            completion: spec.completion,
        });

        self.guard.advance(TransitionState::Showing)?;
        tree.play(spec.duration);
        tracing::debug!(duration = ?spec.duration, "fold animation started");
        Ok(())
    }

    /// Completion signal from the scheduler.
    ///
    /// Tears down the strip proxies, restores the overlay as a single piece, returns to
    /// [`TransitionState::Idle`] and fires the completion callback with `finished`. Pass
    /// `finished = false` when the surface was detached mid-animation.
    #[tracing::instrument(skip(self, tree))]
    pub fn complete(&mut self, tree: &mut R, finished: bool) -> FoldResult<()> {
        if self.guard.state() != TransitionState::Showing {
            // No animation is playing: a duplicate or stray completion.
            return self.guard.advance(TransitionState::Idle);
        }
        let Some(mut active) = self.active.take() else {
            return self.guard.advance(TransitionState::Idle);
        };

        for strip in active.strips.drain(..) {
            tree.destroy_proxy(strip.proxy);
        }
        tree.set_visible(active.overlay, active.mode.overlay_visible_after());
        if !finished {
            tracing::warn!(mode = ?active.mode, "fold transition interrupted");
        }

        self.guard.advance(TransitionState::Idle)?;
        if let Some(callback) = active.completion.take() {
            callback(finished);
        }
        Ok(())
    }
}
