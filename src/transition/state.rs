use crate::foundation::error::{FoldError, FoldResult};

/// Lifecycle of a fold transition on one surface.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TransitionState {
    /// Nothing in flight; the surface is settled flat or folded away.
    #[default]
    Idle,
    /// Strips and keyframes are being computed.
    Updating,
    /// The animation is playing.
    Showing,
}

impl TransitionState {
    pub fn can_advance_to(self, next: TransitionState) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Updating)
                | (Self::Updating, Self::Showing)
                | (Self::Showing, Self::Idle)
        )
    }
}

#[derive(Debug, Default)]
pub struct StateGuard {
    state: TransitionState,
}

impl StateGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TransitionState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == TransitionState::Idle
    }

    /// Move to `next`.
    ///
    /// An illegal step is a bug in the caller: it panics in debug builds. Release builds log it
    /// and return [`FoldError::InvalidStateTransition`] with the state left unchanged.
    pub fn advance(&mut self, next: TransitionState) -> FoldResult<()> {
        let from = self.state;
        if !from.can_advance_to(next) {
            if cfg!(debug_assertions) {
                panic!("illegal fold transition state change: {from:?} -> {next:?}");
            }
            tracing::error!(?from, to = ?next, "illegal fold transition state change");
            return Err(FoldError::InvalidStateTransition { from, to: next });
        }

        tracing::debug!(?from, to = ?next, "fold transition state");
        self.state = next;
        Ok(())
    }
}
