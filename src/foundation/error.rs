use crate::transition::state::TransitionState;

pub type FoldResult<T> = Result<T, FoldError>;

#[derive(thiserror::Error, Debug)]
pub enum FoldError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("transition already in progress (state: {state:?})")]
    TransitionInProgress { state: TransitionState },

    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("illegal state transition: {from:?} -> {to:?}")]
    InvalidStateTransition {
        from: TransitionState,
        to: TransitionState,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FoldError {
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateGeometry(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
