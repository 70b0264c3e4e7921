//! Machine errors.

use crate::core::CallbackError;
use thiserror::Error;

/// Errors raised by machine registration and dispatch.
///
/// Structural misuse is reported by the registry operations. Failures of
/// user-supplied effects are passed through untouched as [`FsmError::Effect`].
#[derive(Debug, Error)]
pub enum FsmError {
    #[error("Multiple initial states are not allowed: '{existing}' is already initial, rejected '{rejected}'")]
    DuplicateInitialState { existing: String, rejected: String },

    #[error("State '{name}' does not exist")]
    UnknownState { name: String },

    #[error("Transitions from finite state '{name}' are not allowed")]
    TransitionFromFiniteState { name: String },

    #[error("Initial state has not been defined")]
    NoInitialState,

    #[error(transparent)]
    Effect(#[from] CallbackError),
}

impl FsmError {
    /// Recover the error returned by a user effect, if this is one.
    pub fn into_effect(self) -> Option<CallbackError> {
        match self {
            FsmError::Effect(err) => Some(err),
            _ => None,
        }
    }
}
