//! Build errors for declarative machine construction.

use crate::machine::FsmError;
use thiserror::Error;

/// Errors that can occur when building a machine from a builder or config.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("State '{name}' cannot be both initial and finite")]
    ConflictingKind { name: String },

    #[error("Unknown {kind} callback '{name}'")]
    UnknownCallback { kind: CallbackKind, name: String },

    #[error("Invalid machine definition: {0}")]
    Machine(#[from] FsmError),

    #[error("Failed to parse machine config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Which callback table a name was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackKind {
    Enter,
    Leave,
    Condition,
    Transit,
}

impl std::fmt::Display for CallbackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Enter => "enter",
            Self::Leave => "leave",
            Self::Condition => "condition",
            Self::Transit => "transit",
        };
        f.write_str(label)
    }
}
