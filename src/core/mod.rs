//! Core state machine building blocks.
//!
//! This module contains the values a machine is assembled from:
//! - States and their kinds, with enter/leave effects
//! - Signals and their argument payloads
//! - Guards and signal-triggered transitions
//! - The `Entity` contract a machine operates on
//! - Transition records and history

mod entity;
mod guard;
mod history;
mod signal;
mod state;
mod transition;

pub use entity::{CallbackError, CallbackResult, Entity};
pub use guard::Guard;
pub use history::{StateHistory, TransitionRecord};
pub use signal::{Arguments, Signal};
pub use state::{EnterEffect, LeaveEffect, State, StateKind};
pub use transition::{TransitEffect, Transition};
