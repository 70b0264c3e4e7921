//! Builder API for ergonomic state machine construction.
//!
//! Two front ends feed the same registration calls:
//! - [`MachineBuilder`]: fluent, takes `State` and `Transition` values
//! - [`MachineConfig`]: declarative data (e.g. JSON) whose guards and effects
//!   are named and resolved through [`Callbacks`]
//!
//! Both register every state first and every transition second, each in
//! declaration order.

pub mod config;
pub mod error;
pub mod machine;

pub use config::{Callbacks, MachineConfig, StateConfig, TransitionConfig};
pub use error::{BuildError, CallbackKind};
pub use machine::MachineBuilder;
