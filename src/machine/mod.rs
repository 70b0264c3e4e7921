//! The state machine: registry, dispatch and entity binding.
//!
//! # Key Concepts
//!
//! - **StateMachine**: owns states and ordered transitions; dispatches signals
//!   to entities passed in per call
//! - **MachineRegistry**: caller-owned map from entity type to its shared machine
//! - **Stateful**: entity types that build and use their own machine
//!
//! A machine is assembled with `&mut self` calls and then frozen behind an
//! `Arc`. Dispatch only needs `&self`, so one machine can serve many
//! entities on many threads. Mutating a machine after it has been shared
//! requires external synchronisation.

mod error;
mod registry;
mod state_machine;
mod stateful;

pub use error::FsmError;
pub use registry::MachineRegistry;
pub use state_machine::StateMachine;
pub use stateful::Stateful;
