//! Statewise: a signal-driven finite state machine engine
//!
//! A machine holds named states and signal-triggered transitions. It never
//! stores an entity's state: entities implement the small [`Entity`]
//! contract and are passed in on every call, so one machine can drive every
//! instance of a type.
//!
//! # Core Concepts
//!
//! - **State**: a named node (initial, mediate or finite) with optional enter/leave effects
//! - **Transition**: an edge between two states, triggered by a signal type and an optional guard
//! - **Signal**: a typed message with read-only arguments
//! - **StateMachine**: registry of states and ordered transitions; first matching transition wins
//!
//! # Example
//!
//! ```rust
//! use statewise::core::{Entity, Signal, State, Transition};
//! use statewise::machine::StateMachine;
//!
//! #[derive(Default)]
//! struct Task {
//!     state: String,
//!     done: bool,
//! }
//!
//! impl Entity for Task {
//!     fn current_state(&self) -> &str {
//!         &self.state
//!     }
//!
//!     fn set_state(&mut self, name: &str) {
//!         self.state = name.to_string();
//!     }
//! }
//!
//! let mut machine = StateMachine::new();
//! machine.add_state(State::initial("assigned")).unwrap();
//! machine.add_state(State::finite("implemented")).unwrap();
//! machine
//!     .add_transition(
//!         Transition::new("assigned", "implemented", "save").condition(|task: &Task, _| task.done),
//!     )
//!     .unwrap();
//!
//! let mut task = Task::default();
//! machine.enter_initial(&mut task).unwrap();
//!
//! assert!(!machine.signal(&Signal::new("save"), &mut task).unwrap());
//! task.done = true;
//! assert!(machine.signal(&Signal::new("save"), &mut task).unwrap());
//! assert_eq!(task.current_state(), "implemented");
//! ```

pub mod builder;
pub mod core;
pub mod events;
pub mod machine;

// Re-export commonly used types
pub use self::builder::{BuildError, Callbacks, MachineBuilder, MachineConfig};
pub use self::core::{Entity, Guard, Signal, State, StateKind, Transition};
pub use self::events::{EventBus, EventMapping};
pub use self::machine::{FsmError, MachineRegistry, StateMachine, Stateful};
