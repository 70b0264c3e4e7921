//! Entity capability contract.
//!
//! The machine never owns an entity and never stores state itself. Each call
//! receives the entity it operates on, which lets one machine drive any number
//! of entities of the same type.

use std::error::Error;

/// Error produced by a user-supplied effect callback.
///
/// The machine does not inspect or wrap these beyond carrying them back to
/// the caller of the dispatch operation.
pub type CallbackError = Box<dyn Error + Send + Sync>;

/// Result returned by enter, leave and transit effects.
pub type CallbackResult = Result<(), CallbackError>;

/// An object whose lifecycle is governed by a state machine.
///
/// # Example
///
/// ```rust
/// use statewise::core::Entity;
///
/// #[derive(Default)]
/// struct Ticket {
///     state: String,
/// }
///
/// impl Entity for Ticket {
///     fn current_state(&self) -> &str {
///         &self.state
///     }
///
///     fn set_state(&mut self, name: &str) {
///         self.state = name.to_string();
///     }
/// }
///
/// let mut ticket = Ticket::default();
/// ticket.set_state("open");
/// assert_eq!(ticket.current_state(), "open");
/// ```
pub trait Entity {
    /// Name of the state the entity currently occupies.
    ///
    /// An empty string means no state has been persisted yet.
    fn current_state(&self) -> &str;

    /// Persist a new state name onto the entity.
    fn set_state(&mut self, name: &str);
}
