//! Named states with optional enter and leave effects.

use super::entity::{CallbackResult, Entity};
use super::signal::Signal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Effect run after an entity has entered a state.
///
/// Receives the triggering signal, or `None` when the state is entered
/// directly (for example when initialising an entity).
pub type EnterEffect<E> = Arc<dyn Fn(&mut E, Option<&Signal>) -> CallbackResult + Send + Sync>;

/// Effect run when an entity leaves a state.
pub type LeaveEffect<E> = Arc<dyn Fn(&mut E) -> CallbackResult + Send + Sync>;

/// Role of a state within its machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateKind {
    /// The single state an entity occupies before any transition.
    Initial,
    #[default]
    Mediate,
    /// Terminal state; no transition may leave it.
    Finite,
}

/// A named node of a state machine.
///
/// # Example
///
/// ```rust
/// use statewise::core::{Entity, State, StateKind};
///
/// #[derive(Default)]
/// struct Order {
///     state: String,
///     notified: bool,
/// }
///
/// impl Entity for Order {
///     fn current_state(&self) -> &str {
///         &self.state
///     }
///
///     fn set_state(&mut self, name: &str) {
///         self.state = name.to_string();
///     }
/// }
///
/// let shipped = State::finite("shipped").entering(|order: &mut Order, _| {
///     order.notified = true;
///     Ok(())
/// });
///
/// let mut order = Order::default();
/// shipped.enter(&mut order, None).unwrap();
///
/// assert_eq!(shipped.kind(), StateKind::Finite);
/// assert_eq!(order.current_state(), "shipped");
/// assert!(order.notified);
/// ```
pub struct State<E> {
    name: String,
    kind: StateKind,
    on_enter: Option<EnterEffect<E>>,
    on_leave: Option<LeaveEffect<E>>,
}

impl<E: Entity> State<E> {
    pub fn new(name: impl Into<String>, kind: StateKind) -> Self {
        Self {
            name: name.into(),
            kind,
            on_enter: None,
            on_leave: None,
        }
    }

    pub fn initial(name: impl Into<String>) -> Self {
        Self::new(name, StateKind::Initial)
    }

    pub fn mediate(name: impl Into<String>) -> Self {
        Self::new(name, StateKind::Mediate)
    }

    pub fn finite(name: impl Into<String>) -> Self {
        Self::new(name, StateKind::Finite)
    }

    /// Set the effect run after the entity enters this state.
    pub fn entering<F>(mut self, effect: F) -> Self
    where
        F: Fn(&mut E, Option<&Signal>) -> CallbackResult + Send + Sync + 'static,
    {
        self.on_enter = Some(Arc::new(effect));
        self
    }

    /// Set the effect run when the entity leaves this state.
    pub fn leaving<F>(mut self, effect: F) -> Self
    where
        F: Fn(&mut E) -> CallbackResult + Send + Sync + 'static,
    {
        self.on_leave = Some(Arc::new(effect));
        self
    }

    pub(crate) fn with_enter_effect(mut self, effect: EnterEffect<E>) -> Self {
        self.on_enter = Some(effect);
        self
    }

    pub(crate) fn with_leave_effect(mut self, effect: LeaveEffect<E>) -> Self {
        self.on_leave = Some(effect);
        self
    }

    /// Move the entity into this state.
    ///
    /// The state name is always written to the entity first; the enter
    /// effect runs afterwards and its error, if any, is returned as-is.
    pub fn enter(&self, entity: &mut E, signal: Option<&Signal>) -> CallbackResult {
        entity.set_state(&self.name);
        match &self.on_enter {
            Some(effect) => effect(entity, signal),
            None => Ok(()),
        }
    }

    /// Run the leave effect. Does not touch the entity's stored state.
    pub fn leave(&self, entity: &mut E) -> CallbackResult {
        match &self.on_leave {
            Some(effect) => effect(entity),
            None => Ok(()),
        }
    }
}

impl<E> State<E> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> StateKind {
        self.kind
    }

    pub fn is_initial(&self) -> bool {
        self.kind == StateKind::Initial
    }

    pub fn is_finite(&self) -> bool {
        self.kind == StateKind::Finite
    }
}

impl<E> Clone for State<E> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            kind: self.kind,
            on_enter: self.on_enter.clone(),
            on_leave: self.on_leave.clone(),
        }
    }
}

impl<E> fmt::Debug for State<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("on_enter", &self.on_enter.is_some())
            .field("on_leave", &self.on_leave.is_some())
            .finish()
    }
}
