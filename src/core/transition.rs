//! Signal-triggered edges between named states.

use super::entity::{CallbackResult, Entity};
use super::guard::Guard;
use super::signal::Signal;
use std::fmt;
use std::sync::Arc;

/// Effect run between leaving the source state and entering the target.
pub type TransitEffect<E> = Arc<dyn Fn(&mut E) -> CallbackResult + Send + Sync>;

/// A directed edge from one state name to another, gated by a signal type
/// and an optional guard.
///
/// A transition does not orchestrate leave and enter effects; the owning
/// machine does that once it has picked the transition to fire.
///
/// # Example
///
/// ```rust
/// use statewise::core::{Entity, Signal, Transition};
///
/// struct Task {
///     state: String,
///     done: bool,
/// }
///
/// impl Entity for Task {
///     fn current_state(&self) -> &str {
///         &self.state
///     }
///
///     fn set_state(&mut self, name: &str) {
///         self.state = name.to_string();
///     }
/// }
///
/// let finish = Transition::new("assigned", "implemented", "save")
///     .condition(|task: &Task, _| task.done);
///
/// let mut task = Task { state: "assigned".to_string(), done: false };
/// assert!(!finish.matches(&Signal::new("save"), &task));
///
/// task.done = true;
/// assert!(finish.matches(&Signal::new("save"), &task));
/// assert!(!finish.matches(&Signal::new("cancel"), &task));
/// ```
pub struct Transition<E> {
    from: String,
    to: String,
    signal_type: String,
    guard: Option<Guard<E>>,
    on_transit: Option<TransitEffect<E>>,
}

impl<E: Entity> Transition<E> {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        signal_type: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            signal_type: signal_type.into(),
            guard: None,
            on_transit: None,
        }
    }

    /// Gate the transition with a predicate (optional).
    pub fn condition<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&E, &Signal) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Gate the transition with an existing guard (optional).
    pub fn guard(mut self, guard: Guard<E>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Set the effect run while the transition fires (optional).
    pub fn transiting<F>(mut self, effect: F) -> Self
    where
        F: Fn(&mut E) -> CallbackResult + Send + Sync + 'static,
    {
        self.on_transit = Some(Arc::new(effect));
        self
    }

    pub(crate) fn with_transit_effect(mut self, effect: TransitEffect<E>) -> Self {
        self.on_transit = Some(effect);
        self
    }

    /// Check whether this transition reacts to `signal` for `entity`.
    ///
    /// The guard is only consulted once the source state and signal type
    /// agree.
    pub fn matches(&self, signal: &Signal, entity: &E) -> bool {
        if entity.current_state() != self.from || signal.signal_type() != self.signal_type {
            return false;
        }

        self.guard
            .as_ref()
            .is_none_or(|guard| guard.check(entity, signal))
    }

    /// Run the transit effect, if any.
    pub fn fire(&self, entity: &mut E) -> CallbackResult {
        match &self.on_transit {
            Some(effect) => effect(entity),
            None => Ok(()),
        }
    }
}

impl<E> Transition<E> {
    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn signal_type(&self) -> &str {
        &self.signal_type
    }

    pub fn has_guard(&self) -> bool {
        self.guard.is_some()
    }

    /// Whether the transition starts or ends at `state`.
    pub fn touches(&self, state: &str) -> bool {
        self.from == state || self.to == state
    }
}

/// Two transitions are equal when they connect the same states on the same
/// signal type and share the same guard and transit effect.
impl<E> PartialEq for Transition<E> {
    fn eq(&self, other: &Self) -> bool {
        let same_guard = match (&self.guard, &other.guard) {
            (Some(a), Some(b)) => a.same_as(b),
            (None, None) => true,
            _ => false,
        };
        let same_transit = match (&self.on_transit, &other.on_transit) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };

        self.from == other.from
            && self.to == other.to
            && self.signal_type == other.signal_type
            && same_guard
            && same_transit
    }
}

impl<E> Clone for Transition<E> {
    fn clone(&self) -> Self {
        Self {
            from: self.from.clone(),
            to: self.to.clone(),
            signal_type: self.signal_type.clone(),
            guard: self.guard.clone(),
            on_transit: self.on_transit.clone(),
        }
    }
}

impl<E> fmt::Debug for Transition<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("signal_type", &self.signal_type)
            .field("guard", &self.guard.is_some())
            .field("on_transit", &self.on_transit.is_some())
            .finish()
    }
}
