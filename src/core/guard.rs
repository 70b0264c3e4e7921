//! Guard predicates for controlling transitions.
//!
//! Guards decide whether a transition is eligible for a given entity and
//! signal. Dispatch may evaluate several guards before one matches, so a
//! guard must be free of irreversible side effects.

use super::signal::Signal;
use std::fmt;
use std::sync::Arc;

/// Predicate over an entity and the signal being dispatched.
///
/// # Example
///
/// ```rust
/// use statewise::core::{Guard, Signal};
///
/// struct Job {
///     retries: u32,
/// }
///
/// let can_retry = Guard::new(|job: &Job, _: &Signal| job.retries < 3);
///
/// assert!(can_retry.check(&Job { retries: 1 }, &Signal::new("retry")));
/// assert!(!can_retry.check(&Job { retries: 3 }, &Signal::new("retry")));
/// ```
pub struct Guard<E> {
    predicate: Arc<dyn Fn(&E, &Signal) -> bool + Send + Sync>,
}

impl<E> Guard<E> {
    /// Create a guard from a predicate.
    ///
    /// The predicate must be deterministic for a given entity and signal,
    /// and thread-safe (Send + Sync).
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&E, &Signal) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Evaluate the guard.
    pub fn check(&self, entity: &E, signal: &Signal) -> bool {
        (self.predicate)(entity, signal)
    }

    /// Whether both guards share the same predicate.
    pub fn same_as(&self, other: &Guard<E>) -> bool {
        Arc::ptr_eq(&self.predicate, &other.predicate)
    }
}

impl<E> Clone for Guard<E> {
    fn clone(&self) -> Self {
        Guard {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<E> fmt::Debug for Guard<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard")
    }
}
