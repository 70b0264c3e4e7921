//! Records of completed transitions.
//!
//! The machine reports each fired transition as a [`TransitionRecord`].
//! Entities that want an audit trail can collect them in a [`StateHistory`].

use super::signal::Signal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single fired transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The state the entity left
    pub from: String,
    /// The state the entity entered
    pub to: String,
    /// The signal that triggered the transition
    pub signal: Signal,
    /// When the transition completed
    pub timestamp: DateTime<Utc>,
}

impl TransitionRecord {
    pub fn new(from: impl Into<String>, to: impl Into<String>, signal: Signal) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            signal,
            timestamp: Utc::now(),
        }
    }
}

/// Ordered history of fired transitions.
///
/// History is immutable - `record` returns a new history with the
/// transition appended.
///
/// # Example
///
/// ```rust
/// use statewise::core::{Signal, StateHistory, TransitionRecord};
///
/// let history = StateHistory::new()
///     .record(TransitionRecord::new("draft", "review", Signal::new("submit")))
///     .record(TransitionRecord::new("review", "published", Signal::new("approve")));
///
/// assert_eq!(history.get_path(), vec!["draft", "review", "published"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    records: Vec<TransitionRecord>,
}

impl StateHistory {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, record: TransitionRecord) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        Self { records }
    }

    /// State names traversed: the first source state, then each target.
    pub fn get_path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        if let Some(first) = self.records.first() {
            path.push(first.from.as_str());
        }
        for record in &self.records {
            path.push(record.to.as_str());
        }
        path
    }

    /// Time between the first and last recorded transition.
    ///
    /// Returns `None` for an empty history.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.first()?, self.records.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
