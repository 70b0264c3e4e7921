//! A single event-to-signal binding.

use crate::core::{Arguments, Entity, Signal};
use crate::machine::{FsmError, StateMachine};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Binds an external event name to a signal type and fixed arguments.
///
/// Each delivery builds a fresh [`Signal`] from the mapping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventMapping {
    event: String,
    signal: String,
    #[serde(default, skip_serializing_if = "Arguments::is_empty")]
    arguments: Arguments,
}

impl EventMapping {
    pub fn new(event: impl Into<String>, signal: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            signal: signal.into(),
            arguments: Arguments::new(),
        }
    }

    /// Add a fixed argument carried by every signal built from this mapping.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(name.into(), value.into());
        self
    }

    pub fn event(&self) -> &str {
        &self.event
    }

    pub fn signal_type(&self) -> &str {
        &self.signal
    }

    pub fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    /// Build the signal this mapping produces.
    pub fn to_signal(&self) -> Signal {
        Signal::with_arguments(self.signal.clone(), self.arguments.clone())
    }

    /// Dispatch the mapped signal to `entity`.
    ///
    /// Whether a transition fired is ignored; effect errors still propagate.
    pub fn deliver<E: Entity>(
        &self,
        machine: &StateMachine<E>,
        entity: &mut E,
    ) -> Result<(), FsmError> {
        machine.signal(&self.to_signal(), entity)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_signal_carries_fixed_arguments() {
        let mapping = EventMapping::new("task:success", "complete").with("success", true);

        let signal = mapping.to_signal();

        assert_eq!(signal.signal_type(), "complete");
        assert_eq!(signal.argument_as::<bool>("success"), Some(true));
    }

    #[test]
    fn mapping_without_arguments_builds_bare_signal() {
        let mapping = EventMapping::new("task:implement", "implement");
        assert_eq!(mapping.to_signal(), Signal::new("implement"));
    }

    #[test]
    fn mapping_deserializes_without_arguments() {
        let mapping: EventMapping =
            serde_json::from_str(r#"{"event":"task:implement","signal":"implement"}"#).unwrap();

        assert_eq!(mapping.event(), "task:implement");
        assert_eq!(mapping.signal_type(), "implement");
        assert!(mapping.arguments().is_empty());
    }
}
