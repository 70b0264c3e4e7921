//! Routing external events to machine signals.

use crate::core::Entity;
use crate::events::mapping::EventMapping;
use crate::machine::{FsmError, MachineRegistry, StateMachine, Stateful};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// A set of event-to-signal bindings.
///
/// Raising an event delivers one freshly built signal per binding for that
/// event, in binding order.
///
/// # Example
///
/// ```rust
/// use statewise::events::EventBus;
///
/// let mut bus = EventBus::new();
/// bus.map("task:implement", "implement")
///     .map_with("task:success", "complete", [("success", true.into())]);
///
/// assert_eq!(bus.mappings_for("task:success").count(), 1);
/// assert_eq!(bus.mappings_for("task:unknown").count(), 0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventBus {
    mappings: Vec<EventMapping>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `event` to a signal type with no arguments.
    pub fn map(&mut self, event: impl Into<String>, signal: impl Into<String>) -> &mut Self {
        self.bind(EventMapping::new(event, signal))
    }

    /// Bind `event` to a signal type with fixed arguments.
    pub fn map_with<K: Into<String>>(
        &mut self,
        event: impl Into<String>,
        signal: impl Into<String>,
        arguments: impl IntoIterator<Item = (K, Value)>,
    ) -> &mut Self {
        let mapping = arguments
            .into_iter()
            .fold(EventMapping::new(event, signal), |mapping, (name, value)| {
                mapping.with(name, value)
            });
        self.bind(mapping)
    }

    pub fn bind(&mut self, mapping: EventMapping) -> &mut Self {
        self.mappings.push(mapping);
        self
    }

    pub fn mappings_for<'a>(&'a self, event: &'a str) -> impl Iterator<Item = &'a EventMapping> + 'a {
        self.mappings.iter().filter(move |m| m.event() == event)
    }

    /// Raise `event` on `entity` through `machine`.
    ///
    /// Returns the number of signals delivered. Whether each one fired a
    /// transition is not reported.
    pub fn raise<E: Entity>(
        &self,
        event: &str,
        machine: &StateMachine<E>,
        entity: &mut E,
    ) -> Result<usize, FsmError> {
        let mut delivered = 0;
        for mapping in self.mappings_for(event) {
            debug!(event = event, signal = mapping.signal_type(), "Routing event");
            mapping.deliver(machine, entity)?;
            delivered += 1;
        }
        Ok(delivered)
    }

    /// Raise `event` on a [`Stateful`] entity using its shared machine.
    pub fn raise_on<E: Stateful>(
        &self,
        event: &str,
        registry: &MachineRegistry,
        entity: &mut E,
    ) -> Result<usize, E::Error> {
        let mut delivered = 0;
        for mapping in self.mappings_for(event) {
            debug!(event = event, signal = mapping.signal_type(), "Routing event");
            entity.send_signal(registry, mapping.to_signal())?;
            delivered += 1;
        }
        Ok(delivered)
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}
