//! Declarative machine definitions.
//!
//! A [`MachineConfig`] lists states and transitions as plain data that can be
//! loaded from JSON. Effects and guards are referenced by name and resolved
//! against a [`Callbacks`] table when the machine is built.

use crate::builder::error::{BuildError, CallbackKind};
use crate::builder::machine::MachineBuilder;
use crate::core::{
    CallbackResult, EnterEffect, Entity, Guard, LeaveEffect, Signal, State, StateKind,
    TransitEffect, Transition,
};
use crate::machine::StateMachine;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// A state descriptor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateConfig {
    pub name: String,
    #[serde(default)]
    pub initial: bool,
    #[serde(default)]
    pub finite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leave: Option<String>,
}

impl StateConfig {
    pub fn kind(&self) -> Result<StateKind, BuildError> {
        match (self.initial, self.finite) {
            (true, true) => Err(BuildError::ConflictingKind {
                name: self.name.clone(),
            }),
            (true, false) => Ok(StateKind::Initial),
            (false, true) => Ok(StateKind::Finite),
            (false, false) => Ok(StateKind::Mediate),
        }
    }
}

/// A transition descriptor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionConfig {
    pub from: String,
    pub to: String,
    pub signal: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transit: Option<String>,
}

/// Declarative definition of a state machine.
///
/// # Example
///
/// ```rust
/// use statewise::builder::{Callbacks, MachineConfig};
/// use statewise::core::{Entity, Signal};
///
/// #[derive(Default)]
/// struct Build {
///     state: String,
///     green: bool,
/// }
///
/// impl Entity for Build {
///     fn current_state(&self) -> &str {
///         &self.state
///     }
///
///     fn set_state(&mut self, name: &str) {
///         self.state = name.to_string();
///     }
/// }
///
/// let config = MachineConfig::from_json(r#"{
///     "states": [
///         { "name": "queued", "initial": true },
///         { "name": "passed", "finite": true }
///     ],
///     "transitions": [
///         { "from": "queued", "to": "passed", "signal": "finish", "condition": "green" }
///     ]
/// }"#).unwrap();
///
/// let callbacks = Callbacks::new().condition("green", |b: &Build, _| b.green);
/// let machine = config.build(&callbacks).unwrap();
///
/// let mut build = Build { green: true, ..Build::default() };
/// machine.enter_initial(&mut build).unwrap();
/// assert!(machine.signal(&Signal::new("finish"), &mut build).unwrap());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MachineConfig {
    #[serde(default)]
    pub states: Vec<StateConfig>,
    #[serde(default)]
    pub transitions: Vec<TransitionConfig>,
}

impl MachineConfig {
    pub fn from_json(json: &str) -> Result<Self, BuildError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Translate the definition into a builder, resolving callback names.
    pub fn to_builder<E: Entity>(
        &self,
        callbacks: &Callbacks<E>,
    ) -> Result<MachineBuilder<E>, BuildError> {
        let mut builder = MachineBuilder::new();

        for def in &self.states {
            let mut state = State::new(def.name.clone(), def.kind()?);
            if let Some(name) = &def.enter {
                state = state.with_enter_effect(callbacks.enter_effect(name)?);
            }
            if let Some(name) = &def.leave {
                state = state.with_leave_effect(callbacks.leave_effect(name)?);
            }
            builder = builder.state(state);
        }

        for def in &self.transitions {
            let mut transition = Transition::new(def.from.clone(), def.to.clone(), def.signal.clone());
            if let Some(name) = &def.condition {
                transition = transition.guard(callbacks.guard(name)?);
            }
            if let Some(name) = &def.transit {
                transition = transition.with_transit_effect(callbacks.transit_effect(name)?);
            }
            builder = builder.transition(transition);
        }

        Ok(builder)
    }

    /// Build the machine, registering states then transitions in list order.
    pub fn build<E: Entity>(&self, callbacks: &Callbacks<E>) -> Result<StateMachine<E>, BuildError> {
        self.to_builder(callbacks)?.build()
    }
}

/// Named guards and effects referenced from a [`MachineConfig`].
pub struct Callbacks<E> {
    conditions: HashMap<String, Guard<E>>,
    enter: HashMap<String, EnterEffect<E>>,
    leave: HashMap<String, LeaveEffect<E>>,
    transit: HashMap<String, TransitEffect<E>>,
}

impl<E: Entity> Callbacks<E> {
    pub fn new() -> Self {
        Self {
            conditions: HashMap::new(),
            enter: HashMap::new(),
            leave: HashMap::new(),
            transit: HashMap::new(),
        }
    }

    pub fn condition<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&E, &Signal) -> bool + Send + Sync + 'static,
    {
        self.conditions.insert(name.into(), Guard::new(predicate));
        self
    }

    pub fn on_enter<F>(mut self, name: impl Into<String>, effect: F) -> Self
    where
        F: Fn(&mut E, Option<&Signal>) -> CallbackResult + Send + Sync + 'static,
    {
        self.enter.insert(name.into(), Arc::new(effect));
        self
    }

    pub fn on_leave<F>(mut self, name: impl Into<String>, effect: F) -> Self
    where
        F: Fn(&mut E) -> CallbackResult + Send + Sync + 'static,
    {
        self.leave.insert(name.into(), Arc::new(effect));
        self
    }

    pub fn on_transit<F>(mut self, name: impl Into<String>, effect: F) -> Self
    where
        F: Fn(&mut E) -> CallbackResult + Send + Sync + 'static,
    {
        self.transit.insert(name.into(), Arc::new(effect));
        self
    }

    fn guard(&self, name: &str) -> Result<Guard<E>, BuildError> {
        self.conditions
            .get(name)
            .cloned()
            .ok_or_else(|| unknown(CallbackKind::Condition, name))
    }

    fn enter_effect(&self, name: &str) -> Result<EnterEffect<E>, BuildError> {
        self.enter
            .get(name)
            .cloned()
            .ok_or_else(|| unknown(CallbackKind::Enter, name))
    }

    fn leave_effect(&self, name: &str) -> Result<LeaveEffect<E>, BuildError> {
        self.leave
            .get(name)
            .cloned()
            .ok_or_else(|| unknown(CallbackKind::Leave, name))
    }

    fn transit_effect(&self, name: &str) -> Result<TransitEffect<E>, BuildError> {
        self.transit
            .get(name)
            .cloned()
            .ok_or_else(|| unknown(CallbackKind::Transit, name))
    }
}

impl<E: Entity> Default for Callbacks<E> {
    fn default() -> Self {
        Self::new()
    }
}

fn unknown(kind: CallbackKind, name: &str) -> BuildError {
    BuildError::UnknownCallback {
        kind,
        name: name.to_string(),
    }
}
