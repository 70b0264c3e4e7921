//! State registry and signal dispatch.

use crate::core::{Entity, Signal, State, Transition, TransitionRecord};
use crate::machine::error::FsmError;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace, warn};

/// A finite state machine over entities of type `E`.
///
/// The machine owns its states and transitions but never the entities it
/// drives: each dispatch receives the entity to operate on. Build the
/// machine with `&mut self` calls, then share it (typically behind an
/// `Arc`) and dispatch through `&self`.
///
/// # Example
///
/// ```rust
/// use statewise::core::{Entity, Signal, State, Transition};
/// use statewise::machine::StateMachine;
///
/// #[derive(Default)]
/// struct Light {
///     state: String,
/// }
///
/// impl Entity for Light {
///     fn current_state(&self) -> &str {
///         &self.state
///     }
///
///     fn set_state(&mut self, name: &str) {
///         self.state = name.to_string();
///     }
/// }
///
/// let mut machine = StateMachine::new();
/// machine.add_state(State::initial("off")).unwrap();
/// machine.add_state(State::mediate("on")).unwrap();
/// machine.add_transition(Transition::new("off", "on", "toggle")).unwrap();
/// machine.add_transition(Transition::new("on", "off", "toggle")).unwrap();
///
/// let mut light = Light::default();
/// machine.enter_initial(&mut light).unwrap();
///
/// assert!(machine.signal(&Signal::new("toggle"), &mut light).unwrap());
/// assert_eq!(light.current_state(), "on");
/// assert!(!machine.signal(&Signal::new("dim"), &mut light).unwrap());
/// assert_eq!(light.current_state(), "on");
/// ```
pub struct StateMachine<E> {
    states: HashMap<String, State<E>>,
    transitions: Vec<Transition<E>>,
    initial: Option<String>,
}

impl<E: Entity> StateMachine<E> {
    /// Create an empty machine.
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
            transitions: Vec::new(),
            initial: None,
        }
    }

    /// Register a state.
    ///
    /// A state with the same name replaces the existing one. Fails with
    /// [`FsmError::DuplicateInitialState`] when an initial state is already
    /// registered, and with [`FsmError::TransitionFromFiniteState`] when a
    /// replacement would turn a state with outgoing transitions into a
    /// finite one. The registry is unchanged on failure.
    pub fn add_state(&mut self, state: State<E>) -> Result<&State<E>, FsmError> {
        if state.is_initial() {
            if let Some(existing) = &self.initial {
                return Err(FsmError::DuplicateInitialState {
                    existing: existing.clone(),
                    rejected: state.name().to_string(),
                });
            }
        }

        if state.is_finite() && self.transitions.iter().any(|t| t.from() == state.name()) {
            return Err(FsmError::TransitionFromFiniteState {
                name: state.name().to_string(),
            });
        }

        let name = state.name().to_string();
        let is_initial = state.is_initial();
        debug!(state = %name, kind = ?state.kind(), "Registering state");

        if let Some(previous) = self.states.insert(name.clone(), state) {
            warn!(state = %name, previous = ?previous.kind(), "Replaced existing state");
            if previous.is_initial() {
                self.initial = None;
            }
        }
        if is_initial {
            self.initial = Some(name.clone());
        }

        Ok(&self.states[&name])
    }

    /// Remove a state and every transition that touches it.
    ///
    /// Returns the removed state, or `None` when no state had that name.
    /// Removing the initial state clears it.
    pub fn remove_state(&mut self, name: &str) -> Option<State<E>> {
        let removed = self.states.remove(name)?;
        if removed.is_initial() {
            self.initial = None;
        }
        self.transitions.retain(|t| !t.touches(name));
        debug!(state = %name, "Removed state");
        Some(removed)
    }

    /// Append a transition.
    ///
    /// Both endpoints must already be registered and the source state must
    /// not be finite. Registration order is dispatch priority: the earliest
    /// added transition is tried first.
    pub fn add_transition(&mut self, transition: Transition<E>) -> Result<&Transition<E>, FsmError> {
        let from = self.require_state(transition.from())?;
        self.require_state(transition.to())?;
        if from.is_finite() {
            return Err(FsmError::TransitionFromFiniteState {
                name: from.name().to_string(),
            });
        }

        debug!(
            from = transition.from(),
            to = transition.to(),
            signal = transition.signal_type(),
            "Registering transition"
        );
        let index = self.transitions.len();
        self.transitions.push(transition);
        Ok(&self.transitions[index])
    }

    /// Remove every transition equal to `transition`.
    ///
    /// Returns whether anything was removed.
    pub fn remove_transition(&mut self, transition: &Transition<E>) -> bool {
        let before = self.transitions.len();
        self.transitions.retain(|t| t != transition);
        before != self.transitions.len()
    }

    /// Get the initial state.
    pub fn get_initial_state(&self) -> Result<&State<E>, FsmError> {
        self.initial
            .as_deref()
            .and_then(|name| self.states.get(name))
            .ok_or(FsmError::NoInitialState)
    }

    /// Put `entity` into the initial state, running its enter effect.
    pub fn enter_initial(&self, entity: &mut E) -> Result<(), FsmError> {
        let initial = self.get_initial_state()?;
        initial.enter(entity, None)?;
        debug!(state = initial.name(), "Entered initial state");
        Ok(())
    }

    /// Dispatch a signal and report which transition fired.
    ///
    /// Transitions are tried in registration order and the first match
    /// wins: the source state's leave effect runs, then the transition's
    /// transit effect, then the target state is entered. Returns `None`
    /// and leaves the entity untouched when nothing matches. Effect
    /// errors abort the sequence and are returned as [`FsmError::Effect`].
    ///
    /// Guards may be evaluated on several transitions per dispatch and
    /// are never memoised.
    pub fn dispatch(
        &self,
        signal: &Signal,
        entity: &mut E,
    ) -> Result<Option<TransitionRecord>, FsmError> {
        let Some(transition) = self.transitions.iter().find(|t| t.matches(signal, entity)) else {
            trace!(
                state = entity.current_state(),
                signal = signal.signal_type(),
                "No transition matched"
            );
            return Ok(None);
        };

        let from = self.require_state(transition.from())?;
        let to = self.require_state(transition.to())?;

        from.leave(entity)?;
        transition.fire(entity)?;
        to.enter(entity, Some(signal))?;

        debug!(
            from = from.name(),
            to = to.name(),
            signal = signal.signal_type(),
            "Transition fired"
        );
        Ok(Some(TransitionRecord::new(
            from.name(),
            to.name(),
            signal.clone(),
        )))
    }

    /// Dispatch a signal. Returns whether a transition fired.
    pub fn signal(&self, signal: &Signal, entity: &mut E) -> Result<bool, FsmError> {
        self.dispatch(signal, entity).map(|record| record.is_some())
    }

    /// Transitions leaving the entity's current state, in priority order.
    pub fn available_transitions<'a>(
        &'a self,
        entity: &'a E,
    ) -> impl Iterator<Item = &'a Transition<E>> + 'a {
        self.transitions
            .iter()
            .filter(move |t| t.from() == entity.current_state())
    }

    fn require_state(&self, name: &str) -> Result<&State<E>, FsmError> {
        self.states.get(name).ok_or_else(|| FsmError::UnknownState {
            name: name.to_string(),
        })
    }
}

impl<E> StateMachine<E> {
    pub fn state(&self, name: &str) -> Option<&State<E>> {
        self.states.get(name)
    }

    pub fn has_state(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    /// Registered states, in no particular order.
    pub fn states(&self) -> impl Iterator<Item = &State<E>> {
        self.states.values()
    }

    /// Registered transitions in priority order.
    pub fn transitions(&self) -> &[Transition<E>] {
        &self.transitions
    }
}

impl<E: Entity> Default for StateMachine<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for StateMachine<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("states", &self.states.values().collect::<Vec<_>>())
            .field("transitions", &self.transitions)
            .field("initial", &self.initial)
            .finish()
    }
}
