//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::core::{Entity, State, Transition};
use crate::machine::StateMachine;

/// Builder for constructing state machines with a fluent API.
///
/// States and transitions are collected in order and replayed into
/// `add_state` / `add_transition` calls by [`build`](Self::build), so a
/// transition may be declared before the states it connects.
pub struct MachineBuilder<E> {
    states: Vec<State<E>>,
    transitions: Vec<Transition<E>>,
}

impl<E: Entity> MachineBuilder<E> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Add a state.
    pub fn state(mut self, state: State<E>) -> Self {
        self.states.push(state);
        self
    }

    /// Add multiple states at once.
    pub fn states(mut self, states: impl IntoIterator<Item = State<E>>) -> Self {
        self.states.extend(states);
        self
    }

    /// Add a transition. Earlier transitions take priority.
    pub fn transition(mut self, transition: Transition<E>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(mut self, transitions: impl IntoIterator<Item = Transition<E>>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Build the state machine.
    /// Returns an error if any state or transition violates the machine's
    /// structural rules.
    pub fn build(self) -> Result<StateMachine<E>, BuildError> {
        let mut machine = StateMachine::new();
        for state in self.states {
            machine.add_state(state)?;
        }
        for transition in self.transitions {
            machine.add_transition(transition)?;
        }
        Ok(machine)
    }
}

impl<E: Entity> Default for MachineBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Signal;
    use crate::machine::FsmError;

    #[derive(Default)]
    struct Parcel {
        state: String,
    }

    impl Entity for Parcel {
        fn current_state(&self) -> &str {
            &self.state
        }

        fn set_state(&mut self, name: &str) {
            self.state = name.to_string();
        }
    }

    #[test]
    fn fluent_api_builds_machine() {
        let machine = MachineBuilder::<Parcel>::new()
            .state(State::initial("packed"))
            .states([State::mediate("shipped"), State::finite("delivered")])
            .transition(Transition::new("packed", "shipped", "ship"))
            .transition(Transition::new("shipped", "delivered", "deliver"))
            .build()
            .unwrap();

        let mut parcel = Parcel::default();
        machine.enter_initial(&mut parcel).unwrap();
        machine.signal(&Signal::new("ship"), &mut parcel).unwrap();
        machine.signal(&Signal::new("deliver"), &mut parcel).unwrap();

        assert_eq!(parcel.current_state(), "delivered");
    }

    #[test]
    fn transitions_may_be_declared_before_states() {
        let machine = MachineBuilder::<Parcel>::new()
            .transitions([Transition::new("packed", "shipped", "ship")])
            .states([State::initial("packed"), State::mediate("shipped")])
            .build();

        assert!(machine.is_ok());
    }

    #[test]
    fn builder_reports_structural_errors() {
        let result = MachineBuilder::<Parcel>::new()
            .state(State::initial("packed"))
            .state(State::initial("shipped"))
            .build();

        assert!(matches!(
            result,
            Err(BuildError::Machine(FsmError::DuplicateInitialState { .. }))
        ));

        let result = MachineBuilder::<Parcel>::new()
            .state(State::initial("packed"))
            .transition(Transition::new("packed", "lost", "ship"))
            .build();

        assert!(matches!(
            result,
            Err(BuildError::Machine(FsmError::UnknownState { .. }))
        ));
    }

    #[test]
    fn empty_builder_builds_empty_machine() {
        let machine = MachineBuilder::<Parcel>::default().build().unwrap();
        assert!(machine.transitions().is_empty());
        assert!(machine.get_initial_state().is_err());
    }
}
