//! Binding an entity type to its shared machine.

use crate::core::{Entity, Signal};
use crate::machine::error::FsmError;
use crate::machine::registry::MachineRegistry;
use crate::machine::state_machine::StateMachine;
use std::sync::Arc;

/// An entity type that knows how to build the machine governing it.
///
/// The machine is built once per type and cached in a caller-owned
/// [`MachineRegistry`]; every instance of the type shares it. The entity
/// itself only provides its state slot through [`Entity`].
///
/// # Example
///
/// ```rust
/// use statewise::core::{Entity, Signal, State, Transition};
/// use statewise::machine::{FsmError, MachineRegistry, StateMachine, Stateful};
///
/// #[derive(Default)]
/// struct Article {
///     state: String,
/// }
///
/// impl Entity for Article {
///     fn current_state(&self) -> &str {
///         &self.state
///     }
///
///     fn set_state(&mut self, name: &str) {
///         self.state = name.to_string();
///     }
/// }
///
/// impl Stateful for Article {
///     type Error = FsmError;
///
///     fn create_state_machine() -> Result<StateMachine<Self>, FsmError> {
///         let mut machine = StateMachine::new();
///         machine.add_state(State::initial("draft"))?;
///         machine.add_state(State::finite("published"))?;
///         machine.add_transition(Transition::new("draft", "published", "publish"))?;
///         Ok(machine)
///     }
/// }
///
/// let registry = MachineRegistry::new();
/// let mut article = Article::default();
///
/// // The initial state is entered lazily on the first signal.
/// assert!(article.send_signal(&registry, Signal::new("publish")).unwrap());
/// assert_eq!(article.current_state(), "published");
/// ```
pub trait Stateful: Entity + Sized + 'static {
    /// Error produced while building the machine.
    type Error: From<FsmError>;

    /// Build the machine for this type. Called at most once per registry.
    fn create_state_machine() -> Result<StateMachine<Self>, Self::Error>;

    /// Get the shared machine for this type, building it on first use.
    fn state_machine(registry: &MachineRegistry) -> Result<Arc<StateMachine<Self>>, Self::Error> {
        registry.get_or_try_insert_with(Self::create_state_machine)
    }

    /// Put this entity into the machine's initial state.
    fn enter_initial_state(&mut self, registry: &MachineRegistry) -> Result<(), Self::Error> {
        let machine = Self::state_machine(registry)?;
        machine.enter_initial(self)?;
        Ok(())
    }

    /// Dispatch a signal to this entity.
    ///
    /// An entity with no stored state is first moved into the initial state.
    /// Returns whether a transition fired.
    fn send_signal(
        &mut self,
        registry: &MachineRegistry,
        signal: Signal,
    ) -> Result<bool, Self::Error> {
        let machine = Self::state_machine(registry)?;
        if self.current_state().is_empty() {
            machine.enter_initial(self)?;
        }
        Ok(machine.signal(&signal, self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{State, Transition};

    #[derive(Default)]
    struct Review {
        state: String,
        approved: bool,
        initialised: u32,
    }

    impl Entity for Review {
        fn current_state(&self) -> &str {
            &self.state
        }

        fn set_state(&mut self, name: &str) {
            self.state = name.to_string();
        }
    }

    impl Stateful for Review {
        type Error = FsmError;

        fn create_state_machine() -> Result<StateMachine<Self>, FsmError> {
            let mut machine = StateMachine::new();
            machine.add_state(State::initial("pending").entering(|r: &mut Review, _| {
                r.initialised += 1;
                Ok(())
            }))?;
            machine.add_state(State::finite("approved"))?;
            machine.add_transition(
                Transition::new("pending", "approved", "decide").condition(|r: &Review, _| r.approved),
            )?;
            Ok(machine)
        }
    }

    #[derive(Default)]
    struct Orphan {
        state: String,
    }

    impl Entity for Orphan {
        fn current_state(&self) -> &str {
            &self.state
        }

        fn set_state(&mut self, name: &str) {
            self.state = name.to_string();
        }
    }

    impl Stateful for Orphan {
        type Error = FsmError;

        fn create_state_machine() -> Result<StateMachine<Self>, FsmError> {
            let mut machine = StateMachine::new();
            machine.add_state(State::initial("initial"))?;
            machine.add_state(State::finite("completed"))?;
            machine.remove_state("initial");
            Ok(machine)
        }
    }

    #[test]
    fn enter_initial_state_sets_state_and_runs_effect() {
        let registry = MachineRegistry::new();
        let mut review = Review::default();

        review.enter_initial_state(&registry).unwrap();

        assert_eq!(review.current_state(), "pending");
        assert_eq!(review.initialised, 1);
    }

    #[test]
    fn send_signal_initialises_lazily_once() {
        let registry = MachineRegistry::new();
        let mut review = Review::default();

        assert!(!review.send_signal(&registry, Signal::new("decide")).unwrap());
        assert!(!review.send_signal(&registry, Signal::new("decide")).unwrap());
        assert_eq!(review.initialised, 1);

        review.approved = true;
        assert!(review.send_signal(&registry, Signal::new("decide")).unwrap());
        assert_eq!(review.current_state(), "approved");
    }

    #[test]
    fn instances_share_one_machine() {
        let registry = MachineRegistry::new();
        let mut first = Review::default();
        let mut second = Review::default();

        first.enter_initial_state(&registry).unwrap();
        second.enter_initial_state(&registry).unwrap();

        assert_eq!(registry.len(), 1);
        let a = Review::state_machine(&registry).unwrap();
        let b = Review::state_machine(&registry).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn removed_initial_state_fails_to_enter() {
        let registry = MachineRegistry::new();
        let mut orphan = Orphan::default();

        assert!(matches!(
            orphan.enter_initial_state(&registry),
            Err(FsmError::NoInitialState)
        ));
        assert!(matches!(
            orphan.send_signal(&registry, Signal::new("save")),
            Err(FsmError::NoInitialState)
        ));
    }
}
