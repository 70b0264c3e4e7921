//! Caller-owned cache of one shared machine per entity type.

use crate::core::Entity;
use crate::machine::state_machine::StateMachine;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

type SharedMachine = Arc<dyn Any + Send + Sync>;

/// Maps an entity type to the machine shared by all its instances.
///
/// Machines are built at most once per type and handed out as
/// `Arc<StateMachine<E>>`. The registry itself is cheap to share and safe to
/// use from several threads.
///
/// # Example
///
/// ```rust
/// use statewise::core::{Entity, State};
/// use statewise::machine::{FsmError, MachineRegistry, StateMachine};
///
/// struct Invoice {
///     state: String,
/// }
///
/// impl Entity for Invoice {
///     fn current_state(&self) -> &str {
///         &self.state
///     }
///
///     fn set_state(&mut self, name: &str) {
///         self.state = name.to_string();
///     }
/// }
///
/// let registry = MachineRegistry::new();
/// let machine = registry
///     .get_or_try_insert_with(|| {
///         let mut machine = StateMachine::<Invoice>::new();
///         machine.add_state(State::initial("draft"))?;
///         Ok::<_, FsmError>(machine)
///     })
///     .unwrap();
///
/// assert!(registry.contains::<Invoice>());
/// assert_eq!(machine.get_initial_state().unwrap().name(), "draft");
/// ```
#[derive(Default)]
pub struct MachineRegistry {
    machines: RwLock<HashMap<TypeId, SharedMachine>>,
}

impl MachineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the machine for `E`, replacing any previous one.
    pub fn insert<E: Entity + 'static>(&self, machine: StateMachine<E>) -> Arc<StateMachine<E>> {
        let machine = Arc::new(machine);
        self.machines
            .write()
            .insert(TypeId::of::<E>(), machine.clone() as SharedMachine);
        machine
    }

    /// Get the machine registered for `E`.
    pub fn get<E: Entity + 'static>(&self) -> Option<Arc<StateMachine<E>>> {
        let shared = self.machines.read().get(&TypeId::of::<E>()).cloned()?;
        shared.downcast::<StateMachine<E>>().ok()
    }

    /// Get the machine for `E`, building it with `build` on first use.
    ///
    /// `build` runs without the registry lock held. If two callers race,
    /// the first machine stored wins and the other build is discarded.
    pub fn get_or_try_insert_with<E, Err, F>(&self, build: F) -> Result<Arc<StateMachine<E>>, Err>
    where
        E: Entity + 'static,
        F: FnOnce() -> Result<StateMachine<E>, Err>,
    {
        if let Some(machine) = self.get::<E>() {
            return Ok(machine);
        }

        let built: SharedMachine = Arc::new(build()?);
        let shared = self
            .machines
            .write()
            .entry(TypeId::of::<E>())
            .or_insert(built)
            .clone();
        debug!(entity = std::any::type_name::<E>(), "Registered state machine");

        Ok(shared
            .downcast::<StateMachine<E>>()
            .unwrap_or_else(|_| unreachable!("registry entries are keyed by their entity type")))
    }

    /// Remove the machine registered for `E`.
    pub fn remove<E: Entity + 'static>(&self) -> Option<Arc<StateMachine<E>>> {
        let shared = self.machines.write().remove(&TypeId::of::<E>())?;
        shared.downcast::<StateMachine<E>>().ok()
    }

    pub fn contains<E: Entity + 'static>(&self) -> bool {
        self.machines.read().contains_key(&TypeId::of::<E>())
    }

    pub fn len(&self) -> usize {
        self.machines.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.machines.read().is_empty()
    }
}

impl fmt::Debug for MachineRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MachineRegistry")
            .field("machines", &self.len())
            .finish()
    }
}
