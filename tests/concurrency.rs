//! One frozen machine shared by many entities across concurrent tasks.

use statewise::core::{Entity, Signal, State, Transition};
use statewise::machine::{FsmError, MachineRegistry, StateMachine, Stateful};
use std::sync::Arc;

#[derive(Default)]
struct Order {
    id: usize,
    state: String,
    paid: bool,
}

impl Entity for Order {
    fn current_state(&self) -> &str {
        &self.state
    }

    fn set_state(&mut self, name: &str) {
        self.state = name.to_string();
    }
}

impl Stateful for Order {
    type Error = FsmError;

    fn create_state_machine() -> Result<StateMachine<Self>, FsmError> {
        let mut machine = StateMachine::new();
        machine.add_state(State::initial("placed"))?;
        machine.add_state(State::mediate("paid"))?;
        machine.add_state(State::finite("shipped"))?;
        machine.add_state(State::finite("cancelled"))?;

        machine.add_transition(
            Transition::new("placed", "paid", "checkout").condition(|o: &Order, _| o.paid),
        )?;
        machine.add_transition(Transition::new("placed", "cancelled", "checkout"))?;
        machine.add_transition(Transition::new("paid", "shipped", "ship"))?;
        Ok(machine)
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn shared_machine_drives_independent_entities() {
    let registry = Arc::new(MachineRegistry::new());

    let handles: Vec<_> = (0..32)
        .map(|id| {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move {
                let mut order = Order {
                    id,
                    paid: id % 2 == 0,
                    ..Order::default()
                };
                order
                    .send_signal(&registry, Signal::new("checkout"))
                    .unwrap();
                order.send_signal(&registry, Signal::new("ship")).unwrap();
                order
            })
        })
        .collect();

    for handle in handles {
        let order = handle.await.unwrap();
        let expected = if order.id % 2 == 0 { "shipped" } else { "cancelled" };
        assert_eq!(order.current_state(), expected);
    }

    assert_eq!(registry.len(), 1);
}

#[tokio::test]
async fn machine_is_usable_from_spawned_tasks() {
    let machine = Arc::new(Order::create_state_machine().unwrap());

    let task_machine = Arc::clone(&machine);
    let order = tokio::spawn(async move {
        let mut order = Order {
            paid: true,
            ..Order::default()
        };
        task_machine.enter_initial(&mut order).unwrap();
        task_machine
            .signal(&Signal::new("checkout"), &mut order)
            .unwrap();
        order
    })
    .await
    .unwrap();

    assert_eq!(order.current_state(), "paid");
    assert_eq!(machine.available_transitions(&order).count(), 1);
}
