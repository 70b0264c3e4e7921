//! Task Review Workflow
//!
//! This demo drives a task through an assignment and review workflow.
//!
//! Key concepts:
//! - One machine per entity type, shared through a registry
//! - Guards pick between a success and a failure branch
//! - Transit effects update the task's status
//! - Events raised on the task are mapped to signals
//!
//! Run with: cargo run --example task_workflow

use statewise::core::{CallbackResult, Entity, Signal, State, Transition};
use statewise::events::EventBus;
use statewise::machine::{FsmError, MachineRegistry, StateMachine, Stateful};

#[derive(Default)]
struct Task {
    title: String,
    state: String,
    status: String,
    done: bool,
    valid: bool,
}

impl Entity for Task {
    fn current_state(&self) -> &str {
        &self.state
    }

    fn set_state(&mut self, name: &str) {
        self.state = name.to_string();
    }
}

fn status(task: &mut Task, status: &str) -> CallbackResult {
    println!("  [{}] status: {} -> {}", task.title, task.status, status);
    task.status = status.to_string();
    Ok(())
}

impl Stateful for Task {
    type Error = FsmError;

    fn create_state_machine() -> Result<StateMachine<Self>, FsmError> {
        let mut machine = StateMachine::new();

        machine.add_state(State::initial("initial").entering(|t: &mut Task, _| status(t, "assigning")))?;
        machine.add_state(State::mediate("assigned"))?;
        machine.add_state(State::mediate("implemented"))?;
        machine.add_state(State::mediate("reviewed"))?;
        machine.add_state(State::finite("completed"))?;

        machine.add_transition(
            Transition::new("initial", "assigned", "save")
                .transiting(|t: &mut Task| status(t, "implementation")),
        )?;
        machine.add_transition(
            Transition::new("assigned", "implemented", "save")
                .condition(|t: &Task, _| t.done)
                .transiting(|t: &mut Task| status(t, "review")),
        )?;
        machine.add_transition(
            Transition::new("implemented", "reviewed", "save")
                .condition(|t: &Task, _| t.valid)
                .transiting(|t: &mut Task| status(t, "success")),
        )?;
        machine.add_transition(
            Transition::new("implemented", "assigned", "save")
                .condition(|t: &Task, _| !t.valid)
                .transiting(|t: &mut Task| status(t, "failed")),
        )?;
        machine.add_transition(
            Transition::new("reviewed", "completed", "save")
                .transiting(|t: &mut Task| status(t, "done")),
        )?;

        Ok(machine)
    }
}

fn main() -> Result<(), FsmError> {
    println!("=== Task Review Workflow ===\n");

    let registry = MachineRegistry::new();
    let mut bus = EventBus::new();
    bus.map("task:saved", "save");

    let mut task = Task {
        title: "TASK-42".to_string(),
        ..Task::default()
    };
    task.enter_initial_state(&registry)?;
    println!("Start: {}\n", task.current_state());

    let steps: [(&str, fn(&mut Task)); 6] = [
        ("assign", |_| {}),
        ("finish work", |t| t.done = true),
        ("first review", |_| {}),
        ("resubmit", |_| {}),
        ("approve", |t| t.valid = true),
        ("close", |_| {}),
    ];

    for (label, prepare) in steps {
        prepare(&mut task);
        let fired = task.send_signal(&registry, Signal::new("save"))?;
        println!("Step '{}': fired={} state={}", label, fired, task.current_state());
    }

    println!();
    bus.raise_on("task:saved", &registry, &mut task)?;
    println!("Event on finished task leaves it at: {}", task.current_state());

    println!("\n=== Demo Complete ===");
    Ok(())
}
