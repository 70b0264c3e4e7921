//! Property-based tests for machine registry and dispatch invariants.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated machines and signal sequences.

use proptest::prelude::*;
use statewise::core::{Entity, Signal, State, StateKind, Transition};
use statewise::machine::{FsmError, StateMachine};

const NAMES: [&str; 5] = ["a", "b", "c", "d", "e"];
const SIGNALS: [&str; 3] = ["go", "stop", "wait"];

#[derive(Clone, Debug, Default)]
struct Probe {
    state: String,
    flag: bool,
}

impl Entity for Probe {
    fn current_state(&self) -> &str {
        &self.state
    }

    fn set_state(&mut self, name: &str) {
        self.state = name.to_string();
    }
}

prop_compose! {
    fn arbitrary_kind()(variant in 0..3u8) -> StateKind {
        match variant {
            0 => StateKind::Initial,
            1 => StateKind::Mediate,
            _ => StateKind::Finite,
        }
    }
}

prop_compose! {
    fn arbitrary_state()(name in 0..NAMES.len(), kind in arbitrary_kind()) -> (&'static str, StateKind) {
        (NAMES[name], kind)
    }
}

prop_compose! {
    fn arbitrary_edge()(
        from in 0..NAMES.len(),
        to in 0..NAMES.len(),
        signal in 0..SIGNALS.len(),
    ) -> (&'static str, &'static str, &'static str) {
        (NAMES[from], NAMES[to], SIGNALS[signal])
    }
}

fn snapshot(machine: &StateMachine<Probe>) -> Vec<(String, StateKind)> {
    let mut states: Vec<_> = machine
        .states()
        .map(|s| (s.name().to_string(), s.kind()))
        .collect();
    states.sort_by(|a, b| a.0.cmp(&b.0));
    states
}

fn edges(machine: &StateMachine<Probe>) -> Vec<(String, String, String)> {
    machine
        .transitions()
        .iter()
        .map(|t| (t.from().to_string(), t.to().to_string(), t.signal_type().to_string()))
        .collect()
}

/// All five states as mediate, plus every generated edge.
fn mediate_machine(edge_list: &[(&str, &str, &str)]) -> StateMachine<Probe> {
    let mut machine = StateMachine::new();
    for name in NAMES {
        machine.add_state(State::mediate(name)).unwrap();
    }
    for (from, to, signal) in edge_list {
        machine.add_transition(Transition::new(*from, *to, *signal)).unwrap();
    }
    machine
}

proptest! {
    #[test]
    fn at_most_one_initial_state(states in prop::collection::vec(arbitrary_state(), 1..20)) {
        let mut machine = StateMachine::<Probe>::new();

        for (name, kind) in states {
            let before = snapshot(&machine);
            let result = machine.add_state(State::new(name, kind)).map(|_| ());

            if let Err(FsmError::DuplicateInitialState { .. }) = result {
                prop_assert_eq!(snapshot(&machine), before);
            }

            let initials = machine.states().filter(|s| s.is_initial()).count();
            prop_assert!(initials <= 1);
        }
    }

    #[test]
    fn unknown_endpoint_leaves_transitions_unchanged(
        edge_list in prop::collection::vec(arbitrary_edge(), 0..10),
        registered in prop::collection::vec(0..NAMES.len(), 1..NAMES.len()),
    ) {
        let mut machine = StateMachine::<Probe>::new();
        for index in &registered {
            machine.add_state(State::mediate(NAMES[*index])).unwrap();
        }

        for (from, to, signal) in edge_list {
            let before = edges(&machine);
            let result = machine.add_transition(Transition::new(from, to, signal)).map(|_| ());
            let known = machine.has_state(from) && machine.has_state(to);

            prop_assert_eq!(result.is_ok(), known);
            if !known {
                prop_assert_eq!(edges(&machine), before);
            }
        }
    }

    #[test]
    fn remove_state_drops_touching_transitions(
        edge_list in prop::collection::vec(arbitrary_edge(), 0..15),
        victim in 0..NAMES.len(),
    ) {
        let mut machine = mediate_machine(&edge_list);
        let victim = NAMES[victim];

        let expected: Vec<_> = edges(&machine)
            .into_iter()
            .filter(|(from, to, _)| from != victim && to != victim)
            .collect();

        machine.remove_state(victim);

        prop_assert!(!machine.has_state(victim));
        prop_assert_eq!(edges(&machine), expected);
    }

    #[test]
    fn signal_result_matches_state_change(
        edge_list in prop::collection::vec(arbitrary_edge(), 0..15),
        start in 0..NAMES.len(),
        signal in 0..SIGNALS.len(),
    ) {
        let machine = mediate_machine(&edge_list);
        let mut probe = Probe { state: NAMES[start].to_string(), flag: false };
        let signal = Signal::new(SIGNALS[signal]);

        let expected = edge_list
            .iter()
            .find(|(from, _, s)| *from == NAMES[start] && *s == signal.signal_type())
            .map(|(_, to, _)| to.to_string());

        let fired = machine.signal(&signal, &mut probe).unwrap();

        prop_assert_eq!(fired, expected.is_some());
        let expected_state = expected.unwrap_or_else(|| NAMES[start].to_string());
        prop_assert_eq!(probe.state, expected_state);
    }

    #[test]
    fn first_registered_eligible_transition_wins(flag in any::<bool>(), flipped in any::<bool>()) {
        let mut machine = StateMachine::<Probe>::new();
        machine.add_state(State::initial("start")).unwrap();
        machine.add_state(State::mediate("yes")).unwrap();
        machine.add_state(State::mediate("no")).unwrap();

        let when_set = Transition::new("start", "yes", "go").condition(|p: &Probe, _| p.flag);
        let when_clear = Transition::new("start", "no", "go").condition(|p: &Probe, _| !p.flag);
        if flipped {
            machine.add_transition(when_clear).unwrap();
            machine.add_transition(when_set).unwrap();
        } else {
            machine.add_transition(when_set).unwrap();
            machine.add_transition(when_clear).unwrap();
        }
        machine.add_transition(Transition::new("start", "no", "go")).unwrap();

        let mut probe = Probe { flag, ..Probe::default() };
        machine.enter_initial(&mut probe).unwrap();
        prop_assert!(machine.signal(&Signal::new("go"), &mut probe).unwrap());

        prop_assert_eq!(probe.state.as_str(), if flag { "yes" } else { "no" });
    }

    #[test]
    fn finite_source_is_always_rejected(edge in arbitrary_edge()) {
        let (from, to, signal) = edge;
        let mut machine = StateMachine::<Probe>::new();
        machine.add_state(State::mediate(to)).unwrap();
        machine.add_state(State::finite(from)).unwrap();

        let result = machine.add_transition(Transition::new(from, to, signal)).map(|_| ());

        prop_assert!(
            matches!(result, Err(FsmError::TransitionFromFiniteState { .. })),
            "expected finite-source rejection"
        );
        prop_assert!(machine.transitions().is_empty());
    }
}
