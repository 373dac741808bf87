use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use munchkin_core::{Event, Settings};
use munchkin_system_session::{AutoPilot, Simulation};

const FRAMES: usize = 3_000;

fn replay(seed: u64) -> Vec<Event> {
    let settings = Settings {
        pickups: 20,
        adversaries: 6,
        seed,
        ..Settings::default()
    };
    let mut simulation = Simulation::new(settings).expect("simulation");
    let mut pilot = AutoPilot::new(seed);
    let mut log = Vec::new();
    for _ in 0..FRAMES {
        let input = pilot.input(simulation.session());
        log.extend(simulation.step(&input));
    }
    log
}

fn fingerprint(log: &[Event]) -> u64 {
    let mut hasher = DefaultHasher::new();
    log.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn equal_seeds_replay_identically() {
    let first = replay(0x5eed);
    let second = replay(0x5eed);

    assert_eq!(first.len(), second.len());
    assert_eq!(first, second);
    assert_eq!(fingerprint(&first), fingerprint(&second));
}

#[test]
fn different_seeds_diverge() {
    let first = replay(1);
    let second = replay(2);

    assert_ne!(fingerprint(&first), fingerprint(&second));
}

#[test]
fn autopilot_session_interacts_with_the_maze() {
    let log = replay(42);

    assert!(log
        .iter()
        .any(|event| matches!(event, Event::PickupConsumed { .. })));
    assert!(log
        .iter()
        .any(|event| matches!(event, Event::CenterRotated { .. })));
    assert!(log
        .iter()
        .any(|event| matches!(event, Event::PlayerMoved { .. })));
}
