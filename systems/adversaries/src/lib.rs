#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Adversary decision system covering the random walk, homing, and recharge entry.

pub mod routing;

use log::debug;
use munchkin_core::{lattice, AdversarySnapshot, AdversaryStatus, AdversaryView, Command, Phase};
use munchkin_world::{maze::MazeGrid, motion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Salt mixed into the session seed for the adversary stream.
pub const ADVERSARY_SALT: u64 = 0x6768_6f73_7473_2121;

/// Probability of keeping the current heading at a junction.
pub const CONTINUE_PROBABILITY: f64 = 0.5;

/// Configuration parameters required to construct the adversary system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration deriving the adversary stream from `rng_seed`.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

/// Pure system that picks adversary headings at decision points.
#[derive(Debug)]
pub struct Adversaries {
    rng: ChaCha8Rng,
}

impl Adversaries {
    /// Creates a new adversary system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed ^ ADVERSARY_SALT),
        }
    }

    /// Consumes immutable views to emit heading and recharge commands.
    pub fn handle(
        &mut self,
        phase: Phase,
        adversaries: &AdversaryView,
        maze: &MazeGrid,
        out: &mut Vec<Command>,
    ) {
        if !matches!(phase, Phase::Playing | Phase::Cutscene { .. }) {
            return;
        }

        for adversary in adversaries.iter() {
            if adversary.speed == 0
                || matches!(adversary.status, AdversaryStatus::Recharging { .. })
                || !lattice::ADVERSARY.aligned(adversary.position)
            {
                continue;
            }
            self.decide(adversary, maze, out);
        }
    }

    fn decide(&mut self, adversary: &AdversarySnapshot, maze: &MazeGrid, out: &mut Vec<Command>) {
        let cell = lattice::ADVERSARY.cell_of(adversary.position);
        if adversary.status == AdversaryStatus::Captured && cell == lattice::CENTER {
            debug!("adversary {} reached the center", adversary.id.get());
            out.push(Command::RechargeAdversary {
                adversary: adversary.id,
            });
            return;
        }

        let openings = maze.openings(cell);
        let current = adversary.heading.unwrap_or(adversary.facing);
        let routed = match adversary.status {
            AdversaryStatus::Captured => routing::home(cell, current, openings)
                .filter(|heading| openings.is_open(*heading)),
            _ => None,
        };
        let heading = routed.unwrap_or_else(|| {
            motion::wander(current, openings, CONTINUE_PROBABILITY, &mut self.rng)
        });

        if adversary.heading != Some(heading) {
            out.push(Command::HeadAdversary {
                adversary: adversary.id,
                heading,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use munchkin_core::{AdversaryId, Direction, LayoutId, Position};

    use super::*;

    fn snapshot(position: Position, status: AdversaryStatus) -> AdversarySnapshot {
        AdversarySnapshot {
            id: AdversaryId::new(0),
            position,
            heading: Some(Direction::Down),
            facing: Direction::Down,
            speed: 5,
            status,
            colour: 1,
        }
    }

    #[test]
    fn captured_adversary_in_center_recharges() {
        let maze = MazeGrid::from_layout(LayoutId::FIRST_MAZE).expect("maze");
        let view = AdversaryView::from_snapshots(
            vec![snapshot(Position::new(480, 415), AdversaryStatus::Captured)],
            0,
        );
        let mut system = Adversaries::new(Config::new(1));
        let mut out = Vec::new();

        system.handle(Phase::Playing, &view, &maze, &mut out);

        assert_eq!(
            out,
            vec![Command::RechargeAdversary {
                adversary: AdversaryId::new(0)
            }]
        );
    }

    #[test]
    fn adversaries_stay_idle_outside_play() {
        let maze = MazeGrid::from_layout(LayoutId::FIRST_MAZE).expect("maze");
        let view = AdversaryView::from_snapshots(
            vec![snapshot(Position::new(480, 415), AdversaryStatus::Patrol)],
            0,
        );
        let mut system = Adversaries::new(Config::new(1));
        let mut out = Vec::new();

        system.handle(Phase::Title, &view, &maze, &mut out);
        system.handle(Phase::Dying { step: 3 }, &view, &maze, &mut out);

        assert!(out.is_empty());
    }
}
