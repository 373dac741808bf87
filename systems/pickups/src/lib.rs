#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pickup behaviour system choosing headings and speeds for wandering pickups.

use munchkin_core::{lattice, Command, Event, Phase, PickupSnapshot, PickupView};
use munchkin_world::{maze::MazeGrid, motion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Salt mixed into the session seed for the pickup stream.
pub const PICKUP_SALT: u64 = 0x7069_636b_7570_7321;

/// Probability of keeping the current heading at a junction.
pub const CONTINUE_PROBABILITY: f64 = 0.7;

/// Step size taken by pickups once the board thins out.
pub const THINNED_SPEED: i32 = 2;

/// Configuration parameters required to construct the pickup system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration deriving the pickup stream from `rng_seed`.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

/// Pure system that steers pickups at their decision points.
#[derive(Debug)]
pub struct Pickups {
    rng: ChaCha8Rng,
    last_boosted: bool,
}

impl Pickups {
    /// Creates a new pickup system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed ^ PICKUP_SALT),
            last_boosted: false,
        }
    }

    /// Consumes events and immutable views to emit pickup commands.
    ///
    /// Speed rules run before the heading choice so a pickup that is
    /// boosted at a decision point leaves it at the new speed.
    pub fn handle(
        &mut self,
        events: &[Event],
        phase: Phase,
        pickups: &PickupView,
        maze: &MazeGrid,
        player_speed: i32,
        out: &mut Vec<Command>,
    ) {
        if events
            .iter()
            .any(|event| matches!(event, Event::LevelLoaded { .. }))
        {
            self.last_boosted = false;
        }

        if phase != Phase::Playing {
            return;
        }

        let active = pickups.active_count();
        let thinned = active >= 2 && active * 2 < pickups.initial();

        for pickup in pickups
            .active()
            .filter(|pickup| lattice::PICKUP.aligned(pickup.position))
        {
            if thinned && pickup.speed != THINNED_SPEED {
                out.push(Command::SetPickupSpeed {
                    pickup: pickup.id,
                    speed: THINNED_SPEED,
                });
            }
            if active == 1 && !self.last_boosted {
                self.last_boosted = true;
                out.push(Command::SetPickupSpeed {
                    pickup: pickup.id,
                    speed: player_speed,
                });
            }
            self.steer(pickup, maze, out);
        }
    }

    fn steer(&mut self, pickup: &PickupSnapshot, maze: &MazeGrid, out: &mut Vec<Command>) {
        let cell = lattice::PICKUP.cell_of(pickup.position);
        let openings = motion::openings(maze, &lattice::PICKUP, cell);
        let heading = motion::wander(pickup.heading, openings, CONTINUE_PROBABILITY, &mut self.rng);
        if heading != pickup.heading {
            out.push(Command::HeadPickup {
                pickup: pickup.id,
                heading,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use munchkin_core::{Direction, LayoutId, PickupId, PickupStatus, Position};

    use super::*;

    fn snapshot(id: u32, position: Position, status: PickupStatus) -> PickupSnapshot {
        PickupSnapshot {
            id: PickupId::new(id),
            position,
            heading: Direction::Right,
            speed: 1,
            status,
        }
    }

    #[test]
    fn misaligned_pickups_are_left_alone() {
        let maze = MazeGrid::from_layout(LayoutId::FIRST_MAZE).expect("maze");
        let view = PickupView::from_snapshots(
            vec![snapshot(0, Position::new(91, 150), PickupStatus::Normal)],
            12,
        );
        let mut system = Pickups::new(Config::new(5));
        let mut out = Vec::new();

        system.handle(&[], Phase::Playing, &view, &maze, 5, &mut out);

        assert!(out.is_empty());
    }

    #[test]
    fn last_pickup_is_boosted_only_once_per_level() {
        let maze = MazeGrid::from_layout(LayoutId::FIRST_MAZE).expect("maze");
        let view = PickupView::from_snapshots(
            vec![
                snapshot(0, Position::new(90, 150), PickupStatus::Normal),
                snapshot(1, Position::new(190, 150), PickupStatus::Inactive),
            ],
            2,
        );
        let mut system = Pickups::new(Config::new(5));
        let boosts = |out: &[Command]| {
            out.iter()
                .filter(|command| matches!(command, Command::SetPickupSpeed { speed: 10, .. }))
                .count()
        };

        let mut out = Vec::new();
        system.handle(&[], Phase::Playing, &view, &maze, 10, &mut out);
        system.handle(&[], Phase::Playing, &view, &maze, 10, &mut out);
        assert_eq!(boosts(&out), 1);

        let loaded = [Event::LevelLoaded {
            layout: LayoutId::FIRST_MAZE,
            pickups: 2,
            adversaries: 1,
        }];
        system.handle(&loaded, Phase::Playing, &view, &maze, 10, &mut out);
        assert_eq!(boosts(&out), 2);
    }
}
