//! Actor motion engine shared by the player, pickups, and adversaries.
//!
//! Every actor kind moves on the same lattice and differs only by the
//! [`MotionProfile`] it is evaluated with. The player steers through
//! [`steer`] with wall checks and commitment, while autonomous actors pick
//! a heading at aligned points through [`wander`] and [`drive`] along it
//! until their next decision point.

use munchkin_core::{
    lattice::{self, MotionProfile},
    Axis, Cell, Direction, HeldDirections, Position,
};
use rand::Rng;

use crate::maze::{MazeGrid, Openings};

/// Outcome of one player steering step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Steering {
    /// Position after the step.
    pub position: Position,
    /// Heading that remains committed after the step.
    pub committed: Option<Direction>,
    /// Direction actually travelled, if the player moved.
    pub moved: Option<Direction>,
}

/// Moves by `speed` in `direction` and applies the profile's horizontal wrap.
#[must_use]
pub fn advance(
    profile: &MotionProfile,
    position: Position,
    direction: Direction,
    speed: i32,
) -> Position {
    let moved = position.offset(direction, speed);
    Position::new(profile.wrap.apply(moved.x, direction), moved.y)
}

/// Attempts a manual move with wall checks.
///
/// A move toward a wall is refused once it would carry the actor past the
/// aligned point of its cell, so an actor stops exactly at the boundary
/// rather than skipping over it. Vertical moves are refused outright from
/// cells outside the lattice.
#[must_use]
pub fn drive(
    grid: &MazeGrid,
    profile: &MotionProfile,
    position: Position,
    direction: Direction,
    speed: i32,
) -> Option<Position> {
    let cell = profile.cell_of(position);
    let aligned = profile.aligned_point(cell);
    let passes_boundary = match direction {
        Direction::Left => position.x - speed < aligned.x,
        Direction::Right => position.x + speed > aligned.x,
        Direction::Up => position.y - speed < aligned.y,
        Direction::Down => position.y + speed > aligned.y,
    };
    if passes_boundary && grid.is_wall(cell, direction) {
        return None;
    }
    if direction.axis() == Axis::Vertical && cell.is_outside() {
        return None;
    }
    Some(advance(profile, position, direction, speed))
}

/// Steers the player from held input.
///
/// Held directions are resolved in priority order. A direction across the
/// committed axis is ignored until the commitment clears. Without accepted
/// input the committed heading carries the player to the next aligned point.
#[must_use]
pub fn steer(
    grid: &MazeGrid,
    position: Position,
    committed: Option<Direction>,
    held: HeldDirections,
    speed: i32,
) -> Steering {
    let profile = &lattice::PLAYER;
    let request = held.iter().find(|direction| {
        committed.map_or(true, |current| current.axis() == direction.axis())
    });

    if let Some(direction) = request {
        return match drive(grid, profile, position, direction, speed) {
            Some(next) => Steering {
                position: next,
                committed: Some(direction),
                moved: Some(direction),
            },
            None => Steering {
                position,
                committed,
                moved: None,
            },
        };
    }

    match committed {
        Some(direction) if profile.aligned_along(position, direction) => Steering {
            position,
            committed: None,
            moved: None,
        },
        Some(direction) => Steering {
            position: advance(profile, position, direction, speed),
            committed: Some(direction),
            moved: Some(direction),
        },
        None => Steering {
            position,
            committed: None,
            moved: None,
        },
    }
}

/// Open sides of `cell` as seen by an actor of the given profile.
///
/// Profiles that avoid the center treat the center's four approach
/// segments as closed.
#[must_use]
pub fn openings(grid: &MazeGrid, profile: &MotionProfile, cell: Cell) -> Openings {
    let openings = grid.openings(cell);
    if !profile.avoids_center {
        return openings;
    }
    Direction::ALL.into_iter().fold(openings, |openings, direction| {
        if cell.neighbor(direction) == lattice::CENTER {
            openings.closing(direction)
        } else {
            openings
        }
    })
}

/// Chooses the next heading of an autonomous actor.
///
/// The actor keeps its heading with probability `continue_probability`
/// when that heading is open and a lateral branch exists. Otherwise it
/// takes an open lateral at random, keeps going when no lateral exists,
/// or reverses out of a dead end.
pub fn wander<R>(
    heading: Direction,
    openings: Openings,
    continue_probability: f64,
    rng: &mut R,
) -> Direction
where
    R: Rng + ?Sized,
{
    let ahead = openings.is_open(heading);
    let [first, second] = heading.laterals();
    let lateral = (openings.is_open(first), openings.is_open(second));

    if ahead && (lateral.0 || lateral.1) && rng.gen_bool(continue_probability) {
        return heading;
    }
    match lateral {
        (true, true) => {
            if rng.gen_bool(0.5) {
                first
            } else {
                second
            }
        }
        (true, false) => first,
        (false, true) => second,
        (false, false) if ahead => heading,
        (false, false) => heading.opposite(),
    }
}

#[cfg(test)]
mod tests {
    use munchkin_core::LayoutId;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn maze_one() -> MazeGrid {
        MazeGrid::from_layout(LayoutId::FIRST_MAZE).expect("maze")
    }

    const START: Position = Position::new(480, 345);

    #[test]
    fn steer_commits_to_accepted_direction() {
        let grid = maze_one();

        let step = steer(&grid, START, None, HeldDirections::only(Direction::Right), 5);

        assert_eq!(step.position, Position::new(485, 345));
        assert_eq!(step.committed, Some(Direction::Right));
        assert_eq!(step.moved, Some(Direction::Right));
    }

    #[test]
    fn perpendicular_input_is_ignored_until_aligned() {
        let grid = maze_one();
        let position = Position::new(485, 345);

        let step = steer(
            &grid,
            position,
            Some(Direction::Right),
            HeldDirections::only(Direction::Down),
            5,
        );

        assert_eq!(step.position, Position::new(490, 345));
        assert_eq!(step.committed, Some(Direction::Right));
    }

    #[test]
    fn commitment_glides_to_next_aligned_point_and_clears() {
        let grid = maze_one();
        let mut position = Position::new(485, 345);
        let mut committed = Some(Direction::Right);

        for _ in 0..19 {
            let step = steer(&grid, position, committed, HeldDirections::NONE, 5);
            position = step.position;
            committed = step.committed;
        }
        assert_eq!(position, Position::new(580, 345));
        assert_eq!(committed, Some(Direction::Right));

        let step = steer(&grid, position, committed, HeldDirections::NONE, 5);
        assert_eq!(step.position, position);
        assert_eq!(step.committed, None);
        assert_eq!(step.moved, None);
    }

    #[test]
    fn walls_stop_motion_at_the_aligned_point() {
        let grid = maze_one();

        assert!(grid.is_wall(Cell::new(4, 3), Direction::Down));
        let step = steer(&grid, START, None, HeldDirections::only(Direction::Down), 5);

        assert_eq!(step.position, START);
        assert_eq!(step.moved, None);
        assert_eq!(step.committed, None);
    }

    #[test]
    fn priority_picks_first_accepted_direction() {
        let grid = maze_one();
        let held = HeldDirections::only(Direction::Down).with(Direction::Left);

        let step = steer(&grid, START, Some(Direction::Right), held, 5);

        assert_eq!(step.committed, Some(Direction::Left));
        assert_eq!(step.position, Position::new(475, 345));
    }

    #[test]
    fn tunnel_wraps_and_forbids_vertical_moves() {
        let grid = maze_one();
        let tunnel = Position::new(-20, lattice::PLAYER.aligned_point(Cell::new(0, 4)).y);

        let held = HeldDirections::only(Direction::Left);
        let left = steer(&grid, tunnel, Some(Direction::Left), held, 5);
        assert_eq!(left.position.x, 980);

        assert_eq!(drive(&grid, &lattice::PLAYER, tunnel, Direction::Up, 5), None);
        assert_eq!(drive(&grid, &lattice::PLAYER, tunnel, Direction::Down, 5), None);
    }

    #[test]
    fn pickups_never_choose_the_center() {
        let grid = maze_one();
        let below = openings(&grid, &lattice::PICKUP, Cell::new(4, 5));

        assert!(grid.openings(Cell::new(4, 5)).is_open(Direction::Up));
        assert!(!below.is_open(Direction::Up));
        assert_eq!(
            openings(&grid, &lattice::ADVERSARY, Cell::new(4, 5)),
            grid.openings(Cell::new(4, 5))
        );
    }

    #[test]
    fn wander_reverses_out_of_dead_ends() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let dead_end = Openings::new(false, true, false, false);

        assert_eq!(wander(Direction::Left, dead_end, 0.7, &mut rng), Direction::Right);
    }

    #[test]
    fn wander_follows_the_only_lateral() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let corner = Openings::new(false, false, false, true);

        for _ in 0..32 {
            assert_eq!(wander(Direction::Left, corner, 0.5, &mut rng), Direction::Down);
        }
    }

    #[test]
    fn wander_only_picks_open_directions() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let junction = Openings::new(true, false, true, true);

        for _ in 0..256 {
            let heading = wander(Direction::Left, junction, 0.7, &mut rng);
            assert!(junction.is_open(heading), "picked closed heading {heading:?}");
        }
    }
}
