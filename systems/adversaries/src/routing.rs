//! Homing table guiding captured adversaries into the center cell.

use munchkin_core::{
    lattice, Cell,
    Direction::{self, Down as D, Left as L, Right as R, Up as U},
};
use munchkin_world::maze::Openings;

/// One conditional turn of the homing table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Rule {
    heading: Direction,
    closed: &'static [Direction],
    open: Option<Direction>,
    turn: Direction,
}

impl Rule {
    const fn new(
        heading: Direction,
        closed: &'static [Direction],
        open: Option<Direction>,
        turn: Direction,
    ) -> Self {
        Self {
            heading,
            closed,
            open,
            turn,
        }
    }

    fn matches(&self, heading: Direction, openings: Openings) -> bool {
        self.heading == heading
            && self.closed.iter().all(|side| !openings.is_open(*side))
            && self.open.map_or(true, |side| openings.is_open(side))
    }
}

struct Approach {
    cell: Cell,
    toward: Direction,
    rules: [Rule; 9],
}

const APPROACHES: [Approach; 4] = [
    Approach {
        cell: Cell::new(3, 4),
        toward: R,
        rules: [
            Rule::new(U, &[], Some(U), U),
            Rule::new(U, &[U], Some(L), L),
            Rule::new(U, &[U], Some(D), D),
            Rule::new(D, &[], Some(D), D),
            Rule::new(D, &[D], Some(L), L),
            Rule::new(D, &[D, L], None, U),
            Rule::new(R, &[], Some(U), U),
            Rule::new(R, &[U], Some(D), D),
            Rule::new(R, &[U, D], None, L),
        ],
    },
    Approach {
        cell: Cell::new(5, 4),
        toward: L,
        rules: [
            Rule::new(U, &[], Some(U), U),
            Rule::new(U, &[U], Some(R), R),
            Rule::new(U, &[U, R], None, D),
            Rule::new(D, &[], Some(D), D),
            Rule::new(D, &[D], Some(R), R),
            Rule::new(D, &[D, R], None, U),
            Rule::new(L, &[], Some(U), U),
            Rule::new(L, &[U], Some(D), D),
            Rule::new(L, &[U, D], None, R),
        ],
    },
    Approach {
        cell: Cell::new(4, 3),
        toward: D,
        rules: [
            Rule::new(L, &[], Some(L), L),
            Rule::new(L, &[L], Some(U), U),
            Rule::new(L, &[L, U], None, R),
            Rule::new(R, &[], Some(R), R),
            Rule::new(R, &[R], Some(U), U),
            Rule::new(R, &[R, U], None, L),
            Rule::new(D, &[], Some(L), L),
            Rule::new(D, &[L], Some(R), R),
            Rule::new(D, &[L, R], None, U),
        ],
    },
    Approach {
        cell: Cell::new(4, 5),
        toward: U,
        rules: [
            Rule::new(L, &[], Some(L), L),
            Rule::new(L, &[L], Some(D), D),
            Rule::new(L, &[L, D], None, R),
            Rule::new(R, &[], Some(R), R),
            Rule::new(R, &[R], Some(D), D),
            Rule::new(R, &[R, D], None, L),
            Rule::new(U, &[], Some(L), L),
            Rule::new(U, &[L], Some(R), R),
            Rule::new(U, &[L, R], None, D),
        ],
    },
];

/// Heading a captured adversary takes at an approach cell of the center.
///
/// Returns `None` away from the approach cells. The result may still face
/// a wall when the table has no better answer; callers fall back to a
/// random walk in that case.
#[must_use]
pub fn home(cell: Cell, heading: Direction, openings: Openings) -> Option<Direction> {
    let approach = APPROACHES.iter().find(|approach| approach.cell == cell)?;
    debug_assert_eq!(cell.neighbor(approach.toward), lattice::CENTER);
    if openings.is_open(approach.toward) {
        return Some(approach.toward);
    }
    Some(
        approach
            .rules
            .iter()
            .fold(heading, |current, rule| {
                if rule.matches(current, openings) {
                    rule.turn
                } else {
                    current
                }
            }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_center_segment_is_taken_directly() {
        let openings = Openings::new(false, true, false, false);

        assert_eq!(home(Cell::new(3, 4), U, openings), Some(R));
    }

    #[test]
    fn closed_center_routes_around_the_block() {
        let openings = Openings::new(true, false, false, true);

        assert_eq!(home(Cell::new(3, 4), U, openings), Some(L));
        assert_eq!(home(Cell::new(3, 4), R, openings), Some(D));
    }

    #[test]
    fn boxed_in_approach_turns_back() {
        let openings = Openings::new(false, false, true, false);

        assert_eq!(home(Cell::new(3, 4), D, openings), Some(U));
    }

    #[test]
    fn cells_away_from_the_center_are_not_routed() {
        let openings = Openings::new(true, true, true, true);

        assert_eq!(home(Cell::new(0, 0), U, openings), None);
        assert_eq!(home(lattice::CENTER, U, openings), None);
    }
}
