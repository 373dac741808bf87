//! Fixed lattice geometry shared by the world, systems, and presentation.
//!
//! Every actor coordinate is an integer in sub-units. The maze picture is
//! 200 by 160 maze pixels and each pixel holds [`SUBUNITS_PER_PIXEL`]
//! sub-units, so the whole playfield spans 1000 by 800 sub-units.

use crate::{Cell, Direction, Position};

/// Number of sub-units that compose a single maze pixel.
pub const SUBUNITS_PER_PIXEL: i32 = 5;

/// Width of the maze picture in maze pixels.
pub const SCREEN_WIDTH_PIXELS: i32 = 200;

/// Height of the maze picture in maze pixels.
pub const SCREEN_HEIGHT_PIXELS: i32 = 160;

/// Number of cell columns in the lattice.
pub const COLUMNS: i32 = 9;

/// Number of cell rows in the lattice.
pub const ROWS: i32 = 7;

/// Horizontal spacing between neighbouring decision points in sub-units.
pub const PITCH_X: i32 = 20 * SUBUNITS_PER_PIXEL;

/// Vertical spacing between neighbouring decision points in sub-units.
pub const PITCH_Y: i32 = 14 * SUBUNITS_PER_PIXEL;

/// Upper-left corner of the maze drawing in sub-units.
pub const MAZE_ORIGIN: Position = Position::new(9 * SUBUNITS_PER_PIXEL, 23 * SUBUNITS_PER_PIXEL);

/// Length of a drawn horizontal wall segment in maze pixels.
pub const HORIZONTAL_SEGMENT_PIXELS: i32 = 22;

/// Length of a drawn vertical wall segment in maze pixels.
pub const VERTICAL_SEGMENT_PIXELS: i32 = 16;

/// Cell whose four walls rotate on rotating layouts.
pub const CENTER: Cell = Cell::new(4, 4);

/// Horizontal re-entry rule applied to an actor leaving the lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Wrap {
    /// Coordinates below this bound wrap while travelling left.
    pub low: i32,
    /// Coordinates above this bound wrap while travelling right.
    pub high: i32,
    /// Coordinate assigned after wrapping out of the left edge.
    pub enter_right: i32,
    /// Coordinate assigned after wrapping out of the right edge.
    pub enter_left: i32,
}

impl Wrap {
    /// Applies the wrap to a horizontal coordinate reached while moving in `direction`.
    #[must_use]
    pub const fn apply(self, x: i32, direction: Direction) -> i32 {
        match direction {
            Direction::Left if x < self.low => self.enter_right,
            Direction::Right if x > self.high => self.enter_left,
            _ => x,
        }
    }
}

/// Capability record describing how an actor kind sits on the lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MotionProfile {
    /// Aligned point of cell (0, 0) for this actor kind.
    pub base: Position,
    /// Horizontal wrap applied when leaving through the tunnel.
    pub wrap: Wrap,
    /// Whether the center cell is treated as closed when choosing directions.
    pub avoids_center: bool,
}

impl MotionProfile {
    /// Cell that owns the provided position.
    ///
    /// Division truncates toward zero, so positions slightly left of the
    /// first aligned point still report column 0.
    #[must_use]
    pub const fn cell_of(&self, position: Position) -> Cell {
        Cell::new(
            (position.x - self.base.x) / PITCH_X,
            (position.y - self.base.y) / PITCH_Y,
        )
    }

    /// Aligned point of the provided cell.
    #[must_use]
    pub const fn aligned_point(&self, cell: Cell) -> Position {
        Position::new(
            self.base.x + cell.column * PITCH_X,
            self.base.y + cell.row * PITCH_Y,
        )
    }

    /// Reports whether the horizontal coordinate sits on a decision point.
    #[must_use]
    pub const fn aligned_x(&self, position: Position) -> bool {
        (position.x - self.base.x) % PITCH_X == 0
    }

    /// Reports whether the vertical coordinate sits on a decision point.
    #[must_use]
    pub const fn aligned_y(&self, position: Position) -> bool {
        (position.y - self.base.y) % PITCH_Y == 0
    }

    /// Reports whether the actor is aligned on both axes.
    #[must_use]
    pub const fn aligned(&self, position: Position) -> bool {
        self.aligned_x(position) && self.aligned_y(position)
    }

    /// Reports whether the actor is aligned on the axis travelled by `direction`.
    #[must_use]
    pub const fn aligned_along(&self, position: Position, direction: Direction) -> bool {
        match direction {
            Direction::Left | Direction::Right => self.aligned_x(position),
            Direction::Up | Direction::Down => self.aligned_y(position),
        }
    }
}

/// Lattice placement used by the player.
pub const PLAYER: MotionProfile = MotionProfile {
    base: Position::new(16 * SUBUNITS_PER_PIXEL, 27 * SUBUNITS_PER_PIXEL),
    wrap: Wrap {
        low: -4 * SUBUNITS_PER_PIXEL,
        high: 196 * SUBUNITS_PER_PIXEL,
        enter_right: 196 * SUBUNITS_PER_PIXEL,
        enter_left: -4 * SUBUNITS_PER_PIXEL,
    },
    avoids_center: false,
};

/// Lattice placement used by adversaries.
pub const ADVERSARY: MotionProfile = MotionProfile {
    base: Position::new(16 * SUBUNITS_PER_PIXEL, 27 * SUBUNITS_PER_PIXEL),
    wrap: Wrap {
        low: -2 * SUBUNITS_PER_PIXEL,
        high: 194 * SUBUNITS_PER_PIXEL,
        enter_right: 194 * SUBUNITS_PER_PIXEL,
        enter_left: -2 * SUBUNITS_PER_PIXEL,
    },
    avoids_center: false,
};

/// Lattice placement used by pickups.
pub const PICKUP: MotionProfile = MotionProfile {
    base: Position::new(18 * SUBUNITS_PER_PIXEL, 30 * SUBUNITS_PER_PIXEL),
    wrap: Wrap {
        low: 2 * SUBUNITS_PER_PIXEL,
        high: 197 * SUBUNITS_PER_PIXEL - 1,
        enter_right: 196 * SUBUNITS_PER_PIXEL,
        enter_left: 2 * SUBUNITS_PER_PIXEL,
    },
    avoids_center: true,
};
