//! Maze grid built from the fixed layout catalog.

use munchkin_core::{lattice, Cell, Direction, LayoutId, Segment};
use thiserror::Error;

/// Number of horizontal wall lines, including both borders.
pub const HORIZONTAL_LINES: usize = 8;

/// Number of rows of vertical wall segments.
pub const VERTICAL_ROWS: usize = 7;

/// Segments on each horizontal line.
pub const HORIZONTAL_SEGMENTS: usize = 9;

/// Segments on each vertical row, including both borders.
pub const VERTICAL_SEGMENTS: usize = 10;

const CENTER_UP: Segment = Segment::Horizontal { row: 4, column: 4 };
const CENTER_DOWN: Segment = Segment::Horizontal { row: 5, column: 4 };
const CENTER_LEFT: Segment = Segment::Vertical { row: 4, column: 4 };
const CENTER_RIGHT: Segment = Segment::Vertical { row: 4, column: 5 };

/// Errors raised while parsing layout strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// The layout identifier has no catalog entry.
    #[error("layout {0} is not part of the catalog")]
    UnknownLayout(u8),
    /// The wrong number of horizontal lines was supplied.
    #[error("expected {HORIZONTAL_LINES} horizontal lines, found {found}")]
    HorizontalLineCount {
        /// Number of lines supplied.
        found: usize,
    },
    /// The wrong number of vertical rows was supplied.
    #[error("expected {VERTICAL_ROWS} vertical rows, found {found}")]
    VerticalRowCount {
        /// Number of rows supplied.
        found: usize,
    },
    /// A line did not contain the expected number of segments.
    #[error("line {line} holds {found} segments, expected {expected}")]
    SegmentCount {
        /// Offending line index.
        line: usize,
        /// Segments expected on the line.
        expected: usize,
        /// Segments supplied.
        found: usize,
    },
    /// A line contained a character that is neither a wall nor a gap.
    #[error("line {line} contains unexpected character {character:?}")]
    UnexpectedCharacter {
        /// Offending line index.
        line: usize,
        /// Character found.
        character: char,
    },
}

/// Open flags for the four sides of a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Openings {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
}

impl Openings {
    /// Creates an opening set from explicit flags.
    #[must_use]
    pub const fn new(left: bool, right: bool, up: bool, down: bool) -> Self {
        Self {
            left,
            right,
            up,
            down,
        }
    }

    /// Reports whether the side in `direction` is open.
    #[must_use]
    pub const fn is_open(&self, direction: Direction) -> bool {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
            Direction::Up => self.up,
            Direction::Down => self.down,
        }
    }

    /// Returns a copy with the side in `direction` closed.
    #[must_use]
    pub const fn closing(self, direction: Direction) -> Self {
        let mut openings = self;
        match direction {
            Direction::Left => openings.left = false,
            Direction::Right => openings.right = false,
            Direction::Up => openings.up = false,
            Direction::Down => openings.down = false,
        }
        openings
    }

    /// Number of open sides.
    #[must_use]
    pub fn count(&self) -> usize {
        Direction::ALL
            .into_iter()
            .filter(|direction| self.is_open(*direction))
            .count()
    }
}

/// Wall segments of the active layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeGrid {
    horizontal: [[bool; HORIZONTAL_SEGMENTS]; HORIZONTAL_LINES],
    vertical: [[bool; VERTICAL_SEGMENTS]; VERTICAL_ROWS],
    rotates: bool,
}

impl MazeGrid {
    /// Builds the grid of a catalog layout.
    pub fn from_layout(layout: LayoutId) -> Result<Self, LayoutError> {
        let strings = catalog(layout)?;
        let mut grid = Self::parse(&strings.horizontal, &strings.vertical, layout.rotates())?;
        if grid.rotates {
            grid.open_center(Direction::Down);
        }
        Ok(grid)
    }

    /// Parses layout strings where `x` marks horizontal walls and `|` vertical walls.
    pub fn parse(
        horizontal: &[&str],
        vertical: &[&str],
        rotates: bool,
    ) -> Result<Self, LayoutError> {
        if horizontal.len() != HORIZONTAL_LINES {
            return Err(LayoutError::HorizontalLineCount {
                found: horizontal.len(),
            });
        }
        if vertical.len() != VERTICAL_ROWS {
            return Err(LayoutError::VerticalRowCount {
                found: vertical.len(),
            });
        }

        let mut grid = Self {
            horizontal: [[false; HORIZONTAL_SEGMENTS]; HORIZONTAL_LINES],
            vertical: [[false; VERTICAL_SEGMENTS]; VERTICAL_ROWS],
            rotates,
        };
        for (line, text) in horizontal.iter().enumerate() {
            parse_line(text, line, 'x', &mut grid.horizontal[line])?;
        }
        for (line, text) in vertical.iter().enumerate() {
            parse_line(text, line, '|', &mut grid.vertical[line])?;
        }
        Ok(grid)
    }

    /// Reports whether the center opening rotates on this layout.
    #[must_use]
    pub const fn rotates(&self) -> bool {
        self.rotates
    }

    /// Reports whether a wall separates `cell` from its neighbour in `direction`.
    ///
    /// Vertical segments beyond the lattice are open so the tunnel row can
    /// wrap. Horizontal segments beyond the lattice are closed, which keeps
    /// actors inside the tunnel from leaving it vertically.
    #[must_use]
    pub fn is_wall(&self, cell: Cell, direction: Direction) -> bool {
        match direction {
            Direction::Left => self.vertical_at(cell.row, cell.column).unwrap_or(false),
            Direction::Right => self
                .vertical_at(cell.row, cell.column + 1)
                .unwrap_or(false),
            Direction::Up => self.horizontal_at(cell.row, cell.column).unwrap_or(true),
            Direction::Down => self
                .horizontal_at(cell.row + 1, cell.column)
                .unwrap_or(true),
        }
    }

    /// Open sides of `cell`.
    #[must_use]
    pub fn openings(&self, cell: Cell) -> Openings {
        Openings::new(
            !self.is_wall(cell, Direction::Left),
            !self.is_wall(cell, Direction::Right),
            !self.is_wall(cell, Direction::Up),
            !self.is_wall(cell, Direction::Down),
        )
    }

    /// Reports whether the provided segment is a wall.
    #[must_use]
    pub fn segment(&self, segment: Segment) -> bool {
        match segment {
            Segment::Horizontal { row, column } => self
                .horizontal
                .get(row)
                .and_then(|line| line.get(column))
                .copied()
                .unwrap_or(true),
            Segment::Vertical { row, column } => self
                .vertical
                .get(row)
                .and_then(|line| line.get(column))
                .copied()
                .unwrap_or(false),
        }
    }

    /// Opens or closes a segment, returning whether it changed.
    pub fn set_segment(&mut self, segment: Segment, wall: bool) -> bool {
        let slot = match segment {
            Segment::Horizontal { row, column } => self
                .horizontal
                .get_mut(row)
                .and_then(|line| line.get_mut(column)),
            Segment::Vertical { row, column } => self
                .vertical
                .get_mut(row)
                .and_then(|line| line.get_mut(column)),
        };
        match slot {
            Some(value) if *value != wall => {
                *value = wall;
                true
            }
            _ => false,
        }
    }

    /// Direction of the open center segment, if exactly one is open.
    #[must_use]
    pub fn center_opening(&self) -> Option<Direction> {
        let mut open = Direction::ALL
            .into_iter()
            .filter(|direction| !self.segment(center_segment(*direction)));
        match (open.next(), open.next()) {
            (Some(direction), None) => Some(direction),
            _ => None,
        }
    }

    /// Advances the center opening one step: down, left, up, right, down.
    pub fn rotate_center(&mut self) -> Direction {
        let next = match self.center_opening() {
            Some(Direction::Down) => Direction::Left,
            Some(Direction::Left) => Direction::Up,
            Some(Direction::Up) => Direction::Right,
            Some(Direction::Right) | None => Direction::Down,
        };
        self.open_center(next);
        next
    }

    fn open_center(&mut self, opening: Direction) {
        for direction in Direction::ALL {
            let _ = self.set_segment(center_segment(direction), direction != opening);
        }
    }

    /// Horizontal wall segments as `(line, column)` pairs.
    pub fn horizontal_walls(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        walls(&self.horizontal)
    }

    /// Vertical wall segments as `(row, line)` pairs.
    pub fn vertical_walls(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        walls(&self.vertical)
    }

    fn horizontal_at(&self, line: i32, column: i32) -> Option<bool> {
        let line = usize::try_from(line).ok()?;
        let column = usize::try_from(column).ok()?;
        self.horizontal.get(line)?.get(column).copied()
    }

    fn vertical_at(&self, row: i32, line: i32) -> Option<bool> {
        let row = usize::try_from(row).ok()?;
        let line = usize::try_from(line).ok()?;
        self.vertical.get(row)?.get(line).copied()
    }
}

const fn center_segment(direction: Direction) -> Segment {
    match direction {
        Direction::Up => CENTER_UP,
        Direction::Down => CENTER_DOWN,
        Direction::Left => CENTER_LEFT,
        Direction::Right => CENTER_RIGHT,
    }
}

fn walls<const N: usize>(lines: &[[bool; N]]) -> impl Iterator<Item = (usize, usize)> + '_ {
    lines.iter().enumerate().flat_map(|(line, segments)| {
        segments
            .iter()
            .enumerate()
            .filter(|(_, wall)| **wall)
            .map(move |(index, _)| (line, index))
    })
}

fn parse_line(text: &str, line: usize, wall: char, out: &mut [bool]) -> Result<(), LayoutError> {
    let found = text.chars().count();
    if found != out.len() {
        return Err(LayoutError::SegmentCount {
            line,
            expected: out.len(),
            found,
        });
    }
    for (slot, character) in out.iter_mut().zip(text.chars()) {
        *slot = match character {
            '-' => false,
            c if c == wall => true,
            character => return Err(LayoutError::UnexpectedCharacter { line, character }),
        };
    }
    Ok(())
}

struct LayoutStrings {
    horizontal: [&'static str; HORIZONTAL_LINES],
    vertical: [&'static str; VERTICAL_ROWS],
}

const MAZE_ONE: LayoutStrings = LayoutStrings {
    horizontal: [
        "xxxxxxxxx",
        "-x---x-x-",
        "----xx---",
        "--x---x--",
        "x---x---x",
        "x-------x",
        "-x--x-xx-",
        "xxxxxxxxx",
    ],
    vertical: [
        "|---|----|",
        "|--|-----|",
        "|||--|-|||",
        "|-|----|-|",
        "---||||---",
        "|-|----|-|",
        "|--|-|---|",
    ],
};

const MAZE_TWO: LayoutStrings = LayoutStrings {
    horizontal: [
        "xxxxxxxxx",
        "-x---x-x-",
        "-x-x--x-x",
        "x--x-x-x-",
        "x-x-x-x-x",
        "x-x---x-x",
        "---xxx-x-",
        "xxxxxxxxx",
    ],
    vertical: [
        "|-|-|-|--|",
        "|--|-|---|",
        "|-|---|--|",
        "|--|---|-|",
        "----||----",
        "||-|--|--|",
        "|-|----|-|",
    ],
};

const MAZE_THREE: LayoutStrings = LayoutStrings {
    horizontal: [
        "xxxxxxxxx",
        "--x--x---",
        "-------x-",
        "----x----",
        "x---x-x-x",
        "x-------x",
        "-----x-x-",
        "xxxxxxxxx",
    ],
    vertical: [
        "|-|-|--|-|",
        "||--|-|-||",
        "|-||-||-||",
        "||-|---|-|",
        "--|-||-|--",
        "|-|||-|--|",
        "||-|--|--|",
    ],
};

const MAZE_FOUR: LayoutStrings = LayoutStrings {
    horizontal: [
        "xxxxxxxxx",
        "-xxx--x-x",
        "--x-x----",
        "-x---x---",
        "x-xxx-xxx",
        "xx---x--x",
        "-x---x-x-",
        "xxxxxxxxx",
    ],
    vertical: [
        "||---|---|",
        "|----|-|-|",
        "||-|-||-||",
        "|---||-|-|",
        "----|||---",
        "|--||--|-|",
        "|---|----|",
    ],
};

const CHASE_ROOM: LayoutStrings = LayoutStrings {
    horizontal: [
        "---------",
        "---------",
        "---------",
        "---------",
        "---------",
        "---------",
        "-xxxxxxx-",
        "xxxxxxxxx",
    ],
    vertical: [
        "||------||",
        "||------||",
        "||------||",
        "||------||",
        "||------||",
        "||------||",
        "|--------|",
    ],
};

const HUNT_ROOM: LayoutStrings = LayoutStrings {
    horizontal: [
        "xxxxxxxxx",
        "xxxxxxxxx",
        "xxxxxxxxx",
        "xxxxxxxxx",
        "xxxxxxxxx",
        "xxxxxxxxx",
        "xxxxxxxxx",
        "xxxxxxxxx",
    ],
    vertical: [
        "----------",
        "----------",
        "----------",
        "----------",
        "----------",
        "----------",
        "----------",
    ],
};

fn catalog(layout: LayoutId) -> Result<&'static LayoutStrings, LayoutError> {
    match layout.get() {
        1 => Ok(&MAZE_ONE),
        2 => Ok(&MAZE_TWO),
        3 => Ok(&MAZE_THREE),
        4 => Ok(&MAZE_FOUR),
        5 => Ok(&CHASE_ROOM),
        6 => Ok(&HUNT_ROOM),
        other => Err(LayoutError::UnknownLayout(other)),
    }
}

/// Door segment below the center column of the chase room.
pub const CHASE_DOOR: Segment = Segment::Horizontal {
    row: 6,
    column: (lattice::COLUMNS / 2) as usize,
};
