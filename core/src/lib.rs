#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Munchkin arcade simulation.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative game session, and pure systems. The frame driver submits
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! for systems to react to deterministically. Systems read immutable
//! snapshots and respond exclusively with new command batches.

pub mod lattice;
mod menu;

use serde::{Deserialize, Serialize};

pub use menu::{
    MenuRow, Settings, TitleMenu, ARCADE_ADVERSARIES, ARCADE_PICKUPS, MAX_ADVERSARIES,
    MAX_PICKUPS, MIN_ADVERSARIES, MIN_PICKUPS,
};

/// Title used by windows presenting the simulation.
pub const WINDOW_TITLE: &str = "KC Munchkin";

/// Number of slots in the high-score name buffer.
pub const NAME_LENGTH: usize = 6;

/// Frames between rotations of the center cell opening.
pub const CENTER_ROTATION_PERIOD: u64 = 45;

/// Frames between steps of the death animation.
pub const DEATH_STEP_PERIOD: u64 = 7;

/// Death animation step at which the sequence ends.
pub const DEATH_FINAL_STEP: u8 = 25;

/// Frames the vulnerable state lasts after a power pickup.
pub const VULNERABILITY_FRAMES: u16 = 180;

/// Frames a captured adversary rests in the center before patrolling again.
pub const RECHARGE_FRAMES: u16 = 200;

/// Frames the level-complete flash runs before the next level loads.
pub const COMPLETION_FRAMES: u32 = 75;

/// Points awarded for capturing a vulnerable adversary.
pub const CAPTURE_POINTS: u32 = 10;

/// Cardinal direction of travel on the lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Toward decreasing x.
    Left,
    /// Toward increasing x.
    Right,
    /// Toward decreasing y.
    Up,
    /// Toward increasing y.
    Down,
}

impl Direction {
    /// All directions in the order held input is resolved.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Opposite direction on the same axis.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    /// Axis travelled along by this direction.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis::Horizontal,
            Self::Up | Self::Down => Axis::Vertical,
        }
    }

    /// The two directions perpendicular to this one, in decision order.
    #[must_use]
    pub const fn laterals(self) -> [Direction; 2] {
        match self.axis() {
            Axis::Horizontal => [Self::Up, Self::Down],
            Axis::Vertical => [Self::Left, Self::Right],
        }
    }

    /// Unit step along each axis.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::Up => (0, -1),
            Self::Down => (0, 1),
        }
    }
}

/// Axis of travel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Left and right.
    Horizontal,
    /// Up and down.
    Vertical,
}

/// Actor coordinate expressed in sub-units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Position {
    /// Creates a new position from sub-unit coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the position moved `distance` sub-units toward `direction`.
    #[must_use]
    pub const fn offset(self, direction: Direction, distance: i32) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx * distance,
            y: self.y + dy * distance,
        }
    }
}

/// Lattice cell index. Columns -1 and 9 only occur inside the tunnel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    /// Zero-based column.
    pub column: i32,
    /// Zero-based row.
    pub row: i32,
}

impl Cell {
    /// Creates a new cell index.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Neighbouring cell in the provided direction.
    #[must_use]
    pub const fn neighbor(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            column: self.column + dx,
            row: self.row + dy,
        }
    }

    /// Reports whether the column lies outside the lattice.
    #[must_use]
    pub const fn is_outside(self) -> bool {
        self.column < 0 || self.column >= lattice::COLUMNS
    }
}

/// Identifies a single wall segment of the maze grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Segment {
    /// Segment on horizontal line `row` spanning cell `column`.
    Horizontal {
        /// Horizontal line index, 0 is the top border.
        row: usize,
        /// Cell column spanned by the segment.
        column: usize,
    },
    /// Segment on vertical line `column` spanning cell row `row`.
    Vertical {
        /// Cell row spanned by the segment.
        row: usize,
        /// Vertical line index, 0 is the left border.
        column: usize,
    },
}

/// Selects one entry of the maze layout catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayoutId(u8);

impl LayoutId {
    /// First rotating maze.
    pub const FIRST_MAZE: Self = Self(1);
    /// Number of rotating mazes in the catalog.
    pub const MAZE_COUNT: u8 = 4;
    /// Open room used by the first cutscene.
    pub const CHASE_ROOM: Self = Self(5);
    /// Corridor room used by the second cutscene.
    pub const HUNT_ROOM: Self = Self(6);

    /// Creates a new layout identifier.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Reports whether this layout is one of the playable rotating mazes.
    #[must_use]
    pub const fn is_maze(&self) -> bool {
        self.0 >= 1 && self.0 <= Self::MAZE_COUNT
    }

    /// Reports whether the center cell rotates on this layout.
    #[must_use]
    pub const fn rotates(&self) -> bool {
        self.is_maze()
    }

    /// Steps forward or backward through the playable mazes, wrapping around.
    #[must_use]
    pub const fn cycle_maze(self, step: i8) -> Self {
        let count = Self::MAZE_COUNT as i16;
        let index = (self.0 as i16 - 1 + step as i16).rem_euclid(count);
        Self(index as u8 + 1)
    }
}

/// Unique identifier assigned to a pickup within a level.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct PickupId(u32);

impl PickupId {
    /// Creates a new pickup identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an adversary within a level.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct AdversaryId(u32);

impl AdversaryId {
    /// Creates a new adversary identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Status of a pickup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupStatus {
    /// Already consumed.
    Inactive,
    /// Worth one point.
    Normal,
    /// Worth three points and frightens the adversaries.
    Power,
}

impl PickupStatus {
    /// Reports whether the pickup is still on the board.
    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Inactive)
    }

    /// Points awarded for consuming a pickup with this status.
    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            Self::Inactive => 0,
            Self::Normal => 1,
            Self::Power => 3,
        }
    }
}

/// Behavioural mode of an adversary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdversaryStatus {
    /// Wanders the maze and is fatal to the player.
    Patrol,
    /// Wanders the maze and may be captured by the player.
    Vulnerable,
    /// Homes toward the center cell.
    Captured,
    /// Rests motionless in the center cell.
    Recharging {
        /// Frames left before patrolling resumes.
        remaining: u16,
    },
}

impl AdversaryStatus {
    /// Reports whether the adversary interacts with the player on overlap.
    #[must_use]
    pub const fn is_roaming(self) -> bool {
        matches!(self, Self::Patrol | Self::Vulnerable)
    }
}

/// Scripted non-interactive sequence inserted between arcade levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Act {
    /// Adversaries chase the player across an open room.
    Chase,
    /// The player turns the tables on a column of adversaries.
    Hunt,
}

/// Top-level state of the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Option menu shown before play.
    Title,
    /// Interactive level play.
    Playing,
    /// All pickups consumed; the maze flashes before the next level.
    LevelComplete {
        /// Frames left in the completion flash.
        remaining: u32,
    },
    /// The player was caught and the death animation runs.
    Dying {
        /// Current animation step, starting at 1.
        step: u8,
    },
    /// The player types a name for the broken high score.
    NameEntry {
        /// Next slot of the name buffer to be written.
        cursor: u8,
    },
    /// A scripted sequence plays.
    Cutscene {
        /// Sequence being played.
        act: Act,
        /// Frames since the sequence started.
        elapsed: u32,
    },
}

/// Categorised sound trigger emitted alongside gameplay events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// The player moved this frame.
    Walk,
    /// The player stood still while adversaries roam.
    Hum,
    /// A normal pickup was consumed.
    Pickup,
    /// A power pickup was consumed.
    PowerPickup,
    /// A vulnerable adversary was captured.
    Capture,
    /// The last pickup of a level was consumed.
    LevelComplete,
    /// The player was caught.
    Death,
    /// A cutscene started.
    Cutscene(Act),
    /// A title option changed.
    MenuSelect,
    /// A name character was typed.
    NameKey,
}

/// Directions currently held by the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeldDirections {
    left: bool,
    right: bool,
    up: bool,
    down: bool,
}

impl HeldDirections {
    /// No direction held.
    pub const NONE: Self = Self {
        left: false,
        right: false,
        up: false,
        down: false,
    };

    /// Returns a copy with `direction` marked as held.
    #[must_use]
    pub const fn with(self, direction: Direction) -> Self {
        let mut held = self;
        match direction {
            Direction::Left => held.left = true,
            Direction::Right => held.right = true,
            Direction::Up => held.up = true,
            Direction::Down => held.down = true,
        }
        held
    }

    /// Convenience constructor for a single held direction.
    #[must_use]
    pub const fn only(direction: Direction) -> Self {
        Self::NONE.with(direction)
    }

    /// Reports whether `direction` is held.
    #[must_use]
    pub const fn contains(&self, direction: Direction) -> bool {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
            Direction::Up => self.up,
            Direction::Down => self.down,
        }
    }

    /// Reports whether nothing is held.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.left || self.right || self.up || self.down)
    }

    /// Held directions in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL
            .into_iter()
            .filter(move |direction| self.contains(*direction))
    }
}

/// Intent sampled from the input layer once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameInput {
    /// Directions held down this frame.
    pub held: HeldDirections,
    /// Direction pressed this frame, used by menus.
    pub pressed: Option<Direction>,
    /// Confirm or start was pressed.
    pub confirm: bool,
    /// Escape was pressed.
    pub cancel: bool,
    /// Printable character typed this frame.
    pub typed: Option<char>,
}

/// Placement of an actor staged for a cutscene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastMember {
    /// Starting position.
    pub position: Position,
    /// Initial heading.
    pub heading: Direction,
    /// Step size in sub-units per frame.
    pub speed: i32,
    /// Cosmetic colour index.
    pub colour: u8,
}

/// Staging instructions for a cutscene.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Staging {
    /// Room the cutscene plays in.
    pub layout: LayoutId,
    /// Starting position of the player.
    pub player: Position,
    /// Step size of the player in sub-units per frame.
    pub player_speed: i32,
    /// Adversaries in id order.
    pub cast: Vec<CastMember>,
    /// Decorative power pickup drawn until removed.
    pub prop: Option<Position>,
    /// Whether vulnerable adversaries leaving through the left edge are removed.
    pub retire_fleeing: bool,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Advances the global frame counter.
    Tick,
    /// Applies a directional press to the title menu.
    NavigateMenu {
        /// Direction pressed.
        direction: Direction,
    },
    /// Starts a playthrough with the current settings.
    StartGame,
    /// Resets the playthrough and shows the title menu.
    ReturnToTitle,
    /// Requests process termination.
    Quit,
    /// Steers the player from held input using commitment rules.
    SteerPlayer {
        /// Directions held this frame.
        held: HeldDirections,
    },
    /// Overrides the player's committed heading.
    HeadPlayer {
        /// Heading to commit, or none to stop.
        heading: Option<Direction>,
    },
    /// Moves the player along its committed heading with wall checks.
    DrivePlayer,
    /// Advances the death animation by one step.
    AdvanceDeath,
    /// Advances the level-complete countdown by one frame.
    AdvanceCompletion,
    /// Restarts the playthrough after a death.
    RestartGame,
    /// Opens the high-score name buffer for typing.
    BeginNameEntry,
    /// Writes one character into the name buffer.
    EnterNameCharacter {
        /// Character typed.
        character: char,
    },
    /// Closes the name buffer.
    FinishNameEntry,
    /// Loads a layout and repopulates the level.
    LoadLevel {
        /// Layout to load.
        layout: LayoutId,
    },
    /// Assigns a heading to a pickup.
    HeadPickup {
        /// Pickup to steer.
        pickup: PickupId,
        /// Heading to follow.
        heading: Direction,
    },
    /// Assigns a step size to a pickup.
    SetPickupSpeed {
        /// Pickup to adjust.
        pickup: PickupId,
        /// Step size in sub-units per frame.
        speed: i32,
    },
    /// Consumes overlapped pickups and moves the rest.
    AdvancePickups,
    /// Assigns a heading to an adversary.
    HeadAdversary {
        /// Adversary to steer.
        adversary: AdversaryId,
        /// Heading to follow.
        heading: Direction,
    },
    /// Parks a captured adversary in the center to recharge.
    RechargeAdversary {
        /// Adversary that reached the center.
        adversary: AdversaryId,
    },
    /// Runs adversary timers and moves every adversary.
    AdvanceAdversaries,
    /// Resolves overlaps between the player and roaming adversaries.
    ResolveCollisions,
    /// Rotates the center opening one step.
    RotateCenter,
    /// Enters a cutscene.
    BeginCutscene {
        /// Sequence to play.
        act: Act,
    },
    /// Places the actors of the running cutscene.
    StageCutscene {
        /// Staging instructions.
        staging: Staging,
    },
    /// Makes the cutscene actors visible.
    RevealCast,
    /// Removes the cutscene prop.
    RemoveProp,
    /// Opens or closes one wall segment.
    SetSegment {
        /// Segment to change.
        segment: Segment,
        /// Whether the segment becomes a wall.
        wall: bool,
    },
    /// Captures and halts every adversary.
    CaptureAdversaries,
    /// Makes every adversary vulnerable.
    FrightenAdversaries {
        /// Heading forced onto every adversary, if any.
        heading: Option<Direction>,
    },
    /// Broadcasts a sound cue.
    EmitSound {
        /// Cue to broadcast.
        cue: SoundCue,
    },
    /// Leaves the cutscene and loads the next level.
    FinishCutscene {
        /// Layout loaded afterwards.
        resume: LayoutId,
        /// Player level speed used afterwards.
        speed_level: u8,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    /// Indicates that the global frame counter advanced.
    FrameAdvanced {
        /// Frame number after advancing.
        frame: u64,
    },
    /// Announces that the session entered a new phase.
    PhaseChanged {
        /// Phase that became active.
        phase: Phase,
    },
    /// Reports the title menu after a press changed it.
    MenuChanged {
        /// Cursor state.
        menu: TitleMenu,
        /// Settings after adjustment.
        settings: Settings,
    },
    /// Confirms that a level was populated.
    LevelLoaded {
        /// Layout that was loaded.
        layout: LayoutId,
        /// Number of pickups placed.
        pickups: usize,
        /// Number of adversaries placed.
        adversaries: usize,
    },
    /// Confirms that the player moved.
    PlayerMoved {
        /// Position before moving.
        from: Position,
        /// Position after moving.
        to: Position,
    },
    /// Confirms that the player consumed a pickup.
    PickupConsumed {
        /// Pickup that was consumed.
        pickup: PickupId,
        /// Status held before consumption.
        status: PickupStatus,
    },
    /// Reports a change of score.
    ScoreChanged {
        /// Current score.
        score: u32,
        /// Current high score.
        high_score: u32,
    },
    /// Reports that the score rose above the previous high score.
    HighScoreBroken {
        /// New high score.
        high_score: u32,
    },
    /// Reports that roaming adversaries became vulnerable.
    AdversariesFrightened {
        /// Frames the vulnerability lasts.
        timer: u16,
    },
    /// Reports that the shared vulnerability countdown expired.
    VulnerabilityExpired,
    /// Reports that an adversary changed status.
    AdversaryStatusChanged {
        /// Adversary that changed.
        adversary: AdversaryId,
        /// Status after the change.
        status: AdversaryStatus,
    },
    /// Reports that the player captured a vulnerable adversary.
    AdversaryCaptured {
        /// Adversary that was captured.
        adversary: AdversaryId,
    },
    /// Reports that an adversary left the cutscene.
    AdversaryRetired {
        /// Adversary that was removed.
        adversary: AdversaryId,
    },
    /// Reports that a patrolling adversary caught the player.
    PlayerCaught {
        /// Adversary responsible.
        adversary: AdversaryId,
    },
    /// Reports progress of the death animation.
    DeathAdvanced {
        /// Step reached.
        step: u8,
    },
    /// Reports that every pickup of the level was consumed.
    LevelCompleted {
        /// Layout that was completed.
        layout: LayoutId,
    },
    /// Reports that the name buffer opened.
    NameEntryStarted,
    /// Reports a character written into the name buffer.
    NameCharacterEntered {
        /// Slot written.
        slot: u8,
        /// Character written.
        character: char,
    },
    /// Reports that the name buffer closed.
    NameEntryFinished {
        /// Final name.
        name: String,
    },
    /// Reports the new center opening.
    CenterRotated {
        /// Direction of the open segment.
        opening: Direction,
    },
    /// Reports that a wall segment changed.
    SegmentChanged {
        /// Segment that changed.
        segment: Segment,
        /// Whether the segment is now a wall.
        wall: bool,
    },
    /// Reports that a cutscene started.
    CutsceneStarted {
        /// Sequence started.
        act: Act,
    },
    /// Reports that a cutscene ended.
    CutsceneFinished {
        /// Sequence finished.
        act: Act,
    },
    /// Sound trigger for the audio layer.
    Sound {
        /// Cue to play.
        cue: SoundCue,
    },
    /// The session asked the process to terminate.
    QuitRequested,
}

/// Immutable representation of the player used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlayerSnapshot {
    /// Current position.
    pub position: Position,
    /// Heading being executed without further input.
    pub committed: Option<Direction>,
    /// Direction the sprite faces.
    pub facing: Direction,
    /// Step size in sub-units per frame.
    pub speed: i32,
    /// Mouth animation phase, cycling while moving.
    pub animation: u8,
}

/// Immutable representation of a single pickup used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PickupSnapshot {
    /// Unique identifier assigned to the pickup.
    pub id: PickupId,
    /// Current position.
    pub position: Position,
    /// Heading followed between decisions.
    pub heading: Direction,
    /// Step size in sub-units per frame.
    pub speed: i32,
    /// Current status.
    pub status: PickupStatus,
}

/// Read-only snapshot describing all pickups of the level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickupView {
    snapshots: Vec<PickupSnapshot>,
    initial: usize,
}

impl PickupView {
    /// Creates a new view from snapshots sorted by identifier.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<PickupSnapshot>, initial: usize) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots, initial }
    }

    /// Iterator over the captured pickup snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &PickupSnapshot> {
        self.snapshots.iter()
    }

    /// Iterator over the pickups still on the board.
    pub fn active(&self) -> impl Iterator<Item = &PickupSnapshot> {
        self.snapshots
            .iter()
            .filter(|snapshot| snapshot.status.is_active())
    }

    /// Number of pickups still on the board.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// Number of pickups the level started with.
    #[must_use]
    pub const fn initial(&self) -> usize {
        self.initial
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<PickupSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single adversary used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AdversarySnapshot {
    /// Unique identifier assigned to the adversary.
    pub id: AdversaryId,
    /// Current position.
    pub position: Position,
    /// Heading followed between decisions, none while parked.
    pub heading: Option<Direction>,
    /// Direction the sprite faces.
    pub facing: Direction,
    /// Step size in sub-units per frame.
    pub speed: i32,
    /// Current status.
    pub status: AdversaryStatus,
    /// Cosmetic colour index.
    pub colour: u8,
}

/// Read-only snapshot describing all adversaries of the level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdversaryView {
    snapshots: Vec<AdversarySnapshot>,
    vulnerability: u16,
}

impl AdversaryView {
    /// Creates a new view from snapshots sorted by identifier.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<AdversarySnapshot>, vulnerability: u16) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self {
            snapshots,
            vulnerability,
        }
    }

    /// Iterator over the captured adversary snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &AdversarySnapshot> {
        self.snapshots.iter()
    }

    /// Frames left on the shared vulnerability countdown.
    #[must_use]
    pub const fn vulnerability(&self) -> u16 {
        self.vulnerability
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<AdversarySnapshot> {
        self.snapshots
    }
}
