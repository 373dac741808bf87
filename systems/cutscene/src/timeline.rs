//! Declarative descriptions of the two arcade cutscenes.

use std::ops::RangeInclusive;

use munchkin_core::{
    lattice, Act, CastMember, Direction, LayoutId, Position, Segment, SoundCue, Staging,
};
use munchkin_world::maze::CHASE_DOOR;

const CAST_SPEED: i32 = 5;
const PLAYER_SPEED: i32 = 5;

/// Action fired when a cutscene reaches a cue offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CueAction {
    /// Plays a sound.
    Sound(SoundCue),
    /// Makes the cast visible.
    RevealCast,
    /// Sets or clears the player's heading.
    HeadPlayer(Option<Direction>),
    /// Captures and halts every adversary.
    CaptureAll,
    /// Makes every adversary vulnerable and turns it around.
    FrightenAll(Direction),
    /// Removes the decorative pickup.
    RemoveProp,
    /// Ends the cutscene.
    Finish,
}

/// Action scheduled at a frame offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cue {
    /// Frames since the cutscene started.
    pub at: u32,
    /// Action to fire.
    pub action: CueAction,
}

const fn cue(at: u32, action: CueAction) -> Cue {
    Cue { at, action }
}

/// Door that opens while the player stands on its trigger point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Door {
    /// Segment toggled by the door.
    pub segment: Segment,
    /// Offset from which the door rule runs.
    pub from: u32,
    /// Player position that opens the door.
    pub trigger: Position,
    /// Heading given to the player when the door opens.
    pub heading: Direction,
}

/// Complete script of one cutscene.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Timeline {
    /// Act played by the script.
    pub act: Act,
    /// Room the cutscene plays in.
    pub layout: LayoutId,
    /// Caption drawn above the room.
    pub caption: &'static str,
    /// Start position of the player.
    pub player: Position,
    /// Adversaries in id order.
    pub cast: Vec<CastMember>,
    /// Offset from which adversaries move.
    pub release: u32,
    /// Offsets during which the player moves.
    pub player_window: RangeInclusive<u32>,
    /// Door rule, if the room has one.
    pub door: Option<Door>,
    /// Decorative pickup drawn until removed.
    pub prop: Option<Position>,
    /// Whether vulnerable adversaries leaving to the left are removed.
    pub retire_fleeing: bool,
    /// Layout loaded when the cutscene ends.
    pub resume: LayoutId,
    /// Player level speed used afterwards.
    pub resume_speed: u8,
    /// Cues ordered by offset.
    pub cues: Vec<Cue>,
}

impl Timeline {
    /// Script of the requested act.
    #[must_use]
    pub fn for_act(act: Act) -> Self {
        match act {
            Act::Chase => Self::chase(),
            Act::Hunt => Self::hunt(),
        }
    }

    /// Adversaries chase the player through the open room until the door saves it.
    #[must_use]
    pub fn chase() -> Self {
        let cast = [(880, 115), (880, 165), (80, 115), (80, 165)]
            .into_iter()
            .enumerate()
            .map(|(id, (x, y))| CastMember {
                position: Position::new(x, y),
                heading: Direction::Down,
                speed: CAST_SPEED,
                colour: ((id as u8 + 1) % 4) + 1,
            })
            .collect();
        Self {
            act: Act::Chase,
            layout: LayoutId::CHASE_ROOM,
            caption: "Act 1: the chase",
            player: Position::new(80, 555),
            cast,
            release: 100,
            player_window: 161..=330,
            door: Some(Door {
                segment: CHASE_DOOR,
                from: 100,
                trigger: Position::new(480, 555),
                heading: Direction::Up,
            }),
            prop: None,
            retire_fleeing: false,
            resume: LayoutId::new(3),
            resume_speed: 1,
            cues: vec![
                cue(1, CueAction::Sound(SoundCue::Cutscene(Act::Chase))),
                cue(61, CueAction::RevealCast),
                cue(160, CueAction::HeadPlayer(Some(Direction::Right))),
                cue(261, CueAction::CaptureAll),
                cue(261, CueAction::Sound(SoundCue::Capture)),
                cue(335, CueAction::HeadPlayer(None)),
                cue(375, CueAction::Finish),
            ],
        }
    }

    /// The player eats a power pickup and chases a column of adversaries off screen.
    #[must_use]
    pub fn hunt() -> Self {
        let formation = (9..=15)
            .map(|id| (id, -15, 15 - id))
            .chain((4..=8).map(|id| (id, 45, 9 - id)))
            .chain((1..=3).map(|id| (id, 105, 5 - id)))
            .chain(std::iter::once((0, 165, 3)));
        let mut placed: Vec<(u32, CastMember)> = formation
            .map(|(id, x, row)| {
                (
                    id,
                    CastMember {
                        position: Position::new(x, 135 + lattice::PITCH_Y * row as i32),
                        heading: Direction::Right,
                        speed: CAST_SPEED,
                        colour: (id % 4) as u8 + 1,
                    },
                )
            })
            .collect();
        placed.sort_by_key(|(id, _)| *id);

        Self {
            act: Act::Hunt,
            layout: LayoutId::HUNT_ROOM,
            caption: "Act 2: the hunt",
            player: Position::new(480, 345),
            cast: placed.into_iter().map(|(_, member)| member).collect(),
            release: 100,
            player_window: 121..=420,
            door: None,
            prop: Some(Position::new(955, 360)),
            retire_fleeing: true,
            resume: LayoutId::FIRST_MAZE,
            resume_speed: 2,
            cues: vec![
                cue(1, CueAction::Sound(SoundCue::Cutscene(Act::Hunt))),
                cue(61, CueAction::RevealCast),
                cue(150, CueAction::HeadPlayer(Some(Direction::Right))),
                cue(243, CueAction::Sound(SoundCue::PowerPickup)),
                cue(243, CueAction::HeadPlayer(Some(Direction::Left))),
                cue(243, CueAction::FrightenAll(Direction::Left)),
                cue(243, CueAction::RemoveProp),
                cue(420, CueAction::HeadPlayer(None)),
                cue(460, CueAction::Finish),
            ],
        }
    }

    /// Staging command payload placing the cast.
    #[must_use]
    pub fn staging(&self) -> Staging {
        Staging {
            layout: self.layout,
            player: self.player,
            player_speed: PLAYER_SPEED,
            cast: self.cast.clone(),
            prop: self.prop,
            retire_fleeing: self.retire_fleeing,
        }
    }

    /// Actions due at `elapsed`, in script order.
    pub fn cues_at(&self, elapsed: u32) -> impl Iterator<Item = CueAction> + '_ {
        self.cues
            .iter()
            .filter(move |cue| cue.at == elapsed)
            .map(|cue| cue.action)
    }

    /// Reports whether adversaries move at `elapsed`.
    #[must_use]
    pub fn released(&self, elapsed: u32) -> bool {
        elapsed >= self.release
    }

    /// Reports whether the player moves at `elapsed`.
    #[must_use]
    pub fn player_moves(&self, elapsed: u32) -> bool {
        self.player_window.contains(&elapsed)
    }
}
