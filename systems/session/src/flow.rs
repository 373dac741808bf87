//! Session state machine deciding phase transitions from input and state.

use munchkin_core::{
    Act, Command, FrameInput, LayoutId, Phase, CENTER_ROTATION_PERIOD, DEATH_FINAL_STEP,
    DEATH_STEP_PERIOD, NAME_LENGTH,
};
use munchkin_world::{query, GameSession};

/// Simulation stages that run after the flow commands of a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameSchedule {
    /// Pickup decisions and movement.
    pub pickups: bool,
    /// Adversary decisions and movement.
    pub adversaries: bool,
    /// Player against adversary overlap resolution.
    pub collisions: bool,
    /// Center opening rotation.
    pub rotate: bool,
    /// Scripted player drive along its committed heading.
    pub drive_player: bool,
}

impl FrameSchedule {
    const PLAY: Self = Self {
        pickups: true,
        adversaries: true,
        collisions: true,
        rotate: false,
        drive_player: false,
    };
}

/// What follows a completed level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progression {
    /// Load a level directly.
    Level(LayoutId),
    /// Play a cutscene first.
    Cutscene(Act),
}

impl Progression {
    /// Next step after completing `layout`.
    ///
    /// Arcade mode walks the maze sequence with a cutscene after the second
    /// and fourth maze. Otherwise the same layout repeats.
    #[must_use]
    pub fn after(layout: LayoutId, arcade: bool) -> Self {
        if !arcade {
            return Self::Level(layout);
        }
        match layout.get() {
            1 => Self::Level(LayoutId::new(2)),
            2 => Self::Cutscene(Act::Chase),
            3 => Self::Level(LayoutId::new(4)),
            4 => Self::Cutscene(Act::Hunt),
            _ => Self::Level(LayoutId::FIRST_MAZE),
        }
    }

    fn command(self) -> Command {
        match self {
            Self::Level(layout) => Command::LoadLevel { layout },
            Self::Cutscene(act) => Command::BeginCutscene { act },
        }
    }
}

/// Stateless planner of the per-frame flow commands.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionFlow;

impl SessionFlow {
    /// Creates the planner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Emits the flow commands of one frame and schedules the stages to run.
    pub fn plan(
        &self,
        session: &GameSession,
        input: &FrameInput,
        out: &mut Vec<Command>,
    ) -> FrameSchedule {
        let phase = query::phase(session);
        if input.cancel {
            out.push(if phase == Phase::Title {
                Command::Quit
            } else {
                Command::ReturnToTitle
            });
            return FrameSchedule::default();
        }

        match phase {
            Phase::Title => {
                if input.confirm {
                    out.push(Command::StartGame);
                } else if let Some(direction) = input.pressed {
                    out.push(if query::menu(session).starts_on(direction) {
                        Command::StartGame
                    } else {
                        Command::NavigateMenu { direction }
                    });
                }
                FrameSchedule::default()
            }
            Phase::Playing => {
                out.push(Command::SteerPlayer { held: input.held });
                let frame = query::frame(session);
                FrameSchedule {
                    rotate: frame % CENTER_ROTATION_PERIOD == 0
                        && query::layout(session).rotates(),
                    ..FrameSchedule::PLAY
                }
            }
            Phase::Dying { step } if step >= DEATH_FINAL_STEP => {
                out.push(if query::scoreboard(session).broken() {
                    Command::BeginNameEntry
                } else {
                    Command::RestartGame
                });
                FrameSchedule::default()
            }
            Phase::Dying { .. } => {
                if query::frame(session) % DEATH_STEP_PERIOD == 0 {
                    out.push(Command::AdvanceDeath);
                }
                FrameSchedule::default()
            }
            Phase::LevelComplete { remaining: 0 } => {
                let progression =
                    Progression::after(query::layout(session), query::settings(session).arcade);
                out.push(progression.command());
                FrameSchedule::default()
            }
            Phase::LevelComplete { .. } => {
                out.push(Command::AdvanceCompletion);
                FrameSchedule::default()
            }
            Phase::NameEntry { cursor } => {
                if input.confirm || usize::from(cursor) >= NAME_LENGTH {
                    out.push(Command::FinishNameEntry);
                    out.push(Command::RestartGame);
                } else if let Some(character) = input.typed {
                    out.push(Command::EnterNameCharacter { character });
                }
                FrameSchedule::default()
            }
            Phase::Cutscene { .. } => FrameSchedule::default(),
        }
    }
}
