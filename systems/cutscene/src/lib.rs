#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Cutscene player that interprets declarative timelines.
//!
//! The director owns no world state. It watches for `CutsceneStarted`,
//! stages the matching [`Timeline`], and on every cutscene frame turns the
//! cues due at the current offset into world commands. The returned
//! [`CutsceneFrame`] tells the frame driver which actors move this frame.

pub mod timeline;

use log::debug;
use munchkin_core::{Act, Command, Event, FrameInput, Phase, PlayerSnapshot};

pub use timeline::{Cue, CueAction, Door, Timeline};

/// Actors allowed to move during the current cutscene frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CutsceneFrame {
    /// Whether adversaries decide and move.
    pub adversaries: bool,
    /// Whether the player drives its committed heading.
    pub drive_player: bool,
}

/// Generic player shared by every cutscene act.
#[derive(Debug, Default)]
pub struct Director {
    timeline: Option<Timeline>,
}

impl Director {
    /// Creates a director with no cutscene loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Timeline of the running cutscene, if any.
    #[must_use]
    pub fn timeline(&self) -> Option<&Timeline> {
        self.timeline.as_ref()
    }

    /// Emits the commands of one cutscene frame.
    pub fn handle(
        &mut self,
        events: &[Event],
        phase: Phase,
        player: &PlayerSnapshot,
        input: &FrameInput,
        out: &mut Vec<Command>,
    ) -> CutsceneFrame {
        for event in events {
            if let Event::CutsceneStarted { act } = event {
                let timeline = Timeline::for_act(*act);
                out.push(Command::StageCutscene {
                    staging: timeline.staging(),
                });
                self.timeline = Some(timeline);
            }
        }

        let Phase::Cutscene { act, elapsed } = phase else {
            self.timeline = None;
            return CutsceneFrame::default();
        };
        let timeline = self.ensure(act);

        if input.confirm {
            debug!("cutscene {act:?} skipped at offset {elapsed}");
            out.push(finish(timeline));
            return CutsceneFrame::default();
        }

        for action in timeline.cues_at(elapsed) {
            let command = match action {
                CueAction::Sound(cue) => Command::EmitSound { cue },
                CueAction::RevealCast => Command::RevealCast,
                CueAction::HeadPlayer(heading) => Command::HeadPlayer { heading },
                CueAction::CaptureAll => Command::CaptureAdversaries,
                CueAction::FrightenAll(heading) => Command::FrightenAdversaries {
                    heading: Some(heading),
                },
                CueAction::RemoveProp => Command::RemoveProp,
                CueAction::Finish => {
                    out.push(finish(timeline));
                    return CutsceneFrame::default();
                }
            };
            out.push(command);
        }

        if let Some(door) = timeline.door.filter(|door| elapsed >= door.from) {
            if player.position == door.trigger {
                out.push(Command::SetSegment {
                    segment: door.segment,
                    wall: false,
                });
                out.push(Command::HeadPlayer {
                    heading: Some(door.heading),
                });
            } else {
                out.push(Command::SetSegment {
                    segment: door.segment,
                    wall: true,
                });
            }
        }

        CutsceneFrame {
            adversaries: timeline.released(elapsed),
            drive_player: timeline.player_moves(elapsed),
        }
    }

    fn ensure(&mut self, act: Act) -> &Timeline {
        if self.timeline.as_ref().is_some_and(|timeline| timeline.act != act) {
            self.timeline = None;
        }
        self.timeline.get_or_insert_with(|| Timeline::for_act(act))
    }
}

fn finish(timeline: &Timeline) -> Command {
    Command::FinishCutscene {
        resume: timeline.resume,
        speed_level: timeline.resume_speed,
    }
}

#[cfg(test)]
mod tests {
    use munchkin_core::{Direction, Position, SoundCue};

    use super::*;

    fn player_at(position: Position) -> PlayerSnapshot {
        PlayerSnapshot {
            position,
            committed: None,
            facing: Direction::Right,
            speed: 5,
            animation: 0,
        }
    }

    fn cutscene(act: Act, elapsed: u32) -> Phase {
        Phase::Cutscene { act, elapsed }
    }

    #[test]
    fn start_event_stages_the_timeline() {
        let mut director = Director::new();
        let mut out = Vec::new();

        let frame = director.handle(
            &[Event::CutsceneStarted { act: Act::Hunt }],
            cutscene(Act::Hunt, 0),
            &player_at(Position::new(480, 345)),
            &FrameInput::default(),
            &mut out,
        );

        assert_eq!(
            out,
            vec![Command::StageCutscene {
                staging: Timeline::hunt().staging()
            }]
        );
        assert_eq!(frame, CutsceneFrame::default());
    }

    #[test]
    fn cues_translate_into_world_commands() {
        let mut director = Director::new();
        let mut out = Vec::new();

        let _ = director.handle(
            &[],
            cutscene(Act::Hunt, 243),
            &player_at(Position::new(700, 345)),
            &FrameInput::default(),
            &mut out,
        );

        assert_eq!(
            out,
            vec![
                Command::EmitSound {
                    cue: SoundCue::PowerPickup
                },
                Command::HeadPlayer {
                    heading: Some(Direction::Left)
                },
                Command::FrightenAdversaries {
                    heading: Some(Direction::Left)
                },
                Command::RemoveProp,
            ]
        );
    }

    #[test]
    fn door_opens_only_on_the_trigger_point() {
        let mut director = Director::new();
        let door = Timeline::chase().door.expect("chase door");
        let mut out = Vec::new();

        let _ = director.handle(
            &[],
            cutscene(Act::Chase, 99),
            &player_at(door.trigger),
            &FrameInput::default(),
            &mut out,
        );
        assert!(out.is_empty());

        let _ = director.handle(
            &[],
            cutscene(Act::Chase, 241),
            &player_at(door.trigger),
            &FrameInput::default(),
            &mut out,
        );
        assert_eq!(
            out,
            vec![
                Command::SetSegment {
                    segment: door.segment,
                    wall: false
                },
                Command::HeadPlayer {
                    heading: Some(Direction::Up)
                },
            ]
        );

        out.clear();
        let _ = director.handle(
            &[],
            cutscene(Act::Chase, 242),
            &player_at(Position::new(480, 550)),
            &FrameInput::default(),
            &mut out,
        );
        assert_eq!(
            out,
            vec![Command::SetSegment {
                segment: door.segment,
                wall: true
            }]
        );
    }

    #[test]
    fn confirm_skips_to_the_resume_layout() {
        let mut director = Director::new();
        let mut out = Vec::new();
        let input = FrameInput {
            confirm: true,
            ..FrameInput::default()
        };

        let frame = director.handle(
            &[],
            cutscene(Act::Chase, 30),
            &player_at(Position::new(80, 555)),
            &input,
            &mut out,
        );

        assert_eq!(frame, CutsceneFrame::default());
        assert_eq!(
            out,
            vec![Command::FinishCutscene {
                resume: munchkin_core::LayoutId::new(3),
                speed_level: 1
            }]
        );
    }

    #[test]
    fn motion_flags_follow_release_and_window() {
        let mut director = Director::new();
        let mut out = Vec::new();
        let player = player_at(Position::new(80, 555));

        let input = FrameInput::default();
        let early = director.handle(&[], cutscene(Act::Chase, 99), &player, &input, &mut out);
        let released = director.handle(&[], cutscene(Act::Chase, 161), &player, &input, &mut out);
        let late = director.handle(&[], cutscene(Act::Chase, 331), &player, &input, &mut out);

        assert_eq!(early, CutsceneFrame::default());
        assert!(released.adversaries && released.drive_player);
        assert!(late.adversaries && !late.drive_player);
    }

    #[test]
    fn leaving_the_cutscene_drops_the_timeline() {
        let mut director = Director::new();
        let mut out = Vec::new();
        let player = player_at(Position::new(80, 555));

        let input = FrameInput::default();
        let _ = director.handle(&[], cutscene(Act::Chase, 5), &player, &input, &mut out);
        assert!(director.timeline().is_some());

        let _ = director.handle(&[], Phase::Playing, &player, &input, &mut out);
        assert!(director.timeline().is_none());
    }
}
