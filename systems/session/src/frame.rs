//! Fixed-order frame driver wiring the flow, the systems, and the world.

use log::trace;
use munchkin_core::{Command, Event, FrameInput, Settings};
use munchkin_system_adversaries::{self as adversaries, Adversaries};
use munchkin_system_cutscene::Director;
use munchkin_system_pickups::{self as pickups, Pickups};
use munchkin_world::{self as world, maze::LayoutError, query, GameSession};

use crate::flow::SessionFlow;

/// Owns a session and advances it one frame at a time.
#[derive(Debug)]
pub struct Simulation {
    session: GameSession,
    flow: SessionFlow,
    director: Director,
    pickups: Pickups,
    adversaries: Adversaries,
    /// Level loads the pickup system has not observed yet.
    backlog: Vec<Event>,
}

impl Simulation {
    /// Creates a simulation on the title screen.
    pub fn new(settings: Settings) -> Result<Self, LayoutError> {
        GameSession::new(settings).map(Self::resume)
    }

    /// Drives an existing session, seeding the systems from its settings.
    #[must_use]
    pub fn resume(session: GameSession) -> Self {
        let seed = query::settings(&session).seed;
        Self {
            session,
            flow: SessionFlow::new(),
            director: Director::new(),
            pickups: Pickups::new(pickups::Config::new(seed)),
            adversaries: Adversaries::new(adversaries::Config::new(seed)),
            backlog: Vec::new(),
        }
    }

    /// Session being driven.
    #[must_use]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Cutscene player, exposing the running timeline.
    #[must_use]
    pub fn director(&self) -> &Director {
        &self.director
    }

    /// Reports whether the session asked to terminate.
    #[must_use]
    pub fn quit_requested(&self) -> bool {
        query::quit_requested(&self.session)
    }

    /// Simulates one frame and returns the events it produced.
    pub fn step(&mut self, input: &FrameInput) -> Vec<Event> {
        let mut events = Vec::new();
        self.dispatch([Command::Tick], &mut events);

        let mut commands = Vec::new();
        let mut schedule = self.flow.plan(&self.session, input, &mut commands);
        self.dispatch(commands, &mut events);

        let mut commands = Vec::new();
        let cutscene = self.director.handle(
            &events,
            query::phase(&self.session),
            &query::player(&self.session),
            input,
            &mut commands,
        );
        self.dispatch(commands, &mut events);
        schedule.adversaries |= cutscene.adversaries;
        schedule.drive_player |= cutscene.drive_player;

        if schedule.pickups {
            self.backlog.extend(events.iter().filter(|event| is_level_load(event)).cloned());
            let mut commands = Vec::new();
            self.pickups.handle(
                &self.backlog,
                query::phase(&self.session),
                &query::pickup_view(&self.session),
                query::maze(&self.session),
                query::player(&self.session).speed,
                &mut commands,
            );
            self.backlog.clear();
            commands.push(Command::AdvancePickups);
            self.dispatch(commands, &mut events);
        }

        if schedule.adversaries {
            let mut commands = Vec::new();
            self.adversaries.handle(
                query::phase(&self.session),
                &query::adversary_view(&self.session),
                query::maze(&self.session),
                &mut commands,
            );
            commands.push(Command::AdvanceAdversaries);
            self.dispatch(commands, &mut events);
        }

        if schedule.drive_player {
            self.dispatch([Command::DrivePlayer], &mut events);
        }
        if schedule.collisions {
            self.dispatch([Command::ResolveCollisions], &mut events);
        }
        if schedule.rotate {
            self.dispatch([Command::RotateCenter], &mut events);
        }

        if !schedule.pickups {
            self.backlog.extend(events.iter().filter(|event| is_level_load(event)).cloned());
        }

        for event in &events {
            if let Event::Sound { cue } = event {
                trace!("sound cue {cue:?}");
            }
        }
        events
    }

    fn dispatch<I>(&mut self, commands: I, events: &mut Vec<Event>)
    where
        I: IntoIterator<Item = Command>,
    {
        for command in commands {
            world::apply(&mut self.session, command, events);
        }
    }
}

fn is_level_load(event: &Event) -> bool {
    matches!(event, Event::LevelLoaded { .. })
}
