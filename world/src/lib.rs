#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game session state for the Munchkin simulation.

pub mod collision;
pub mod maze;
pub mod motion;
pub mod scoring;

#[cfg(any(test, feature = "scenario_scaffolding"))]
pub mod scaffolding;

use log::{debug, info, warn};
use munchkin_core::{
    lattice, AdversaryId, AdversaryStatus, CastMember, Cell, Command, Direction, Event, LayoutId,
    Phase, PickupId, PickupStatus, Position, Settings, SoundCue, Staging, TitleMenu,
    CAPTURE_POINTS, COMPLETION_FRAMES, DEATH_FINAL_STEP, NAME_LENGTH, RECHARGE_FRAMES,
    VULNERABILITY_FRAMES,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
    maze::{LayoutError, MazeGrid},
    scoring::Scoreboard,
};

/// Salt mixed into the session seed for the level placement stream.
pub const PLACEMENT_SALT: u64 = 0x706c_6163_656d_656e;

/// Step size granted per level speed unit, in sub-units per frame.
pub const SPEED_UNIT: i32 = lattice::SUBUNITS_PER_PIXEL;

const PICKUP_START_SPEED: i32 = 1;

const FIXED_PICKUPS: [(i32, i32, Direction, PickupStatus); 12] = [
    (0, 0, Direction::Down, PickupStatus::Power),
    (1, 0, Direction::Left, PickupStatus::Normal),
    (0, 1, Direction::Right, PickupStatus::Normal),
    (7, 0, Direction::Left, PickupStatus::Normal),
    (8, 0, Direction::Down, PickupStatus::Power),
    (8, 1, Direction::Left, PickupStatus::Normal),
    (0, 5, Direction::Right, PickupStatus::Normal),
    (0, 6, Direction::Up, PickupStatus::Power),
    (1, 6, Direction::Right, PickupStatus::Normal),
    (8, 5, Direction::Left, PickupStatus::Normal),
    (7, 6, Direction::Left, PickupStatus::Normal),
    (8, 6, Direction::Up, PickupStatus::Power),
];

const EXTRA_PICKUP_COLUMNS: i32 = 8;
const EXTRA_PICKUP_ROWS: i32 = 6;

/// Aligned start point of the player on every maze.
pub const PLAYER_START: Position = lattice::PLAYER.aligned_point(Cell::new(4, 3));

/// Represents the authoritative state of a running session.
#[derive(Debug)]
pub struct GameSession {
    settings: Settings,
    menu: TitleMenu,
    phase: Phase,
    frame: u64,
    layout: LayoutId,
    maze: MazeGrid,
    speed_level: u8,
    player: Player,
    pickups: Vec<Pickup>,
    initial_pickups: usize,
    adversaries: Vec<Adversary>,
    vulnerability: u16,
    scoreboard: Scoreboard,
    stage: Option<Stage>,
    placement: ChaCha8Rng,
    quit: bool,
}

impl GameSession {
    /// Creates a session showing the title menu for the provided settings.
    pub fn new(settings: Settings) -> Result<Self, LayoutError> {
        let settings = settings.clamped();
        let maze = MazeGrid::from_layout(settings.layout)?;
        Ok(Self {
            menu: TitleMenu::for_settings(&settings),
            phase: Phase::Title,
            frame: 0,
            layout: settings.layout,
            maze,
            speed_level: 1,
            player: Player::at(PLAYER_START, SPEED_UNIT),
            pickups: Vec::new(),
            initial_pickups: 0,
            adversaries: Vec::new(),
            vulnerability: 0,
            scoreboard: Scoreboard::new(),
            stage: None,
            placement: placement_rng(settings.seed),
            quit: false,
            settings,
        })
    }

    fn enter(&mut self, phase: Phase, out_events: &mut Vec<Event>) {
        if self.phase == phase {
            return;
        }
        self.phase = phase;
        info!("phase changed to {phase:?}");
        out_events.push(Event::PhaseChanged { phase });
    }

    fn load_level(
        &mut self,
        layout: LayoutId,
        out_events: &mut Vec<Event>,
    ) -> Result<(), LayoutError> {
        let maze = MazeGrid::from_layout(layout)?;
        self.layout = layout;
        self.maze = maze;
        self.stage = None;
        self.vulnerability = 0;
        self.player = Player::at(PLAYER_START, self.level_speed());

        let extra = usize::from(self.settings.pickups).saturating_sub(FIXED_PICKUPS.len());
        let fixed = FIXED_PICKUPS.iter().copied();
        let random: Vec<_> = (0..extra)
            .map(|_| {
                let column = self.placement.gen_range(0..EXTRA_PICKUP_COLUMNS);
                let row = self.placement.gen_range(0..EXTRA_PICKUP_ROWS);
                (column, row, Direction::Right, PickupStatus::Normal)
            })
            .collect();
        self.pickups = fixed
            .chain(random)
            .enumerate()
            .map(|(index, (column, row, heading, status))| Pickup {
                id: PickupId::new(index as u32),
                position: lattice::PICKUP.aligned_point(Cell::new(column, row)),
                heading,
                speed: PICKUP_START_SPEED,
                status,
            })
            .collect();
        self.initial_pickups = self.pickups.len();

        let home = lattice::ADVERSARY.aligned_point(lattice::CENTER);
        let speed = self.level_speed();
        self.adversaries = (0..u32::from(self.settings.adversaries))
            .map(|index| Adversary {
                id: AdversaryId::new(index),
                position: home,
                heading: Some(Direction::Down),
                facing: Direction::Down,
                speed,
                status: AdversaryStatus::Patrol,
                colour: (index % 4) as u8 + 1,
            })
            .collect();

        info!(
            "loaded layout {} with {} pickups and {} adversaries",
            layout.get(),
            self.pickups.len(),
            self.adversaries.len()
        );
        out_events.push(Event::LevelLoaded {
            layout,
            pickups: self.pickups.len(),
            adversaries: self.adversaries.len(),
        });
        Ok(())
    }

    fn start_level(&mut self, layout: LayoutId, out_events: &mut Vec<Event>) {
        match self.load_level(layout, out_events) {
            Ok(()) => self.enter(Phase::Playing, out_events),
            Err(error) => warn!("ignoring level load: {error}"),
        }
    }

    fn level_speed(&self) -> i32 {
        i32::from(self.speed_level) * SPEED_UNIT
    }

    fn award(&mut self, points: u32, out_events: &mut Vec<Event>) {
        let broken = self.scoreboard.award(points);
        out_events.push(Event::ScoreChanged {
            score: self.scoreboard.score(),
            high_score: self.scoreboard.high_score(),
        });
        if broken {
            out_events.push(Event::HighScoreBroken {
                high_score: self.scoreboard.high_score(),
            });
        }
    }

    fn frighten(&mut self, heading: Option<Direction>, out_events: &mut Vec<Event>) {
        if !self
            .adversaries
            .iter()
            .any(|adversary| adversary.status.is_roaming())
        {
            return;
        }
        self.vulnerability = VULNERABILITY_FRAMES;
        for adversary in self
            .adversaries
            .iter_mut()
            .filter(|adversary| adversary.status.is_roaming())
        {
            if let Some(heading) = heading {
                adversary.head(heading);
            }
            if adversary.status != AdversaryStatus::Vulnerable {
                adversary.status = AdversaryStatus::Vulnerable;
                out_events.push(Event::AdversaryStatusChanged {
                    adversary: adversary.id,
                    status: adversary.status,
                });
            }
        }
        debug!("adversaries frightened for {VULNERABILITY_FRAMES} frames");
        out_events.push(Event::AdversariesFrightened {
            timer: self.vulnerability,
        });
    }

    fn reset_to_title(&mut self, out_events: &mut Vec<Event>) {
        self.scoreboard.reset_game();
        self.speed_level = 1;
        self.pickups.clear();
        self.initial_pickups = 0;
        self.adversaries.clear();
        self.vulnerability = 0;
        self.stage = None;
        self.player = Player::at(PLAYER_START, SPEED_UNIT);
        self.layout = self.settings.layout;
        match MazeGrid::from_layout(self.layout) {
            Ok(maze) => self.maze = maze,
            Err(error) => warn!("keeping previous maze: {error}"),
        }
        self.menu = TitleMenu::for_settings(&self.settings);
        self.enter(Phase::Title, out_events);
    }

    fn advance_pickups(&mut self, out_events: &mut Vec<Event>) {
        let mouth = collision::player_against_pickups(self.player.position);
        let mut consumed = Vec::new();
        for pickup in self
            .pickups
            .iter_mut()
            .filter(|pickup| pickup.status.is_active())
        {
            if mouth.overlaps(&collision::pickup(pickup.position)) {
                consumed.push((pickup.id, pickup.status));
                pickup.status = PickupStatus::Inactive;
            } else {
                let profile = &lattice::PICKUP;
                pickup.position =
                    motion::advance(profile, pickup.position, pickup.heading, pickup.speed);
            }
        }

        for (pickup, status) in consumed {
            out_events.push(Event::PickupConsumed { pickup, status });
            self.award(status.points(), out_events);
            if status == PickupStatus::Power {
                out_events.push(Event::Sound {
                    cue: SoundCue::PowerPickup,
                });
                self.frighten(None, out_events);
            } else {
                out_events.push(Event::Sound {
                    cue: SoundCue::Pickup,
                });
            }
        }

        let remaining = self.pickups.iter().any(|pickup| pickup.status.is_active());
        if self.initial_pickups > 0 && !remaining {
            info!("layout {} cleared", self.layout.get());
            out_events.push(Event::LevelCompleted {
                layout: self.layout,
            });
            out_events.push(Event::Sound {
                cue: SoundCue::LevelComplete,
            });
            self.enter(
                Phase::LevelComplete {
                    remaining: COMPLETION_FRAMES,
                },
                out_events,
            );
        }
    }

    fn advance_adversaries(&mut self, out_events: &mut Vec<Event>) {
        if self.vulnerability > 0 {
            self.vulnerability -= 1;
            if self.vulnerability == 0 {
                out_events.push(Event::VulnerabilityExpired);
                for adversary in self
                    .adversaries
                    .iter_mut()
                    .filter(|adversary| adversary.status == AdversaryStatus::Vulnerable)
                {
                    adversary.status = AdversaryStatus::Patrol;
                    out_events.push(Event::AdversaryStatusChanged {
                        adversary: adversary.id,
                        status: adversary.status,
                    });
                }
            }
        }

        for adversary in &mut self.adversaries {
            match adversary.status {
                AdversaryStatus::Recharging { remaining: 0 } => {
                    adversary.status = AdversaryStatus::Patrol;
                    adversary.facing = Direction::Down;
                    adversary.heading = None;
                    out_events.push(Event::AdversaryStatusChanged {
                        adversary: adversary.id,
                        status: adversary.status,
                    });
                }
                AdversaryStatus::Recharging { remaining } => {
                    adversary.status = AdversaryStatus::Recharging {
                        remaining: remaining - 1,
                    };
                }
                _ => {
                    if let Some(heading) = adversary.heading {
                        adversary.step(&self.maze, heading);
                    }
                }
            }
        }

        if self.stage.as_ref().is_some_and(|stage| stage.retire_fleeing) {
            let mut retired = Vec::new();
            self.adversaries.retain(|adversary| {
                let fleeing =
                    adversary.status == AdversaryStatus::Vulnerable && adversary.position.x < 0;
                if fleeing {
                    retired.push(adversary.id);
                }
                !fleeing
            });
            out_events.extend(
                retired
                    .into_iter()
                    .map(|adversary| Event::AdversaryRetired { adversary }),
            );
        }
    }

    fn resolve_collisions(&mut self, out_events: &mut Vec<Event>) {
        let body = collision::player_against_adversaries(self.player.position);
        let mut captured = Vec::new();
        let mut caught = None;
        for adversary in &mut self.adversaries {
            if !body.overlaps(&collision::adversary(adversary.position)) {
                continue;
            }
            match adversary.status {
                AdversaryStatus::Patrol => {
                    caught = Some(adversary.id);
                    break;
                }
                AdversaryStatus::Vulnerable => {
                    adversary.status = AdversaryStatus::Captured;
                    captured.push(adversary.id);
                }
                AdversaryStatus::Captured | AdversaryStatus::Recharging { .. } => {}
            }
        }

        for adversary in captured {
            debug!("adversary {} captured", adversary.get());
            out_events.push(Event::AdversaryCaptured { adversary });
            out_events.push(Event::AdversaryStatusChanged {
                adversary,
                status: AdversaryStatus::Captured,
            });
            self.award(CAPTURE_POINTS, out_events);
            out_events.push(Event::Sound {
                cue: SoundCue::Capture,
            });
        }

        if let Some(adversary) = caught {
            info!("player caught by adversary {}", adversary.get());
            out_events.push(Event::PlayerCaught { adversary });
            out_events.push(Event::Sound {
                cue: SoundCue::Death,
            });
            self.enter(Phase::Dying { step: 1 }, out_events);
        }
    }

    fn stage_cutscene(&mut self, staging: Staging, out_events: &mut Vec<Event>) {
        let maze = match MazeGrid::from_layout(staging.layout) {
            Ok(maze) => maze,
            Err(error) => {
                warn!("ignoring cutscene staging: {error}");
                return;
            }
        };
        self.layout = staging.layout;
        self.maze = maze;
        self.vulnerability = 0;
        self.pickups.clear();
        self.initial_pickups = 0;
        self.player = Player::at(staging.player, staging.player_speed);
        self.adversaries = staging
            .cast
            .iter()
            .enumerate()
            .map(|(index, member)| Adversary::cast(index as u32, member))
            .collect();
        self.stage = Some(Stage {
            prop: staging.prop,
            revealed: false,
            retire_fleeing: staging.retire_fleeing,
        });
        out_events.push(Event::LevelLoaded {
            layout: staging.layout,
            pickups: 0,
            adversaries: self.adversaries.len(),
        });
    }

    fn move_player(
        &mut self,
        from: Position,
        moved: Option<Direction>,
        out_events: &mut Vec<Event>,
    ) {
        let Some(direction) = moved else {
            return;
        };
        self.player.facing = direction;
        self.player.animation = self.player.animation.wrapping_add(1);
        out_events.push(Event::PlayerMoved {
            from,
            to: self.player.position,
        });
    }
}

/// Applies the provided command to the session, mutating state deterministically.
pub fn apply(session: &mut GameSession, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick => {
            session.frame = session.frame.saturating_add(1);
            if let Phase::Cutscene { act, elapsed } = session.phase {
                session.phase = Phase::Cutscene {
                    act,
                    elapsed: elapsed.saturating_add(1),
                };
            }
            out_events.push(Event::FrameAdvanced {
                frame: session.frame,
            });
        }
        Command::NavigateMenu { direction } => {
            if session.phase != Phase::Title {
                return;
            }
            if session.menu.navigate(&mut session.settings, direction) {
                out_events.push(Event::MenuChanged {
                    menu: session.menu,
                    settings: session.settings,
                });
                out_events.push(Event::Sound {
                    cue: SoundCue::MenuSelect,
                });
                if session.settings.layout != session.layout {
                    session.layout = session.settings.layout;
                    match MazeGrid::from_layout(session.layout) {
                        Ok(maze) => session.maze = maze,
                        Err(error) => warn!("keeping previous maze: {error}"),
                    }
                }
            }
        }
        Command::StartGame => {
            if session.phase != Phase::Title {
                return;
            }
            session.settings = session.settings.clamped();
            session.placement = placement_rng(session.settings.seed);
            session.scoreboard.reset_game();
            session.speed_level = 1;
            info!(
                "starting game on layout {} (arcade: {})",
                session.settings.layout.get(),
                session.settings.arcade
            );
            session.start_level(session.settings.layout, out_events);
        }
        Command::ReturnToTitle => {
            if session.phase != Phase::Title {
                session.reset_to_title(out_events);
            }
        }
        Command::Quit => {
            if !session.quit {
                session.quit = true;
                out_events.push(Event::QuitRequested);
            }
        }
        Command::SteerPlayer { held } => {
            if session.phase != Phase::Playing {
                return;
            }
            let from = session.player.position;
            let step = motion::steer(
                &session.maze,
                from,
                session.player.committed,
                held,
                session.player.speed,
            );
            session.player.position = step.position;
            session.player.committed = step.committed;
            session.move_player(from, step.moved, out_events);
            let cue = if step.moved.is_some() {
                SoundCue::Walk
            } else {
                SoundCue::Hum
            };
            out_events.push(Event::Sound { cue });
        }
        Command::HeadPlayer { heading } => {
            session.player.committed = heading;
            if let Some(heading) = heading {
                session.player.facing = heading;
            }
        }
        Command::DrivePlayer => {
            let Some(direction) = session.player.committed else {
                return;
            };
            let from = session.player.position;
            if let Some(next) = motion::drive(
                &session.maze,
                &lattice::PLAYER,
                from,
                direction,
                session.player.speed,
            ) {
                session.player.position = next;
                session.move_player(from, Some(direction), out_events);
            }
        }
        Command::AdvanceDeath => {
            if let Phase::Dying { step } = session.phase {
                if step < DEATH_FINAL_STEP {
                    let step = step + 1;
                    session.phase = Phase::Dying { step };
                    out_events.push(Event::DeathAdvanced { step });
                }
            }
        }
        Command::AdvanceCompletion => {
            if let Phase::LevelComplete { remaining } = session.phase {
                session.phase = Phase::LevelComplete {
                    remaining: remaining.saturating_sub(1),
                };
            }
        }
        Command::RestartGame => {
            if session.phase == Phase::Title {
                return;
            }
            session.scoreboard.reset_game();
            session.speed_level = 1;
            let layout = if session.settings.arcade {
                LayoutId::FIRST_MAZE
            } else {
                session.settings.layout
            };
            session.start_level(layout, out_events);
        }
        Command::BeginNameEntry => {
            if matches!(session.phase, Phase::Dying { .. }) {
                session.scoreboard.clear_name();
                out_events.push(Event::NameEntryStarted);
                session.enter(Phase::NameEntry { cursor: 0 }, out_events);
            }
        }
        Command::EnterNameCharacter { character } => {
            let Phase::NameEntry { cursor } = session.phase else {
                return;
            };
            if !scoring::accepts(character) || usize::from(cursor) >= NAME_LENGTH {
                return;
            }
            if session.scoreboard.write_name(usize::from(cursor), character) {
                session.phase = Phase::NameEntry { cursor: cursor + 1 };
                out_events.push(Event::NameCharacterEntered {
                    slot: cursor,
                    character,
                });
                out_events.push(Event::Sound {
                    cue: SoundCue::NameKey,
                });
            }
        }
        Command::FinishNameEntry => {
            if matches!(session.phase, Phase::NameEntry { .. }) {
                let name = session.scoreboard.name();
                info!("high score {} registered to {name:?}", session.scoreboard.high_score());
                out_events.push(Event::NameEntryFinished { name });
            }
        }
        Command::LoadLevel { layout } => {
            if session.phase != Phase::Title {
                session.start_level(layout, out_events);
            }
        }
        Command::HeadPickup { pickup, heading } => {
            if let Some(pickup) = session.pickup_mut(pickup) {
                pickup.heading = heading;
            }
        }
        Command::SetPickupSpeed { pickup, speed } => {
            if let Some(pickup) = session.pickup_mut(pickup) {
                pickup.speed = speed;
            }
        }
        Command::AdvancePickups => {
            if session.phase == Phase::Playing {
                session.advance_pickups(out_events);
            }
        }
        Command::HeadAdversary { adversary, heading } => {
            if let Some(adversary) = session.adversary_mut(adversary) {
                adversary.head(heading);
            }
        }
        Command::RechargeAdversary { adversary } => {
            if let Some(adversary) = session.adversary_mut(adversary) {
                if adversary.status == AdversaryStatus::Captured {
                    adversary.status = AdversaryStatus::Recharging {
                        remaining: RECHARGE_FRAMES,
                    };
                    adversary.heading = None;
                    out_events.push(Event::AdversaryStatusChanged {
                        adversary: adversary.id,
                        status: adversary.status,
                    });
                }
            }
        }
        Command::AdvanceAdversaries => {
            if matches!(session.phase, Phase::Playing | Phase::Cutscene { .. }) {
                session.advance_adversaries(out_events);
            }
        }
        Command::ResolveCollisions => {
            if session.phase == Phase::Playing {
                session.resolve_collisions(out_events);
            }
        }
        Command::RotateCenter => {
            if session.maze.rotates() {
                let opening = session.maze.rotate_center();
                out_events.push(Event::CenterRotated { opening });
            }
        }
        Command::BeginCutscene { act } => {
            if session.phase == Phase::Title {
                return;
            }
            info!("cutscene {act:?} started");
            session.enter(Phase::Cutscene { act, elapsed: 0 }, out_events);
            out_events.push(Event::CutsceneStarted { act });
        }
        Command::StageCutscene { staging } => {
            if matches!(session.phase, Phase::Cutscene { .. }) {
                session.stage_cutscene(staging, out_events);
            }
        }
        Command::RevealCast => {
            if let Some(stage) = session.stage.as_mut() {
                stage.revealed = true;
            }
        }
        Command::RemoveProp => {
            if let Some(stage) = session.stage.as_mut() {
                stage.prop = None;
            }
        }
        Command::SetSegment { segment, wall } => {
            if session.maze.set_segment(segment, wall) {
                out_events.push(Event::SegmentChanged { segment, wall });
            }
        }
        Command::CaptureAdversaries => {
            for adversary in &mut session.adversaries {
                adversary.status = AdversaryStatus::Captured;
                adversary.speed = 0;
                adversary.heading = None;
                out_events.push(Event::AdversaryStatusChanged {
                    adversary: adversary.id,
                    status: adversary.status,
                });
            }
        }
        Command::FrightenAdversaries { heading } => session.frighten(heading, out_events),
        Command::EmitSound { cue } => out_events.push(Event::Sound { cue }),
        Command::FinishCutscene {
            resume,
            speed_level,
        } => {
            let Phase::Cutscene { act, .. } = session.phase else {
                return;
            };
            info!("cutscene {act:?} finished, resuming on layout {}", resume.get());
            out_events.push(Event::CutsceneFinished { act });
            session.speed_level = speed_level.max(1);
            session.start_level(resume, out_events);
        }
    }
}

impl GameSession {
    fn pickup_mut(&mut self, id: PickupId) -> Option<&mut Pickup> {
        self.pickups.iter_mut().find(|pickup| pickup.id == id)
    }

    fn adversary_mut(&mut self, id: AdversaryId) -> Option<&mut Adversary> {
        self.adversaries
            .iter_mut()
            .find(|adversary| adversary.id == id)
    }
}

fn placement_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed ^ PLACEMENT_SALT)
}

/// Query functions that provide read-only access to the session state.
pub mod query {
    use munchkin_core::{
        AdversarySnapshot, AdversaryView, LayoutId, Phase, PickupSnapshot, PickupView,
        PlayerSnapshot, Position, Settings, TitleMenu,
    };

    use super::GameSession;
    use crate::{maze::MazeGrid, scoring::Scoreboard};

    /// Reports the active session phase.
    #[must_use]
    pub fn phase(session: &GameSession) -> Phase {
        session.phase
    }

    /// Number of frames simulated so far.
    #[must_use]
    pub fn frame(session: &GameSession) -> u64 {
        session.frame
    }

    /// Settings of the current playthrough.
    #[must_use]
    pub fn settings(session: &GameSession) -> Settings {
        session.settings
    }

    /// Cursor state of the title menu.
    #[must_use]
    pub fn menu(session: &GameSession) -> TitleMenu {
        session.menu
    }

    /// Layout currently loaded.
    #[must_use]
    pub fn layout(session: &GameSession) -> LayoutId {
        session.layout
    }

    /// Level speed of the player, 1 or 2.
    #[must_use]
    pub fn speed_level(session: &GameSession) -> u8 {
        session.speed_level
    }

    /// Provides read-only access to the loaded maze.
    #[must_use]
    pub fn maze(session: &GameSession) -> &MazeGrid {
        &session.maze
    }

    /// Score, high score, and high-score name.
    #[must_use]
    pub fn scoreboard(session: &GameSession) -> &Scoreboard {
        &session.scoreboard
    }

    /// Captures a snapshot of the player.
    #[must_use]
    pub fn player(session: &GameSession) -> PlayerSnapshot {
        let player = &session.player;
        PlayerSnapshot {
            position: player.position,
            committed: player.committed,
            facing: player.facing,
            speed: player.speed,
            animation: player.animation,
        }
    }

    /// Captures a read-only view of the pickups of the level.
    #[must_use]
    pub fn pickup_view(session: &GameSession) -> PickupView {
        let snapshots = session
            .pickups
            .iter()
            .map(|pickup| PickupSnapshot {
                id: pickup.id,
                position: pickup.position,
                heading: pickup.heading,
                speed: pickup.speed,
                status: pickup.status,
            })
            .collect();
        PickupView::from_snapshots(snapshots, session.initial_pickups)
    }

    /// Captures a read-only view of the adversaries of the level.
    #[must_use]
    pub fn adversary_view(session: &GameSession) -> AdversaryView {
        let snapshots = session
            .adversaries
            .iter()
            .map(|adversary| AdversarySnapshot {
                id: adversary.id,
                position: adversary.position,
                heading: adversary.heading,
                facing: adversary.facing,
                speed: adversary.speed,
                status: adversary.status,
                colour: adversary.colour,
            })
            .collect();
        AdversaryView::from_snapshots(snapshots, session.vulnerability)
    }

    /// Reports whether adversaries should be presented.
    ///
    /// Cutscene casts stay hidden until revealed.
    #[must_use]
    pub fn cast_visible(session: &GameSession) -> bool {
        session.stage.as_ref().map_or(true, |stage| stage.revealed)
    }

    /// Decorative cutscene pickup, if one is staged.
    #[must_use]
    pub fn prop(session: &GameSession) -> Option<Position> {
        session.stage.as_ref().and_then(|stage| stage.prop)
    }

    /// Reports whether the session asked to terminate.
    #[must_use]
    pub fn quit_requested(session: &GameSession) -> bool {
        session.quit
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Player {
    position: Position,
    committed: Option<Direction>,
    facing: Direction,
    speed: i32,
    animation: u8,
}

impl Player {
    const fn at(position: Position, speed: i32) -> Self {
        Self {
            position,
            committed: None,
            facing: Direction::Right,
            speed,
            animation: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Pickup {
    id: PickupId,
    position: Position,
    heading: Direction,
    speed: i32,
    status: PickupStatus,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Adversary {
    id: AdversaryId,
    position: Position,
    heading: Option<Direction>,
    facing: Direction,
    speed: i32,
    status: AdversaryStatus,
    colour: u8,
}

impl Adversary {
    fn cast(index: u32, member: &CastMember) -> Self {
        Self {
            id: AdversaryId::new(index),
            position: member.position,
            heading: Some(member.heading),
            facing: member.heading,
            speed: member.speed,
            status: AdversaryStatus::Patrol,
            colour: member.colour,
        }
    }

    fn head(&mut self, heading: Direction) {
        self.heading = Some(heading);
        self.facing = heading;
    }

    /// Moves along `heading` with wall checks.
    ///
    /// A segment that closed in front of the adversary after its last
    /// decision point turns it back into the cell it came from. At a
    /// decision point a refused move leaves it waiting for a new heading.
    fn step(&mut self, maze: &MazeGrid, heading: Direction) {
        let profile = &lattice::ADVERSARY;
        if let Some(next) = motion::drive(maze, profile, self.position, heading, self.speed) {
            self.position = next;
            return;
        }
        if profile.aligned_along(self.position, heading) {
            return;
        }
        let reverse = heading.opposite();
        self.head(reverse);
        if let Some(next) = motion::drive(maze, profile, self.position, reverse, self.speed) {
            self.position = next;
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Stage {
    prop: Option<Position>,
    revealed: bool,
    retire_fleeing: bool,
}
