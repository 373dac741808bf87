use munchkin_core::{
    Act, AdversaryStatus, Command, Direction, Event, FrameInput, LayoutId, Phase, Position,
    Settings,
};
use munchkin_system_cutscene::Director;
use munchkin_world::{self as world, query, GameSession};

fn arcade_session() -> GameSession {
    let settings = Settings {
        arcade: true,
        ..Settings::default()
    };
    let mut session = GameSession::new(settings).expect("session");
    let mut events = Vec::new();
    world::apply(&mut session, Command::StartGame, &mut events);
    session
}

fn direct(session: &mut GameSession, director: &mut Director, events: &[Event]) -> Vec<Event> {
    let mut commands = Vec::new();
    let frame = director.handle(
        events,
        query::phase(session),
        &query::player(session),
        &FrameInput::default(),
        &mut commands,
    );
    let mut produced = Vec::new();
    for command in commands {
        world::apply(session, command, &mut produced);
    }
    if frame.adversaries {
        world::apply(session, Command::AdvanceAdversaries, &mut produced);
    }
    if frame.drive_player {
        world::apply(session, Command::DrivePlayer, &mut produced);
    }
    produced
}

fn begin(session: &mut GameSession, director: &mut Director, act: Act) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(session, Command::BeginCutscene { act }, &mut events);
    let mut log = events.clone();
    log.extend(direct(session, director, &events));
    log
}

/// Plays frames until the cutscene ends, returning every event observed.
fn play_out(session: &mut GameSession, director: &mut Director, mut log: Vec<Event>) -> Vec<Event> {
    for _ in 0..600 {
        if !matches!(query::phase(session), Phase::Cutscene { .. }) {
            break;
        }
        let mut events = Vec::new();
        world::apply(session, Command::Tick, &mut events);
        let produced = direct(session, director, &events);
        events.extend(produced);
        log.extend(events);
    }
    log
}

#[test]
fn chase_door_lets_the_player_escape_upward() {
    let mut session = arcade_session();
    let mut director = Director::new();
    let mut log = begin(&mut session, &mut director, Act::Chase);

    assert_eq!(query::layout(&session), LayoutId::CHASE_ROOM);
    assert_eq!(query::player(&session).position, Position::new(80, 555));
    assert!(!query::cast_visible(&session));

    let mut escaped = false;
    while let Phase::Cutscene { elapsed, .. } = query::phase(&session) {
        if elapsed >= 300 {
            break;
        }
        let mut events = Vec::new();
        world::apply(&mut session, Command::Tick, &mut events);
        let produced = direct(&mut session, &mut director, &events);
        events.extend(produced);
        log.extend(events);
        let player = query::player(&session);
        if player.position.x == 480 && player.position.y < 555 {
            escaped = true;
            assert_eq!(player.committed, Some(Direction::Up));
        }
    }

    assert!(escaped);
    assert!(query::cast_visible(&session));
    let door_changes: Vec<bool> = log
        .iter()
        .filter_map(|event| match event {
            Event::SegmentChanged { wall, .. } => Some(*wall),
            _ => None,
        })
        .collect();
    assert_eq!(door_changes, vec![false, true]);
    assert!(query::adversary_view(&session)
        .iter()
        .all(|adversary| adversary.status == AdversaryStatus::Captured && adversary.speed == 0));
}

#[test]
fn chase_resumes_on_the_third_maze_at_base_speed() {
    let mut session = arcade_session();
    let mut director = Director::new();
    let log = begin(&mut session, &mut director, Act::Chase);

    let log = play_out(&mut session, &mut director, log);

    assert!(log.contains(&Event::CutsceneFinished { act: Act::Chase }));
    assert_eq!(query::phase(&session), Phase::Playing);
    assert_eq!(query::layout(&session), LayoutId::new(3));
    assert_eq!(query::speed_level(&session), 1);
}

#[test]
fn hunt_retires_every_fleeing_adversary() {
    let mut session = arcade_session();
    let mut director = Director::new();
    let log = begin(&mut session, &mut director, Act::Hunt);
    assert_eq!(query::adversary_view(&session).iter().count(), 16);
    assert_eq!(query::prop(&session), Some(Position::new(955, 360)));

    let log = play_out(&mut session, &mut director, log);

    let retired = log
        .iter()
        .filter(|event| matches!(event, Event::AdversaryRetired { .. }))
        .count();
    assert_eq!(retired, 16);
    assert_eq!(query::layout(&session), LayoutId::FIRST_MAZE);
    assert_eq!(query::speed_level(&session), 2);
    assert_eq!(query::player(&session).speed, 10);
}
