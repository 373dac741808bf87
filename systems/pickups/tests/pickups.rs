use munchkin_core::{lattice, Command, Event, PickupId, PickupStatus, Position, Settings};
use munchkin_system_pickups::{Config, Pickups, THINNED_SPEED};
use munchkin_world::{self as world, query, scaffolding, GameSession};

const OFF_BOARD: Position = Position::new(-500, -500);

fn started(settings: Settings) -> GameSession {
    let mut session = GameSession::new(settings).expect("session");
    let mut events = Vec::new();
    world::apply(&mut session, Command::StartGame, &mut events);
    scaffolding::place_player(&mut session, OFF_BOARD);
    session
}

fn run_frame(session: &mut GameSession, system: &mut Pickups, events: &[Event]) -> Vec<Command> {
    let view = query::pickup_view(session);
    let speed = query::player(session).speed;
    let mut commands = Vec::new();
    system.handle(
        events,
        query::phase(session),
        &view,
        query::maze(session),
        speed,
        &mut commands,
    );
    let mut sink = Vec::new();
    for command in commands.iter().cloned() {
        world::apply(session, command, &mut sink);
    }
    world::apply(session, Command::AdvancePickups, &mut sink);
    commands
}

#[test]
fn thinning_speeds_up_every_remaining_pickup() {
    let mut session = started(Settings::default());
    let mut system = Pickups::new(Config::new(0x5eed));
    let mouth = query::player(&session).position;
    for id in [1, 2, 3, 5, 6, 8, 9] {
        assert!(scaffolding::place_pickup(
            &mut session,
            PickupId::new(id),
            Position::new(mouth.x + 10, mouth.y + 12),
        ));
    }
    let mut sink = Vec::new();
    world::apply(&mut session, Command::AdvancePickups, &mut sink);
    assert_eq!(query::pickup_view(&session).active_count(), 5);

    for _ in 0..240 {
        let _ = run_frame(&mut session, &mut system, &[]);
    }

    let view = query::pickup_view(&session);
    assert_eq!(view.active_count(), 5);
    assert!(view.active().all(|pickup| pickup.speed == THINNED_SPEED));
    assert!(view
        .iter()
        .filter(|pickup| pickup.status == PickupStatus::Inactive)
        .all(|pickup| pickup.speed == 1));
}

#[test]
fn pickups_only_head_into_open_corridors_and_avoid_the_center() {
    let mut session = started(Settings {
        pickups: 40,
        ..Settings::default()
    });
    let mut system = Pickups::new(Config::new(77));
    let starts_in_center: Vec<_> = query::pickup_view(&session)
        .iter()
        .filter(|pickup| lattice::PICKUP.cell_of(pickup.position) == lattice::CENTER)
        .map(|pickup| pickup.id)
        .collect();

    for _ in 0..600 {
        let maze = query::maze(&session).clone();
        let before = query::pickup_view(&session);
        let commands = run_frame(&mut session, &mut system, &[]);

        for command in commands {
            if let Command::HeadPickup { pickup, heading } = command {
                let snapshot = before
                    .iter()
                    .find(|snapshot| snapshot.id == pickup)
                    .expect("pickup exists");
                let cell = lattice::PICKUP.cell_of(snapshot.position);
                assert!(
                    !maze.is_wall(cell, heading),
                    "pickup {pickup:?} headed into a wall at {cell:?}"
                );
                assert_ne!(cell.neighbor(heading), lattice::CENTER);
            }
        }
        for pickup in query::pickup_view(&session).active() {
            if starts_in_center.contains(&pickup.id) {
                continue;
            }
            assert_ne!(
                lattice::PICKUP.cell_of(pickup.position),
                lattice::CENTER,
                "pickup {:?} entered the center",
                pickup.id
            );
        }
    }
}
