//! Population of a [`Scene`] from world query views.

use glam::Vec2;
use munchkin_core::{
    lattice, AdversarySnapshot, AdversaryStatus, Phase, PickupStatus, Position,
};
use munchkin_world::{query, GameSession};

use crate::{
    palette, Color, Hud, MenuPresentation, PickupKind, Scene, SceneAdversary, ScenePickup,
    ScenePlayer, WallRect,
};

const WALL_THICKNESS: f32 = 2.0;
const COLOR_PHASE_FRAMES: u64 = 20;
const FLASH_FRAMES: u32 = 10;
const RECOVERY_WARNING: u16 = 60;
const DEATH_ANIMATION_STEPS: u8 = 7;
const ADVERSARIES_VISIBLE_UNTIL_STEP: u8 = 3;

impl Scene {
    /// Builds the scene of the current frame.
    ///
    /// `caption` labels a running cutscene.
    #[must_use]
    pub fn capture(session: &GameSession, caption: Option<&str>) -> Self {
        let phase = query::phase(session);
        let frame = query::frame(session);
        let on_title = phase == Phase::Title;

        let pickups = if on_title {
            Vec::new()
        } else {
            let color = pickup_color(frame);
            query::pickup_view(session)
                .active()
                .map(|pickup| ScenePickup {
                    position: pixels(pickup.position),
                    kind: if pickup.status == PickupStatus::Power {
                        PickupKind::Power
                    } else {
                        PickupKind::Normal
                    },
                    color,
                })
                .chain(query::prop(session).map(|prop| ScenePickup {
                    position: pixels(prop),
                    kind: PickupKind::Power,
                    color,
                }))
                .collect()
        };

        let adversaries_visible = !on_title
            && query::cast_visible(session)
            && !matches!(phase, Phase::Dying { step } if step > ADVERSARIES_VISIBLE_UNTIL_STEP);
        let adversaries = if adversaries_visible {
            let view = query::adversary_view(session);
            let vulnerability = view.vulnerability();
            view.iter()
                .map(|adversary| SceneAdversary {
                    position: pixels(adversary.position),
                    facing: adversary.facing,
                    status: adversary.status,
                    color: adversary_color(adversary, vulnerability),
                })
                .collect()
        } else {
            Vec::new()
        };

        let player = (!on_title).then(|| {
            let player = query::player(session);
            ScenePlayer {
                position: pixels(player.position),
                facing: player.facing,
                mouth_open: player.animation % 4 >= 2,
                dying: match phase {
                    Phase::Dying { step } => Some(step.min(DEATH_ANIMATION_STEPS)),
                    _ => None,
                },
            }
        });

        let maze = query::maze(session);
        let walls = maze
            .horizontal_walls()
            .map(|(line, column)| horizontal_wall(line, column))
            .chain(
                maze.vertical_walls()
                    .map(|(row, line)| vertical_wall(row, line)),
            )
            .collect();

        let scoreboard = query::scoreboard(session);
        let settings = query::settings(session);
        let hud = Hud {
            score: scoreboard.score(),
            high_score: scoreboard.high_score(),
            name: scoreboard.name(),
            layout: query::layout(session).get(),
            arcade: settings.arcade,
            caption: caption
                .filter(|_| matches!(phase, Phase::Cutscene { .. }))
                .map(str::to_owned),
            name_entry: matches!(phase, Phase::NameEntry { .. }),
        };

        Self {
            walls,
            wall_color: wall_color(phase),
            pickups,
            adversaries,
            player,
            hud,
            menu: on_title.then(|| MenuPresentation {
                settings,
                highlighted: query::menu(session).row(),
            }),
        }
    }
}

fn pixels(position: Position) -> Vec2 {
    let scale = lattice::SUBUNITS_PER_PIXEL as f32;
    Vec2::new(position.x as f32 / scale, position.y as f32 / scale)
}

fn maze_corner(column: usize, row: usize) -> Vec2 {
    let origin = pixels(lattice::MAZE_ORIGIN);
    let pitch = Vec2::new(
        (lattice::PITCH_X / lattice::SUBUNITS_PER_PIXEL) as f32,
        (lattice::PITCH_Y / lattice::SUBUNITS_PER_PIXEL) as f32,
    );
    origin + pitch * Vec2::new(column as f32, row as f32)
}

fn horizontal_wall(line: usize, column: usize) -> WallRect {
    WallRect {
        origin: maze_corner(column, line),
        size: Vec2::new(lattice::HORIZONTAL_SEGMENT_PIXELS as f32, WALL_THICKNESS),
    }
}

fn vertical_wall(row: usize, line: usize) -> WallRect {
    WallRect {
        origin: maze_corner(line, row),
        size: Vec2::new(WALL_THICKNESS, lattice::VERTICAL_SEGMENT_PIXELS as f32),
    }
}

fn wall_color(phase: Phase) -> Color {
    match phase {
        Phase::LevelComplete { remaining } if (remaining / FLASH_FRAMES) % 2 == 1 => {
            palette::WALL_FLASH
        }
        _ => palette::WALL,
    }
}

fn pickup_color(frame: u64) -> Color {
    if frame % COLOR_PHASE_FRAMES < COLOR_PHASE_FRAMES / 2 {
        palette::PICKUP_A
    } else {
        palette::PICKUP_B
    }
}

/// Body colour of an adversary.
///
/// Vulnerable adversaries flash during the last frames of the shared timer,
/// twice as fast in the final half of that window.
fn adversary_color(adversary: &AdversarySnapshot, vulnerability: u16) -> Color {
    let body = usize::from(adversary.colour.clamp(1, 4)) - 1;
    let body = palette::ADVERSARIES
        .get(body)
        .copied()
        .unwrap_or(palette::ADVERSARIES[0]);
    match adversary.status {
        AdversaryStatus::Patrol => body,
        AdversaryStatus::Vulnerable if vulnerability < RECOVERY_WARNING => {
            let period = if vulnerability < RECOVERY_WARNING / 2 { 4 } else { 8 };
            if (vulnerability / period) % 2 == 0 {
                palette::RECOVERING
            } else {
                palette::VULNERABLE
            }
        }
        AdversaryStatus::Vulnerable => palette::VULNERABLE,
        AdversaryStatus::Captured => palette::CAPTURED,
        AdversaryStatus::Recharging { .. } => body.darken(0.5),
    }
}

#[cfg(test)]
mod tests {
    use munchkin_core::{AdversaryId, Command, Direction, Settings};
    use munchkin_world::{self as world, scaffolding};

    use super::*;

    fn started() -> GameSession {
        let mut session = GameSession::new(Settings::default()).expect("session");
        let mut events = Vec::new();
        world::apply(&mut session, Command::StartGame, &mut events);
        session
    }

    fn snapshot(status: AdversaryStatus) -> AdversarySnapshot {
        AdversarySnapshot {
            id: AdversaryId::new(0),
            position: Position::new(480, 415),
            heading: Some(Direction::Down),
            facing: Direction::Down,
            speed: 5,
            status,
            colour: 2,
        }
    }

    #[test]
    fn title_scene_shows_only_the_maze_and_menu() {
        let session = GameSession::new(Settings::default()).expect("session");

        let scene = Scene::capture(&session, None);

        assert!(scene.menu.is_some());
        assert!(scene.player.is_none());
        assert!(scene.pickups.is_empty());
        assert!(!scene.walls.is_empty());
    }

    #[test]
    fn walls_follow_the_lattice_pitch() {
        let session = started();
        let maze = query::maze(&session);

        let scene = Scene::capture(&session, None);

        let expected = maze.horizontal_walls().count() + maze.vertical_walls().count();
        assert_eq!(scene.walls.len(), expected);
        assert_eq!(horizontal_wall(0, 0).origin, Vec2::new(9.0, 23.0));
        assert_eq!(vertical_wall(1, 2).origin, Vec2::new(49.0, 37.0));
        assert_eq!(horizontal_wall(7, 8).size, Vec2::new(22.0, 2.0));
    }

    #[test]
    fn playing_scene_converts_actors_to_pixels() {
        let session = started();

        let scene = Scene::capture(&session, Some("ignored"));

        let player = scene.player.expect("player");
        assert_eq!(player.position, Vec2::new(96.0, 69.0));
        assert_eq!(scene.pickups.len(), 12);
        assert_eq!(scene.adversaries.len(), 4);
        assert_eq!(scene.hud.caption, None);
        assert!(scene.menu.is_none());
    }

    #[test]
    fn late_death_steps_hide_the_adversaries() {
        let mut session = started();
        assert!(scaffolding::place_adversary(
            &mut session,
            AdversaryId::new(0),
            world::PLAYER_START,
            AdversaryStatus::Patrol,
        ));
        let mut events = Vec::new();
        world::apply(&mut session, Command::ResolveCollisions, &mut events);
        assert!(!Scene::capture(&session, None).adversaries.is_empty());

        for _ in 0..3 {
            world::apply(&mut session, Command::AdvanceDeath, &mut events);
        }

        let scene = Scene::capture(&session, None);
        assert!(scene.adversaries.is_empty());
        assert_eq!(scene.player.and_then(|player| player.dying), Some(4));
    }

    #[test]
    fn vulnerable_adversaries_flash_faster_near_recovery() {
        let vulnerable = snapshot(AdversaryStatus::Vulnerable);

        assert_eq!(adversary_color(&vulnerable, 120), palette::VULNERABLE);
        assert_eq!(adversary_color(&vulnerable, 56), palette::VULNERABLE);
        assert_eq!(adversary_color(&vulnerable, 48), palette::RECOVERING);
        assert_eq!(adversary_color(&vulnerable, 28), palette::VULNERABLE);
        assert_eq!(adversary_color(&vulnerable, 24), palette::RECOVERING);
        assert_eq!(
            adversary_color(&snapshot(AdversaryStatus::Patrol), 0),
            palette::ADVERSARIES[1]
        );
    }

    #[test]
    fn pickup_colour_alternates_every_ten_frames() {
        assert_eq!(pickup_color(0), palette::PICKUP_A);
        assert_eq!(pickup_color(9), palette::PICKUP_A);
        assert_eq!(pickup_color(10), palette::PICKUP_B);
        assert_eq!(pickup_color(20), palette::PICKUP_A);
    }
}
