//! Immediate-mode drawing of a [`Scene`].

use glam::Vec2;
use macroquad::{
    math::Vec2 as MacroquadVec2,
    shapes::{draw_circle, draw_rectangle, draw_triangle},
    text::draw_text,
};
use munchkin_core::{lattice, AdversaryStatus, Direction};
use munchkin_rendering::{
    palette, Color, Hud, MenuPresentation, PickupKind, Scene, SceneAdversary, ScenePickup,
    ScenePlayer,
};

const PLAYER_SIZE: f32 = 10.0;
const ADVERSARY_SIZE: f32 = 9.0;
const EYE_SIZE: f32 = 2.0;
const NORMAL_PICKUP: Vec2 = Vec2::new(3.0, 2.0);
const POWER_PICKUP: Vec2 = Vec2::new(5.0, 4.0);
const TEXT_SIZE: f32 = 9.0;
const MENU_TOP: f32 = 60.0;
const MENU_ROW_HEIGHT: f32 = 12.0;

/// Placement of the fixed-resolution picture inside the window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ViewMetrics {
    pub(crate) scale: f32,
    pub(crate) offset: Vec2,
}

impl ViewMetrics {
    /// Fits the picture to the screen, keeping its aspect ratio and centring it.
    pub(crate) fn fit(screen_width: f32, screen_height: f32) -> Self {
        let picture = picture_size();
        let scale = (screen_width / picture.x)
            .min(screen_height / picture.y)
            .max(0.0);
        let offset = ((Vec2::new(screen_width, screen_height) - picture * scale) * 0.5)
            .max(Vec2::ZERO);
        Self { scale, offset }
    }

    pub(crate) fn point(&self, position: Vec2) -> Vec2 {
        self.offset + position * self.scale
    }
}

pub(crate) fn picture_size() -> Vec2 {
    Vec2::new(
        lattice::SCREEN_WIDTH_PIXELS as f32,
        lattice::SCREEN_HEIGHT_PIXELS as f32,
    )
}

pub(crate) fn draw_scene(scene: &Scene, metrics: &ViewMetrics) {
    let wall_color = to_macroquad_color(scene.wall_color);
    for wall in &scene.walls {
        fill_rect(metrics, wall.origin, wall.size, wall_color);
    }

    for pickup in &scene.pickups {
        draw_pickup(pickup, metrics);
    }
    for adversary in &scene.adversaries {
        draw_adversary(adversary, metrics);
    }
    if let Some(player) = &scene.player {
        draw_player(player, metrics);
    }

    draw_hud(&scene.hud, metrics);
    if let Some(menu) = &scene.menu {
        draw_menu(menu, metrics);
    }
}

fn draw_pickup(pickup: &ScenePickup, metrics: &ViewMetrics) {
    let size = match pickup.kind {
        PickupKind::Normal => NORMAL_PICKUP,
        PickupKind::Power => POWER_PICKUP,
    };
    let origin = pickup.position - (size - NORMAL_PICKUP) * 0.5;
    fill_rect(metrics, origin, size, to_macroquad_color(pickup.color));
}

fn draw_adversary(adversary: &SceneAdversary, metrics: &ViewMetrics) {
    let body = Vec2::splat(ADVERSARY_SIZE);
    if adversary.status != AdversaryStatus::Captured {
        fill_rect(
            metrics,
            adversary.position,
            body,
            to_macroquad_color(adversary.color),
        );
    }

    let look = facing_vector(adversary.facing);
    let eyes = to_macroquad_color(palette::RECOVERING);
    for column in [2.0, 5.0] {
        let eye = adversary.position + Vec2::new(column, 2.0) + look;
        fill_rect(metrics, eye, Vec2::splat(EYE_SIZE), eyes);
    }
}

fn draw_player(player: &ScenePlayer, metrics: &ViewMetrics) {
    let radius = PLAYER_SIZE * 0.5;
    let center = metrics.point(player.position + Vec2::splat(radius));
    let shrink = player
        .dying
        .map_or(1.0, |step| 1.0 - f32::from(step) / 8.0);
    let scaled_radius = radius * metrics.scale * shrink;
    draw_circle(
        center.x,
        center.y,
        scaled_radius,
        to_macroquad_color(palette::PLAYER),
    );

    if player.mouth_open || player.dying.is_some() {
        let forward = facing_vector(player.facing);
        let side = Vec2::new(-forward.y, forward.x);
        let reach = scaled_radius * 1.1;
        let tip = center + forward * reach;
        draw_triangle(
            to_macroquad_vec(center),
            to_macroquad_vec(tip + side * reach * 0.6),
            to_macroquad_vec(tip - side * reach * 0.6),
            to_macroquad_color(palette::BACKGROUND),
        );
    }
}

fn draw_hud(hud: &Hud, metrics: &ViewMetrics) {
    let text = to_macroquad_color(palette::TEXT);
    draw_label(metrics, Vec2::new(4.0, 10.0), &format!("{:05}", hud.score), text);
    draw_label(
        metrics,
        Vec2::new(110.0, 10.0),
        &format!("{:05} {}", hud.high_score, hud.name),
        text,
    );

    let progression = if hud.arcade {
        format!("maze {} arcade", hud.layout)
    } else {
        format!("maze {}", hud.layout)
    };
    draw_label(metrics, Vec2::new(4.0, 156.0), &progression, text);

    if let Some(caption) = &hud.caption {
        draw_label(
            metrics,
            Vec2::new(90.0, 156.0),
            caption,
            to_macroquad_color(palette::HIGHLIGHT),
        );
    }
    if hud.name_entry {
        draw_label(
            metrics,
            Vec2::new(40.0, 80.0),
            &format!("new high score {}", hud.name),
            to_macroquad_color(palette::HIGHLIGHT),
        );
    }
}

fn draw_menu(menu: &MenuPresentation, metrics: &ViewMetrics) {
    for (index, (row, label)) in menu.rows().into_iter().enumerate() {
        let color = if row == menu.highlighted {
            palette::HIGHLIGHT
        } else {
            palette::TEXT
        };
        let top = MENU_TOP + index as f32 * MENU_ROW_HEIGHT;
        draw_label(
            metrics,
            Vec2::new(70.0, top),
            &label,
            to_macroquad_color(color),
        );
    }
}

fn facing_vector(facing: Direction) -> Vec2 {
    match facing {
        Direction::Left => Vec2::new(-1.0, 0.0),
        Direction::Right => Vec2::new(1.0, 0.0),
        Direction::Up => Vec2::new(0.0, -1.0),
        Direction::Down => Vec2::new(0.0, 1.0),
    }
}

fn fill_rect(metrics: &ViewMetrics, origin: Vec2, size: Vec2, color: macroquad::color::Color) {
    let corner = metrics.point(origin);
    let extent = size * metrics.scale;
    draw_rectangle(corner.x, corner.y, extent.x, extent.y, color);
}

fn draw_label(
    metrics: &ViewMetrics,
    baseline: Vec2,
    text: &str,
    color: macroquad::color::Color,
) {
    let anchor = metrics.point(baseline);
    let _ = draw_text(text, anchor.x, anchor.y, TEXT_SIZE * metrics.scale, color);
}

fn to_macroquad_vec(vector: Vec2) -> MacroquadVec2 {
    MacroquadVec2::new(vector.x, vector.y)
}

pub(crate) fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
