#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Munchkin adapters.
//!
//! Every coordinate in a [`Scene`] is expressed in maze pixels, with the
//! whole picture spanning 200 by 160 pixels. Backends scale the picture to
//! their window.

mod capture;

use anyhow::Result as AnyResult;
use glam::Vec2;
use munchkin_core::{AdversaryStatus, Direction, FrameInput, MenuRow, Settings};
use std::{error::Error, fmt, time::Duration};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color darkened towards black by the provided amount.
    #[must_use]
    pub fn darken(self, amount: f32) -> Self {
        let keep = 1.0 - amount.clamp(0.0, 1.0);

        Self {
            red: self.red * keep,
            green: self.green * keep,
            blue: self.blue * keep,
            alpha: self.alpha,
        }
    }
}

/// Colors of the classic console palette.
pub mod palette {
    use super::Color;

    /// Background of every screen.
    pub const BACKGROUND: Color = Color::from_rgb_u8(0, 0, 0);
    /// Maze walls during play.
    pub const WALL: Color = Color::from_rgb_u8(36, 72, 255);
    /// Alternate wall tint of the level-complete flash.
    pub const WALL_FLASH: Color = Color::from_rgb_u8(255, 255, 255);
    /// Player body.
    pub const PLAYER: Color = Color::from_rgb_u8(255, 218, 0);
    /// First colour phase of the pickups.
    pub const PICKUP_A: Color = Color::from_rgb_u8(255, 109, 182);
    /// Second colour phase of the pickups.
    pub const PICKUP_B: Color = Color::from_rgb_u8(109, 255, 182);
    /// Vulnerable adversaries.
    pub const VULNERABLE: Color = Color::from_rgb_u8(73, 73, 255);
    /// Flash colour of adversaries about to recover.
    pub const RECOVERING: Color = Color::from_rgb_u8(255, 255, 255);
    /// Captured adversaries travelling home.
    pub const CAPTURED: Color = Color::from_rgb_u8(146, 146, 146);
    /// Adversary body colours indexed by colour number 1 to 4.
    pub const ADVERSARIES: [Color; 4] = [
        Color::from_rgb_u8(255, 36, 36),
        Color::from_rgb_u8(0, 218, 218),
        Color::from_rgb_u8(255, 146, 0),
        Color::from_rgb_u8(218, 0, 218),
    ];
    /// HUD text.
    pub const TEXT: Color = Color::from_rgb_u8(0, 182, 0);
    /// Highlighted title-menu row.
    pub const HIGHLIGHT: Color = Color::from_rgb_u8(255, 255, 0);
}

/// Axis-aligned wall rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallRect {
    /// Upper-left corner.
    pub origin: Vec2,
    /// Width and height.
    pub size: Vec2,
}

/// Kind of a pickup drawn in the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PickupKind {
    /// Small pickup.
    Normal,
    /// Large pickup that frightens adversaries.
    Power,
}

/// Pickup drawn in the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScenePickup {
    /// Upper-left corner of the pickup.
    pub position: Vec2,
    /// Drawn kind.
    pub kind: PickupKind,
    /// Fill colour for the current colour phase.
    pub color: Color,
}

/// Adversary drawn in the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneAdversary {
    /// Upper-left corner of the adversary.
    pub position: Vec2,
    /// Direction the eyes look.
    pub facing: Direction,
    /// Behavioural status.
    pub status: AdversaryStatus,
    /// Body colour, including vulnerability flashing.
    pub color: Color,
}

/// Player drawn in the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScenePlayer {
    /// Upper-left corner of the player.
    pub position: Vec2,
    /// Direction the mouth faces.
    pub facing: Direction,
    /// Whether the mouth is open in the current animation phase.
    pub mouth_open: bool,
    /// Death animation frame from 1 to 7, if the player is dying.
    pub dying: Option<u8>,
}

/// Scores and labels drawn around the maze.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Hud {
    /// Score of the running game.
    pub score: u32,
    /// Best score of the session.
    pub high_score: u32,
    /// Name attached to the best score.
    pub name: String,
    /// Number of the loaded layout.
    pub layout: u8,
    /// Whether arcade progression is enabled.
    pub arcade: bool,
    /// Cutscene caption, if a cutscene runs.
    pub caption: Option<String>,
    /// Whether the player is typing a name.
    pub name_entry: bool,
}

/// Title-screen option menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuPresentation {
    /// Values shown next to each row.
    pub settings: Settings,
    /// Row under the cursor.
    pub highlighted: MenuRow,
}

impl MenuPresentation {
    /// Rows visible with the current settings, top to bottom.
    #[must_use]
    pub fn rows(&self) -> Vec<(MenuRow, String)> {
        let settings = self.settings;
        let mut rows = vec![
            (MenuRow::Maze, format!("maze   {}", settings.layout.get())),
            (
                MenuRow::Arcade,
                format!("arcade {}", if settings.arcade { "on" } else { "off" }),
            ),
        ];
        if !settings.arcade {
            rows.push((
                MenuRow::Adversaries,
                format!("ghosts {}", settings.adversaries),
            ));
            rows.push((MenuRow::Pickups, format!("pills  {}", settings.pickups)));
        }
        rows.push((MenuRow::Start, "start".to_owned()));
        rows
    }
}

/// Scene description combining the maze, its inhabitants and the HUD.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Wall segments of the loaded layout.
    pub walls: Vec<WallRect>,
    /// Colour of every wall segment this frame.
    pub wall_color: Color,
    /// Active pickups, including a staged cutscene prop.
    pub pickups: Vec<ScenePickup>,
    /// Visible adversaries.
    pub adversaries: Vec<SceneAdversary>,
    /// Player, hidden on the title screen.
    pub player: Option<ScenePlayer>,
    /// Scores and labels.
    pub hud: Hud,
    /// Option menu shown on the title screen.
    pub menu: Option<MenuPresentation>,
}

impl Scene {
    /// Creates an empty scene.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            walls: Vec::new(),
            wall_color: palette::WALL,
            pickups: Vec::new(),
            adversaries: Vec::new(),
            player: None,
            hud: Hud::default(),
            menu: None,
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Window pixels per maze pixel.
    pub scale: f32,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    ///
    /// Returns an error when `scale` is not a positive finite number.
    pub fn new<T>(
        window_title: T,
        clear_color: Color,
        scale: f32,
        scene: Scene,
    ) -> Result<Self, RenderingError>
    where
        T: Into<String>,
    {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(RenderingError::InvalidScale { scale });
        }
        Ok(Self {
            window_title: window_title.into(),
            clear_color,
            scale,
            scene,
        })
    }
}

/// Whether a backend keeps presenting frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    /// Present another frame.
    Continue,
    /// Close the window and return.
    Exit,
}

/// Rendering backend capable of presenting Munchkin scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until the update closure asks it to exit.
    ///
    /// The provided `update_scene` closure receives the elapsed frame time,
    /// per-frame input captured by the adapter, and may mutate the scene
    /// before it is rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> LoopControl + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// The window scale must be positive.
    InvalidScale {
        /// Provided scale that failed validation.
        scale: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidScale { scale } => {
                write!(f, "scale must be positive (received {scale})")
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use munchkin_core::LayoutId;

    use super::*;

    #[test]
    fn presentation_rejects_non_positive_scale() {
        let error = Presentation::new("munchkin", palette::BACKGROUND, 0.0, Scene::empty())
            .expect_err("zero scale must be rejected");

        assert_eq!(error, RenderingError::InvalidScale { scale: 0.0 });
        assert!(Presentation::new("munchkin", palette::BACKGROUND, 5.0, Scene::empty()).is_ok());
    }

    #[test]
    fn arcade_menu_hides_the_count_rows() {
        let menu = MenuPresentation {
            settings: Settings {
                arcade: true,
                ..Settings::default()
            },
            highlighted: MenuRow::Arcade,
        };

        let rows: Vec<MenuRow> = menu.rows().into_iter().map(|(row, _)| row).collect();

        assert_eq!(rows, vec![MenuRow::Maze, MenuRow::Arcade, MenuRow::Start]);
    }

    #[test]
    fn menu_rows_show_current_values() {
        let menu = MenuPresentation {
            settings: Settings {
                layout: LayoutId::new(3),
                adversaries: 7,
                ..Settings::default()
            },
            highlighted: MenuRow::Maze,
        };

        let rows = menu.rows();

        assert_eq!(rows[0].1, "maze   3");
        assert_eq!(rows[2].1, "ghosts 7");
        assert_eq!(rows.len(), 5);
    }

    #[test]
    fn darken_scales_channels_towards_black() {
        let color = Color::new(1.0, 0.5, 0.0, 1.0).darken(0.5);

        assert_eq!(color, Color::new(0.5, 0.25, 0.0, 1.0));
    }
}
