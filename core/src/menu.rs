//! Session settings and the title-screen option menu.

use serde::{Deserialize, Serialize};

use crate::{Direction, LayoutId};

/// Fewest adversaries a level may contain.
pub const MIN_ADVERSARIES: u8 = 1;
/// Most adversaries a level may contain.
pub const MAX_ADVERSARIES: u8 = 10;
/// Fewest pickups a level may contain.
pub const MIN_PICKUPS: u8 = 12;
/// Most pickups a level may contain.
pub const MAX_PICKUPS: u8 = 99;
/// Adversary count forced by arcade progression.
pub const ARCADE_ADVERSARIES: u8 = 4;
/// Pickup count forced by arcade progression.
pub const ARCADE_PICKUPS: u8 = 12;

/// Player-selectable parameters of a playthrough.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Settings {
    /// Maze chosen on the title screen.
    pub layout: LayoutId,
    /// Whether completed levels advance through the maze sequence.
    pub arcade: bool,
    /// Number of adversaries populated per level.
    pub adversaries: u8,
    /// Number of pickups populated per level.
    pub pickups: u8,
    /// Seed feeding every random stream of the session.
    pub seed: u64,
}

impl Settings {
    /// Returns a copy with every field forced into its supported range.
    ///
    /// Arcade progression always plays the first maze with the stock counts.
    #[must_use]
    pub fn clamped(self) -> Self {
        if self.arcade {
            return Self {
                layout: LayoutId::FIRST_MAZE,
                arcade: true,
                adversaries: ARCADE_ADVERSARIES,
                pickups: ARCADE_PICKUPS,
                seed: self.seed,
            };
        }

        let layout = if self.layout.is_maze() {
            self.layout
        } else {
            LayoutId::FIRST_MAZE
        };
        Self {
            layout,
            arcade: false,
            adversaries: self.adversaries.clamp(MIN_ADVERSARIES, MAX_ADVERSARIES),
            pickups: self.pickups.clamp(MIN_PICKUPS, MAX_PICKUPS),
            seed: self.seed,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            layout: LayoutId::FIRST_MAZE,
            arcade: false,
            adversaries: ARCADE_ADVERSARIES,
            pickups: ARCADE_PICKUPS,
            seed: 0x6b63_6d75_6e63_686b,
        }
    }
}

/// Rows of the title-screen option menu, top to bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MenuRow {
    /// Selects the maze layout.
    Maze,
    /// Toggles arcade progression.
    Arcade,
    /// Adjusts the adversary count.
    Adversaries,
    /// Adjusts the pickup count.
    Pickups,
    /// Starts the game.
    Start,
}

impl MenuRow {
    const ORDER: [MenuRow; 5] = [
        MenuRow::Maze,
        MenuRow::Arcade,
        MenuRow::Adversaries,
        MenuRow::Pickups,
        MenuRow::Start,
    ];

    fn index(self) -> usize {
        Self::ORDER
            .iter()
            .position(|row| *row == self)
            .unwrap_or_default()
    }
}

/// Cursor state of the title-screen option menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TitleMenu {
    row: MenuRow,
}

impl TitleMenu {
    /// Places the cursor on the row a fresh title screen highlights.
    #[must_use]
    pub const fn for_settings(settings: &Settings) -> Self {
        let row = if settings.arcade {
            MenuRow::Arcade
        } else {
            MenuRow::Maze
        };
        Self { row }
    }

    /// Row currently highlighted.
    #[must_use]
    pub const fn row(&self) -> MenuRow {
        self.row
    }

    /// Reports whether a horizontal press on the current row starts the game.
    #[must_use]
    pub fn starts_on(&self, direction: Direction) -> bool {
        self.row == MenuRow::Start && matches!(direction, Direction::Left | Direction::Right)
    }

    /// Applies a directional press, returning whether anything changed.
    ///
    /// Vertical presses move the cursor. In arcade mode the cursor only
    /// alternates between the arcade toggle and the start row. Horizontal
    /// presses adjust the highlighted option with silent clamping.
    pub fn navigate(&mut self, settings: &mut Settings, direction: Direction) -> bool {
        let before = (*self, *settings);
        match direction {
            Direction::Up => self.row = self.previous_row(settings.arcade),
            Direction::Down => self.row = self.next_row(settings.arcade),
            Direction::Left => adjust(self.row, settings, -1),
            Direction::Right => adjust(self.row, settings, 1),
        }
        before != (*self, *settings)
    }

    fn previous_row(&self, arcade: bool) -> MenuRow {
        if arcade {
            return if self.row == MenuRow::Start {
                MenuRow::Arcade
            } else {
                self.row
            };
        }
        let index = self.row.index();
        MenuRow::ORDER[index.saturating_sub(1)]
    }

    fn next_row(&self, arcade: bool) -> MenuRow {
        if arcade {
            return if self.row == MenuRow::Arcade {
                MenuRow::Start
            } else {
                self.row
            };
        }
        let index = (self.row.index() + 1).min(MenuRow::ORDER.len() - 1);
        MenuRow::ORDER[index]
    }
}

fn adjust(row: MenuRow, settings: &mut Settings, step: i8) {
    match row {
        MenuRow::Maze => settings.layout = settings.layout.cycle_maze(step),
        MenuRow::Arcade => {
            settings.arcade = !settings.arcade;
            *settings = settings.clamped();
        }
        MenuRow::Adversaries => {
            settings.adversaries = settings
                .adversaries
                .saturating_add_signed(step)
                .clamp(MIN_ADVERSARIES, MAX_ADVERSARIES);
        }
        MenuRow::Pickups => {
            settings.pickups = settings
                .pickups
                .saturating_add_signed(step)
                .clamp(MIN_PICKUPS, MAX_PICKUPS);
        }
        MenuRow::Start => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_forces_counts_into_bounds() {
        let settings = Settings {
            layout: LayoutId::new(3),
            arcade: false,
            adversaries: 40,
            pickups: 3,
            seed: 9,
        }
        .clamped();

        assert_eq!(settings.adversaries, MAX_ADVERSARIES);
        assert_eq!(settings.pickups, MIN_PICKUPS);
        assert_eq!(settings.layout, LayoutId::new(3));
    }

    #[test]
    fn enabling_arcade_resets_maze_and_counts() {
        let mut settings = Settings {
            layout: LayoutId::new(4),
            adversaries: 7,
            pickups: 50,
            ..Settings::default()
        };
        let mut menu = TitleMenu::for_settings(&settings);
        assert!(menu.navigate(&mut settings, Direction::Down));
        assert_eq!(menu.row(), MenuRow::Arcade);

        assert!(menu.navigate(&mut settings, Direction::Right));

        assert!(settings.arcade);
        assert_eq!(settings.layout, LayoutId::FIRST_MAZE);
        assert_eq!(settings.adversaries, ARCADE_ADVERSARIES);
        assert_eq!(settings.pickups, ARCADE_PICKUPS);
    }

    #[test]
    fn arcade_cursor_alternates_between_toggle_and_start() {
        let mut settings = Settings {
            arcade: true,
            ..Settings::default()
        };
        let mut menu = TitleMenu::for_settings(&settings);
        assert_eq!(menu.row(), MenuRow::Arcade);

        assert!(!menu.navigate(&mut settings, Direction::Up));
        assert!(menu.navigate(&mut settings, Direction::Down));
        assert_eq!(menu.row(), MenuRow::Start);
        assert!(!menu.navigate(&mut settings, Direction::Down));
        assert!(menu.navigate(&mut settings, Direction::Up));
        assert_eq!(menu.row(), MenuRow::Arcade);
    }

    #[test]
    fn maze_option_cycles_through_four_layouts() {
        let mut settings = Settings::default();
        let mut menu = TitleMenu::for_settings(&settings);

        let _ = menu.navigate(&mut settings, Direction::Left);
        assert_eq!(settings.layout, LayoutId::new(4));
        let _ = menu.navigate(&mut settings, Direction::Right);
        assert_eq!(settings.layout, LayoutId::FIRST_MAZE);
    }

    #[test]
    fn counts_clamp_silently_while_adjusting() {
        let mut settings = Settings {
            adversaries: MAX_ADVERSARIES,
            ..Settings::default()
        };
        let mut menu = TitleMenu::for_settings(&settings);
        let _ = menu.navigate(&mut settings, Direction::Down);
        let _ = menu.navigate(&mut settings, Direction::Down);
        assert_eq!(menu.row(), MenuRow::Adversaries);

        assert!(!menu.navigate(&mut settings, Direction::Right));
        assert_eq!(settings.adversaries, MAX_ADVERSARIES);

        let _ = menu.navigate(&mut settings, Direction::Down);
        assert!(!menu.navigate(&mut settings, Direction::Left));
        assert_eq!(settings.pickups, MIN_PICKUPS);
    }

    #[test]
    fn start_row_starts_on_horizontal_press() {
        let mut settings = Settings::default();
        let mut menu = TitleMenu::for_settings(&settings);
        for _ in 0..6 {
            let _ = menu.navigate(&mut settings, Direction::Down);
        }

        assert_eq!(menu.row(), MenuRow::Start);
        assert!(menu.starts_on(Direction::Right));
        assert!(!menu.starts_on(Direction::Up));
    }
}
