//! Score keeping and the high-score name buffer.

use munchkin_core::NAME_LENGTH;

const PLACEHOLDER: char = '?';

/// Running score, best score, and the name attached to the best score.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scoreboard {
    score: u32,
    high_score: u32,
    broken: bool,
    name: [char; NAME_LENGTH],
}

impl Scoreboard {
    /// Creates an empty scoreboard with a placeholder name.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            high_score: 0,
            broken: false,
            name: [PLACEHOLDER; NAME_LENGTH],
        }
    }

    /// Current score.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Best score of the session.
    #[must_use]
    pub const fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Reports whether the current game surpassed the previous best.
    #[must_use]
    pub const fn broken(&self) -> bool {
        self.broken
    }

    /// Adds points and lifts the high score with them.
    ///
    /// Returns `true` only on the award that first breaks the previous best.
    pub fn award(&mut self, points: u32) -> bool {
        self.score = self.score.saturating_add(points);
        if self.score <= self.high_score {
            return false;
        }
        self.high_score = self.score;
        let first = !self.broken;
        self.broken = true;
        first
    }

    /// Clears the running score for a new game, keeping the best.
    pub fn reset_game(&mut self) {
        self.score = 0;
        self.broken = false;
    }

    /// Resets the name buffer to placeholders.
    pub fn clear_name(&mut self) {
        self.name = [PLACEHOLDER; NAME_LENGTH];
    }

    /// Writes `character` into `slot`, returning whether the slot exists.
    pub fn write_name(&mut self, slot: usize, character: char) -> bool {
        match self.name.get_mut(slot) {
            Some(entry) => {
                *entry = character;
                true
            }
            None => false,
        }
    }

    /// Name attached to the high score.
    #[must_use]
    pub fn name(&self) -> String {
        self.name.iter().collect()
    }
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new()
    }
}

/// Reports whether a typed character may appear in a name.
#[must_use]
pub const fn accepts(character: char) -> bool {
    character.is_ascii_lowercase() || character == ' '
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_score_follows_score_immediately() {
        let mut board = Scoreboard::new();

        assert!(board.award(3));
        assert!(!board.award(1));
        assert_eq!(board.high_score(), 4);

        board.reset_game();
        assert!(!board.award(4));
        assert!(!board.broken());
        assert!(board.award(1));
        assert_eq!(board.high_score(), 5);
    }

    #[test]
    fn name_buffer_overwrites_slots() {
        let mut board = Scoreboard::new();
        assert_eq!(board.name(), "??????");

        assert!(board.write_name(0, 'k'));
        assert!(board.write_name(5, 'c'));
        assert!(!board.write_name(6, 'x'));
        assert_eq!(board.name(), "k????c");

        board.clear_name();
        assert_eq!(board.name(), "??????");
    }

    #[test]
    fn only_lowercase_letters_and_space_are_accepted() {
        assert!(accepts('a'));
        assert!(accepts(' '));
        assert!(!accepts('A'));
        assert!(!accepts('1'));
    }
}
