//! Axis-aligned hitboxes used for consumption and capture checks.

use munchkin_core::Position;

/// Half-open rectangle in sub-units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hitbox {
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
}

impl Hitbox {
    /// Creates a box offset from `origin` by `inset` with the provided size.
    #[must_use]
    pub const fn new(origin: Position, inset: (i32, i32), size: (i32, i32)) -> Self {
        let left = origin.x + inset.0;
        let top = origin.y + inset.1;
        Self {
            left,
            top,
            right: left + size.0,
            bottom: top + size.1,
        }
    }

    /// Reports whether two boxes share any area.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }
}

/// Body of a pickup.
#[must_use]
pub const fn pickup(position: Position) -> Hitbox {
    Hitbox::new(position, (0, 0), (15, 10))
}

/// Mouth of the player tested against pickups.
#[must_use]
pub const fn player_against_pickups(position: Position) -> Hitbox {
    Hitbox::new(position, (10, 10), (10, 10))
}

/// Body of an adversary.
#[must_use]
pub const fn adversary(position: Position) -> Hitbox {
    Hitbox::new(position, (0, 0), (40, 40))
}

/// Body of the player tested against adversaries.
#[must_use]
pub const fn player_against_adversaries(position: Position) -> Hitbox {
    Hitbox::new(position, (10, 10), (20, 20))
}
