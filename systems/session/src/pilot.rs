//! Seeded stand-in for a human player used by demos and headless runs.

use munchkin_core::{lattice, Direction, FrameInput, HeldDirections, Phase};
use munchkin_world::{motion, query, GameSession};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Salt mixed into the seed of the pilot stream.
pub const PILOT_SALT: u64 = 0x7069_6c6f_7421_2121;

const CONTINUE_PROBABILITY: f64 = 0.5;
const NAME_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Produces frame input that plays the game without a human.
#[derive(Debug)]
pub struct AutoPilot {
    rng: ChaCha8Rng,
    heading: Option<Direction>,
}

impl AutoPilot {
    /// Creates a pilot whose choices derive from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed ^ PILOT_SALT),
            heading: None,
        }
    }

    /// Chooses the input of the next frame.
    ///
    /// The title starts immediately. During play the pilot wanders the maze
    /// like an adversary, choosing at every aligned point and holding that
    /// heading in between. Name entry types random letters.
    pub fn input(&mut self, session: &GameSession) -> FrameInput {
        match query::phase(session) {
            Phase::Title => FrameInput {
                confirm: true,
                ..FrameInput::default()
            },
            Phase::Playing => {
                let player = query::player(session);
                if lattice::PLAYER.aligned(player.position) {
                    let cell = lattice::PLAYER.cell_of(player.position);
                    let openings = motion::openings(query::maze(session), &lattice::PLAYER, cell);
                    let current = self.heading.unwrap_or(player.facing);
                    self.heading = Some(motion::wander(
                        current,
                        openings,
                        CONTINUE_PROBABILITY,
                        &mut self.rng,
                    ));
                }
                FrameInput {
                    held: self
                        .heading
                        .map_or(HeldDirections::NONE, HeldDirections::only),
                    ..FrameInput::default()
                }
            }
            Phase::NameEntry { .. } => {
                let index = self.rng.gen_range(0..NAME_ALPHABET.len());
                FrameInput {
                    typed: NAME_ALPHABET.get(index).map(|byte| char::from(*byte)),
                    ..FrameInput::default()
                }
            }
            _ => {
                self.heading = None;
                FrameInput::default()
            }
        }
    }
}
