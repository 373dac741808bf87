//! Keyboard sampling.

use macroquad::input::{get_char_pressed, is_key_down, is_key_pressed, KeyCode};
use munchkin_core::{Direction, FrameInput, HeldDirections};

/// Keys observed during a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct KeyObservations {
    pub(crate) held: [bool; 4],
    pub(crate) pressed: [bool; 4],
    pub(crate) enter: bool,
    pub(crate) escape: bool,
    pub(crate) fullscreen: bool,
    pub(crate) typed: Option<char>,
}

impl KeyObservations {
    pub(crate) fn poll() -> Self {
        let mut observations = Self {
            enter: is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::KpEnter),
            escape: is_key_pressed(KeyCode::Escape),
            fullscreen: is_key_pressed(KeyCode::F),
            ..Self::default()
        };
        for (index, direction) in Direction::ALL.into_iter().enumerate() {
            let key = key_for(direction);
            observations.held[index] = is_key_down(key);
            observations.pressed[index] = is_key_pressed(key);
        }

        // Drain the queue so stale characters never leak into later frames.
        while let Some(character) = get_char_pressed() {
            if observations.typed.is_none() && is_name_character(character) {
                observations.typed = Some(character);
            }
        }
        observations
    }
}

fn key_for(direction: Direction) -> KeyCode {
    match direction {
        Direction::Left => KeyCode::Left,
        Direction::Right => KeyCode::Right,
        Direction::Up => KeyCode::Up,
        Direction::Down => KeyCode::Down,
    }
}

fn is_name_character(character: char) -> bool {
    character.is_ascii_graphic() || character == ' '
}

/// Translates raw key observations into simulation input.
///
/// While a name is typed, `F` is a letter rather than the fullscreen toggle.
pub(crate) fn frame_input_from_observations(
    observations: &KeyObservations,
    typing_name: bool,
) -> (FrameInput, bool) {
    let mut held = HeldDirections::NONE;
    let mut pressed = None;
    for (index, direction) in Direction::ALL.into_iter().enumerate() {
        if observations.held[index] {
            held = held.with(direction);
        }
        if pressed.is_none() && observations.pressed[index] {
            pressed = Some(direction);
        }
    }

    let input = FrameInput {
        held,
        pressed,
        confirm: observations.enter,
        cancel: observations.escape,
        typed: observations.typed.filter(|_| typing_name),
    };
    let toggle_fullscreen = observations.fullscreen && !typing_name;
    (input, toggle_fullscreen)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(direction: Direction) -> usize {
        Direction::ALL
            .iter()
            .position(|candidate| *candidate == direction)
            .expect("direction listed")
    }

    #[test]
    fn arrows_map_to_held_and_pressed_directions() {
        let mut observations = KeyObservations::default();
        observations.held[index_of(Direction::Up)] = true;
        observations.held[index_of(Direction::Left)] = true;
        observations.pressed[index_of(Direction::Up)] = true;

        let (input, _) = frame_input_from_observations(&observations, false);

        assert!(input.held.contains(Direction::Up));
        assert!(input.held.contains(Direction::Left));
        assert!(!input.held.contains(Direction::Down));
        assert_eq!(input.pressed, Some(Direction::Up));
    }

    #[test]
    fn enter_and_escape_become_confirm_and_cancel() {
        let observations = KeyObservations {
            enter: true,
            escape: true,
            ..KeyObservations::default()
        };

        let (input, toggle) = frame_input_from_observations(&observations, false);

        assert!(input.confirm);
        assert!(input.cancel);
        assert!(!toggle);
    }

    #[test]
    fn typed_letters_reach_the_simulation_only_during_name_entry() {
        let observations = KeyObservations {
            fullscreen: true,
            typed: Some('f'),
            ..KeyObservations::default()
        };

        let (playing, toggle_while_playing) = frame_input_from_observations(&observations, false);
        let (typing, toggle_while_typing) = frame_input_from_observations(&observations, true);

        assert_eq!(playing.typed, None);
        assert!(toggle_while_playing);
        assert_eq!(typing.typed, Some('f'));
        assert!(!toggle_while_typing);
    }

    #[test]
    fn control_characters_are_not_name_characters() {
        assert!(is_name_character('m'));
        assert!(is_name_character('7'));
        assert!(!is_name_character('\r'));
        assert!(!is_name_character('\u{8}'));
    }
}
