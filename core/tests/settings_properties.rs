use munchkin_core::{
    Direction, LayoutId, MenuRow, Settings, TitleMenu, MAX_ADVERSARIES, MAX_PICKUPS,
    MIN_ADVERSARIES, MIN_PICKUPS,
};
use proptest::prelude::*;

fn settings() -> impl Strategy<Value = Settings> {
    (any::<u8>(), any::<bool>(), any::<u8>(), any::<u8>(), any::<u64>()).prop_map(
        |(layout, arcade, adversaries, pickups, seed)| Settings {
            layout: LayoutId::new(layout),
            arcade,
            adversaries,
            pickups,
            seed,
        },
    )
}

fn presses() -> impl Strategy<Value = Vec<Direction>> {
    prop::collection::vec(
        prop_oneof![
            Just(Direction::Left),
            Just(Direction::Right),
            Just(Direction::Up),
            Just(Direction::Down),
        ],
        0..64,
    )
}

proptest! {
    #[test]
    fn clamping_is_idempotent_and_in_range(raw in settings()) {
        let clamped = raw.clamped();

        prop_assert_eq!(clamped.clamped(), clamped);
        prop_assert!(clamped.layout.is_maze());
        prop_assert!((MIN_ADVERSARIES..=MAX_ADVERSARIES).contains(&clamped.adversaries));
        prop_assert!((MIN_PICKUPS..=MAX_PICKUPS).contains(&clamped.pickups));
        prop_assert_eq!(clamped.seed, raw.seed);
    }

    #[test]
    fn menu_navigation_keeps_settings_valid(raw in settings(), presses in presses()) {
        let mut settings = raw.clamped();
        let mut menu = TitleMenu::for_settings(&settings);

        for direction in presses {
            let _ = menu.navigate(&mut settings, direction);

            prop_assert_eq!(settings.clamped(), settings);
            if settings.arcade {
                prop_assert!(matches!(menu.row(), MenuRow::Arcade | MenuRow::Start));
            }
        }
    }
}
