use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bevy_ecs::query::With;
use comet::{
    asset::SpriteAsset,
    config::GameConfig,
    error::{GameError, PersistenceError},
    game::Game,
    systems::{
        Celebration, ControlTarget, Label, LevelLabel, LevelStage, LevelUpBanner, Obstacle, OverlayElement,
        OverlayKind, Player, Position, Session, Sprite,
    },
};
use glam::Vec2;
use speculoos::prelude::*;

mod common;

const OPEN_SKY: Vec2 = Vec2::new(200.0, 600.0);

fn level_label(game: &mut Game) -> Option<String> {
    game.world
        .query_filtered::<&Label, With<LevelLabel>>()
        .iter(&game.world)
        .next()
        .map(|label| label.text.clone())
}

fn player_sprite(game: &mut Game) -> Option<SpriteAsset> {
    game.world
        .query_filtered::<&Sprite, With<Player>>()
        .iter(&game.world)
        .next()
        .map(|sprite| sprite.asset)
}

/// Runs a level-1 game into a collision with two barks already counted.
fn game_over_with_two_barks() -> (Game, comet::save::MemorySaveStore) {
    let (mut game, store) = common::new_game(1);
    common::place_obstacle(&mut game, 0, 140.0);

    game.tap(OPEN_SKY);
    game.tap(OPEN_SKY);
    game.tick(common::DT);

    (game, store)
}

mod scene_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fresh_player_sees_tutorial() {
        let (mut game, _) = common::new_game(0);

        assert_that(&game.overlay().kind()).is_equal_to(Some(OverlayKind::Tutorial));
        assert_that(&game.session().paused).is_true();
        assert_that(&level_label(&mut game)).is_equal_to(Some("Level 0".to_string()));
    }

    #[test]
    fn returning_player_skips_tutorial() {
        let (mut game, _) = common::new_game(3);

        assert_that(&game.overlay().is_active()).is_false();
        assert_that(&game.session().level).is_equal_to(3);
        assert_that(&game.session().paused).is_false();
        assert_that(&level_label(&mut game)).is_equal_to(Some("Level 3".to_string()));
    }

    #[test]
    fn tutorial_holds_the_game() {
        let (mut game, _) = common::new_game(0);

        game.tap(OPEN_SKY);
        common::tick_times(&mut game, 4);

        assert_that(&game.obstacles()).is_empty();
        assert_that(&game.session().press_count).is_equal_to(0);
        assert_that(&game.overlay().kind()).is_equal_to(Some(OverlayKind::Tutorial));
    }

    #[test]
    fn closing_tutorial_starts_play_and_saves() {
        let (mut game, store) = common::new_game(0);

        let close = common::control_center(&game, ControlTarget::Close);
        game.tap(close);
        game.tick(common::DT);

        assert_that(&game.overlay().is_active()).is_false();
        assert_that(&game.session().paused).is_false();
        assert_that(&store.saved_level()).is_equal_to(Some(0));
        assert_that(&common::count::<OverlayElement>(&mut game.world)).is_equal_to(0);
        assert_that(&game.obstacles()).has_length(1);
    }

    #[test]
    fn obstacles_spawn_on_level_cadence() {
        let (mut game, _) = common::new_game(1);

        // First obstacle right away, the next 2.5s later.
        game.tick(common::DT);
        assert_that(&game.obstacles()).has_length(1);
        common::tick_times(&mut game, 4);

        let obstacles = game.obstacles();
        assert_that(&obstacles).has_length(2);
        assert_eq!(obstacles[1], (Obstacle { serial: 1 }, Vec2::new(420.0, 50.0)));
    }

    #[test]
    fn bark_sprite_reverts_after_a_moment() {
        let (mut game, _) = common::new_game(1);

        game.tap(OPEN_SKY);
        game.tick(0.125);
        assert_that(&player_sprite(&mut game)).is_equal_to(Some(SpriteAsset::DogBark));

        game.tick(0.125);
        assert_that(&player_sprite(&mut game)).is_equal_to(Some(SpriteAsset::Dog));
    }
}

mod frame_time_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn long_frame_spawns_a_single_obstacle() {
        let (mut game, _) = common::new_game(1);
        game.tick(common::DT);

        game.tick(600.0);

        // The first obstacle has long crossed the screen; one fresh obstacle replaces it.
        let obstacles = game.obstacles();
        assert_that(&obstacles).has_length(1);
        assert_eq!(obstacles[0], (Obstacle { serial: 1 }, Vec2::new(420.0, 50.0)));
    }

    #[test]
    fn spawning_survives_a_nan_frame() {
        let (mut game, _) = common::new_game(1);
        game.tick(common::DT);
        let before = game.obstacles();

        game.tick(f32::NAN);
        assert_eq!(game.obstacles(), before);

        // 2.0s were left on the timer before the bad frame.
        common::tick_times(&mut game, 4);

        let obstacles = game.obstacles();
        assert_that(&obstacles).has_length(2);
        assert_eq!(obstacles[1], (Obstacle { serial: 1 }, Vec2::new(420.0, 50.0)));
    }

    #[test]
    fn infinite_and_negative_frames_are_empty() {
        let (mut game, _) = common::new_game(1);
        game.tick(common::DT);
        let before = game.obstacles();

        game.tick(f32::INFINITY);
        game.tick(-1.0);

        assert_eq!(game.obstacles(), before);
        assert_that(&game.session().game_over).is_false();
    }
}

mod level_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn clear_ten(game: &mut Game) {
        for serial in 0..10 {
            common::place_obstacle(game, serial, 400.0);
        }
        for _ in 0..30 {
            game.tap(OPEN_SKY);
        }
        game.tick(common::DT);
    }

    #[test]
    fn ten_clears_level_up() {
        let (mut game, store) = common::new_game(1);

        clear_ten(&mut game);

        assert_that(&game.session().level).is_equal_to(2);
        assert_that(&game.session().obstacles_cleared).is_equal_to(0);
        assert_that(&store.saved_level()).is_equal_to(Some(2));
        assert_that(&level_label(&mut game)).is_equal_to(Some("Level 2".to_string()));
        assert_that(&common::count::<LevelUpBanner>(&mut game.world)).is_equal_to(2);
        assert_that(&matches!(game.stage(), LevelStage::LevelTransition { .. })).is_true();
    }

    #[test]
    fn level_up_freezes_obstacles_but_not_celebration() {
        let (mut game, _) = common::new_game(1);
        clear_ten(&mut game);
        let frozen = game.obstacles();

        common::tick_times(&mut game, 3);

        assert_eq!(game.obstacles(), frozen);
        let celebration: Vec<Vec2> = game
            .world
            .query_filtered::<&Position, With<Celebration>>()
            .iter(&game.world)
            .map(|position| position.0)
            .collect();
        assert_eq!(celebration, vec![Vec2::new(138.75, 422.0)]);
    }

    #[test]
    fn taps_during_level_up_are_ignored() {
        let (mut game, _) = common::new_game(1);
        clear_ten(&mut game);

        game.tap(OPEN_SKY);
        game.tick(common::DT);

        assert_that(&game.session().press_count).is_equal_to(0);
    }

    #[test]
    fn play_resumes_after_banner() {
        let (mut game, _) = common::new_game(1);
        clear_ten(&mut game);

        common::tick_times(&mut game, 3);
        assert_that(&game.session().paused).is_true();

        game.tick(common::DT);

        assert_that(&game.stage()).is_equal_to(LevelStage::Playing);
        assert_that(&game.session().paused).is_false();
        assert_that(&common::count::<LevelUpBanner>(&mut game.world)).is_equal_to(0);
    }
}

mod game_over_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn collision_after_two_barks_ends_the_game() {
        let (game, _) = game_over_with_two_barks();

        assert_that(&game.session().game_over).is_true();
        assert_that(&game.session().press_count).is_equal_to(2);
        assert_that(&game.overlay().kind()).is_equal_to(Some(OverlayKind::GameOver));
    }

    #[test]
    fn game_over_freezes_the_world() {
        let (mut game, _) = game_over_with_two_barks();
        let frozen = game.obstacles();

        common::tick_times(&mut game, 4);

        assert_eq!(game.obstacles(), frozen);
    }

    #[test]
    fn taps_off_the_controls_do_nothing() {
        let (mut game, _) = game_over_with_two_barks();

        game.tap(OPEN_SKY);
        game.tick(common::DT);

        assert_that(&game.session().press_count).is_equal_to(2);
        assert_that(&game.overlay().kind()).is_equal_to(Some(OverlayKind::GameOver));
    }

    #[test]
    fn replay_starts_over_from_level_zero() {
        let (mut game, store) = game_over_with_two_barks();

        let replay = common::control_center(&game, ControlTarget::Replay);
        game.tap(replay);
        game.tick(common::DT);

        assert_eq!(game.session(), &Session::new(0, 10));
        assert_that(&game.stage()).is_equal_to(LevelStage::Playing);
        assert_that(&game.overlay().is_active()).is_false();
        assert_that(&common::count::<OverlayElement>(&mut game.world)).is_equal_to(0);
        assert_that(&level_label(&mut game)).is_equal_to(Some("Level 0".to_string()));
        assert_that(&player_sprite(&mut game)).is_equal_to(Some(SpriteAsset::Dog));
        assert_that(&store.saved_level()).is_equal_to(Some(1));

        // Only the obstacle spawned right after the reset remains.
        let obstacles = game.obstacles();
        assert_that(&obstacles).has_length(1);
        assert_eq!(obstacles[0].1, Vec2::new(420.0, 50.0));
    }

    #[test]
    fn home_hands_control_to_host() {
        let (game, _) = game_over_with_two_barks();
        let went_home = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&went_home);
        let mut game = game.with_home_callback(move || flag.store(true, Ordering::Relaxed));

        let home = common::control_center(&game, ControlTarget::Home);
        game.tap(home);
        game.tick(common::DT);

        assert_that(&went_home.load(Ordering::Relaxed)).is_true();
        assert_that(&game.overlay().kind()).is_equal_to(Some(OverlayKind::GameOver));
    }

    #[test]
    fn home_without_callback_is_harmless() {
        let (mut game, _) = game_over_with_two_barks();

        let home = common::control_center(&game, ControlTarget::Home);
        game.tap(home);
        game.tick(common::DT);

        assert_that(&game.session().game_over).is_true();
    }
}

mod persistence_tests {
    use super::*;

    #[test]
    fn unreadable_save_starts_at_level_zero() {
        let mut game = Game::new(common::FailingSaveStore, GameConfig::default()).expect("game should build");

        assert_that(&game.session().level).is_equal_to(0);
        assert_that(&game.overlay().kind()).is_equal_to(Some(OverlayKind::Tutorial));

        let errors = game.drain_errors();
        assert_that(&errors).has_length(1);
        assert_that(&matches!(
            errors[0],
            GameError::Persistence(PersistenceError::Unavailable(_))
        ))
        .is_true();
        assert_that(&game.drain_errors()).is_empty();
    }

    #[test]
    fn failed_save_is_reported_and_play_continues() {
        let mut game = Game::new(common::FailingSaveStore, GameConfig::default()).expect("game should build");
        game.drain_errors();

        let close = common::control_center(&game, ControlTarget::Close);
        game.tap(close);
        game.tick(common::DT);

        assert_that(&game.drain_errors()).has_length(1);
        assert_that(&game.session().paused).is_false();
    }
}
