//! This module contains all the constants used in the game.
//!
//! Coordinates follow the scene convention: origin at the bottom-left corner,
//! y increasing upwards, positions refer to the centre of an entity.

use std::time::Duration;

use glam::Vec2;

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The logical size of the screen, in points.
pub const SCREEN_SIZE: Vec2 = Vec2::new(390.0, 844.0);

/// Number of obstacles that must be cleared to advance a level.
pub const OBSTACLES_PER_LEVEL: u32 = 10;

/// Number of barks needed to clear one obstacle.
pub const BARKS_PER_CLEAR: u8 = 3;

/// Sizes and anchors of the scene's fixed entities.
pub mod layout {
    use glam::Vec2;

    /// The player and obstacles share a baseline.
    pub const BASELINE_Y: f32 = 50.0;

    pub const GROUND_HEIGHT: f32 = 50.0;

    pub const PLAYER_SIZE: Vec2 = Vec2::splat(60.0);
    /// Horizontal offset of the player from the centre of the screen.
    pub const PLAYER_OFFSET_X: f32 = -100.0;

    pub const OBSTACLE_SIZE: Vec2 = Vec2::splat(60.0);

    pub const CELEBRATION_SIZE: Vec2 = Vec2::splat(60.0);

    /// Level label anchor, measured from the top-left corner.
    pub const LEVEL_LABEL_INSET: Vec2 = Vec2::new(75.0, 50.0);
    pub const LABEL_FONT_SIZE: f32 = 18.0;

    pub const CONTROL_SIZE: Vec2 = Vec2::splat(30.0);

    /// Game-over panel: full width, this tall, raised above the centre.
    pub const GAME_OVER_PANEL_HEIGHT: f32 = 250.0;
    pub const GAME_OVER_PANEL_RAISE: f32 = 35.0;
    pub const GAME_OVER_GRAPHIC_SIZE: Vec2 = Vec2::new(200.0, 100.0);
    pub const GAME_OVER_GRAPHIC_RAISE: f32 = 50.0;
    /// Replay sits right of centre, home left of it, both below the graphic.
    pub const GAME_OVER_CONTROL_OFFSET: Vec2 = Vec2::new(75.0, -30.0);

    pub const TUTORIAL_PANEL_INSET: f32 = 50.0;
    pub const TUTORIAL_PANEL_HEIGHT: f32 = 600.0;
    pub const TUTORIAL_FIRST_LINE_Y: f32 = 100.0;
    pub const TUTORIAL_LINE_SPACING: f32 = 60.0;
    /// Close control inset from the top-right corner.
    pub const TUTORIAL_CLOSE_INSET: Vec2 = Vec2::new(65.0, 65.0);

    pub const LEVEL_UP_BANNER_HEIGHT: f32 = 250.0;
    pub const LEVEL_UP_GRAPHIC_SIZE: Vec2 = Vec2::new(300.0, 150.0);
}

/// Draw order of scene elements.
pub mod layer {
    pub const BACKGROUND: i16 = -1;
    pub const GAMEPLAY: i16 = 0;
    pub const BANNER: i16 = 0;
    pub const BANNER_GRAPHIC: i16 = 1;
    pub const CELEBRATION: i16 = 2;
    pub const GAME_OVER_CONTROLS: i16 = 2;
    pub const TUTORIAL_PANEL: i16 = 10;
    pub const TUTORIAL_CONTENT: i16 = 11;
}

/// Level curve and animation timings, in seconds.
pub mod timing {
    /// Spawn interval at level 0, shortened by `LEVEL_STEP` per level.
    pub const BASE_SPAWN_INTERVAL: f32 = 3.0;
    pub const MIN_SPAWN_INTERVAL: f32 = 1.0;
    /// Traversal duration at level 0, shortened by `LEVEL_STEP` per level.
    pub const BASE_TRAVERSAL_DURATION: f32 = 4.0;
    pub const MIN_TRAVERSAL_DURATION: f32 = 2.0;
    pub const LEVEL_STEP: f32 = 0.5;

    pub const BARK_DURATION: f32 = 0.2;
    pub const CELEBRATION_DURATION: f32 = 4.0;
    pub const LEVEL_UP_PAUSE: f32 = 2.0;
}

pub const TUTORIAL_LINES: [&str; 4] = [
    "Get Comet to his girlfriend!",
    "Tap to yap!",
    "Avoid the obstacles.",
    "3 barks clear an obstacle.",
];
