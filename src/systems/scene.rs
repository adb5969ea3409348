use bevy_ecs::system::{Commands, Res, ResMut};
use glam::Vec2;
use tracing::debug;

use crate::{
    asset::SpriteAsset,
    config::GameConfig,
    constants::{
        layer,
        layout::{BASELINE_Y, GROUND_HEIGHT, LABEL_FONT_SIZE, LEVEL_LABEL_INSET, PLAYER_OFFSET_X, PLAYER_SIZE},
    },
    systems::{
        components::{
            Ground, Label, LevelLabel, PhysicsBody, PhysicsCategory, Player, PlayerBundle, Position, Session, SolidColor,
            Sprite,
        },
        level::level_text,
        overlay::{spawn_tutorial_overlay, ActiveOverlay},
    },
};

pub const GROUND_COLOR: [u8; 3] = [184, 185, 236];

pub fn player_bundle(screen_size: Vec2) -> PlayerBundle {
    PlayerBundle {
        player: Player,
        position: Position(Vec2::new(screen_size.x / 2.0 + PLAYER_OFFSET_X, BASELINE_Y)),
        sprite: Sprite {
            asset: SpriteAsset::Dog,
            size: PLAYER_SIZE,
            layer: layer::GAMEPLAY,
        },
        body: PhysicsBody::actor(PhysicsCategory::DOG),
    }
}

/// Builds the scene when it is entered: backdrop, ground, player and level label.
///
/// A player who has never got past level 0 is greeted with the tutorial, which pauses play.
pub fn scene_setup_system(
    mut commands: Commands,
    mut session: ResMut<Session>,
    mut overlay: ResMut<ActiveOverlay>,
    config: Res<GameConfig>,
) {
    let screen_size = config.screen_size;

    commands.spawn((
        Position(screen_size / 2.0),
        Sprite {
            asset: SpriteAsset::Background,
            size: screen_size,
            layer: layer::BACKGROUND,
        },
    ));

    commands.spawn((
        Ground,
        Position(Vec2::new(screen_size.x / 2.0, GROUND_HEIGHT / 2.0)),
        SolidColor {
            rgb: GROUND_COLOR,
            size: Vec2::new(screen_size.x, GROUND_HEIGHT),
        },
        PhysicsBody::fixed(PhysicsCategory::GROUND),
    ));

    commands.spawn(player_bundle(screen_size));

    commands.spawn((
        LevelLabel,
        Position(Vec2::new(LEVEL_LABEL_INSET.x, screen_size.y - LEVEL_LABEL_INSET.y)),
        Label {
            text: level_text(session.level),
            font_size: LABEL_FONT_SIZE,
            layer: layer::GAMEPLAY,
        },
    ));

    if session.level == 0 {
        *overlay = spawn_tutorial_overlay(&mut commands, screen_size);
        session.paused = true;
    }

    debug!(level = session.level, tutorial = overlay.is_active(), "Scene set up");
}
