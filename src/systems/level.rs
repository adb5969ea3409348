use bevy_ecs::{
    entity::Entity,
    event::EventWriter,
    query::With,
    resource::Resource,
    system::{Commands, Query, Res, ResMut},
};
use glam::Vec2;
use tracing::{debug, info};

use crate::{
    asset::SpriteAsset,
    config::GameConfig,
    constants::{
        layer,
        layout::{CELEBRATION_SIZE, LEVEL_UP_BANNER_HEIGHT, LEVEL_UP_GRAPHIC_SIZE},
        timing::CELEBRATION_DURATION,
    },
    error::GameError,
    save::SaveStoreResource,
    systems::{
        components::{
            Celebration, DeltaTime, IgnoresPause, Label, LevelLabel, LevelUpBanner, Position, Session, Sprite, Traversal,
        },
        spawner::SpawnTimer,
    },
};

/// Where the level controller is.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub enum LevelStage {
    #[default]
    Playing,
    /// The level-up banner is showing; play resumes once `remaining` runs out.
    LevelTransition { remaining: f32 },
}

pub fn level_text(level: u32) -> String {
    format!("Level {level}")
}

/// Spawns the banner and the celebration run shown on a level-up.
fn spawn_level_up_visuals(commands: &mut Commands, screen_size: Vec2) {
    let center = screen_size / 2.0;

    commands.spawn((
        LevelUpBanner,
        Position(center),
        Sprite {
            asset: SpriteAsset::BannerShort,
            size: Vec2::new(screen_size.x, LEVEL_UP_BANNER_HEIGHT),
            layer: layer::BANNER,
        },
    ));
    commands.spawn((
        LevelUpBanner,
        Position(center),
        Sprite {
            asset: SpriteAsset::LevelUp,
            size: LEVEL_UP_GRAPHIC_SIZE,
            layer: layer::BANNER_GRAPHIC,
        },
    ));

    // Runs from just off the left edge to just off the right edge.
    let start = Vec2::new(-CELEBRATION_SIZE.x / 2.0, center.y);
    let offset = Vec2::new(screen_size.x + CELEBRATION_SIZE.x, 0.0);
    commands.spawn((
        Celebration,
        IgnoresPause,
        Position(start),
        Sprite {
            asset: SpriteAsset::DogGf,
            size: CELEBRATION_SIZE,
            layer: layer::CELEBRATION,
        },
        Traversal::by(offset, CELEBRATION_DURATION),
    ));
}

/// Advances the level once enough obstacles are cleared, then resumes play after the banner.
#[allow(clippy::too_many_arguments)]
pub fn level_system(
    mut commands: Commands,
    mut stage: ResMut<LevelStage>,
    mut session: ResMut<Session>,
    mut timer: ResMut<SpawnTimer>,
    mut store: ResMut<SaveStoreResource>,
    mut errors: EventWriter<GameError>,
    config: Res<GameConfig>,
    dt: Res<DeltaTime>,
    mut label: Query<&mut Label, With<LevelLabel>>,
    banners: Query<Entity, With<LevelUpBanner>>,
) {
    let new_stage = match *stage {
        LevelStage::Playing => {
            if session.paused || session.game_over || session.obstacles_cleared < session.obstacles_required {
                return;
            }

            session.level += 1;
            session.obstacles_cleared = 0;
            session.paused = true;
            info!(level = session.level, "Level up");

            for mut label in label.iter_mut() {
                label.text = level_text(session.level);
            }

            if let Err(e) = store.save(session.level) {
                errors.write(e.into());
            }

            spawn_level_up_visuals(&mut commands, config.screen_size);

            LevelStage::LevelTransition {
                remaining: config.level_up_pause,
            }
        }
        LevelStage::LevelTransition { remaining } => {
            if remaining > dt.0 {
                LevelStage::LevelTransition {
                    remaining: remaining - dt.0,
                }
            } else {
                for entity in banners.iter() {
                    commands.entity(entity).despawn();
                }

                session.paused = false;
                session.obstacles_cleared = 0;
                timer.restart(session.level);
                debug!(level = session.level, interval = timer.interval, "Level started");

                LevelStage::Playing
            }
        }
    };

    *stage = new_stage;
}
