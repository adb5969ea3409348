use bevy_ecs::{
    resource::Resource,
    system::{Commands, Res, ResMut},
};
use glam::Vec2;
use tracing::debug;

use crate::{
    asset::SpriteAsset,
    config::GameConfig,
    constants::{
        layer,
        layout::{BASELINE_Y, OBSTACLE_SIZE},
        timing::{
            BASE_SPAWN_INTERVAL, BASE_TRAVERSAL_DURATION, LEVEL_STEP, MIN_SPAWN_INTERVAL, MIN_TRAVERSAL_DURATION,
        },
    },
    systems::components::{
        DeltaTime, Obstacle, ObstacleBundle, PhysicsBody, PhysicsCategory, Position, Session, Sprite, Traversal,
    },
};

/// Seconds between two obstacles at the given level.
pub fn spawn_interval(level: u32) -> f32 {
    (BASE_SPAWN_INTERVAL - level as f32 * LEVEL_STEP).max(MIN_SPAWN_INTERVAL)
}

/// Seconds an obstacle takes to cross the screen at the given level.
pub fn traversal_duration(level: u32) -> f32 {
    (BASE_TRAVERSAL_DURATION - level as f32 * LEVEL_STEP).max(MIN_TRAVERSAL_DURATION)
}

/// Paces obstacle creation for the current level.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SpawnTimer {
    pub interval: f32,
    /// Seconds until the next obstacle; at or below zero means spawn now.
    pub until_next: f32,
    next_serial: u64,
}

impl SpawnTimer {
    /// A timer that spawns on its first tick, then every interval.
    pub fn new(level: u32) -> Self {
        Self {
            interval: spawn_interval(level),
            until_next: 0.0,
            next_serial: 0,
        }
    }

    /// Restarts the cadence for `level`. Serials keep increasing so spawn order stays total.
    pub fn restart(&mut self, level: u32) {
        self.interval = spawn_interval(level);
        self.until_next = 0.0;
    }

    /// Advances the timer, returning whether an obstacle is due.
    ///
    /// At most one obstacle is due per tick. Periods skipped by a long frame are
    /// dropped, keeping only the phase within the current period.
    pub fn tick(&mut self, seconds: f32) -> bool {
        self.until_next -= seconds;
        if self.until_next > 0.0 {
            return false;
        }

        let remainder = self.until_next.rem_euclid(self.interval);
        self.until_next = if remainder > 0.0 { remainder } else { self.interval };
        true
    }

    fn take_serial(&mut self) -> u64 {
        let serial = self.next_serial;
        self.next_serial += 1;
        serial
    }
}

/// Builds an obstacle entering from the right edge and crossing to beyond the left edge.
pub fn obstacle_bundle(serial: u64, level: u32, screen_size: Vec2) -> ObstacleBundle {
    let start = Vec2::new(screen_size.x + OBSTACLE_SIZE.x / 2.0, BASELINE_Y);
    let offset = Vec2::new(-screen_size.x - OBSTACLE_SIZE.x, 0.0);

    ObstacleBundle {
        obstacle: Obstacle { serial },
        position: Position(start),
        sprite: Sprite {
            asset: SpriteAsset::Shrub,
            size: OBSTACLE_SIZE,
            layer: layer::GAMEPLAY,
        },
        body: PhysicsBody::actor(PhysicsCategory::SHRUB),
        traversal: Traversal::by(offset, traversal_duration(level)),
    }
}

/// Spawns at most one obstacle per frame on the level's cadence. Nothing spawns once the game is over.
pub fn obstacle_spawn_system(
    mut commands: Commands,
    mut timer: ResMut<SpawnTimer>,
    session: Res<Session>,
    config: Res<GameConfig>,
    dt: Res<DeltaTime>,
) {
    if session.game_over {
        return;
    }

    if !timer.tick(dt.0) {
        return;
    }

    let serial = timer.take_serial();
    let entity = commands.spawn(obstacle_bundle(serial, session.level, config.screen_size)).id();
    debug!(?entity, serial, level = session.level, "Obstacle spawned");
}
