//! Runtime-tunable game settings.

use std::env;
use std::path::PathBuf;

use bevy_ecs::resource::Resource;
use glam::Vec2;
use tracing::warn;

use crate::constants::{self, timing};

/// Settings shared by every system, inserted once when the game is built.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub screen_size: Vec2,
    /// Obstacles to clear per level for a fresh scene.
    pub obstacles_per_level: u32,
    /// Obstacles to clear per level after pressing replay.
    pub replay_obstacles_per_level: u32,
    pub barks_per_clear: u8,
    /// How long the level-up banner holds the game before the next level starts.
    pub level_up_pause: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_size: constants::SCREEN_SIZE,
            obstacles_per_level: constants::OBSTACLES_PER_LEVEL,
            replay_obstacles_per_level: constants::OBSTACLES_PER_LEVEL,
            barks_per_clear: constants::BARKS_PER_CLEAR,
            level_up_pause: timing::LEVEL_UP_PAUSE,
        }
    }
}

/// Settings for the headless host binary.
#[derive(Debug, Clone, PartialEq)]
pub struct HostConfig {
    pub save_path: PathBuf,
    pub demo_seconds: f32,
}

impl HostConfig {
    pub const SAVE_PATH_VAR: &'static str = "COMET_SAVE_PATH";
    pub const DEMO_SECONDS_VAR: &'static str = "COMET_DEMO_SECONDS";

    const DEFAULT_SAVE_FILE: &'static str = "comet-save.json";
    const DEFAULT_DEMO_SECONDS: f32 = 30.0;

    pub fn from_env() -> Self {
        let save_path = env::var_os(Self::SAVE_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_SAVE_FILE));

        let demo_seconds = match env::var(Self::DEMO_SECONDS_VAR) {
            Ok(raw) => raw.parse::<f32>().unwrap_or_else(|_| {
                warn!(value = raw, "Ignoring unparsable {}", Self::DEMO_SECONDS_VAR);
                Self::DEFAULT_DEMO_SECONDS
            }),
            Err(_) => Self::DEFAULT_DEMO_SECONDS,
        };

        Self { save_path, demo_seconds }
    }
}
