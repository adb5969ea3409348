//! Persistence of the level the player has reached.
//!
//! The game only ever stores one integer. Stores are injected so tests can use
//! an in-memory one and the host can pick where the file lives.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bevy_ecs::resource::Resource;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::PersistenceError;

pub trait SaveStore: Send + Sync {
    /// Returns `None` when nothing has been saved yet.
    fn load_level(&self) -> Result<Option<u32>, PersistenceError>;

    fn save_level(&mut self, level: u32) -> Result<(), PersistenceError>;
}

/// Store backed by shared memory. Clones observe each other's writes.
#[derive(Debug, Clone, Default)]
pub struct MemorySaveStore {
    level: Arc<Mutex<Option<u32>>>,
}

impl MemorySaveStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(level: u32) -> Self {
        Self {
            level: Arc::new(Mutex::new(Some(level))),
        }
    }

    /// The last level written, if any.
    pub fn saved_level(&self) -> Option<u32> {
        *self.level.lock()
    }
}

impl SaveStore for MemorySaveStore {
    fn load_level(&self) -> Result<Option<u32>, PersistenceError> {
        Ok(*self.level.lock())
    }

    fn save_level(&mut self, level: u32) -> Result<(), PersistenceError> {
        *self.level.lock() = Some(level);
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SaveData {
    #[serde(rename = "savedLevel")]
    saved_level: u32,
}

/// Store that keeps the level in a small JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSaveStore {
    path: PathBuf,
}

impl JsonFileSaveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SaveStore for JsonFileSaveStore {
    fn load_level(&self) -> Result<Option<u32>, PersistenceError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No save file found");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let data: SaveData = serde_json::from_str(&raw)?;
        Ok(Some(data.saved_level))
    }

    fn save_level(&mut self, level: u32) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(&SaveData { saved_level: level })?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), level, "Level saved");
        Ok(())
    }
}

/// The injected store, held by the world.
#[derive(Resource)]
pub struct SaveStoreResource(pub Box<dyn SaveStore>);

impl SaveStoreResource {
    pub fn new(store: impl SaveStore + 'static) -> Self {
        Self(Box::new(store))
    }

    /// Loads the saved level, falling back to 0 when it is absent or unreadable.
    ///
    /// The error, if any, is handed back so it can still be reported.
    pub fn load_or_default(&self) -> (u32, Option<PersistenceError>) {
        match self.0.load_level() {
            Ok(level) => (level.unwrap_or(0), None),
            Err(e) => {
                warn!(error = %e, "Failed to load saved level, starting from level 0");
                (0, Some(e))
            }
        }
    }

    pub fn save(&mut self, level: u32) -> Result<(), PersistenceError> {
        self.0.save_level(level).inspect_err(|e| {
            warn!(error = %e, level, "Failed to save level");
        })
    }
}
