//! Centralized error types for the game.
//!
//! Nothing in here is fatal to gameplay: errors are raised as events and the host
//! decides what to do with them.

use std::io;

use bevy_ecs::event::Event;

/// Main error type for the game.
#[derive(thiserror::Error, Debug, Event)]
pub enum GameError {
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Failures reading or writing the saved level.
#[derive(thiserror::Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed save data: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Save store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
