//! Comet: a one-button arcade game about a dog barking shrubs out of its way.

pub mod app;
pub mod asset;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod formatter;
pub mod game;
pub mod geometry;
pub mod save;
pub mod systems;
