use bevy_ecs::prelude::*;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameCommand {
    /// A tap at a point in scene coordinates.
    Tap(Vec2),
}

#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub enum GameEvent {
    Command(GameCommand),
    /// Two physics bodies started touching.
    Contact(Entity, Entity),
}

impl From<GameCommand> for GameEvent {
    fn from(command: GameCommand) -> Self {
        GameEvent::Command(command)
    }
}
