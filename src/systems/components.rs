use bevy_ecs::{bundle::Bundle, component::Component, resource::Resource};
use bitflags::bitflags;
use glam::Vec2;

use crate::{asset::SpriteAsset, geometry::Rect};

bitflags! {
    /// Collision groups used by the contact pass.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PhysicsCategory: u32 {
        const DOG = 1 << 0;
        const SHRUB = 1 << 1;
        const GROUND = 1 << 2;
    }
}

/// A body taking part in contact detection.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicsBody {
    pub category: PhysicsCategory,
    /// Categories this body wants to hear about when touched.
    pub contact_test: PhysicsCategory,
}

impl PhysicsBody {
    /// Body shared by the player and obstacles.
    pub fn actor(category: PhysicsCategory) -> Self {
        Self {
            category,
            contact_test: PhysicsCategory::DOG | PhysicsCategory::SHRUB,
        }
    }

    /// Static body that never reports contacts of its own.
    pub fn fixed(category: PhysicsCategory) -> Self {
        Self {
            category,
            contact_test: PhysicsCategory::empty(),
        }
    }

    pub fn reports_contact_with(&self, other: &PhysicsBody) -> bool {
        self.contact_test.intersects(other.category) || other.contact_test.intersects(self.category)
    }
}

/// Centre of an entity in scene coordinates.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

/// A named image drawn at the entity's position.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub asset: SpriteAsset,
    pub size: Vec2,
    pub layer: i16,
}

impl Sprite {
    pub fn bounds(&self, position: &Position) -> Rect {
        Rect::new(position.0, self.size)
    }
}

/// A flat coloured rectangle.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SolidColor {
    pub rgb: [u8; 3],
    pub size: Vec2,
}

/// A line of text drawn at the entity's position.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub font_size: f32,
    pub layer: i16,
}

/// The dog.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct Player;

#[derive(Component, Debug, Default, Clone, Copy)]
pub struct Ground;

/// An obstacle; `serial` grows with spawn order.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Obstacle {
    pub serial: u64,
}

/// The label showing the current level.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct LevelLabel;

/// Visuals of the level-up banner, removed when the next level starts.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct LevelUpBanner;

/// The sprite that runs across the screen after a level-up.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct Celebration;

/// Entities with this keep animating while gameplay is paused.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct IgnoresPause;

/// A timed linear move; the entity is despawned once it arrives.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Traversal {
    /// Displacement per second.
    pub velocity: Vec2,
    /// Seconds until arrival.
    pub remaining: f32,
}

impl Traversal {
    /// Moves by `offset` over `duration` seconds.
    pub fn by(offset: Vec2, duration: f32) -> Self {
        Self {
            velocity: offset / duration,
            remaining: duration,
        }
    }
}

#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: Player,
    pub position: Position,
    pub sprite: Sprite,
    pub body: PhysicsBody,
}

#[derive(Bundle)]
pub struct ObstacleBundle {
    pub obstacle: Obstacle,
    pub position: Position,
    pub sprite: Sprite,
    pub body: PhysicsBody,
    pub traversal: Traversal,
}

/// The mutable state of one gameplay session.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub level: u32,
    pub game_over: bool,
    /// Gameplay is frozen; set whenever an overlay or the level-up banner is up.
    pub paused: bool,
    /// Barks since the last clear, always below the barks needed for a clear.
    pub press_count: u8,
    pub obstacles_cleared: u32,
    pub obstacles_required: u32,
}

impl Session {
    pub fn new(level: u32, obstacles_required: u32) -> Self {
        Self {
            level,
            game_over: false,
            paused: false,
            press_count: 0,
            obstacles_cleared: 0,
            obstacles_required,
        }
    }
}

/// Seconds covered by the current frame.
#[derive(Resource, Debug, Default)]
pub struct DeltaTime(pub f32);

/// The host's "go home" action, invoked from the game-over overlay.
#[derive(Resource, Default)]
pub struct HomeCallback(pub Option<Box<dyn Fn() + Send + Sync>>);

impl HomeCallback {
    pub fn new(callback: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Some(Box::new(callback)))
    }
}
