//! The Entity-Component-System (ECS) module.
//!
//! This module contains all the ECS-related logic, including components, systems,
//! and resources.

pub mod bark;
pub mod collision;
pub mod components;
pub mod input;
pub mod level;
pub mod movement;
pub mod overlay;
pub mod scene;
pub mod spawner;

pub use self::bark::*;
pub use self::collision::*;
pub use self::components::*;
pub use self::input::*;
pub use self::level::*;
pub use self::movement::*;
pub use self::overlay::*;
pub use self::scene::*;
pub use self::spawner::*;
