use bevy_ecs::{
    component::Component,
    entity::Entity,
    query::With,
    system::{Commands, Query, Res},
};

use crate::{
    asset::SpriteAsset,
    constants::timing::BARK_DURATION,
    systems::components::{DeltaTime, Player, Sprite},
};

/// The player is showing its barking sprite for a little while longer.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Barking {
    pub remaining: f32,
}

impl Default for Barking {
    fn default() -> Self {
        Self {
            remaining: BARK_DURATION,
        }
    }
}

/// Reverts the player to its idle sprite once the bark has played out.
pub fn bark_revert_system(
    mut commands: Commands,
    dt: Res<DeltaTime>,
    mut query: Query<(Entity, &mut Barking, &mut Sprite), With<Player>>,
) {
    for (entity, mut barking, mut sprite) in query.iter_mut() {
        barking.remaining -= dt.0;
        if barking.remaining > 0.0 {
            continue;
        }

        sprite.asset = SpriteAsset::Dog;
        commands.entity(entity).remove::<Barking>();
    }
}
