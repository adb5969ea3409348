use std::collections::HashSet;

use bevy_ecs::{
    entity::Entity,
    event::{EventReader, EventWriter},
    query::With,
    resource::Resource,
    system::{Commands, Query, Res, ResMut},
};
use tracing::{debug, info};

use crate::{
    config::GameConfig,
    events::GameEvent,
    systems::{
        components::{PhysicsBody, PhysicsCategory, Position, Session, Sprite},
        overlay::{spawn_game_over_overlay, ActiveOverlay, OverlayElement},
    },
};

/// Pairs of bodies that were touching at the end of the last contact pass.
#[derive(Resource, Debug, Default)]
pub struct ContactState {
    touching: HashSet<(Entity, Entity)>,
}

impl ContactState {
    pub fn is_touching(&self, a: Entity, b: Entity) -> bool {
        self.touching.contains(&ordered(a, b))
    }

    pub fn clear(&mut self) {
        self.touching.clear();
    }
}

fn ordered(a: Entity, b: Entity) -> (Entity, Entity) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Whether two categories together make up a player-obstacle contact.
pub fn is_player_obstacle_contact(a: PhysicsCategory, b: PhysicsCategory) -> bool {
    (a | b) == (PhysicsCategory::DOG | PhysicsCategory::SHRUB)
}

/// Finds overlapping bodies and reports contacts that began this frame.
pub fn contact_system(
    mut state: ResMut<ContactState>,
    bodies: Query<(Entity, &Position, &Sprite, &PhysicsBody)>,
    mut events: EventWriter<GameEvent>,
) {
    let bodies: Vec<_> = bodies.iter().collect();
    let mut touching = HashSet::new();

    for (i, (entity_a, pos_a, sprite_a, body_a)) in bodies.iter().enumerate() {
        for (entity_b, pos_b, sprite_b, body_b) in &bodies[i + 1..] {
            if !body_a.reports_contact_with(body_b) {
                continue;
            }
            if !sprite_a.bounds(pos_a).intersects(&sprite_b.bounds(pos_b)) {
                continue;
            }

            let pair = ordered(*entity_a, *entity_b);
            if !state.touching.contains(&pair) {
                events.write(GameEvent::Contact(pair.0, pair.1));
            }
            touching.insert(pair);
        }
    }

    state.touching = touching;
}

/// Ends the game when the player touches an obstacle.
///
/// Contacts arriving after the game is already over are ignored.
pub fn collision_system(
    mut commands: Commands,
    mut events: EventReader<GameEvent>,
    mut session: ResMut<Session>,
    mut overlay: ResMut<ActiveOverlay>,
    config: Res<GameConfig>,
    bodies: Query<&PhysicsBody>,
    overlay_elements: Query<Entity, With<OverlayElement>>,
) {
    for event in events.read() {
        let GameEvent::Contact(a, b) = *event else {
            continue;
        };

        let (Ok(body_a), Ok(body_b)) = (bodies.get(a), bodies.get(b)) else {
            continue;
        };

        if !is_player_obstacle_contact(body_a.category, body_b.category) {
            continue;
        }

        if session.game_over {
            debug!(?a, ?b, "Contact ignored, game is already over");
            continue;
        }

        info!(level = session.level, press_count = session.press_count, "Collision detected, game over");
        session.game_over = true;
        session.paused = true;

        // Only one overlay at a time.
        for entity in overlay_elements.iter() {
            commands.entity(entity).despawn();
        }
        *overlay = spawn_game_over_overlay(&mut commands, config.screen_size);
    }
}
