use bevy_ecs::{
    entity::Entity,
    query::Has,
    system::{Commands, Query, Res},
};
use tracing::trace;

use crate::systems::components::{DeltaTime, IgnoresPause, Position, Session, Traversal};

/// Steps a traversal by `seconds`, returning true once it has arrived.
///
/// The final step is clamped so the entity lands exactly on its destination.
pub fn advance(position: &mut Position, traversal: &mut Traversal, seconds: f32) -> bool {
    let step = seconds.min(traversal.remaining).max(0.0);
    position.0 += traversal.velocity * step;
    traversal.remaining -= step;
    traversal.remaining <= 0.0
}

/// Moves every traversing entity and despawns the ones that reached their destination.
///
/// While the session is paused only entities marked `IgnoresPause` move.
pub fn traversal_system(
    mut commands: Commands,
    dt: Res<DeltaTime>,
    session: Res<Session>,
    mut query: Query<(Entity, &mut Position, &mut Traversal, Has<IgnoresPause>)>,
) {
    for (entity, mut position, mut traversal, ignores_pause) in query.iter_mut() {
        if session.paused && !ignores_pause {
            continue;
        }

        if advance(&mut position, &mut traversal, dt.0) {
            trace!(?entity, position = ?position.0, "Traversal finished, despawning");
            commands.entity(entity).despawn();
        }
    }
}
