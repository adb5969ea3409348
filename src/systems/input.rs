use std::collections::VecDeque;

use bevy_ecs::{
    entity::Entity,
    event::EventReader,
    query::With,
    system::{Commands, Query, Res, ResMut},
};
use glam::Vec2;
use tracing::{debug, trace};

use crate::{
    asset::SpriteAsset,
    config::GameConfig,
    events::{GameCommand, GameEvent},
    systems::{
        bark::Barking,
        components::{Obstacle, Player, Session, Sprite},
        level::LevelStage,
        overlay::{ActiveOverlay, CloseTutorial, ControlTarget, GoHome, Replay},
    },
};

/// What a single tap turned out to mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    Control(ControlTarget),
    Bark,
    /// Missed every control of an open overlay, or landed while the level-up banner
    /// holds the game; barks are not counted during that transition.
    Ignored,
}

/// Resolves a tap: the game-over controls win, then the tutorial's, then barking.
///
/// A tap that misses every control of an active overlay does nothing, and so does
/// any tap while the level-up banner holds the game.
pub fn resolve_tap(overlay: &ActiveOverlay, stage: &LevelStage, point: Vec2) -> TapOutcome {
    match overlay.kind() {
        Some(_) => overlay.hit_test(point).map_or(TapOutcome::Ignored, TapOutcome::Control),
        None if matches!(stage, LevelStage::Playing) => TapOutcome::Bark,
        None => TapOutcome::Ignored,
    }
}

/// Live obstacles, oldest first.
#[derive(Debug, Default)]
pub struct ObstacleQueue(VecDeque<Entity>);

impl ObstacleQueue {
    pub fn new<'a>(obstacles: impl IntoIterator<Item = (Entity, &'a Obstacle)>) -> Self {
        let mut obstacles: Vec<_> = obstacles.into_iter().collect();
        obstacles.sort_by_key(|(_, obstacle)| obstacle.serial);
        Self(obstacles.into_iter().map(|(entity, _)| entity).collect())
    }

    pub fn pop_oldest(&mut self) -> Option<Entity> {
        self.0.pop_front()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Removes the earliest spawned obstacle still alive and counts it as cleared.
///
/// Returns the removed obstacle, or `None` (leaving the counter alone) if there was none.
pub fn clear_oldest_obstacle(
    commands: &mut Commands,
    queue: &mut ObstacleQueue,
    session: &mut Session,
) -> Option<Entity> {
    let entity = queue.pop_oldest()?;
    commands.entity(entity).despawn();
    session.obstacles_cleared += 1;
    debug!(?entity, cleared = session.obstacles_cleared, required = session.obstacles_required, "Obstacle cleared");
    Some(entity)
}

/// Handles taps queued since the last frame.
#[allow(clippy::too_many_arguments)]
pub fn tap_input_system(
    mut commands: Commands,
    mut events: EventReader<GameEvent>,
    overlay: Res<ActiveOverlay>,
    stage: Res<LevelStage>,
    config: Res<GameConfig>,
    mut session: ResMut<Session>,
    mut player: Query<(Entity, &mut Sprite), With<Player>>,
    obstacles: Query<(Entity, &Obstacle)>,
) {
    let mut queue: Option<ObstacleQueue> = None;

    for event in events.read() {
        let GameEvent::Command(GameCommand::Tap(point)) = *event else {
            continue;
        };

        match resolve_tap(&overlay, &stage, point) {
            TapOutcome::Control(target) => {
                debug!(control = target.as_ref(), ?point, "Overlay control tapped");
                match target {
                    ControlTarget::Close => commands.trigger(CloseTutorial),
                    ControlTarget::Replay => commands.trigger(Replay),
                    ControlTarget::Home => commands.trigger(GoHome),
                }
            }
            TapOutcome::Bark => {
                for (entity, mut sprite) in player.iter_mut() {
                    sprite.asset = SpriteAsset::DogBark;
                    commands.entity(entity).insert(Barking::default());
                }

                session.press_count += 1;
                trace!(press_count = session.press_count, "Bark");

                if session.press_count >= config.barks_per_clear {
                    let queue = queue.get_or_insert_with(|| ObstacleQueue::new(obstacles.iter()));
                    if clear_oldest_obstacle(&mut commands, queue, &mut session).is_none() {
                        trace!("Nothing to clear");
                    }
                    session.press_count = 0;
                }
            }
            TapOutcome::Ignored => trace!(?point, "Tap ignored"),
        }
    }
}
