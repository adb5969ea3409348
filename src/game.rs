//! This module contains the main game logic and state.

use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::schedule::{IntoScheduleConfigs, Schedule, SystemSet};
use bevy_ecs::system::{Res, RunSystemOnce};
use bevy_ecs::world::World;
use glam::Vec2;
use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::error::{GameError, GameResult};
use crate::events::{GameCommand, GameEvent};
use crate::save::{SaveStore, SaveStoreResource};
use crate::systems::{
    self, ActiveOverlay, ContactState, HomeCallback, LevelStage, Obstacle, Position, Session, SpawnTimer,
};

/// System sets run in this order every frame.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum GameplaySet {
    /// Taps, which must be handled even while an overlay pauses play
    Input,
    /// Gameplay that freezes while paused
    Update,
    /// Systems reacting to what happened this frame
    Respond,
}

fn gameplay_active(session: Res<Session>) -> bool {
    !session.paused
}

/// Core game state built on the Bevy ECS architecture.
///
/// The host owns the frame clock and the input device: it calls [`Game::tap`] for every
/// touch and [`Game::tick`] once per frame, then reads the world to draw it.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
}

impl Game {
    /// Enters the gameplay scene.
    ///
    /// The saved level is read once from `store`; if that fails the game starts at level 0
    /// and the failure is queued for [`Game::drain_errors`].
    pub fn new(store: impl SaveStore + 'static, config: GameConfig) -> GameResult<Game> {
        info!("Starting game initialization");

        let mut world = World::default();
        let mut schedule = Schedule::default();

        EventRegistry::register_event::<GameError>(&mut world);
        EventRegistry::register_event::<GameEvent>(&mut world);

        world.add_observer(systems::close_tutorial_observer);
        world.add_observer(systems::replay_observer);
        world.add_observer(systems::go_home_observer);

        let store = SaveStoreResource::new(store);
        let (level, load_error) = store.load_or_default();
        if let Some(e) = load_error {
            world.resource_mut::<Events<GameError>>().send(e.into());
        }
        debug!(level, "Saved level loaded");

        world.insert_resource(store);
        world.insert_resource(Session::new(level, config.obstacles_per_level));
        world.insert_resource(SpawnTimer::new(level));
        world.insert_resource(LevelStage::Playing);
        world.insert_resource(ActiveOverlay::none());
        world.insert_resource(ContactState::default());
        world.insert_resource(HomeCallback::default());
        world.insert_resource(systems::DeltaTime::default());
        world.insert_resource(config);

        Self::configure_schedule(&mut schedule);

        world
            .run_system_once(systems::scene_setup_system)
            .map_err(|e| GameError::InvalidState(format!("Scene setup failed: {e}")))?;

        info!(level, "Game initialization completed successfully");
        Ok(Game { world, schedule })
    }

    /// Installs the host's "go home" action.
    pub fn with_home_callback(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.world.insert_resource(HomeCallback::new(callback));
        self
    }

    fn configure_schedule(schedule: &mut Schedule) {
        schedule
            .add_systems((
                systems::tap_input_system.in_set(GameplaySet::Input),
                systems::traversal_system
                    .after(GameplaySet::Input)
                    .before(GameplaySet::Update),
                (
                    systems::bark_revert_system,
                    systems::obstacle_spawn_system,
                    systems::contact_system,
                )
                    .chain()
                    .in_set(GameplaySet::Update),
                (systems::collision_system, systems::level_system)
                    .chain()
                    .in_set(GameplaySet::Respond),
            ))
            .configure_sets(GameplaySet::Update.run_if(gameplay_active))
            .configure_sets((GameplaySet::Input, GameplaySet::Update, GameplaySet::Respond).chain());
    }

    /// Queues a tap at `point`, handled on the next tick.
    pub fn tap(&mut self, point: Vec2) {
        self.world
            .resource_mut::<Events<GameEvent>>()
            .send(GameCommand::Tap(point).into());
    }

    /// Advances the game by `dt` seconds.
    ///
    /// A negative or non-finite `dt` is treated as an empty frame.
    pub fn tick(&mut self, dt: f32) {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            warn!(dt, "Ignoring invalid frame time");
            0.0
        };
        self.world.insert_resource(systems::DeltaTime(dt));
        self.schedule.run(&mut self.world);
        self.world.resource_mut::<Events<GameEvent>>().update();
    }

    pub fn session(&self) -> &Session {
        self.world.resource::<Session>()
    }

    pub fn stage(&self) -> LevelStage {
        *self.world.resource::<LevelStage>()
    }

    pub fn config(&self) -> &GameConfig {
        self.world.resource::<GameConfig>()
    }

    pub fn overlay(&self) -> &ActiveOverlay {
        self.world.resource::<ActiveOverlay>()
    }

    /// Live obstacles and where they are, oldest first.
    pub fn obstacles(&mut self) -> Vec<(Obstacle, Vec2)> {
        let mut obstacles: Vec<_> = self
            .world
            .query::<(&Obstacle, &Position)>()
            .iter(&self.world)
            .map(|(obstacle, position)| (*obstacle, position.0))
            .collect();
        obstacles.sort_by_key(|(obstacle, _)| obstacle.serial);
        obstacles
    }

    /// Takes every error raised since the last call.
    pub fn drain_errors(&mut self) -> Vec<GameError> {
        self.world.resource_mut::<Events<GameError>>().drain().collect()
    }
}
