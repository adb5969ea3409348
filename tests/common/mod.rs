#![allow(dead_code)]

use bevy_ecs::{entity::Entity, event::Events, world::World};
use comet::{
    config::GameConfig,
    constants::SCREEN_SIZE,
    error::{GameError, PersistenceError},
    events::{GameCommand, GameEvent},
    game::Game,
    save::{MemorySaveStore, SaveStore, SaveStoreResource},
    systems::{
        obstacle_bundle, player_bundle, ActiveOverlay, ContactState, DeltaTime, HomeCallback, Label, LevelLabel,
        LevelStage, Obstacle, Position, Session, SpawnTimer,
    },
};
use glam::Vec2;

/// Frame length used by the tests; a power of two so the arithmetic stays exact.
pub const DT: f32 = 0.5;

/// Where the player stands on the default screen.
pub const PLAYER_POSITION: Vec2 = Vec2::new(95.0, 50.0);

/// Serials handed to hand-placed obstacles, well clear of the spawner's own.
const TEST_SERIAL_BASE: u64 = 1_000;

/// A bare world with every resource the systems expect, at `level` 1.
pub fn create_test_world() -> (World, MemorySaveStore) {
    let mut world = World::new();
    let store = MemorySaveStore::new();

    world.insert_resource(Events::<GameEvent>::default());
    world.insert_resource(Events::<GameError>::default());
    world.insert_resource(GameConfig::default());
    world.insert_resource(Session::new(1, 10));
    world.insert_resource(SpawnTimer::new(1));
    world.insert_resource(LevelStage::Playing);
    world.insert_resource(ActiveOverlay::none());
    world.insert_resource(ContactState::default());
    world.insert_resource(HomeCallback::default());
    world.insert_resource(SaveStoreResource::new(store.clone()));
    world.insert_resource(DeltaTime(DT));

    (world, store)
}

pub fn spawn_test_player(world: &mut World) -> Entity {
    world.spawn(player_bundle(SCREEN_SIZE)).id()
}

/// Places an obstacle at `x` on the baseline.
pub fn spawn_test_obstacle(world: &mut World, serial: u64, x: f32) -> Entity {
    let mut bundle = obstacle_bundle(TEST_SERIAL_BASE + serial, 1, SCREEN_SIZE);
    bundle.position = Position(Vec2::new(x, PLAYER_POSITION.y));
    world.spawn(bundle).id()
}

pub fn spawn_test_label(world: &mut World, text: &str) -> Entity {
    world
        .spawn((
            LevelLabel,
            Position(Vec2::ZERO),
            Label {
                text: text.to_string(),
                font_size: 18.0,
                layer: 0,
            },
        ))
        .id()
}

pub fn send_game_event(world: &mut World, event: GameEvent) {
    let mut events = world.resource_mut::<Events<GameEvent>>();
    events.send(event);
}

pub fn send_tap(world: &mut World, point: Vec2) {
    send_game_event(world, GameEvent::Command(GameCommand::Tap(point)));
}

/// Serials of the live obstacles, oldest first.
pub fn obstacle_serials(world: &mut World) -> Vec<u64> {
    let mut serials: Vec<u64> = world.query::<&Obstacle>().iter(world).map(|o| o.serial).collect();
    serials.sort_unstable();
    serials
}

pub fn count<T: bevy_ecs::component::Component>(world: &mut World) -> usize {
    world.query::<&T>().iter(world).count()
}

/// A game at `level`; level 0 starts behind the tutorial.
pub fn new_game(level: u32) -> (Game, MemorySaveStore) {
    let store = if level == 0 {
        MemorySaveStore::new()
    } else {
        MemorySaveStore::with_level(level)
    };
    let game = Game::new(store.clone(), GameConfig::default()).expect("game should build");
    (game, store)
}

/// Places an obstacle inside a running game without touching the spawner.
pub fn place_obstacle(game: &mut Game, serial: u64, x: f32) -> Entity {
    spawn_test_obstacle(&mut game.world, serial, x)
}

pub fn tick_times(game: &mut Game, frames: usize) {
    for _ in 0..frames {
        game.tick(DT);
    }
}

pub fn control_center(game: &Game, target: comet::systems::ControlTarget) -> Vec2 {
    game.overlay()
        .controls()
        .iter()
        .find(|control| control.target == target)
        .map(|control| control.bounds.center)
        .expect("control should be on screen")
}

/// A store whose backend is gone.
pub struct FailingSaveStore;

impl SaveStore for FailingSaveStore {
    fn load_level(&self) -> Result<Option<u32>, PersistenceError> {
        Err(PersistenceError::Unavailable("backend offline".to_string()))
    }

    fn save_level(&mut self, _level: u32) -> Result<(), PersistenceError> {
        Err(PersistenceError::Unavailable("backend offline".to_string()))
    }
}
