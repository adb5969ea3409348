//! Modal overlays: the first-run tutorial and the game-over screen.
//!
//! Controls are resolved to typed targets when an overlay is built, so tap handling
//! never has to look visuals up by name.

use bevy_ecs::{
    component::Component,
    entity::Entity,
    event::{Event, EventWriter},
    observer::Trigger,
    query::{Or, With},
    resource::Resource,
    system::{Commands, Query, Res, ResMut},
};
use glam::Vec2;
use smallvec::SmallVec;
use strum_macros::AsRefStr;
use tracing::{debug, info};

use crate::{
    asset::SpriteAsset,
    config::GameConfig,
    constants::{
        layer,
        layout::{
            CONTROL_SIZE, GAME_OVER_CONTROL_OFFSET, GAME_OVER_GRAPHIC_RAISE, GAME_OVER_GRAPHIC_SIZE, GAME_OVER_PANEL_HEIGHT,
            GAME_OVER_PANEL_RAISE, LABEL_FONT_SIZE, TUTORIAL_CLOSE_INSET, TUTORIAL_FIRST_LINE_Y, TUTORIAL_LINE_SPACING,
            TUTORIAL_PANEL_HEIGHT, TUTORIAL_PANEL_INSET,
        },
        TUTORIAL_LINES,
    },
    error::GameError,
    geometry::Rect,
    save::SaveStoreResource,
    systems::{
        bark::Barking,
        collision::ContactState,
        components::{
            Celebration, HomeCallback, Label, LevelLabel, LevelUpBanner, Obstacle, Player, Position, Session, Sprite,
        },
        level::{level_text, LevelStage},
        spawner::SpawnTimer,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    Tutorial,
    GameOver,
}

/// What a tappable overlay control does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ControlTarget {
    Close,
    Replay,
    Home,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayControl {
    pub target: ControlTarget,
    pub bounds: Rect,
}

/// The overlay currently shown, if any, together with its controls.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct ActiveOverlay {
    kind: Option<OverlayKind>,
    controls: SmallVec<[OverlayControl; 2]>,
}

impl ActiveOverlay {
    pub fn none() -> Self {
        Self::default()
    }

    fn new(kind: OverlayKind, controls: impl IntoIterator<Item = OverlayControl>) -> Self {
        Self {
            kind: Some(kind),
            controls: controls.into_iter().collect(),
        }
    }

    pub fn kind(&self) -> Option<OverlayKind> {
        self.kind
    }

    pub fn is_active(&self) -> bool {
        self.kind.is_some()
    }

    pub fn controls(&self) -> &[OverlayControl] {
        &self.controls
    }

    /// The first control containing `point`, in the order the overlay declared them.
    pub fn hit_test(&self, point: Vec2) -> Option<ControlTarget> {
        self.controls
            .iter()
            .find(|control| control.bounds.contains(point))
            .map(|control| control.target)
    }
}

/// Tag for every visual owned by an overlay.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayElement(pub OverlayKind);

/// The tutorial's close control was tapped.
#[derive(Event, Debug, Clone, Copy)]
pub struct CloseTutorial;

/// The game-over replay control was tapped.
#[derive(Event, Debug, Clone, Copy)]
pub struct Replay;

/// The game-over home control was tapped.
#[derive(Event, Debug, Clone, Copy)]
pub struct GoHome;

fn spawn_control(
    commands: &mut Commands,
    kind: OverlayKind,
    target: ControlTarget,
    asset: SpriteAsset,
    center: Vec2,
    layer: i16,
) -> OverlayControl {
    commands.spawn((
        OverlayElement(kind),
        Position(center),
        Sprite {
            asset,
            size: CONTROL_SIZE,
            layer,
        },
    ));

    OverlayControl {
        target,
        bounds: Rect::new(center, CONTROL_SIZE),
    }
}

/// Spawns the tutorial panel, its instructions and the close control.
pub fn spawn_tutorial_overlay(commands: &mut Commands, screen_size: Vec2) -> ActiveOverlay {
    let kind = OverlayKind::Tutorial;
    let center = screen_size / 2.0;

    commands.spawn((
        OverlayElement(kind),
        Position(center),
        Sprite {
            asset: SpriteAsset::Banner,
            size: Vec2::new(screen_size.x - TUTORIAL_PANEL_INSET, TUTORIAL_PANEL_HEIGHT),
            layer: layer::TUTORIAL_PANEL,
        },
    ));

    for (index, line) in TUTORIAL_LINES.iter().enumerate() {
        let offset = TUTORIAL_FIRST_LINE_Y - index as f32 * TUTORIAL_LINE_SPACING;
        commands.spawn((
            OverlayElement(kind),
            Position(center + Vec2::new(0.0, offset)),
            Label {
                text: line.to_string(),
                font_size: LABEL_FONT_SIZE,
                layer: layer::TUTORIAL_CONTENT,
            },
        ));
    }

    let close = spawn_control(
        commands,
        kind,
        ControlTarget::Close,
        SpriteAsset::XMark,
        screen_size - TUTORIAL_CLOSE_INSET,
        layer::TUTORIAL_CONTENT,
    );

    info!("Tutorial shown");
    ActiveOverlay::new(kind, [close])
}

/// Spawns the game-over panel with its replay and home controls.
pub fn spawn_game_over_overlay(commands: &mut Commands, screen_size: Vec2) -> ActiveOverlay {
    let kind = OverlayKind::GameOver;
    let center = screen_size / 2.0;

    commands.spawn((
        OverlayElement(kind),
        Position(center + Vec2::new(0.0, GAME_OVER_PANEL_RAISE)),
        Sprite {
            asset: SpriteAsset::Banner,
            size: Vec2::new(screen_size.x, GAME_OVER_PANEL_HEIGHT),
            layer: layer::BANNER,
        },
    ));
    commands.spawn((
        OverlayElement(kind),
        Position(center + Vec2::new(0.0, GAME_OVER_GRAPHIC_RAISE)),
        Sprite {
            asset: SpriteAsset::GameOver,
            size: GAME_OVER_GRAPHIC_SIZE,
            layer: layer::BANNER_GRAPHIC,
        },
    ));

    let replay = spawn_control(
        commands,
        kind,
        ControlTarget::Replay,
        SpriteAsset::Restart,
        center + GAME_OVER_CONTROL_OFFSET,
        layer::GAME_OVER_CONTROLS,
    );
    let home = spawn_control(
        commands,
        kind,
        ControlTarget::Home,
        SpriteAsset::Home,
        center + Vec2::new(-GAME_OVER_CONTROL_OFFSET.x, GAME_OVER_CONTROL_OFFSET.y),
        layer::GAME_OVER_CONTROLS,
    );

    ActiveOverlay::new(kind, [replay, home])
}

/// Removes the tutorial, resumes play and saves the (unchanged) level.
pub fn close_tutorial_observer(
    _: Trigger<CloseTutorial>,
    mut commands: Commands,
    mut overlay: ResMut<ActiveOverlay>,
    mut session: ResMut<Session>,
    mut store: ResMut<SaveStoreResource>,
    mut errors: EventWriter<GameError>,
    elements: Query<Entity, With<OverlayElement>>,
) {
    if overlay.kind() != Some(OverlayKind::Tutorial) {
        return;
    }

    for entity in elements.iter() {
        commands.entity(entity).despawn();
    }
    *overlay = ActiveOverlay::none();
    session.paused = false;

    if let Err(e) = store.save(session.level) {
        errors.write(e.into());
    }

    info!(level = session.level, "Tutorial dismissed");
}

/// Starts over from level 0: every transient entity goes, every counter is zeroed.
#[allow(clippy::too_many_arguments)]
#[allow(clippy::type_complexity)]
pub fn replay_observer(
    _: Trigger<Replay>,
    mut commands: Commands,
    mut overlay: ResMut<ActiveOverlay>,
    mut session: ResMut<Session>,
    mut stage: ResMut<LevelStage>,
    mut timer: ResMut<SpawnTimer>,
    mut contacts: ResMut<ContactState>,
    config: Res<GameConfig>,
    transient: Query<Entity, Or<(With<OverlayElement>, With<Obstacle>, With<LevelUpBanner>, With<Celebration>)>>,
    mut player: Query<(Entity, &mut Sprite), With<Player>>,
    mut label: Query<&mut Label, With<LevelLabel>>,
) {
    if overlay.kind() != Some(OverlayKind::GameOver) {
        return;
    }

    let mut removed = 0usize;
    for entity in transient.iter() {
        commands.entity(entity).despawn();
        removed += 1;
    }

    *overlay = ActiveOverlay::none();
    *session = Session::new(0, config.replay_obstacles_per_level);
    *stage = LevelStage::Playing;
    timer.restart(session.level);
    contacts.clear();

    for (entity, mut sprite) in player.iter_mut() {
        sprite.asset = SpriteAsset::Dog;
        commands.entity(entity).remove::<Barking>();
    }
    for mut label in label.iter_mut() {
        label.text = level_text(session.level);
    }

    info!(removed, obstacles_required = session.obstacles_required, "Replaying from level 0");
}

/// Hands control back to the host.
pub fn go_home_observer(_: Trigger<GoHome>, overlay: Res<ActiveOverlay>, home: Res<HomeCallback>) {
    if overlay.kind() != Some(OverlayKind::GameOver) {
        return;
    }

    match &home.0 {
        Some(callback) => {
            info!("Returning to the home screen");
            callback();
        }
        None => debug!("Home pressed without a home callback"),
    }
}
