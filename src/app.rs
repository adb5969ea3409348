use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use glam::Vec2;
use tracing::{debug, info, trace, warn};

use crate::config::{GameConfig, HostConfig};
use crate::constants::{
    layout::{PLAYER_OFFSET_X, PLAYER_SIZE},
    LOOP_TIME,
};
use crate::error::GameResult;
use crate::formatter;
use crate::game::Game;
use crate::save::SaveStore;
use crate::systems::{ControlTarget, LevelStage, OverlayKind};

/// Obstacles closer than this to the player get barked at.
const BARK_RANGE: f32 = 200.0;

/// Game-overs the autopilot replays before heading home.
const MAX_REPLAYS: u32 = 2;

/// Headless host: drives the game at a fixed frame rate with a scripted player.
pub struct App {
    pub game: Game,
    last_tick: Instant,
    elapsed: f32,
    run_for: f32,
    replays_left: u32,
    exit_requested: Arc<AtomicBool>,
}

impl App {
    pub fn new(store: impl SaveStore + 'static, config: &HostConfig) -> GameResult<Self> {
        info!(save_path = %config.save_path.display(), run_for = config.demo_seconds, "Initializing application");

        let exit_requested = Arc::new(AtomicBool::new(false));
        let home_flag = Arc::clone(&exit_requested);
        let game = Game::new(store, GameConfig::default())?.with_home_callback(move || {
            home_flag.store(true, Ordering::Relaxed);
        });

        Ok(Self {
            game,
            last_tick: Instant::now(),
            elapsed: 0.0,
            run_for: config.demo_seconds,
            replays_left: MAX_REPLAYS,
            exit_requested,
        })
    }

    /// Runs one frame, sleeping off whatever is left of [`LOOP_TIME`].
    ///
    /// Returns `false` once the app should exit.
    pub fn run(&mut self) -> bool {
        let start = Instant::now();

        if let Some(point) = self.next_tap() {
            trace!(?point, "Autopilot tap");
            self.game.tap(point);
        }

        let dt = self.last_tick.elapsed().as_secs_f32();
        self.last_tick = Instant::now();
        self.elapsed += dt;

        self.game.tick(dt);
        formatter::increment_frame();

        for error in self.game.drain_errors() {
            warn!(%error, "Game reported an error");
        }

        if self.exit_requested.load(Ordering::Relaxed) {
            info!("Home requested, exiting");
            return false;
        }
        if self.elapsed >= self.run_for {
            info!(level = self.game.session().level, "Demo time is up, exiting");
            return false;
        }

        let frame_time = start.elapsed();
        if frame_time < LOOP_TIME {
            let time = LOOP_TIME.saturating_sub(frame_time);
            if time != Duration::ZERO {
                spin_sleep::sleep(time);
            }
        } else {
            warn!(behind = ?(frame_time - LOOP_TIME), "Game loop behind schedule");
        }

        true
    }

    /// Plays like a very attentive toddler: closes the tutorial, barks at anything near,
    /// and replays a couple of times before giving up.
    fn next_tap(&mut self) -> Option<Vec2> {
        let control = |target: ControlTarget| {
            self.game
                .overlay()
                .controls()
                .iter()
                .find(|control| control.target == target)
                .map(|control| control.bounds.center)
        };

        match self.game.overlay().kind() {
            Some(OverlayKind::Tutorial) => control(ControlTarget::Close),
            Some(OverlayKind::GameOver) if self.replays_left > 0 => {
                let point = control(ControlTarget::Replay);
                self.replays_left -= 1;
                debug!(replays_left = self.replays_left, "Autopilot replaying");
                point
            }
            Some(OverlayKind::GameOver) => control(ControlTarget::Home),
            None if self.game.stage() == LevelStage::Playing => {
                let screen_size = self.game.config().screen_size;
                let player_x = screen_size.x / 2.0 + PLAYER_OFFSET_X;
                let threat = self.game.obstacles().into_iter().next().map(|(_, position)| position.x);
                threat
                    .filter(|x| *x - player_x < BARK_RANGE + PLAYER_SIZE.x)
                    .map(|_| screen_size / 2.0)
            }
            None => None,
        }
    }
}
