//! Browser bridge
//!
//! A thin `wasm-bindgen` facade over [`DriftSession`]. The page forwards
//! `keydown`/`keyup` codes and `requestAnimationFrame` timestamps, then reads
//! telemetry and events back as JSON for the renderer and HUD.
//!
//! ```js
//! const game = new WebSession(null, isLowEndDevice);
//! addEventListener("keydown", e => game.key_event(e.code, true));
//! addEventListener("keyup", e => game.key_event(e.code, false));
//! function loop(now) {
//!   if (game.tick(now)) render(JSON.parse(game.telemetry_json()));
//!   for (const ev of JSON.parse(game.drain_events_json())) hud(ev);
//!   requestAnimationFrame(loop);
//! }
//! ```

use tracing::warn;
use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::input::{DriveKeys, KeyCode};
use crate::physics::{Obstacle, ObstacleField};
use crate::session::{DriftSession, FramePacer};
use crate::storage::HighScoreStore;

/// Arena used when the page does not supply its own obstacles.
const ARENA_HALF_EXTENT: f32 = 60.0;
const ARENA_WALL_THICKNESS: f32 = 2.0;
const ARENA_WALL_HEIGHT: f32 = 3.0;

/// High score kept in `window.localStorage`.
pub struct LocalStorageHighScore {
    key: String,
}

impl LocalStorageHighScore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl HighScoreStore for LocalStorageHighScore {
    fn load(&self) -> u64 {
        Self::storage()
            .and_then(|storage| storage.get_item(&self.key).ok().flatten())
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(0)
    }

    fn save(&mut self, score: u64) {
        let Some(storage) = Self::storage() else {
            warn!("localStorage unavailable, high score not saved");
            return;
        };
        if storage.set_item(&self.key, &score.to_string()).is_err() {
            warn!(key = %self.key, "failed to write high score");
        }
    }
}

#[wasm_bindgen]
pub struct WebSession {
    session: DriftSession,
    pacer: FramePacer,
    keys: DriveKeys,
}

#[wasm_bindgen]
impl WebSession {
    /// `config_json` may override any subset of the tuning; `constrained`
    /// caps the simulation at the configured low-end frame rate.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>, constrained: bool) -> Result<WebSession, JsValue> {
        console_error_panic_hook::set_once();

        let config = match config_json {
            Some(json) => GameConfig::from_json_str(&json).map_err(|err| JsValue::from_str(&err.to_string()))?,
            None => GameConfig::default(),
        };

        let mut pacer = FramePacer::new(config.session.max_frame_dt);
        if constrained {
            pacer.set_target_rate(Some(config.session.constrained_frame_hz));
        }

        let store = LocalStorageHighScore::new(config.session.high_score_key.clone());
        let field = ObstacleField::walled_arena(ARENA_HALF_EXTENT, ARENA_WALL_THICKNESS, ARENA_WALL_HEIGHT);
        let session = DriftSession::new(config, field, Box::new(store))
            .map_err(|err| JsValue::from_str(&err.to_string()))?;

        Ok(WebSession {
            session,
            pacer,
            keys: DriveKeys::new(),
        })
    }

    pub fn start(&mut self) -> bool {
        self.session.start()
    }

    pub fn new_session(&mut self) {
        self.session.new_session();
        self.pacer.reset();
        self.keys.reset();
    }

    /// Forward a DOM `KeyboardEvent.code`. Returns `true` for driving keys
    /// so the page can `preventDefault()`.
    pub fn key_event(&mut self, code: &str, pressed: bool) -> bool {
        self.keys.handle_key(KeyCode::from_dom_code(code), pressed)
    }

    /// Release all keys (window blur).
    pub fn release_all(&mut self) {
        self.keys.reset();
    }

    pub fn set_constrained(&mut self, constrained: bool) {
        let hz = constrained.then_some(self.session.config().session.constrained_frame_hz);
        self.pacer.set_target_rate(hz);
    }

    /// Frame callback. Returns `true` if a simulation step ran.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let Some(dt) = self.pacer.tick(now_ms) else {
            return false;
        };
        let input = self.keys.snapshot();
        // Restart fires once per key press
        self.keys.restart = false;
        self.session.frame(input, dt);
        true
    }

    /// Replace the arena walls with the page's own track boxes.
    pub fn clear_obstacles(&mut self) {
        self.session.field_mut().clear();
    }

    /// Add a track box by its ground footprint.
    pub fn add_obstacle(&mut self, x0: f32, z0: f32, x1: f32, z1: f32, height: f32) -> usize {
        self.session
            .field_mut()
            .push(Obstacle::from_footprint(x0, z0, x1, z1, height))
    }

    pub fn telemetry_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.telemetry()).map_err(|err| JsValue::from_str(&err.to_string()))
    }

    pub fn drain_events_json(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.drain_events()).map_err(|err| JsValue::from_str(&err.to_string()))
    }

    pub fn high_score(&self) -> f64 {
        self.session.score().high_score() as f64
    }
}
