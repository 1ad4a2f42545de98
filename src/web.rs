//! Browser facade
//!
//! Exposes the game to a JavaScript renderer. The page owns the canvas,
//! input listeners and `requestAnimationFrame`; it calls `tick`/`activate`
//! and reads JSON snapshots back.

use wasm_bindgen::prelude::*;

use crate::sim::Game;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Flappy Cone core loaded");
}

#[wasm_bindgen]
pub struct FlappyCore {
    game: Game,
}

#[wasm_bindgen]
impl FlappyCore {
    /// Create a game from an optional (partial) JSON tuning
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: Option<String>) -> Result<FlappyCore, JsValue> {
        let tuning = match tuning_json {
            Some(json) => Tuning::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => Tuning::default(),
        };
        let game = Game::new(tuning).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(FlappyCore { game })
    }

    pub fn activate(&mut self) {
        self.game.activate();
    }

    pub fn tick(&mut self, dt: f32) {
        self.game.tick(dt);
    }

    pub fn phase(&self) -> String {
        self.game.phase().as_str().to_string()
    }

    pub fn score(&self) -> u32 {
        self.game.score()
    }

    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.game.snapshot()).unwrap_or_default()
    }

    /// Events since the last call, as a JSON array
    pub fn events_json(&mut self) -> String {
        serde_json::to_string(&self.game.drain_events()).unwrap_or_default()
    }
}
