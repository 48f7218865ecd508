//! Browser bindings
//!
//! The page owns the canvas, the input listeners and the
//! requestAnimationFrame loop; it forwards timestamps and intents here and
//! renders from the JSON snapshot.

use wasm_bindgen::prelude::*;

use crate::config::{PowerUpLevels, Tuning};
use crate::driver::GameDriver;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed by an earlier instance
        return;
    }
    log::info!("Sushi Dash core loaded");
}

/// One game instance for the page
#[wasm_bindgen]
pub struct WebGame {
    driver: GameDriver,
}

#[wasm_bindgen]
impl WebGame {
    /// `tuning_json` may be omitted for the built-in tuning
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64, tuning_json: Option<String>) -> Result<WebGame, JsError> {
        let tuning = match tuning_json {
            Some(json) => Tuning::from_json(&json)?,
            None => Tuning::default(),
        };
        let driver = GameDriver::new(tuning, PowerUpLevels::default(), seed)?;
        Ok(Self { driver })
    }

    pub fn start(&mut self, now: f64) {
        self.driver.start(now);
    }

    pub fn jump(&mut self) {
        self.driver.jump();
    }

    pub fn shoot(&mut self) {
        self.driver.shoot();
    }

    /// Call from requestAnimationFrame; returns ticks executed
    pub fn frame(&mut self, now: f64) -> u32 {
        self.driver.on_animation_frame(now)
    }

    #[wasm_bindgen(js_name = setPowerUpLevels)]
    pub fn set_power_up_levels(
        &mut self,
        shield: u32,
        infinite_ammo: u32,
        speed_boost: u32,
        multi_shot: u32,
        rice_rocket_ammo: u32,
    ) {
        self.driver.set_power_up_levels(PowerUpLevels {
            shield,
            infinite_ammo,
            speed_boost,
            multi_shot,
            rice_rocket_ammo,
        });
    }

    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> Result<String, JsError> {
        Ok(self.driver.snapshot_json()?)
    }

    /// Events since the last call, as a JSON array
    #[wasm_bindgen(js_name = drainEventsJson)]
    pub fn drain_events_json(&mut self) -> Result<String, JsError> {
        let events = self.driver.drain_events();
        Ok(serde_json::to_string(&events)?)
    }

    #[wasm_bindgen(js_name = distanceMeters)]
    pub fn distance_meters(&self) -> u64 {
        self.driver.distance_meters()
    }

    pub fn ammo(&self) -> u32 {
        self.driver.ammo_display().0
    }

    #[wasm_bindgen(js_name = maxAmmo)]
    pub fn max_ammo(&self) -> u32 {
        self.driver.ammo_display().1
    }

    #[wasm_bindgen(js_name = infiniteAmmo)]
    pub fn infinite_ammo(&self) -> bool {
        self.driver.ammo_display().2
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.driver.is_running()
    }

    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.driver.is_game_over()
    }
}
