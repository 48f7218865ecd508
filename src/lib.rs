//! Sushi Dash - side-scrolling runner simulation core
//!
//! Core modules:
//! - `sim`: Deterministic per-tick simulation (physics, spawning, collisions, power-ups)
//! - `driver`: Owns the game state, accepts intents and throttles animation frames
//! - `config`: Data-driven tuning and injected shop levels
//! - `error`: Construction-time configuration errors
//! - `web`: wasm-bindgen boundary for the embedding web app (wasm32 only)

pub mod config;
pub mod driver;
pub mod error;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{PowerUpLevels, TimingMode, Tuning};
pub use driver::GameDriver;
pub use error::ConfigError;

/// Default tuning constants
///
/// All velocities and distances are per-tick units, not physical time.
/// Timestamps (cooldowns, durations) are milliseconds.
pub mod consts {
    /// Target frame rate for the tick throttle
    pub const TARGET_FPS: u32 = 60;
    /// Maximum ticks per frame in fixed-step mode
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Play field
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 400.0;
    /// Y coordinate of the ground line (entity bottoms rest here)
    pub const GROUND_Y: f32 = 350.0;

    /// Player
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    pub const PLAYER_COLOR: u32 = 0xE63946;
    pub const GRAVITY: f32 = 0.6;
    /// Upward impulse (negative is up)
    pub const JUMP_FORCE: f32 = -13.0;

    /// Rice rockets
    pub const RICE_ROCKET_SPEED: f32 = 10.0;
    pub const RICE_ROCKET_WIDTH: f32 = 20.0;
    pub const RICE_ROCKET_HEIGHT: f32 = 10.0;
    pub const BASE_MAX_AMMO: u32 = 3;
    pub const AMMO_PER_LEVEL: u32 = 1;
    pub const AMMO_RECHARGE_INTERVAL_MS: f64 = 2000.0;
    pub const MULTI_SHOT_BASE_COUNT: u32 = 3;
    pub const MULTI_SHOT_MAX_EXTRA: u32 = 2;
    /// Vertical speed difference between adjacent rockets in a fan
    pub const MULTI_SHOT_SPREAD: f32 = 1.5;

    /// Sushi (ground obstacles)
    pub const SUSHI_BASE_SPEED: f32 = 5.0;
    pub const SUSHI_INITIAL_DISTANCE: u64 = 100;
    pub const SUSHI_MIN_GAP: u64 = 60;
    pub const SUSHI_MAX_GAP: u64 = 140;

    /// Torii gates (decoration)
    pub const TORII_INTERVAL_METERS: u64 = 100;
    pub const TORII_WIDTH: f32 = 80.0;
    pub const TORII_HEIGHT: f32 = 120.0;

    /// Background scroll (cosmetic)
    pub const BASE_SCROLL_SPEED: f32 = 5.0;
    pub const SPEED_BOOST_SCROLL_FACTOR: f32 = 1.5;

    /// Enemies
    pub const MAX_ENEMIES_ON_SCREEN: usize = 3;
    pub const ENEMY_SPAWN_CHANCE: f64 = 0.01;
    pub const ENEMY_MIN_GAP: u64 = 200;
    pub const SAMURAI_START_DISTANCE: u64 = 500;
    pub const NINJA_START_DISTANCE: u64 = 1500;
    pub const BOSS_INTERVAL_DISTANCE: u64 = 5000;
    pub const BOSS_HOLD_X: f32 = 620.0;
    pub const BOSS_PHASE_DURATION_MS: f64 = 4000.0;
    pub const NINJA_JUMP_FORCE: f32 = -11.0;
    pub const NINJA_JUMP_COOLDOWN_MS: f64 = 1500.0;

    /// Enemy projectiles
    pub const SAMURAI_BULLET_SPEED: f32 = 7.0;
    pub const SAMURAI_BULLET_WIDTH: f32 = 15.0;
    pub const SAMURAI_BULLET_HEIGHT: f32 = 6.0;

    /// Power-up pickups
    pub const POWER_UP_INTERVAL_METERS: u64 = 50;
    pub const POWER_UP_SPAWN_CHANCE: f64 = 0.05;
    pub const POWER_UP_SIZE: f32 = 30.0;
    pub const POWER_UP_SPEED: f32 = 4.0;
    /// Height of the pickup's bottom edge above the ground
    pub const POWER_UP_FLOAT_HEIGHT: f32 = 70.0;
    pub const SHIELD_DURATION_MS: f64 = 5000.0;
    pub const INFINITE_AMMO_DURATION_MS: f64 = 7000.0;
    pub const SPEED_BOOST_DURATION_MS: f64 = 6000.0;
    pub const MULTI_SHOT_DURATION_MS: f64 = 7000.0;
    pub const DURATION_PER_LEVEL_MS: f64 = 1000.0;

    /// Difficulty
    pub const DIFFICULTY_THRESHOLDS: [u64; 5] = [1000, 2500, 5000, 8000, 12000];
    pub const SPEED_STEP_PER_LEVEL: f32 = 0.15;
}

/// Distance in whole meters as shown on the HUD
#[inline]
pub fn meters(distance: u64) -> u64 {
    distance / 10
}
