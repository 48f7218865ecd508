//! Tuning and injected shop state
//!
//! Everything numeric the simulation reads is supplied here at construction
//! time. Each section uses `#[serde(default)]`, so a tuning file only needs
//! the values it overrides.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::state::PowerUpKind;

/// How animation frames are turned into simulation ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TimingMode {
    /// At most one tick per eligible frame; slow frames slow the game down
    #[default]
    FrameLocked,
    /// Accumulate elapsed time and run as many ticks as it covers (capped)
    FixedStep,
}

impl TimingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimingMode::FrameLocked => "frame-locked",
            TimingMode::FixedStep => "fixed-step",
        }
    }
}

/// Upgrade tiers bought in the external shop (read-only during a run)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpLevels {
    pub shield: u32,
    pub infinite_ammo: u32,
    pub speed_boost: u32,
    pub multi_shot: u32,
    pub rice_rocket_ammo: u32,
}

impl PowerUpLevels {
    /// Tier of the given timed power-up
    pub fn level_for(&self, kind: PowerUpKind) -> u32 {
        match kind {
            PowerUpKind::Shield => self.shield,
            PowerUpKind::InfiniteAmmo => self.infinite_ammo,
            PowerUpKind::SpeedBoost => self.speed_boost,
            PowerUpKind::MultiShot => self.multi_shot,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasTuning {
    pub width: f32,
    pub height: f32,
    pub ground_y: f32,
}

impl Default for CanvasTuning {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            ground_y: GROUND_Y,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub x: f32,
    pub width: f32,
    pub height: f32,
    pub color: u32,
    pub gravity: f32,
    pub jump_force: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            x: PLAYER_X,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            color: PLAYER_COLOR,
            gravity: GRAVITY,
            jump_force: JUMP_FORCE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AmmoTuning {
    pub base_max: u32,
    pub per_level: u32,
    pub recharge_interval_ms: f64,
    pub rocket_speed: f32,
    pub rocket_width: f32,
    pub rocket_height: f32,
    pub multi_shot_base_count: u32,
    pub multi_shot_max_extra: u32,
    pub multi_shot_spread: f32,
}

impl Default for AmmoTuning {
    fn default() -> Self {
        Self {
            base_max: BASE_MAX_AMMO,
            per_level: AMMO_PER_LEVEL,
            recharge_interval_ms: AMMO_RECHARGE_INTERVAL_MS,
            rocket_speed: RICE_ROCKET_SPEED,
            rocket_width: RICE_ROCKET_WIDTH,
            rocket_height: RICE_ROCKET_HEIGHT,
            multi_shot_base_count: MULTI_SHOT_BASE_COUNT,
            multi_shot_max_extra: MULTI_SHOT_MAX_EXTRA,
            multi_shot_spread: MULTI_SHOT_SPREAD,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SushiTuning {
    pub base_speed: f32,
    /// Distance of the first sushi
    pub initial_distance: u64,
    pub min_gap: u64,
    pub max_gap: u64,
}

impl Default for SushiTuning {
    fn default() -> Self {
        Self {
            base_speed: SUSHI_BASE_SPEED,
            initial_distance: SUSHI_INITIAL_DISTANCE,
            min_gap: SUSHI_MIN_GAP,
            max_gap: SUSHI_MAX_GAP,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToriiTuning {
    pub interval_meters: u64,
    pub width: f32,
    pub height: f32,
}

impl Default for ToriiTuning {
    fn default() -> Self {
        Self {
            interval_meters: TORII_INTERVAL_METERS,
            width: TORII_WIDTH,
            height: TORII_HEIGHT,
        }
    }
}

/// Per-kind enemy parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub width: f32,
    pub height: f32,
    pub base_speed: f32,
    pub lives: u32,
    pub shot_cooldown_ms: f64,
    pub bullet_speed: f32,
    /// Distance before this kind may appear
    pub start_distance: u64,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self::samurai()
    }
}

impl EnemyTuning {
    pub fn samurai() -> Self {
        Self {
            width: 50.0,
            height: 70.0,
            base_speed: 3.0,
            lives: 2,
            shot_cooldown_ms: 2000.0,
            bullet_speed: SAMURAI_BULLET_SPEED,
            start_distance: SAMURAI_START_DISTANCE,
        }
    }

    pub fn ninja() -> Self {
        Self {
            width: 40.0,
            height: 55.0,
            base_speed: 4.5,
            lives: 1,
            shot_cooldown_ms: 2500.0,
            bullet_speed: SAMURAI_BULLET_SPEED + 1.0,
            start_distance: NINJA_START_DISTANCE,
        }
    }

    pub fn boss() -> Self {
        Self {
            width: 100.0,
            height: 120.0,
            base_speed: 2.0,
            lives: 10,
            shot_cooldown_ms: 1200.0,
            bullet_speed: SAMURAI_BULLET_SPEED,
            // First arrival; later ones land on `boss_interval_distance` multiples
            start_distance: BOSS_INTERVAL_DISTANCE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemiesTuning {
    pub max_on_screen: usize,
    /// Per-tick spawn probability once the gap has elapsed
    pub spawn_chance: f64,
    pub min_gap: u64,
    pub samurai: EnemyTuning,
    pub ninja: EnemyTuning,
    pub boss: EnemyTuning,
    /// A boss arrives every multiple of this distance
    pub boss_interval_distance: u64,
    pub boss_hold_x: f32,
    pub boss_phase_duration_ms: f64,
    pub ninja_jump_force: f32,
    pub ninja_jump_cooldown_ms: f64,
    pub bullet_width: f32,
    pub bullet_height: f32,
}

impl Default for EnemiesTuning {
    fn default() -> Self {
        Self {
            max_on_screen: MAX_ENEMIES_ON_SCREEN,
            spawn_chance: ENEMY_SPAWN_CHANCE,
            min_gap: ENEMY_MIN_GAP,
            samurai: EnemyTuning::samurai(),
            ninja: EnemyTuning::ninja(),
            boss: EnemyTuning::boss(),
            boss_interval_distance: BOSS_INTERVAL_DISTANCE,
            boss_hold_x: BOSS_HOLD_X,
            boss_phase_duration_ms: BOSS_PHASE_DURATION_MS,
            ninja_jump_force: NINJA_JUMP_FORCE,
            ninja_jump_cooldown_ms: NINJA_JUMP_COOLDOWN_MS,
            bullet_width: SAMURAI_BULLET_WIDTH,
            bullet_height: SAMURAI_BULLET_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpTuning {
    pub interval_meters: u64,
    pub spawn_chance: f64,
    pub size: f32,
    pub speed: f32,
    pub float_height: f32,
    pub shield_duration_ms: f64,
    pub infinite_ammo_duration_ms: f64,
    pub speed_boost_duration_ms: f64,
    pub multi_shot_duration_ms: f64,
    pub duration_per_level_ms: f64,
    pub base_scroll_speed: f32,
    pub speed_boost_scroll_factor: f32,
}

impl Default for PowerUpTuning {
    fn default() -> Self {
        Self {
            interval_meters: POWER_UP_INTERVAL_METERS,
            spawn_chance: POWER_UP_SPAWN_CHANCE,
            size: POWER_UP_SIZE,
            speed: POWER_UP_SPEED,
            float_height: POWER_UP_FLOAT_HEIGHT,
            shield_duration_ms: SHIELD_DURATION_MS,
            infinite_ammo_duration_ms: INFINITE_AMMO_DURATION_MS,
            speed_boost_duration_ms: SPEED_BOOST_DURATION_MS,
            multi_shot_duration_ms: MULTI_SHOT_DURATION_MS,
            duration_per_level_ms: DURATION_PER_LEVEL_MS,
            base_scroll_speed: BASE_SCROLL_SPEED,
            speed_boost_scroll_factor: SPEED_BOOST_SCROLL_FACTOR,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTuning {
    /// Distances at which the level goes up by one (ascending)
    pub thresholds: Vec<u64>,
    pub speed_step: f32,
}

impl Default for DifficultyTuning {
    fn default() -> Self {
        Self {
            thresholds: DIFFICULTY_THRESHOLDS.to_vec(),
            speed_step: SPEED_STEP_PER_LEVEL,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingTuning {
    pub mode: TimingMode,
    pub target_fps: u32,
    pub max_substeps: u32,
}

impl Default for TimingTuning {
    fn default() -> Self {
        Self {
            mode: TimingMode::FrameLocked,
            target_fps: TARGET_FPS,
            max_substeps: MAX_SUBSTEPS,
        }
    }
}

/// Complete simulation tuning
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub canvas: CanvasTuning,
    pub player: PlayerTuning,
    pub ammo: AmmoTuning,
    pub sushi: SushiTuning,
    pub torii: ToriiTuning,
    pub enemies: EnemiesTuning,
    pub power_ups: PowerUpTuning,
    pub difficulty: DifficultyTuning,
    pub timing: TimingTuning,
}

impl Tuning {
    /// Parse and validate a (possibly partial) tuning document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Milliseconds between ticks at the target frame rate
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / self.timing.target_fps.max(1) as f64
    }

    /// Top edge for an entity of `height` standing on the ground
    pub fn ground_top(&self, height: f32) -> f32 {
        self.canvas.ground_y - height
    }

    /// Ammo capacity for the given shop tiers
    pub fn max_ammo(&self, levels: &PowerUpLevels) -> u32 {
        self.ammo.base_max + levels.rice_rocket_ammo * self.ammo.per_level
    }

    /// Rockets per shot while multi-shot is active
    pub fn multi_shot_count(&self, levels: &PowerUpLevels) -> u32 {
        self.ammo.multi_shot_base_count + levels.multi_shot.min(self.ammo.multi_shot_max_extra)
    }

    /// Effect duration for a pickup of `kind` at the player's tier
    pub fn power_up_duration_ms(&self, kind: PowerUpKind, levels: &PowerUpLevels) -> f64 {
        let base = match kind {
            PowerUpKind::Shield => self.power_ups.shield_duration_ms,
            PowerUpKind::InfiniteAmmo => self.power_ups.infinite_ammo_duration_ms,
            PowerUpKind::SpeedBoost => self.power_ups.speed_boost_duration_ms,
            PowerUpKind::MultiShot => self.power_ups.multi_shot_duration_ms,
        };
        base + levels.level_for(kind) as f64 * self.power_ups.duration_per_level_ms
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.canvas;
        if c.width <= 0.0 || c.height <= 0.0 {
            return Err(ConfigError::invalid("canvas", "width and height must be positive"));
        }
        if c.ground_y <= 0.0 || c.ground_y > c.height {
            return Err(ConfigError::invalid("canvas.ground_y", "must lie within the canvas"));
        }

        let p = &self.player;
        if p.width <= 0.0 || p.height <= 0.0 {
            return Err(ConfigError::invalid("player", "width and height must be positive"));
        }
        if p.gravity <= 0.0 {
            return Err(ConfigError::invalid("player.gravity", "must be positive"));
        }
        if p.jump_force >= 0.0 {
            return Err(ConfigError::invalid("player.jump_force", "must be negative (upward)"));
        }

        let a = &self.ammo;
        if a.base_max == 0 {
            return Err(ConfigError::invalid("ammo.base_max", "must be at least 1"));
        }
        if a.recharge_interval_ms <= 0.0 {
            return Err(ConfigError::invalid("ammo.recharge_interval_ms", "must be positive"));
        }
        if a.rocket_speed <= 0.0 {
            return Err(ConfigError::invalid("ammo.rocket_speed", "must be positive"));
        }
        if a.multi_shot_base_count == 0 {
            return Err(ConfigError::invalid("ammo.multi_shot_base_count", "must be at least 1"));
        }

        if self.sushi.min_gap > self.sushi.max_gap {
            return Err(ConfigError::invalid("sushi", "min_gap exceeds max_gap"));
        }
        if self.sushi.base_speed <= 0.0 {
            return Err(ConfigError::invalid("sushi.base_speed", "must be positive"));
        }
        if self.torii.interval_meters == 0 {
            return Err(ConfigError::invalid("torii.interval_meters", "must be at least 1"));
        }

        let e = &self.enemies;
        if !(0.0..=1.0).contains(&e.spawn_chance) {
            return Err(ConfigError::invalid("enemies.spawn_chance", "must be within [0, 1]"));
        }
        for (field, kind) in [
            ("enemies.samurai", &e.samurai),
            ("enemies.ninja", &e.ninja),
            ("enemies.boss", &e.boss),
        ] {
            if kind.lives == 0 {
                return Err(ConfigError::invalid(field, "lives must be at least 1"));
            }
            if kind.width <= 0.0 || kind.height <= 0.0 {
                return Err(ConfigError::invalid(field, "width and height must be positive"));
            }
        }
        if e.boss_interval_distance == 0 {
            return Err(ConfigError::invalid("enemies.boss_interval_distance", "must be at least 1"));
        }
        if e.boss_phase_duration_ms <= 0.0 {
            return Err(ConfigError::invalid("enemies.boss_phase_duration_ms", "must be positive"));
        }

        let pu = &self.power_ups;
        if pu.interval_meters == 0 {
            return Err(ConfigError::invalid("power_ups.interval_meters", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&pu.spawn_chance) {
            return Err(ConfigError::invalid("power_ups.spawn_chance", "must be within [0, 1]"));
        }
        if pu.shield_duration_ms <= 0.0
            || pu.infinite_ammo_duration_ms <= 0.0
            || pu.speed_boost_duration_ms <= 0.0
            || pu.multi_shot_duration_ms <= 0.0
        {
            return Err(ConfigError::invalid("power_ups", "durations must be positive"));
        }

        let d = &self.difficulty;
        if d.thresholds.is_empty() {
            return Err(ConfigError::invalid("difficulty.thresholds", "must not be empty"));
        }
        if d.thresholds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ConfigError::invalid("difficulty.thresholds", "must be strictly ascending"));
        }
        if d.speed_step < 0.0 {
            return Err(ConfigError::invalid("difficulty.speed_step", "must not be negative"));
        }

        if self.timing.target_fps == 0 {
            return Err(ConfigError::invalid("timing.target_fps", "must be at least 1"));
        }
        if self.timing.max_substeps == 0 {
            return Err(ConfigError::invalid("timing.max_substeps", "must be at least 1"));
        }

        Ok(())
    }
}
