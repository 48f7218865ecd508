//! Game state and core simulation types
//!
//! Everything a renderer or HUD needs for one frame lives here, and all of it
//! serializes, so a snapshot can be handed across the wasm boundary as JSON.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entities::create_player;
use super::geometry::Rect;
use crate::config::{PowerUpLevels, Tuning};

/// Timed power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Shield,
    InfiniteAmmo,
    SpeedBoost,
    MultiShot,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Shield,
        PowerUpKind::InfiniteAmmo,
        PowerUpKind::SpeedBoost,
        PowerUpKind::MultiShot,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Shield => "shield",
            PowerUpKind::InfiniteAmmo => "infinite_ammo",
            PowerUpKind::SpeedBoost => "speed_boost",
            PowerUpKind::MultiShot => "multi_shot",
        }
    }
}

/// The single active power-up effect, with its absolute expiry (ms)
///
/// A tagged variant rather than four flags, so two effects can never be
/// active at once.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum ActivePowerUp {
    #[default]
    None,
    Shield { ends_at: f64 },
    InfiniteAmmo { ends_at: f64 },
    SpeedBoost { ends_at: f64 },
    MultiShot { ends_at: f64 },
}

impl ActivePowerUp {
    pub fn new(kind: PowerUpKind, ends_at: f64) -> Self {
        match kind {
            PowerUpKind::Shield => ActivePowerUp::Shield { ends_at },
            PowerUpKind::InfiniteAmmo => ActivePowerUp::InfiniteAmmo { ends_at },
            PowerUpKind::SpeedBoost => ActivePowerUp::SpeedBoost { ends_at },
            PowerUpKind::MultiShot => ActivePowerUp::MultiShot { ends_at },
        }
    }

    pub fn kind(&self) -> Option<PowerUpKind> {
        match self {
            ActivePowerUp::None => None,
            ActivePowerUp::Shield { .. } => Some(PowerUpKind::Shield),
            ActivePowerUp::InfiniteAmmo { .. } => Some(PowerUpKind::InfiniteAmmo),
            ActivePowerUp::SpeedBoost { .. } => Some(PowerUpKind::SpeedBoost),
            ActivePowerUp::MultiShot { .. } => Some(PowerUpKind::MultiShot),
        }
    }

    pub fn ends_at(&self) -> Option<f64> {
        match *self {
            ActivePowerUp::None => None,
            ActivePowerUp::Shield { ends_at }
            | ActivePowerUp::InfiniteAmmo { ends_at }
            | ActivePowerUp::SpeedBoost { ends_at }
            | ActivePowerUp::MultiShot { ends_at } => Some(ends_at),
        }
    }

    #[inline]
    pub fn is(&self, kind: PowerUpKind) -> bool {
        self.kind() == Some(kind)
    }
}

/// The runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    pub velocity_y: f32,
    pub is_jumping: bool,
    /// Cosmetic, passed through to the renderer
    pub color: u32,
    pub rice_rocket_ammo: u32,
    pub max_rice_rocket_ammo: u32,
    pub last_ammo_recharge_time: f64,
    pub power_up: ActivePowerUp,
    /// Shop tiers, copied in at run start
    pub power_up_levels: PowerUpLevels,
}

impl Player {
    pub fn has_shield(&self) -> bool {
        self.power_up.is(PowerUpKind::Shield)
    }

    pub fn has_infinite_ammo(&self) -> bool {
        self.power_up.is(PowerUpKind::InfiniteAmmo)
    }

    pub fn has_speed_boost(&self) -> bool {
        self.power_up.is(PowerUpKind::SpeedBoost)
    }

    pub fn has_multi_shot(&self) -> bool {
        self.power_up.is(PowerUpKind::MultiShot)
    }

    /// Expiry of `kind` if it is the active effect
    pub fn power_up_end_time(&self, kind: PowerUpKind) -> Option<f64> {
        if self.power_up.is(kind) {
            self.power_up.ends_at()
        } else {
            None
        }
    }

    /// Player is touching the ground
    pub fn is_grounded(&self) -> bool {
        !self.is_jumping
    }
}

/// Player projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiceRocket {
    pub id: u32,
    pub rect: Rect,
    pub velocity: Vec2,
}

/// Ground obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sushi {
    pub id: u32,
    pub rect: Rect,
    pub velocity: Vec2,
}

/// Decorative gate, never collides
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Torii {
    pub id: u32,
    pub rect: Rect,
    pub velocity: Vec2,
}

/// Enemy kind without its behaviour payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyClass {
    Samurai,
    Ninja,
    Boss,
}

impl EnemyClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyClass::Samurai => "samurai",
            EnemyClass::Ninja => "ninja",
            EnemyClass::Boss => "boss",
        }
    }
}

/// Kind-specific enemy state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EnemyKind {
    Samurai,
    Ninja {
        velocity_y: f32,
        is_jumping: bool,
        last_jump_time: f64,
        jump_cooldown: f64,
    },
    Boss {
        phase: u8,
        last_phase_change: f64,
    },
}

impl EnemyKind {
    pub fn class(&self) -> EnemyClass {
        match self {
            EnemyKind::Samurai => EnemyClass::Samurai,
            EnemyKind::Ninja { .. } => EnemyClass::Ninja,
            EnemyKind::Boss { .. } => EnemyClass::Boss,
        }
    }
}

/// Number of boss attack phases
pub const BOSS_PHASES: u8 = 3;

/// Any enemy; every kind goes through the same spawn/move/collide pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub rect: Rect,
    pub velocity: Vec2,
    pub lives: u32,
    pub max_lives: u32,
    pub last_shot_time: f64,
    pub shot_cooldown: f64,
}

impl Enemy {
    #[inline]
    pub fn class(&self) -> EnemyClass {
        self.kind.class()
    }
}

/// Enemy projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamuraiBullet {
    pub id: u32,
    pub rect: Rect,
    pub velocity: Vec2,
}

/// A power-up on the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUpPickup {
    pub id: u32,
    pub rect: Rect,
    pub velocity: Vec2,
    pub kind: PowerUpKind,
    /// Effect length once collected (ms)
    pub duration: f64,
}

/// Difficulty derived from distance each tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyLevel {
    pub level: u32,
    pub speed_multiplier: f32,
}

impl Default for DifficultyLevel {
    fn default() -> Self {
        Self {
            level: 1,
            speed_multiplier: 1.0,
        }
    }
}

/// Things that happened during a tick, for audio and score flows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RunStarted,
    Jumped,
    Shot { rockets: u32 },
    EnemyHit { id: u32, class: EnemyClass, lives_left: u32 },
    EnemyDefeated { id: u32, class: EnemyClass },
    BossArrived { id: u32 },
    PowerUpCollected(PowerUpKind),
    PowerUpExpired(PowerUpKind),
    ShieldAbsorbed,
    GameOver { distance: u64, meters: u64 },
}

/// Distances at which the next entity of each kind becomes eligible
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnSchedule {
    pub next_sushi_distance: u64,
    pub next_enemy_distance: u64,
    pub next_boss_distance: u64,
    pub next_power_up_meter: u64,
}

impl SpawnSchedule {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            next_sushi_distance: tuning.sushi.initial_distance,
            next_enemy_distance: tuning.enemies.samurai.start_distance,
            next_boss_distance: tuning.enemies.boss.start_distance,
            next_power_up_meter: tuning.power_ups.interval_meters,
        }
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Generator for one tick; same seed and distance give the same draws
    pub fn for_tick(&self, distance: u64) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed ^ distance.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    pub player: Player,
    pub rice_rockets: Vec<RiceRocket>,
    pub sushis: Vec<Sushi>,
    pub toriis: Vec<Torii>,
    pub enemies: Vec<Enemy>,
    pub samurai_bullets: Vec<SamuraiBullet>,
    pub power_ups: Vec<PowerUpPickup>,
    /// Executed ticks since run start
    pub distance: u64,
    pub is_game_running: bool,
    pub is_game_over: bool,
    pub difficulty: DifficultyLevel,
    pub schedule: SpawnSchedule,
    /// Background parallax offset for the renderer, in `[0, canvas width)`
    pub scroll_offset: f32,
    /// Events from the most recent tick or intent
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create an idle (not running) state
    pub fn new(seed: u64, tuning: &Tuning, levels: PowerUpLevels) -> Self {
        Self {
            seed,
            rng_state: RngState::new(seed),
            player: create_player(tuning, levels, 0.0),
            rice_rockets: Vec::new(),
            sushis: Vec::new(),
            toriis: Vec::new(),
            enemies: Vec::new(),
            samurai_bullets: Vec::new(),
            power_ups: Vec::new(),
            distance: 0,
            is_game_running: false,
            is_game_over: false,
            difficulty: DifficultyLevel::default(),
            schedule: SpawnSchedule::new(tuning),
            scroll_offset: 0.0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Distance in HUD meters
    pub fn meters(&self) -> u64 {
        crate::meters(self.distance)
    }

    pub fn boss_present(&self) -> bool {
        self.enemies.iter().any(|e| e.class() == EnemyClass::Boss)
    }

    /// Tick should run
    pub fn is_active(&self) -> bool {
        self.is_game_running && !self.is_game_over
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_power_up_accessors() {
        let none = ActivePowerUp::None;
        assert_eq!(none.kind(), None);
        assert_eq!(none.ends_at(), None);

        let shield = ActivePowerUp::new(PowerUpKind::Shield, 1500.0);
        assert!(shield.is(PowerUpKind::Shield));
        assert!(!shield.is(PowerUpKind::MultiShot));
        assert_eq!(shield.ends_at(), Some(1500.0));
    }

    #[test]
    fn test_player_flags_follow_variant() {
        let tuning = Tuning::default();
        let mut player = create_player(&tuning, PowerUpLevels::default(), 0.0);
        assert!(!player.has_shield());

        player.power_up = ActivePowerUp::new(PowerUpKind::MultiShot, 10.0);
        assert!(player.has_multi_shot());
        assert!(!player.has_shield() && !player.has_infinite_ammo() && !player.has_speed_boost());
        assert_eq!(player.power_up_end_time(PowerUpKind::MultiShot), Some(10.0));
        assert_eq!(player.power_up_end_time(PowerUpKind::Shield), None);
    }

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(7, &Tuning::default(), PowerUpLevels::default());
        assert!(!state.is_game_running);
        assert!(!state.is_game_over);
        assert!(!state.is_active());
        assert_eq!(state.distance, 0);
        assert_eq!(state.difficulty.level, 1);
    }

    #[test]
    fn test_entity_ids_increase() {
        let mut state = GameState::new(7, &Tuning::default(), PowerUpLevels::default());
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert!(b > a);
    }

    #[test]
    fn test_rng_is_reproducible() {
        use rand::Rng;
        let rng_state = RngState::new(42);
        let a: u32 = rng_state.for_tick(10).random();
        let b: u32 = rng_state.for_tick(10).random();
        assert_eq!(a, b);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(7, &Tuning::default(), PowerUpLevels::default());
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.seed, 7);
        assert_eq!(back.player.max_rice_rocket_ammo, state.player.max_rice_rocket_ammo);
    }
}
