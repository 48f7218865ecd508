//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied clock only (no wall-clock reads)
//! - Seeded RNG only
//! - Stable iteration order (insertion order, IDs ascending)
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod enemies;
pub mod entities;
pub mod geometry;
pub mod powerup;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{HazardResult, resolve_collisions};
pub use difficulty::difficulty_for;
pub use entities::{Moving, move_entities};
pub use geometry::{Rect, overlaps};
pub use spawner::{should_spawn_sushi, spawn_entities};
pub use state::{
    ActivePowerUp, DifficultyLevel, Enemy, EnemyClass, EnemyKind, GameEvent, GameState, Player,
    PowerUpKind, PowerUpPickup, RiceRocket, SamuraiBullet, Sushi, Torii,
};
pub use tick::{TickInput, tick};
