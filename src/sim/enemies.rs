//! Enemy behaviour
//!
//! All kinds share one update: kind-specific movement first (ninja jumps,
//! boss hold and phase cycling), then firing once the shot cooldown elapses.

use glam::Vec2;

use super::entities::create_samurai_bullet;
use super::geometry::Rect;
use super::state::{BOSS_PHASES, Enemy, EnemyKind, GameState};
use crate::config::{EnemyTuning, Tuning};

/// Boss phase 1 bullet fan (vertical speeds)
const BOSS_SPREAD: [f32; 3] = [-1.5, 0.0, 1.5];

/// Advance kind-specific movement and timers for one enemy
pub fn advance_behavior(enemy: &mut Enemy, tuning: &Tuning, now: f64) {
    let e = &tuning.enemies;
    match &mut enemy.kind {
        EnemyKind::Samurai => {}
        EnemyKind::Ninja {
            velocity_y,
            is_jumping,
            last_jump_time,
            jump_cooldown,
        } => {
            if !*is_jumping && now - *last_jump_time >= *jump_cooldown {
                *velocity_y = e.ninja_jump_force;
                *is_jumping = true;
                *last_jump_time = now;
            }
            if *is_jumping {
                enemy.rect.y += *velocity_y;
                *velocity_y += tuning.player.gravity;
                let ground_top = tuning.ground_top(enemy.rect.height);
                if enemy.rect.y >= ground_top {
                    enemy.rect.y = ground_top;
                    *velocity_y = 0.0;
                    *is_jumping = false;
                }
            }
        }
        EnemyKind::Boss {
            phase,
            last_phase_change,
        } => {
            if enemy.rect.x <= e.boss_hold_x {
                enemy.rect.x = e.boss_hold_x;
                enemy.velocity.x = 0.0;
            }
            if now - *last_phase_change >= e.boss_phase_duration_ms {
                *phase = (*phase + 1) % BOSS_PHASES;
                *last_phase_change = now;
            }
        }
    }
}

fn params_for<'a>(enemy: &Enemy, tuning: &'a Tuning) -> &'a EnemyTuning {
    match enemy.kind {
        EnemyKind::Samurai => &tuning.enemies.samurai,
        EnemyKind::Ninja { .. } => &tuning.enemies.ninja,
        EnemyKind::Boss { .. } => &tuning.enemies.boss,
    }
}

/// Velocity from `from` toward `to` at `speed`, falling back to straight left
fn aimed(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        Vec2::new(-speed, 0.0)
    } else {
        dir * speed
    }
}

/// Bullet velocities for one shot of `enemy`
pub fn shot_pattern(enemy: &Enemy, tuning: &Tuning, target: Vec2, speed_multiplier: f32) -> Vec<Vec2> {
    let speed = params_for(enemy, tuning).bullet_speed * speed_multiplier;
    let straight = Vec2::new(-speed, 0.0);
    match enemy.kind {
        EnemyKind::Samurai => vec![straight],
        EnemyKind::Ninja { .. } => vec![aimed(enemy.rect.center(), target, speed)],
        EnemyKind::Boss { phase, .. } => match phase {
            0 => vec![straight],
            1 => BOSS_SPREAD.iter().map(|&vy| Vec2::new(-speed, vy)).collect(),
            _ => vec![aimed(enemy.rect.center(), target, speed)],
        },
    }
}

/// Whether `enemy` may fire this tick: on screen, ahead of the player, cooled down
pub fn can_fire(enemy: &Enemy, canvas_width: f32, player_right: f32, now: f64) -> bool {
    enemy.rect.x < canvas_width
        && enemy.rect.x > player_right
        && now - enemy.last_shot_time >= enemy.shot_cooldown
}

/// Run behaviour and firing for every enemy on the field
pub fn update_enemies(state: &mut GameState, tuning: &Tuning, now: f64) {
    let target = state.player.rect.center();
    let player_right = state.player.rect.right();
    let multiplier = state.difficulty.speed_multiplier;

    let mut shots: Vec<(Rect, Vec2)> = Vec::new();
    for enemy in &mut state.enemies {
        advance_behavior(enemy, tuning, now);
        if can_fire(enemy, tuning.canvas.width, player_right, now) {
            enemy.last_shot_time = now;
            for velocity in shot_pattern(enemy, tuning, target, multiplier) {
                shots.push((enemy.rect, velocity));
            }
        }
    }

    for (shooter, velocity) in shots {
        let id = state.next_entity_id();
        state
            .samurai_bullets
            .push(create_samurai_bullet(id, &shooter, velocity, tuning));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PowerUpLevels;
    use crate::sim::entities::create_enemy;
    use crate::sim::state::EnemyClass;

    fn state_with(class: EnemyClass, x: f32, tuning: &Tuning) -> GameState {
        let mut state = GameState::new(1, tuning, PowerUpLevels::default());
        state.is_game_running = true;
        let id = state.next_entity_id();
        let mut enemy = create_enemy(id, class, tuning, 1.0, 0.0);
        enemy.rect.x = x;
        state.enemies.push(enemy);
        state
    }

    #[test]
    fn test_samurai_fires_after_cooldown() {
        let tuning = Tuning::default();
        let mut state = state_with(EnemyClass::Samurai, 500.0, &tuning);
        let cooldown = tuning.enemies.samurai.shot_cooldown_ms;

        update_enemies(&mut state, &tuning, cooldown - 1.0);
        assert!(state.samurai_bullets.is_empty());

        update_enemies(&mut state, &tuning, cooldown);
        assert_eq!(state.samurai_bullets.len(), 1);
        let bullet = &state.samurai_bullets[0];
        assert!(bullet.velocity.x < 0.0);
        assert_eq!(bullet.velocity.y, 0.0);
        assert_eq!(bullet.rect.right(), 500.0);
        assert_eq!(state.enemies[0].last_shot_time, cooldown);
    }

    #[test]
    fn test_offscreen_enemy_holds_fire() {
        let tuning = Tuning::default();
        let mut state = state_with(EnemyClass::Samurai, tuning.canvas.width, &tuning);
        update_enemies(&mut state, &tuning, 1_000_000.0);
        assert!(state.samurai_bullets.is_empty());
    }

    #[test]
    fn test_enemy_behind_player_holds_fire() {
        let tuning = Tuning::default();
        let mut state = state_with(EnemyClass::Samurai, 10.0, &tuning);
        update_enemies(&mut state, &tuning, 1_000_000.0);
        assert!(state.samurai_bullets.is_empty());
    }

    #[test]
    fn test_ninja_jumps_and_lands() {
        let tuning = Tuning::default();
        let mut state = state_with(EnemyClass::Ninja, 500.0, &tuning);
        let ground_top = state.enemies[0].rect.y;
        let cooldown = tuning.enemies.ninja_jump_cooldown_ms;

        advance_behavior(&mut state.enemies[0], &tuning, cooldown);
        assert!(state.enemies[0].rect.y < ground_top);
        assert!(matches!(state.enemies[0].kind, EnemyKind::Ninja { is_jumping: true, .. }));

        for _ in 0..200 {
            advance_behavior(&mut state.enemies[0], &tuning, cooldown);
        }
        assert_eq!(state.enemies[0].rect.y, ground_top);
        assert!(matches!(state.enemies[0].kind, EnemyKind::Ninja { is_jumping: false, .. }));
    }

    #[test]
    fn test_ninja_aims_at_player() {
        let tuning = Tuning::default();
        let state = state_with(EnemyClass::Ninja, 500.0, &tuning);
        let target = state.player.rect.center();
        let shots = shot_pattern(&state.enemies[0], &tuning, target, 1.0);
        assert_eq!(shots.len(), 1);
        assert!(shots[0].x < 0.0);
        assert!((shots[0].length() - tuning.enemies.ninja.bullet_speed).abs() < 1e-4);
    }

    #[test]
    fn test_boss_holds_position() {
        let tuning = Tuning::default();
        let hold = tuning.enemies.boss_hold_x;
        let mut state = state_with(EnemyClass::Boss, hold - 1.0, &tuning);
        advance_behavior(&mut state.enemies[0], &tuning, 0.0);
        assert_eq!(state.enemies[0].rect.x, hold);
        assert_eq!(state.enemies[0].velocity.x, 0.0);
    }

    #[test]
    fn test_boss_cycles_phases() {
        let tuning = Tuning::default();
        let mut state = state_with(EnemyClass::Boss, 700.0, &tuning);
        let step = tuning.enemies.boss_phase_duration_ms;
        let mut phases = Vec::new();
        for i in 1..=4 {
            advance_behavior(&mut state.enemies[0], &tuning, step * i as f64);
            if let EnemyKind::Boss { phase, .. } = state.enemies[0].kind {
                phases.push(phase);
            }
        }
        assert_eq!(phases, vec![1, 2, 0, 1]);
    }

    #[test]
    fn test_boss_spread_phase() {
        let tuning = Tuning::default();
        let mut state = state_with(EnemyClass::Boss, 700.0, &tuning);
        state.enemies[0].kind = EnemyKind::Boss {
            phase: 1,
            last_phase_change: 0.0,
        };
        let shots = shot_pattern(&state.enemies[0], &tuning, Vec2::ZERO, 2.0);
        assert_eq!(shots.len(), 3);
        assert!(shots.iter().all(|v| v.x == -tuning.enemies.boss.bullet_speed * 2.0));
    }
}
