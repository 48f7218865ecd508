//! Per-tick simulation step
//!
//! One call advances the run by one tick, in this order:
//! intents → power-up timers and ammo → player physics → movers →
//! enemy behaviour → spawner → difficulty → collisions → distance.

use super::collision::resolve_collisions;
use super::difficulty::difficulty_for;
use super::enemies::update_enemies;
use super::entities::{Moving, left_boundary, move_entities, move_entities_with};
use super::geometry::Rect;
use super::powerup::{expire_power_ups, fire_rice_rockets, recharge_ammo};
use super::spawner::{scroll_speed, spawn_entities};
use super::state::{GameEvent, GameState, Player};
use crate::config::Tuning;

/// Intents collected since the previous tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub jump: bool,
    /// Volleys requested; each costs one ammo unit
    pub shots: u32,
}

/// Upward impulse if grounded; returns whether the jump happened
pub fn apply_jump(player: &mut Player, tuning: &Tuning) -> bool {
    if !player.is_grounded() {
        return false;
    }
    player.velocity_y = tuning.player.jump_force;
    player.is_jumping = true;
    true
}

/// Gravity integration with ground clamping (never scaled by difficulty)
pub fn integrate_player(player: &mut Player, tuning: &Tuning) {
    let ground_top = tuning.ground_top(player.rect.height);
    if !player.is_jumping && player.rect.y >= ground_top {
        return;
    }
    player.rect.y += player.velocity_y;
    player.velocity_y += tuning.player.gravity;
    if player.rect.y >= ground_top {
        player.rect.y = ground_top;
        player.velocity_y = 0.0;
        player.is_jumping = false;
    }
}

/// Still vertically inside the field
fn within_field(rect: &Rect, height: f32) -> bool {
    rect.bottom() >= 0.0 && rect.y <= height
}

/// Run every mover and cull entities that left the field
fn move_all(state: &mut GameState, tuning: &Tuning) {
    let height = tuning.canvas.height;

    let mut rockets = move_entities(std::mem::take(&mut state.rice_rockets), tuning.canvas.width);
    rockets.retain(|r| within_field(&r.rect, height));
    state.rice_rockets = rockets;

    state.sushis = move_entities(
        std::mem::take(&mut state.sushis),
        left_boundary(tuning.player.width),
    );
    state.toriis = move_entities(
        std::mem::take(&mut state.toriis),
        left_boundary(tuning.torii.width),
    );
    state.enemies = move_entities_with(std::mem::take(&mut state.enemies), |e| {
        left_boundary(e.rect().width)
    });

    let mut bullets = move_entities(
        std::mem::take(&mut state.samurai_bullets),
        left_boundary(tuning.enemies.bullet_width),
    );
    bullets.retain(|b| within_field(&b.rect, height));
    state.samurai_bullets = bullets;

    state.power_ups = move_entities(
        std::mem::take(&mut state.power_ups),
        left_boundary(tuning.power_ups.size),
    );

    // Background repeats every canvas width
    state.scroll_offset = (state.scroll_offset + scroll_speed(state, tuning)) % tuning.canvas.width;
}

/// Advance the game state by one tick
///
/// No-op unless the run is active. `now` is the caller's clock in ms and is
/// only used for cooldowns and power-up timers.
pub fn tick(state: &mut GameState, input: &TickInput, tuning: &Tuning, now: f64) {
    if !state.is_active() {
        return;
    }
    state.events.clear();

    if input.jump && apply_jump(&mut state.player, tuning) {
        state.events.push(GameEvent::Jumped);
    }
    for _ in 0..input.shots {
        if fire_rice_rockets(state, tuning) == 0 {
            break;
        }
    }

    if let Some(kind) = expire_power_ups(&mut state.player, now) {
        log::debug!("{} expired", kind.as_str());
        state.events.push(GameEvent::PowerUpExpired(kind));
    }
    recharge_ammo(&mut state.player, now, tuning.ammo.recharge_interval_ms);

    integrate_player(&mut state.player, tuning);
    move_all(state, tuning);
    update_enemies(state, tuning, now);

    let mut rng = state.rng_state.for_tick(state.distance);
    spawn_entities(state, tuning, &mut rng, now);

    state.difficulty = difficulty_for(state.distance, &tuning.difficulty);

    if resolve_collisions(state, now) {
        let (distance, meters) = (state.distance, state.meters());
        log::info!("Game over at {}m (distance {})", meters, distance);
        state.events.push(GameEvent::GameOver { distance, meters });
        return;
    }

    state.distance += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PowerUpLevels;
    use crate::sim::entities::{create_enemy, create_rice_rocket, create_sushi};
    use crate::sim::powerup::activate_power_up;
    use crate::sim::state::{EnemyClass, PowerUpKind};

    fn running_state(tuning: &Tuning) -> GameState {
        let mut state = GameState::new(12345, tuning, PowerUpLevels::default());
        state.is_game_running = true;
        state
    }

    /// Tuning with no random spawns so tests control the field
    fn quiet_tuning() -> Tuning {
        let mut tuning = Tuning::default();
        tuning.sushi.initial_distance = u64::MAX;
        tuning.enemies.spawn_chance = 0.0;
        tuning.enemies.boss.start_distance = u64::MAX;
        tuning.power_ups.spawn_chance = 0.0;
        tuning
    }

    #[test]
    fn test_tick_advances_distance() {
        let tuning = quiet_tuning();
        let mut state = running_state(&tuning);
        for _ in 0..5 {
            tick(&mut state, &TickInput::default(), &tuning, 0.0);
        }
        assert_eq!(state.distance, 5);
    }

    #[test]
    fn test_tick_is_noop_when_not_running() {
        let tuning = quiet_tuning();
        let mut state = GameState::new(1, &tuning, PowerUpLevels::default());
        tick(&mut state, &TickInput::default(), &tuning, 0.0);
        assert_eq!(state.distance, 0);

        state.is_game_running = true;
        state.is_game_over = true;
        tick(&mut state, &TickInput::default(), &tuning, 0.0);
        assert_eq!(state.distance, 0);
    }

    #[test]
    fn test_jump_arc_returns_to_ground() {
        let tuning = quiet_tuning();
        let mut state = running_state(&tuning);
        let ground = state.player.rect.y;

        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &jump, &tuning, 0.0);
        assert!(state.player.is_jumping);
        assert!(state.player.rect.y < ground);
        assert!(state.events.contains(&GameEvent::Jumped));

        // Jumping again mid-air does nothing
        let velocity = state.player.velocity_y;
        tick(&mut state, &jump, &tuning, 0.0);
        assert_eq!(state.player.velocity_y, velocity + tuning.player.gravity);
        assert!(!state.events.contains(&GameEvent::Jumped));

        for _ in 0..100 {
            tick(&mut state, &TickInput::default(), &tuning, 0.0);
        }
        assert_eq!(state.player.rect.y, ground);
        assert!(!state.player.is_jumping);
    }

    #[test]
    fn test_ammo_recharges_by_one_per_tick() {
        let tuning = quiet_tuning();
        let mut state = running_state(&tuning);
        let now = 50_000.0;
        state.player.rice_rocket_ammo = 0;
        state.player.last_ammo_recharge_time = now - tuning.ammo.recharge_interval_ms;

        tick(&mut state, &TickInput::default(), &tuning, now);
        assert_eq!(state.player.rice_rocket_ammo, 1);
    }

    #[test]
    fn test_ammo_recharge_respects_cap() {
        let tuning = quiet_tuning();
        let mut state = running_state(&tuning);
        let max = state.player.max_rice_rocket_ammo;
        state.player.last_ammo_recharge_time = 0.0;
        tick(&mut state, &TickInput::default(), &tuning, 1_000_000.0);
        assert_eq!(state.player.rice_rocket_ammo, max);
    }

    #[test]
    fn test_shoot_intent_fires() {
        let tuning = quiet_tuning();
        let mut state = running_state(&tuning);
        let shoot = TickInput {
            shots: 1,
            ..Default::default()
        };
        tick(&mut state, &shoot, &tuning, 0.0);
        assert_eq!(state.rice_rockets.len(), 1);
        // Moved once by the mover in the same tick
        assert_eq!(
            state.rice_rockets[0].rect.x,
            state.player.rect.right() + tuning.ammo.rocket_speed
        );
    }

    #[test]
    fn test_scroll_offset_wraps_at_canvas_width() {
        let tuning = quiet_tuning();
        let mut state = running_state(&tuning);
        let speed = tuning.power_ups.base_scroll_speed;
        let per_lap = (tuning.canvas.width / speed) as u32;
        for i in 0..per_lap * 3 + 1 {
            tick(&mut state, &TickInput::default(), &tuning, i as f64);
            assert!(state.scroll_offset >= 0.0 && state.scroll_offset < tuning.canvas.width);
        }
        assert_eq!(state.scroll_offset, speed);
    }

    #[test]
    fn test_queued_shots_fire_until_empty() {
        let tuning = quiet_tuning();
        let mut state = running_state(&tuning);
        let max = state.player.max_rice_rocket_ammo;
        let burst = TickInput {
            shots: max + 2,
            ..Default::default()
        };
        tick(&mut state, &burst, &tuning, 0.0);
        assert_eq!(state.rice_rockets.len() as u32, max);
        assert_eq!(state.player.rice_rocket_ammo, 0);
        let volleys = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::Shot { .. }))
            .count();
        assert_eq!(volleys as u32, max);
    }

    #[test]
    fn test_power_up_expires_during_tick() {
        let tuning = quiet_tuning();
        let mut state = running_state(&tuning);
        activate_power_up(&mut state.player, PowerUpKind::SpeedBoost, 1000.0, 0.0);
        tick(&mut state, &TickInput::default(), &tuning, 500.0);
        assert!(state.player.has_speed_boost());
        tick(&mut state, &TickInput::default(), &tuning, 1000.0);
        assert!(!state.player.has_speed_boost());
        assert!(state
            .events
            .contains(&GameEvent::PowerUpExpired(PowerUpKind::SpeedBoost)));
    }

    #[test]
    fn test_game_over_freezes_state() {
        let tuning = quiet_tuning();
        let mut state = running_state(&tuning);
        let mut sushi = create_sushi(900, &tuning, 1.0);
        sushi.rect.x = state.player.rect.right();
        state.sushis.push(sushi);

        tick(&mut state, &TickInput::default(), &tuning, 0.0);
        assert!(state.is_game_over);
        assert!(!state.is_game_running);
        assert_eq!(state.distance, 0);
        assert!(state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { distance: 0, meters: 0 })));

        let frozen_x = state.sushis[0].rect.x;
        tick(&mut state, &TickInput::default(), &tuning, 16.0);
        assert_eq!(state.sushis[0].rect.x, frozen_x);
    }

    #[test]
    fn test_shielded_run_survives_sushi() {
        let tuning = quiet_tuning();
        let mut state = running_state(&tuning);
        activate_power_up(&mut state.player, PowerUpKind::Shield, 3000.0, 0.0);
        let mut sushi = create_sushi(900, &tuning, 1.0);
        sushi.rect.x = state.player.rect.right();
        state.sushis.push(sushi);

        tick(&mut state, &TickInput::default(), &tuning, 10.0);
        assert!(!state.is_game_over);
        assert_eq!(state.distance, 1);
    }

    #[test]
    fn test_rocket_kills_enemy_in_tick() {
        let tuning = quiet_tuning();
        let mut state = running_state(&tuning);
        let id = state.next_entity_id();
        let mut enemy = create_enemy(id, EnemyClass::Samurai, &tuning, 1.0, 0.0);
        enemy.rect.x = 300.0;
        enemy.lives = 1;
        state.enemies.push(enemy);
        let rocket_id = state.next_entity_id();
        let mut rocket = create_rice_rocket(rocket_id, &state.player, &tuning, 0.0);
        rocket.rect.x = 290.0;
        state.rice_rockets.push(rocket);

        tick(&mut state, &TickInput::default(), &tuning, 0.0);
        assert!(state.enemies.is_empty());
        assert!(state.rice_rockets.is_empty());
    }

    #[test]
    fn test_difficulty_tracks_distance() {
        let tuning = quiet_tuning();
        let mut state = running_state(&tuning);
        state.distance = tuning.difficulty.thresholds[0];
        tick(&mut state, &TickInput::default(), &tuning, 0.0);
        assert_eq!(state.difficulty.level, 2);
    }

    #[test]
    fn test_difficulty_monotonic_over_run() {
        let mut tuning = Tuning::default();
        tuning.difficulty.thresholds = vec![20, 40, 60];
        tuning.sushi.initial_distance = u64::MAX;
        let mut state = running_state(&tuning);
        activate_power_up(&mut state.player, PowerUpKind::Shield, f64::MAX, 0.0);

        let mut last = state.difficulty.level;
        for i in 0..100 {
            tick(&mut state, &TickInput::default(), &tuning, i as f64 * 16.0);
            assert!(state.difficulty.level >= last);
            last = state.difficulty.level;
        }
        assert_eq!(last, 4);
    }

    #[test]
    fn test_bullets_leaving_vertically_are_culled() {
        use crate::sim::state::SamuraiBullet;
        use glam::Vec2;
        let tuning = quiet_tuning();
        let mut state = running_state(&tuning);
        state.samurai_bullets.push(SamuraiBullet {
            id: 77,
            rect: Rect::new(400.0, -5.0, 15.0, 6.0),
            velocity: Vec2::new(-7.0, -3.0),
        });
        tick(&mut state, &TickInput::default(), &tuning, 0.0);
        assert!(state.samurai_bullets.is_empty());
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let tuning = Tuning::default();
        let mut state1 = running_state(&tuning);
        let mut state2 = running_state(&tuning);
        activate_power_up(&mut state1.player, PowerUpKind::Shield, f64::MAX, 0.0);
        activate_power_up(&mut state2.player, PowerUpKind::Shield, f64::MAX, 0.0);

        for i in 0..3000u32 {
            let input = TickInput {
                jump: i % 37 == 0,
                shots: u32::from(i % 11 == 0),
            };
            let now = i as f64 * 16.0;
            tick(&mut state1, &input, &tuning, now);
            tick(&mut state2, &input, &tuning, now);
        }

        assert_eq!(state1.distance, state2.distance);
        assert_eq!(state1.sushis.len(), state2.sushis.len());
        assert_eq!(state1.enemies.len(), state2.enemies.len());
        assert_eq!(
            serde_json::to_string(&state1).unwrap(),
            serde_json::to_string(&state2).unwrap()
        );
    }
}
