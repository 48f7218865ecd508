//! Per-tick spawn policies
//!
//! Each entity kind has a schedule entry in `GameState::schedule`; a spawn
//! happens once distance reaches it (plus a random draw where the policy has
//! one), after which the entry is pushed forward.

use rand::Rng;

use super::entities::{create_enemy, create_power_up, create_sushi, create_torii};
use super::powerup::should_spawn_power_up;
use super::state::{EnemyClass, GameEvent, GameState, PowerUpKind};
use crate::config::Tuning;

/// Chance that an eligible regular enemy is a ninja once ninjas are unlocked
const NINJA_SHARE: f64 = 0.4;

/// Sushi gate: never at the very start, then whenever the schedule is reached
pub fn should_spawn_sushi(distance: u64, next_sushi_distance: u64) -> bool {
    distance > 0 && distance >= next_sushi_distance
}

/// Torii gate: exactly on each interval multiple, one on screen at a time
pub fn should_spawn_torii(distance: u64, interval_meters: u64, toriis_on_screen: usize) -> bool {
    let interval = interval_meters * 10;
    distance > 0 && interval > 0 && distance % interval == 0 && toriis_on_screen == 0
}

/// Boss gate: schedule reached and no boss already on the field
pub fn should_spawn_boss(distance: u64, next_boss_distance: u64, boss_present: bool) -> bool {
    !boss_present && distance >= next_boss_distance
}

/// Pick a regular enemy kind for this distance, or None if none are unlocked
pub fn choose_enemy_class(distance: u64, tuning: &Tuning, roll: f64) -> Option<EnemyClass> {
    let e = &tuning.enemies;
    if distance >= e.ninja.start_distance && roll < NINJA_SHARE {
        Some(EnemyClass::Ninja)
    } else if distance >= e.samurai.start_distance {
        Some(EnemyClass::Samurai)
    } else {
        None
    }
}

/// Run every spawn policy once
pub fn spawn_entities<R: Rng>(state: &mut GameState, tuning: &Tuning, rng: &mut R, now: f64) {
    spawn_sushi(state, tuning, rng);
    spawn_torii(state, tuning);
    spawn_enemies(state, tuning, rng, now);
    spawn_power_up(state, tuning, rng);
}

fn spawn_sushi<R: Rng>(state: &mut GameState, tuning: &Tuning, rng: &mut R) {
    if !should_spawn_sushi(state.distance, state.schedule.next_sushi_distance) {
        return;
    }
    let id = state.next_entity_id();
    let sushi = create_sushi(id, tuning, state.difficulty.speed_multiplier);
    state.sushis.push(sushi);

    let gap = rng.random_range(tuning.sushi.min_gap..=tuning.sushi.max_gap);
    state.schedule.next_sushi_distance = state.distance + gap.max(1);
    log::debug!("Sushi {} at distance {}", id, state.distance);
}

fn spawn_torii(state: &mut GameState, tuning: &Tuning) {
    if !should_spawn_torii(state.distance, tuning.torii.interval_meters, state.toriis.len()) {
        return;
    }
    let scroll = scroll_speed(state, tuning);
    let id = state.next_entity_id();
    state.toriis.push(create_torii(id, tuning, scroll));
}

fn spawn_enemies<R: Rng>(state: &mut GameState, tuning: &Tuning, rng: &mut R, now: f64) {
    let e = &tuning.enemies;
    let multiplier = state.difficulty.speed_multiplier;

    if should_spawn_boss(state.distance, state.schedule.next_boss_distance, state.boss_present()) {
        let id = state.next_entity_id();
        state
            .enemies
            .push(create_enemy(id, EnemyClass::Boss, tuning, multiplier, now));
        state.schedule.next_boss_distance =
            (state.distance / e.boss_interval_distance + 1) * e.boss_interval_distance;
        state.events.push(GameEvent::BossArrived { id });
        log::info!("Boss {} arrived at {}m", id, state.meters());
        return;
    }

    // Regular enemies hold back while a boss is on the field
    if state.boss_present() || state.distance < state.schedule.next_enemy_distance {
        return;
    }
    if state.enemies.len() >= e.max_on_screen || !rng.random_bool(e.spawn_chance) {
        return;
    }
    let Some(class) = choose_enemy_class(state.distance, tuning, rng.random::<f64>()) else {
        return;
    };

    let id = state.next_entity_id();
    state
        .enemies
        .push(create_enemy(id, class, tuning, multiplier, now));
    state.schedule.next_enemy_distance = state.distance + e.min_gap;
    log::debug!("{} {} at distance {}", class.as_str(), id, state.distance);
}

fn spawn_power_up<R: Rng>(state: &mut GameState, tuning: &Tuning, rng: &mut R) {
    let pu = &tuning.power_ups;
    let meters = state.meters();
    let next_window = (meters / pu.interval_meters + 1) * pu.interval_meters;
    if meters > state.schedule.next_power_up_meter {
        // Window missed (roll failed or a pickup was still on screen)
        state.schedule.next_power_up_meter = next_window;
    }

    let roll = rng.random::<f64>();
    if !should_spawn_power_up(
        meters,
        state.schedule.next_power_up_meter,
        state.power_ups.len(),
        roll,
        pu.spawn_chance,
    ) {
        return;
    }

    let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
    let id = state.next_entity_id();
    let levels = state.player.power_up_levels;
    state
        .power_ups
        .push(create_power_up(id, kind, tuning, &levels));
    state.schedule.next_power_up_meter = next_window;
    log::debug!("Power-up {} ({}) at {}m", id, kind.as_str(), meters);
}

/// Cosmetic scroll speed; the speed boost only affects this
pub fn scroll_speed(state: &GameState, tuning: &Tuning) -> f32 {
    let pu = &tuning.power_ups;
    if state.player.has_speed_boost() {
        pu.base_scroll_speed * pu.speed_boost_scroll_factor
    } else {
        pu.base_scroll_speed
    }
}
