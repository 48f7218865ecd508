//! Power-up effects and the ammo economy
//!
//! Only one effect is ever active; picking up another replaces it outright
//! ("latest pickup wins"), and expiry is checked against absolute end times.

use super::entities::create_rice_rocket;
use super::geometry::overlaps;
use super::state::{ActivePowerUp, GameEvent, GameState, Player, PowerUpKind};
use crate::config::Tuning;

/// Make `kind` the active effect until `now + duration`
///
/// Returns the effect that was displaced, if any.
pub fn activate_power_up(
    player: &mut Player,
    kind: PowerUpKind,
    duration: f64,
    now: f64,
) -> Option<PowerUpKind> {
    let previous = player.power_up.kind();
    player.power_up = ActivePowerUp::new(kind, now + duration);
    previous
}

/// Clear the active effect once its end time has been reached
pub fn expire_power_ups(player: &mut Player, now: f64) -> Option<PowerUpKind> {
    match (player.power_up.kind(), player.power_up.ends_at()) {
        (Some(kind), Some(ends_at)) if now >= ends_at => {
            player.power_up = ActivePowerUp::None;
            Some(kind)
        }
        _ => None,
    }
}

/// Add one rocket if the recharge interval has elapsed; returns whether it did
pub fn recharge_ammo(player: &mut Player, now: f64, interval_ms: f64) -> bool {
    if player.rice_rocket_ammo >= player.max_rice_rocket_ammo {
        // Full magazine: the interval only starts counting after a shot
        player.last_ammo_recharge_time = now;
        return false;
    }
    if now - player.last_ammo_recharge_time >= interval_ms {
        player.rice_rocket_ammo = (player.rice_rocket_ammo + 1).min(player.max_rice_rocket_ammo);
        player.last_ammo_recharge_time = now;
        return true;
    }
    false
}

/// Vertical velocities for a fan of `count` rockets centered on zero
pub fn fan_velocities(count: u32, spread: f32) -> Vec<f32> {
    let mid = (count.saturating_sub(1)) as f32 / 2.0;
    (0..count).map(|i| (i as f32 - mid) * spread).collect()
}

/// Fire one volley; returns the number of rockets launched (0 means no-op)
pub fn fire_rice_rockets(state: &mut GameState, tuning: &Tuning) -> u32 {
    let player = &state.player;
    if player.rice_rocket_ammo == 0 && !player.has_infinite_ammo() {
        return 0;
    }

    let count = if player.has_multi_shot() {
        tuning.multi_shot_count(&player.power_up_levels)
    } else {
        1
    };

    for velocity_y in fan_velocities(count, tuning.ammo.multi_shot_spread) {
        let id = state.next_entity_id();
        let rocket = create_rice_rocket(id, &state.player, tuning, velocity_y);
        state.rice_rockets.push(rocket);
    }

    if !state.player.has_infinite_ammo() {
        state.player.rice_rocket_ammo -= 1;
    }
    state.events.push(GameEvent::Shot { rockets: count });
    count
}

/// Collect every pickup the player touches; the last one collected wins
pub fn collect_power_ups(state: &mut GameState, now: f64) {
    let player_rect = state.player.rect;
    let (touched, remaining): (Vec<_>, Vec<_>) = std::mem::take(&mut state.power_ups)
        .into_iter()
        .partition(|pickup| overlaps(&player_rect, &pickup.rect));
    state.power_ups = remaining;

    for pickup in touched {
        let replaced = activate_power_up(&mut state.player, pickup.kind, pickup.duration, now);
        log::debug!(
            "Picked up {} for {}ms (replaced {:?})",
            pickup.kind.as_str(),
            pickup.duration,
            replaced
        );
        state.events.push(GameEvent::PowerUpCollected(pickup.kind));
    }
}

/// Pickup spawn gate: inside the window meter, none on screen, roll passes
///
/// The window is the single meter `window_meter` (ten ticks). The roll is
/// re-drawn on each of those ticks; once the meter is left behind the chance
/// is gone until the next multiple.
pub fn should_spawn_power_up(
    meters: u64,
    window_meter: u64,
    pickups_on_screen: usize,
    roll: f64,
    chance: f64,
) -> bool {
    pickups_on_screen == 0 && meters == window_meter && roll < chance
}
