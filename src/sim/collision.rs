//! Collision resolution
//!
//! Runs once per tick after movement and spawning, in a fixed order:
//! 1. rice rockets vs enemies
//! 2. player vs power-up pickups
//! 3. player vs hazards (sushi, enemy bodies, enemy bullets)
//!
//! A rocket resolves against at most one enemy, and an enemy at zero lives is
//! gone before the next rocket is checked.

use super::geometry::{Rect, overlaps};
use super::powerup::collect_power_ups;
use super::state::{Enemy, GameEvent, GameState, RiceRocket, SamuraiBullet};

/// What the hazard pass found
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HazardResult {
    /// Player touched at least one hazard
    pub hit: bool,
    /// Enemy bullets consumed by touching the player
    pub bullets_consumed: usize,
}

/// Index of the first live enemy `rocket` overlaps
pub fn first_enemy_hit(rocket: &Rect, enemies: &[Enemy]) -> Option<usize> {
    enemies
        .iter()
        .position(|enemy| enemy.lives > 0 && overlaps(rocket, &enemy.rect))
}

/// Step 1: rockets damage enemies; spent rockets and dead enemies are removed
pub fn resolve_rocket_hits(state: &mut GameState) {
    let rockets = std::mem::take(&mut state.rice_rockets);
    let mut survivors: Vec<RiceRocket> = Vec::with_capacity(rockets.len());

    for rocket in rockets {
        match first_enemy_hit(&rocket.rect, &state.enemies) {
            Some(index) => {
                let enemy = &mut state.enemies[index];
                enemy.lives -= 1;
                state.events.push(GameEvent::EnemyHit {
                    id: enemy.id,
                    class: enemy.class(),
                    lives_left: enemy.lives,
                });
                if enemy.lives == 0 {
                    let (id, class) = (enemy.id, enemy.class());
                    state.enemies.remove(index);
                    state.events.push(GameEvent::EnemyDefeated { id, class });
                    log::debug!("{} {} defeated", class.as_str(), id);
                }
            }
            None => survivors.push(rocket),
        }
    }

    state.rice_rockets = survivors;
}

/// Step 3: player vs hazards; touching bullets are consumed either way
pub fn resolve_hazards(state: &mut GameState) -> HazardResult {
    let player = state.player.rect;

    let sushi_hit = state.sushis.iter().any(|s| overlaps(&player, &s.rect));
    let enemy_hit = state.enemies.iter().any(|e| overlaps(&player, &e.rect));

    let before = state.samurai_bullets.len();
    state
        .samurai_bullets
        .retain(|b: &SamuraiBullet| !overlaps(&player, &b.rect));
    let bullets_consumed = before - state.samurai_bullets.len();

    HazardResult {
        hit: sushi_hit || enemy_hit || bullets_consumed > 0,
        bullets_consumed,
    }
}

/// Run all collision passes; returns true if the run just ended
pub fn resolve_collisions(state: &mut GameState, now: f64) -> bool {
    resolve_rocket_hits(state);
    collect_power_ups(state, now);

    let hazards = resolve_hazards(state);
    if !hazards.hit {
        return false;
    }
    if hazards.bullets_consumed > 0 {
        log::debug!("{} enemy bullet(s) hit the player", hazards.bullets_consumed);
    }
    if state.player.has_shield() {
        state.events.push(GameEvent::ShieldAbsorbed);
        return false;
    }

    state.is_game_over = true;
    state.is_game_running = false;
    true
}
