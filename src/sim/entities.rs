//! Entity factories and movers
//!
//! Factories take only the context they need. Movers translate a list by
//! each entity's velocity and drop whatever crossed the boundary, keeping the
//! survivors in insertion order.

use glam::Vec2;

use super::geometry::Rect;
use super::state::{
    ActivePowerUp, Enemy, EnemyClass, EnemyKind, Player, PowerUpKind, PowerUpPickup, RiceRocket,
    SamuraiBullet, Sushi, Torii,
};
use crate::config::{PowerUpLevels, Tuning};

/// Anything with a box and a velocity
pub trait Moving {
    fn rect(&self) -> &Rect;
    fn rect_mut(&mut self) -> &mut Rect;
    fn velocity(&self) -> Vec2;
}

macro_rules! impl_moving {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Moving for $ty {
                #[inline]
                fn rect(&self) -> &Rect {
                    &self.rect
                }
                #[inline]
                fn rect_mut(&mut self) -> &mut Rect {
                    &mut self.rect
                }
                #[inline]
                fn velocity(&self) -> Vec2 {
                    self.velocity
                }
            }
        )*
    };
}

impl_moving!(RiceRocket, Sushi, Torii, Enemy, SamuraiBullet, PowerUpPickup);

/// Whether `rect` is past `boundary`
///
/// A positive boundary is a right-edge cutoff, anything else a left-edge
/// cutoff (usually minus the entity's own width).
#[inline]
pub fn has_crossed(rect: &Rect, boundary: f32) -> bool {
    if boundary > 0.0 {
        rect.x >= boundary
    } else {
        rect.x <= boundary
    }
}

/// Advance every entity by its velocity and drop those past `boundary`
pub fn move_entities<T: Moving>(list: Vec<T>, boundary: f32) -> Vec<T> {
    move_entities_with(list, |_| boundary)
}

/// Like `move_entities`, with a boundary chosen per entity (mixed sizes)
pub fn move_entities_with<T, F>(list: Vec<T>, boundary_for: F) -> Vec<T>
where
    T: Moving,
    F: Fn(&T) -> f32,
{
    list.into_iter()
        .filter_map(|mut entity| {
            let velocity = entity.velocity();
            entity.rect_mut().translate(velocity);
            if has_crossed(entity.rect(), boundary_for(&entity)) {
                None
            } else {
                Some(entity)
            }
        })
        .collect()
}

/// Left-edge cutoff for entities of `width`
#[inline]
pub fn left_boundary(width: f32) -> f32 {
    -width
}

/// Fresh player standing on the ground with a full magazine
pub fn create_player(tuning: &Tuning, levels: PowerUpLevels, now: f64) -> Player {
    let p = &tuning.player;
    let max_ammo = tuning.max_ammo(&levels);
    Player {
        rect: Rect::new(p.x, tuning.ground_top(p.height), p.width, p.height),
        velocity_y: 0.0,
        is_jumping: false,
        color: p.color,
        rice_rocket_ammo: max_ammo,
        max_rice_rocket_ammo: max_ammo,
        last_ammo_recharge_time: now,
        power_up: ActivePowerUp::None,
        power_up_levels: levels,
    }
}

/// Reset for a new run, picking up the latest shop tiers
pub fn reset_player(player: &Player, tuning: &Tuning, levels: PowerUpLevels, now: f64) -> Player {
    Player {
        color: player.color,
        ..create_player(tuning, levels, now)
    }
}

/// Rocket anchored at the player's right edge and vertical center
pub fn create_rice_rocket(id: u32, player: &Player, tuning: &Tuning, velocity_y: f32) -> RiceRocket {
    let a = &tuning.ammo;
    let center = player.rect.center();
    RiceRocket {
        id,
        rect: Rect::new(
            player.rect.right(),
            center.y - a.rocket_height / 2.0,
            a.rocket_width,
            a.rocket_height,
        ),
        velocity: Vec2::new(a.rocket_speed, velocity_y),
    }
}

/// Sushi sized to the player's footprint, entering at the right edge
pub fn create_sushi(id: u32, tuning: &Tuning, speed_multiplier: f32) -> Sushi {
    let p = &tuning.player;
    Sushi {
        id,
        rect: Rect::new(tuning.canvas.width, tuning.ground_top(p.height), p.width, p.height),
        velocity: Vec2::new(-tuning.sushi.base_speed * speed_multiplier, 0.0),
    }
}

/// Torii gate standing on the ground at the right edge
pub fn create_torii(id: u32, tuning: &Tuning, scroll_speed: f32) -> Torii {
    let t = &tuning.torii;
    Torii {
        id,
        rect: Rect::new(tuning.canvas.width, tuning.ground_top(t.height), t.width, t.height),
        velocity: Vec2::new(-scroll_speed, 0.0),
    }
}

/// Enemy of `class` entering at the right edge
pub fn create_enemy(id: u32, class: EnemyClass, tuning: &Tuning, speed_multiplier: f32, now: f64) -> Enemy {
    let e = &tuning.enemies;
    let (params, kind) = match class {
        EnemyClass::Samurai => (&e.samurai, EnemyKind::Samurai),
        EnemyClass::Ninja => (
            &e.ninja,
            EnemyKind::Ninja {
                velocity_y: 0.0,
                is_jumping: false,
                last_jump_time: now,
                jump_cooldown: e.ninja_jump_cooldown_ms,
            },
        ),
        EnemyClass::Boss => (
            &e.boss,
            EnemyKind::Boss {
                phase: 0,
                last_phase_change: now,
            },
        ),
    };
    Enemy {
        id,
        kind,
        rect: Rect::new(
            tuning.canvas.width,
            tuning.ground_top(params.height),
            params.width,
            params.height,
        ),
        velocity: Vec2::new(-params.base_speed * speed_multiplier, 0.0),
        lives: params.lives,
        max_lives: params.lives,
        // First shot waits a full cooldown after entering
        last_shot_time: now,
        shot_cooldown: params.shot_cooldown_ms,
    }
}

/// Bullet leaving the shooter's left edge at its vertical center
pub fn create_samurai_bullet(id: u32, shooter: &Rect, velocity: Vec2, tuning: &Tuning) -> SamuraiBullet {
    let e = &tuning.enemies;
    SamuraiBullet {
        id,
        rect: Rect::new(
            shooter.x - e.bullet_width,
            shooter.center().y - e.bullet_height / 2.0,
            e.bullet_width,
            e.bullet_height,
        ),
        velocity,
    }
}

/// Floating pickup at the right edge with a tier-adjusted duration
pub fn create_power_up(id: u32, kind: PowerUpKind, tuning: &Tuning, levels: &PowerUpLevels) -> PowerUpPickup {
    let pu = &tuning.power_ups;
    PowerUpPickup {
        id,
        rect: Rect::new(
            tuning.canvas.width,
            tuning.canvas.ground_y - pu.float_height - pu.size,
            pu.size,
            pu.size,
        ),
        velocity: Vec2::new(-pu.speed, 0.0),
        kind,
        duration: tuning.power_up_duration_ms(kind, levels),
    }
}
