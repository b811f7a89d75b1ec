//! Per-physics-tick движение акторов
//!
//! Архитектура:
//! - FixedUpdate (по умолчанию 50Hz): decay knockback → velocity от action
//! - Headless интегратор velocity → position (в игре это делает движок)
//! - Transform sync в Update (position.xy + поворот вокруг z)
//!
//! Детерминизм: fixed timestep, никакого wall-clock внутри tick

use bevy::prelude::*;

use crate::action::ActorController;
use crate::components::{Actor, PhysicsBody};

/// Knockback теряет 10% за physics tick
pub const KNOCKBACK_DECAY: f32 = 0.9;
/// Ниже этой длины knockback обнуляется
pub const KNOCKBACK_SNAP_THRESHOLD: f32 = 0.1;

/// Один шаг затухания knockback
pub fn decay_knockback(knockback: Vec2) -> Vec2 {
    let decayed = knockback * KNOCKBACK_DECAY;
    if decayed.length() < KNOCKBACK_SNAP_THRESHOLD {
        Vec2::ZERO
    } else {
        decayed
    }
}

/// Система: decay knockback + velocity от текущего action
pub fn physics_tick(mut query: Query<(&ActorController, &mut Actor, &mut PhysicsBody)>) {
    for (controller, mut actor, mut body) in query.iter_mut() {
        controller.physics_tick(&mut actor, &mut body);
    }
}

/// Система интеграции velocity → position (headless режим)
///
/// В игре velocity читает физика движка и возвращает позицию обратно.
pub fn integrate_velocity(mut query: Query<(&PhysicsBody, &mut Actor)>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();

    for (body, mut actor) in query.iter_mut() {
        actor.position += body.velocity * delta;
    }
}

/// Система: Actor.position/facing → Transform (для renderer)
pub fn sync_transforms(mut query: Query<(&Actor, &mut Transform), Changed<Actor>>) {
    for (actor, mut transform) in query.iter_mut() {
        transform.translation.x = actor.position.x;
        transform.translation.y = actor.position.y;
        transform.rotation = Quat::from_rotation_z(actor.facing.to_radians());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knockback_decay_sequence() {
        let mut knockback = Vec2::new(10.0, 0.0);
        for tick in 1..=10 {
            knockback = decay_knockback(knockback);
            let expected = 10.0 * KNOCKBACK_DECAY.powi(tick);
            assert!((knockback.length() - expected).abs() < 1e-4, "tick {tick}");
        }
    }

    #[test]
    fn test_knockback_snaps_to_zero() {
        assert_eq!(decay_knockback(Vec2::new(0.11, 0.0)), Vec2::ZERO);
        assert_eq!(decay_knockback(Vec2::ZERO), Vec2::ZERO);
        assert!((decay_knockback(Vec2::new(0.2, 0.0)).x - 0.18).abs() < 1e-6);
    }
}
