//! Physics domain
//!
//! Содержит:
//! - movement: knockback decay, velocity от action, headless интегратор
//! - raycast: контракт raycast service + `StaticWalls`
//!
//! Сама 2D физика (коллизии, triggers) живёт во внешнем движке.

pub mod movement;
pub mod raycast;

use bevy::prelude::*;

pub use movement::{
    decay_knockback, integrate_velocity, physics_tick, sync_transforms, KNOCKBACK_DECAY,
    KNOCKBACK_SNAP_THRESHOLD,
};
pub use raycast::{LayerMask, PhysicsWorld, RayHit, Raycaster, StaticWalls, WallSegment};

/// Physics Plugin
///
/// FixedUpdate: physics_tick → integrate_velocity (порядок важен: сначала
/// velocity, потом позиция).
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PhysicsWorld>()
            .add_systems(FixedUpdate, (physics_tick, integrate_velocity).chain());
    }
}
