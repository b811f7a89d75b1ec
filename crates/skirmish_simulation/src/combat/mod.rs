//! Combat domain (engine-driven collisions, ECS-owned rules)
//!
//! ECS ответственность:
//! - Hit routing: RegionOverlap → HitBegin/HitEnd текущего action
//! - Combat rules: damage, forced stun, knockback, death policy
//! - Events: CombatEffect, ActorDied
//!
//! Движок:
//! - 2D triggers для Hurtbox/Hitbox областей
//! - Анимации смерти, звук

use bevy::prelude::*;

pub mod damage;
pub mod events;
pub mod hitbox;
pub mod proximity;


pub use damage::{apply_combat_effects, despawn_after_timeout, handle_deaths, Dead, DespawnAfter};
pub use events::{ActorDied, CombatEffect, RegionOverlap};
pub use hitbox::{route_hit_events, Hitbox, Hurtbox};
pub use proximity::{proximity_overlaps, ProximityTriggerPlugin, PROXIMITY_REACH};

use crate::SimulationSet;

/// Combat Plugin
///
/// Update (SimulationSet::Combat), последовательно:
/// 1. route_hit_events — trigger события → CombatEffect
/// 2. apply_combat_effects — damage / stun / knockback
/// 3. handle_deaths — ActorDied → DeathPolicy
/// 4. despawn_after_timeout — уборка трупов
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<CombatEffect>()
            .add_event::<RegionOverlap>()
            .add_event::<ActorDied>();

        app.add_systems(
            Update,
            (
                route_hit_events,
                apply_combat_effects,
                handle_deaths,
                despawn_after_timeout,
            )
                .chain()
                .in_set(SimulationSet::Combat),
        );
    }
}
