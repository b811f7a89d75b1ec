//! Combat события
//!
//! ECS ↔ движок:
//! - `RegionOverlap` приходит от trigger системы движка
//! - `CombatEffect` — outbox action core (эффект на другого актора)
//! - `ActorDied` уходит наружу (UI, звук, счёт)

use bevy::prelude::*;

/// Эффект удара по другому актору
///
/// Применяется в `apply_combat_effects` в порядке эмиссии.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum CombatEffect {
    Damage {
        target: Entity,
        amount: f32,
        source: Option<Entity>,
    },
    /// Принудительный Stun через арбитраж с `priority`
    Stun {
        target: Entity,
        duration: f32,
        priority: f32,
    },
    /// Перезаписывает knockback цели (от точки `from`)
    Knockback { target: Entity, from: Vec2, force: f32 },
}

impl CombatEffect {
    pub fn target(&self) -> Entity {
        match self {
            CombatEffect::Damage { target, .. }
            | CombatEffect::Stun { target, .. }
            | CombatEffect::Knockback { target, .. } => *target,
        }
    }
}

/// Событие от trigger системы: hurtbox начал/перестал пересекать `other`
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionOverlap {
    pub hurtbox: Entity,
    pub other: Entity,
    /// true = overlap begin, false = overlap end
    pub began: bool,
}

/// Событие: актор умер (эмитится ровно один раз на актора)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}
