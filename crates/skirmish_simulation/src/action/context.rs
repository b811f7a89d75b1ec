//! ActorCx — что action видит у своего актора за один вызов
//!
//! Action не хранит ссылку на актора (actor владеет action, не наоборот).
//! Вместо back-reference каждая операция получает `ActorCx`: компоненты
//! владельца + `WorldView` (dt, позиции, raycast, RNG, outbox эффектов).

use bevy::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

use crate::combat::CombatEffect;
use crate::components::{Actor, AiProfile, Animator, PhysicsBody};
use crate::physics::Raycaster;

/// Snapshot позиций всех акторов на начало системы
pub type Positions = HashMap<Entity, Vec2>;

/// Мир вокруг актора (read-only кроме RNG и outbox)
pub struct WorldView<'a> {
    /// Длительность текущего frame (секунды)
    pub dt: f32,
    pub positions: &'a Positions,
    pub raycaster: &'a dyn Raycaster,
    pub rng: &'a mut ChaCha8Rng,
    /// Эффекты на других акторов (применяются позже, в `apply_combat_effects`)
    pub effects: &'a mut Vec<CombatEffect>,
}

impl WorldView<'_> {
    pub fn position_of(&self, entity: Entity) -> Option<Vec2> {
        self.positions.get(&entity).copied()
    }
}

pub struct ActorCx<'a> {
    pub entity: Entity,
    pub actor: &'a mut Actor,
    pub body: &'a mut PhysicsBody,
    pub animator: &'a mut Animator,
    pub ai: Option<&'a AiProfile>,
    pub world: WorldView<'a>,
}

impl ActorCx<'_> {
    /// Позиция AI цели (None если нет AI, нет цели или цель исчезла)
    pub fn target_position(&self) -> Option<Vec2> {
        self.ai
            .and_then(|profile| profile.target)
            .and_then(|target| self.world.position_of(target))
    }
}
