//! Hit regions + bridge trigger событий к текущему action
//!
//! Архитектура:
//! - `Hurtbox` = бьющая область (меч, тело lunge), `Hitbox` = уязвимая область
//! - Движок детектит overlap и шлёт `RegionOverlap { hurtbox, other }`
//! - Bridge резолвит владельцев и зовёт HitBegin/HitEnd у action владельца
//!   hurtbox, передавая владельца hitbox как ударенного

use bevy::prelude::*;

use crate::action::{split_actor, snapshot_positions, ActorData, WorldView};
use crate::combat::{CombatEffect, RegionOverlap};
use crate::error::ActionError;
use crate::physics::PhysicsWorld;
use crate::DeterministicRng;

/// Бьющая область актора
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Hurtbox {
    pub owner: Entity,
}

/// Уязвимая область актора
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Hitbox {
    pub owner: Entity,
}

/// Система: RegionOverlap → HitBegin/HitEnd
///
/// Невалидные события (нет action, не актор) логируются warning и
/// выбрасываются: frame loop не падает.
pub fn route_hit_events(
    mut overlaps: EventReader<RegionOverlap>,
    hurtboxes: Query<&Hurtbox>,
    hitboxes: Query<&Hitbox>,
    mut actors: Query<ActorData>,
    physics: Res<PhysicsWorld>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time>,
    mut effect_events: EventWriter<CombatEffect>,
) {
    if overlaps.is_empty() {
        return;
    }

    let positions = snapshot_positions(&actors);
    let mut effects = Vec::new();

    for overlap in overlaps.read() {
        let Ok(hurtbox) = hurtboxes.get(overlap.hurtbox) else {
            let error = ActionError::UnknownActor { entity: overlap.hurtbox };
            crate::logger::log_warning(&format!("RegionOverlap dropped (no Hurtbox): {error}"));
            continue;
        };

        // Не Hitbox (стена, чужой hurtbox) — не удар
        let Ok(hitbox) = hitboxes.get(overlap.other) else {
            continue;
        };

        // Свой hitbox
        if hitbox.owner == hurtbox.owner {
            continue;
        }

        let Ok(mut item) = actors.get_mut(hurtbox.owner) else {
            let error = ActionError::UnknownActor { entity: hurtbox.owner };
            crate::logger::log_warning(&format!("RegionOverlap dropped: {error}"));
            continue;
        };

        let world = WorldView {
            dt: time.delta_secs(),
            positions: &positions,
            raycaster: physics.raycaster(),
            rng: &mut rng.rng,
            effects: &mut effects,
        };
        let (controller, mut cx) = split_actor(&mut item, world);

        let result = if overlap.began {
            controller.hit_begin(&mut cx, hitbox.owner, overlap.hurtbox)
        } else {
            controller.hit_end(&mut cx, hitbox.owner, overlap.hurtbox)
        };

        if let Err(error) = result {
            crate::logger::log_warning(&format!("Hit notification dropped: {error}"));
        }
    }

    effect_events.write_batch(effects);
}
