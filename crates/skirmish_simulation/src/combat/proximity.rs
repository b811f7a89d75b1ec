//! Proximity triggers: RegionOverlap по дистанции владельцев
//!
//! Для headless прогонов без 2D triggers движка (demo binary, integration
//! тесты). Hurtbox "касается" hitbox, пока владелец hurtbox в атаке и
//! владельцы ближе `PROXIMITY_REACH`.

use bevy::prelude::*;
use std::collections::BTreeSet;

use crate::action::{ActionKind, ActorController};
use crate::combat::{Hitbox, Hurtbox, RegionOverlap};
use crate::components::Actor;
use crate::SimulationSet;

/// Радиус касания hurtbox/hitbox
pub const PROXIMITY_REACH: f32 = 1.2;

/// Система: begin на новую пару, end на пару которая разошлась
/// (или атака закончилась). End только пока hurtbox ещё существует.
pub fn proximity_overlaps(
    hurtboxes: Query<(Entity, &Hurtbox)>,
    hitboxes: Query<(Entity, &Hitbox)>,
    actors: Query<(&Actor, &ActorController)>,
    mut touching: Local<BTreeSet<(Entity, Entity)>>,
    mut overlaps: EventWriter<RegionOverlap>,
) {
    let mut now = BTreeSet::new();

    for (hurtbox_entity, hurtbox) in hurtboxes.iter() {
        let Ok((attacker, controller)) = actors.get(hurtbox.owner) else {
            continue;
        };
        let attacking = controller
            .current()
            .is_some_and(|action| matches!(action.kind, ActionKind::Attack(_)));
        if !attacking {
            continue;
        }

        for (hitbox_entity, hitbox) in hitboxes.iter() {
            if hitbox.owner == hurtbox.owner {
                continue;
            }
            let Ok((victim, _)) = actors.get(hitbox.owner) else {
                continue;
            };
            if attacker.position.distance(victim.position) <= PROXIMITY_REACH {
                now.insert((hurtbox_entity, hitbox_entity));
            }
        }
    }

    for &(hurtbox, other) in now.difference(&touching) {
        overlaps.write(RegionOverlap {
            hurtbox,
            other,
            began: true,
        });
    }
    for &(hurtbox, other) in touching.difference(&now) {
        if hurtboxes.contains(hurtbox) {
            overlaps.write(RegionOverlap {
                hurtbox,
                other,
                began: false,
            });
        }
    }
    *touching = now;
}

/// Proximity Trigger Plugin
///
/// Update: между SimulationSet::Actions и SimulationSet::Combat,
/// чтобы удар видел action этого frame и резолвился в том же frame.
pub struct ProximityTriggerPlugin;

impl Plugin for ProximityTriggerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            proximity_overlaps
                .after(SimulationSet::Actions)
                .before(SimulationSet::Combat),
        );
    }
}
