//! Применение combat эффектов и смерть
//!
//! Порядок для одного удара: damage → stun (через арбитраж) → knockback.
//! Смерть — обычный lifecycle event: Despawn сразу или Linger (труп
//! в terminal action, despawn по таймеру).

use bevy::prelude::*;

use crate::action::{split_actor, snapshot_positions, Action, ActorData, WorldView, PRIORITY_TERMINAL};
use crate::combat::{ActorDied, CombatEffect};
use crate::components::{DamageOutcome, DeathPolicy, Health};
use crate::error::ActionError;
use crate::physics::PhysicsWorld;
use crate::DeterministicRng;

/// Компонент-маркер: актор мёртв (труп ещё в мире)
#[derive(Component, Debug)]
pub struct Dead;

/// Компонент-маркер: деспавн entity после указанного времени
#[derive(Component, Debug)]
pub struct DespawnAfter {
    /// Время деспавна (в секундах от старта симуляции)
    pub despawn_time: f32,
}

/// Система: CombatEffect события → Health / action / knockback цели
pub fn apply_combat_effects(
    mut effects: EventReader<CombatEffect>,
    mut actors: Query<ActorData>,
    mut healths: Query<&mut Health>,
    physics: Res<PhysicsWorld>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time>,
    mut died_events: EventWriter<ActorDied>,
) {
    if effects.is_empty() {
        return;
    }

    let positions = snapshot_positions(&actors);
    // Start/terminate hooks эффектов не эмитят, outbox здесь пустой
    let mut secondary = Vec::new();

    for effect in effects.read() {
        let target = effect.target();

        match *effect {
            CombatEffect::Damage { amount, source, .. } => {
                let Ok(mut health) = healths.get_mut(target) else {
                    warn_unknown(target);
                    continue;
                };
                match health.take_damage(amount) {
                    DamageOutcome::Killed => {
                        crate::logger::log_info(&format!("💀 {:?} killed by {:?}", target, source));
                        died_events.write(ActorDied {
                            entity: target,
                            killer: source,
                        });
                    }
                    DamageOutcome::Hurt => {
                        crate::logger::log(&format!(
                            "🩸 {:?} took {} damage ({}/{})",
                            target, amount, health.current, health.max
                        ));
                    }
                    DamageOutcome::Immune | DamageOutcome::AlreadyDead => {}
                }
            }

            CombatEffect::Stun { duration, priority, .. } => {
                let Ok(mut item) = actors.get_mut(target) else {
                    warn_unknown(target);
                    continue;
                };
                let world = WorldView {
                    dt: time.delta_secs(),
                    positions: &positions,
                    raycaster: physics.raycaster(),
                    rng: &mut rng.rng,
                    effects: &mut secondary,
                };
                let (controller, mut cx) = split_actor(&mut item, world);
                let stun = Action::stun(cx.actor, duration);
                controller.do_action(&mut cx, Some(stun), priority);
            }

            CombatEffect::Knockback { from, force, .. } => {
                let Ok(mut item) = actors.get_mut(target) else {
                    warn_unknown(target);
                    continue;
                };
                item.2.take_knockback(from, force);
            }
        }
    }
}

fn warn_unknown(entity: Entity) {
    let error = ActionError::UnknownActor { entity };
    crate::logger::log_warning(&format!("CombatEffect dropped: {error}"));
}

/// Система: ActorDied → DeathPolicy
///
/// Despawn — entity (вместе с hit regions) убирается сразу.
/// Linger — terminal `Dead` action + маркер `Dead` + `DespawnAfter`.
pub fn handle_deaths(
    mut commands: Commands,
    mut deaths: EventReader<ActorDied>,
    mut actors: Query<ActorData>,
    physics: Res<PhysicsWorld>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time>,
) {
    if deaths.is_empty() {
        return;
    }

    let positions = snapshot_positions(&actors);
    let mut secondary = Vec::new();

    for death in deaths.read() {
        let Ok(mut item) = actors.get_mut(death.entity) else {
            continue; // Уже despawned
        };

        let policy = item.2.death;
        match policy {
            DeathPolicy::Despawn => {
                if let Ok(mut entity_commands) = commands.get_entity(death.entity) {
                    entity_commands.despawn();
                    crate::logger::log_info(&format!("⚰️ Despawning {:?} (died)", death.entity));
                }
            }
            DeathPolicy::Linger { seconds } => {
                let world = WorldView {
                    dt: time.delta_secs(),
                    positions: &positions,
                    raycaster: physics.raycaster(),
                    rng: &mut rng.rng,
                    effects: &mut secondary,
                };
                let (controller, mut cx) = split_actor(&mut item, world);
                controller.do_action(&mut cx, Some(Action::dead()), PRIORITY_TERMINAL);

                if let Ok(mut entity_commands) = commands.get_entity(death.entity) {
                    entity_commands.insert((
                        Dead,
                        DespawnAfter {
                            despawn_time: time.elapsed_secs() + seconds,
                        },
                    ));
                }
                crate::logger::log_info(&format!("🪦 {:?} lingers for {}s", death.entity, seconds));
            }
        }
    }
}

/// Система: деспавн entities с истёкшим DespawnAfter timeout
pub fn despawn_after_timeout(mut commands: Commands, query: Query<(Entity, &DespawnAfter)>, time: Res<Time>) {
    let current_time = time.elapsed_secs();

    for (entity, despawn_after) in query.iter() {
        if current_time >= despawn_after.despawn_time {
            crate::logger::log(&format!("⚰️ Despawning entity {:?} (timeout)", entity));
            commands.entity(entity).despawn();
        }
    }
}
