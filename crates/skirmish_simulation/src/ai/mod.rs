//! AI decision-making module
//!
//! Поведение монстров живёт в locomotion actions (Patrol → Chase → атака).
//! Здесь только выбор цели для `AiProfile`.

use bevy::prelude::*;

use crate::components::{AiProfile, Player};
use crate::SimulationSet;

/// Система: монстр без цели (или с исчезнувшей целью) берёт первого игрока
///
/// Живая цель (любая entity, не только Player) не трогается.
pub fn acquire_player_targets(
    mut profiles: Query<&mut AiProfile>,
    players: Query<Entity, With<Player>>,
    entities: Query<Entity>,
) {
    let first_player = players.iter().next();

    for mut profile in profiles.iter_mut() {
        let target_alive = profile.target.is_some_and(|target| entities.contains(target));
        if target_alive {
            continue;
        }

        if profile.target != first_player {
            crate::logger::log(&format!("🎯 AI target {:?} → {:?}", profile.target, first_player));
            profile.target = first_player;
        }
    }
}

/// AI Plugin
///
/// Update (SimulationSet::Intents): acquire_player_targets
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, acquire_player_targets.in_set(SimulationSet::Intents));
    }
}
