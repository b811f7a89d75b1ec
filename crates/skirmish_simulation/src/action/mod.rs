//! Action domain — арбитраж и выполнение actions
//!
//! Содержит:
//! - base: `Action`, `ActionCore`, `Behavior`, priority bands
//! - locomotion / attack / stun / terminal: варианты
//! - controller: `ActorController` (слот + do_action)
//! - systems: ECS обёртки (init, phase markers, per-frame)

use bevy::prelude::*;

pub mod attack;
pub mod base;
pub mod context;
pub mod controller;
pub mod locomotion;
pub mod stun;
pub mod systems;
pub mod terminal;

#[cfg(test)]
mod test_rig;
#[cfg(test)]
mod controller_tests;

pub use attack::Attack;
pub use base::{
    default_action, default_attack_action, Action, ActionCore, ActionKind, Behavior, Flow, Resume,
    PRIORITY_DEFAULT, PRIORITY_IDLE, PRIORITY_STUN, PRIORITY_TERMINAL,
};
pub use context::{ActorCx, Positions, WorldView};
pub use controller::{ActorController, Arbitration};
pub use locomotion::Locomotion;
pub use stun::Stun;
pub use systems::{split_actor, snapshot_positions, ActorData, ActorItem, AnimationPhaseMarker};

use crate::SimulationSet;

/// Action Plugin
///
/// Update (SimulationSet::Actions):
/// initialize_actors → apply_phase_markers → run_action_frames
pub struct ActionPlugin;

impl Plugin for ActionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AnimationPhaseMarker>().add_systems(
            Update,
            (
                systems::initialize_actors,
                systems::apply_phase_markers,
                systems::run_action_frames,
            )
                .chain()
                .in_set(SimulationSet::Actions),
        );
    }
}
