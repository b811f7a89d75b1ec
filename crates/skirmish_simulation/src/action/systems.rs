//! ECS системы action core (Update, каждый frame)
//!
//! Порядок внутри `SimulationSet::Actions`:
//! 1. initialize_actors — default action для новых акторов
//! 2. apply_phase_markers — AnimationPhaseMarker → SetPhase
//! 3. run_action_frames — player hook + per_frame текущего action

use bevy::prelude::*;

use crate::action::context::{ActorCx, Positions, WorldView};
use crate::action::controller::ActorController;
use crate::components::{Actor, AiProfile, Animator, Health, PhysicsBody, PlayerInput};
use crate::combat::CombatEffect;
use crate::error::ActionError;
use crate::physics::PhysicsWorld;
use crate::player::player_frame;
use crate::DeterministicRng;

/// Событие от animation service: клип дошёл до phase marker
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AnimationPhaseMarker {
    pub actor: Entity,
    pub phase: u32,
}

/// Всё, что нужно для `ActorCx` (плюс сам слот)
pub type ActorData = (
    Entity,
    &'static mut ActorController,
    &'static mut Actor,
    &'static mut PhysicsBody,
    &'static mut Animator,
    Option<&'static AiProfile>,
);

pub type ActorItem<'w> = (
    Entity,
    Mut<'w, ActorController>,
    Mut<'w, Actor>,
    Mut<'w, PhysicsBody>,
    Mut<'w, Animator>,
    Option<&'w AiProfile>,
);

/// Разбирает query item на слот + контекст
pub fn split_actor<'a, 'w: 'a>(
    item: &'a mut ActorItem<'w>,
    world: WorldView<'a>,
) -> (&'a mut ActorController, ActorCx<'a>) {
    let (entity, controller, actor, body, animator, ai) = item;
    let cx = ActorCx {
        entity: *entity,
        actor: &mut **actor,
        body: &mut **body,
        animator: &mut **animator,
        ai: *ai,
        world,
    };
    (&mut **controller, cx)
}

/// Snapshot позиций на начало системы (цели читаются отсюда)
pub fn snapshot_positions(actors: &Query<ActorData>) -> Positions {
    actors
        .iter()
        .map(|(entity, _, actor, ..)| (entity, actor.position))
        .collect()
}

/// Система: инициализация новых акторов
///
/// Актор без action = ещё не инициализирован (после Initialize слот
/// никогда не пустеет).
pub fn initialize_actors(
    mut actors: Query<ActorData>,
    mut healths: Query<&mut Health>,
    physics: Res<PhysicsWorld>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time>,
) {
    let positions = snapshot_positions(&actors);
    let mut effects = Vec::new();

    for mut item in actors.iter_mut() {
        if item.1.current().is_some() {
            continue;
        }

        if let Ok(mut health) = healths.get_mut(item.0) {
            health.restore_full();
        }

        let world = WorldView {
            dt: time.delta_secs(),
            positions: &positions,
            raycaster: physics.raycaster(),
            rng: &mut rng.rng,
            effects: &mut effects,
        };
        let (controller, mut cx) = split_actor(&mut item, world);
        controller.initialize(&mut cx);
        crate::logger::log(&format!("🆕 {:?} initialized at {:?}", cx.entity, cx.actor.position));
    }
}

/// Система: phase markers из анимации → SetPhase
pub fn apply_phase_markers(
    mut markers: EventReader<AnimationPhaseMarker>,
    mut controllers: Query<&mut ActorController>,
) {
    for marker in markers.read() {
        match controllers.get_mut(marker.actor) {
            Ok(mut controller) => controller.set_phase(marker.phase),
            Err(_) => {
                let error = ActionError::UnknownActor { entity: marker.actor };
                crate::logger::log_warning(&format!("AnimationPhaseMarker dropped: {error}"));
            }
        }
    }
}

/// Система: per-frame update всех акторов
///
/// Player hook идёт первым (intents этого frame), потом action.
/// Эффекты на других акторов уходят как `CombatEffect` события.
pub fn run_action_frames(
    mut actors: Query<ActorData>,
    mut inputs: Query<&mut PlayerInput>,
    physics: Res<PhysicsWorld>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time>,
    mut effect_events: EventWriter<CombatEffect>,
) {
    let positions = snapshot_positions(&actors);
    let mut effects = Vec::new();

    for mut item in actors.iter_mut() {
        let entity = item.0;
        let world = WorldView {
            dt: time.delta_secs(),
            positions: &positions,
            raycaster: physics.raycaster(),
            rng: &mut rng.rng,
            effects: &mut effects,
        };
        let (controller, mut cx) = split_actor(&mut item, world);

        if let Ok(mut input) = inputs.get_mut(entity) {
            player_frame(controller, &mut cx, &mut input);
        }
        controller.per_frame(&mut cx);
    }

    effect_events.write_batch(effects);
}
