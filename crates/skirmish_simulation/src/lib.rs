//! Skirmish Simulation Core
//!
//! ECS-симуляция на Bevy 0.16 (strategic layer): арбитраж actions акторов,
//! combat rules, AI цели.
//!
//! HYBRID ARCHITECTURE:
//! - ECS = action core (какой action правит актором, урон, stun, knockback)
//! - Движок = tactical layer (рендер, анимации, 2D физика, triggers, input)
//!
//! Связь через компоненты (`Animator`, `PhysicsBody`, `PlayerInput`) и
//! события (`RegionOverlap`, `AnimationPhaseMarker`, `ActorDied`).

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

// Публичные модули
pub mod action;
pub mod ai;
pub mod combat;
pub mod components;
pub mod error;
pub mod logger;
pub mod movement;
pub mod physics;
pub mod player;

// Re-export базовых типов для удобства
pub use action::{
    Action, ActionPlugin, ActorController, AnimationPhaseMarker, Arbitration, PRIORITY_DEFAULT, PRIORITY_IDLE,
    PRIORITY_STUN, PRIORITY_TERMINAL,
};
pub use ai::AIPlugin;
pub use combat::{
    ActorDied, CombatEffect, CombatPlugin, Dead, DespawnAfter, Hitbox, Hurtbox, ProximityTriggerPlugin, RegionOverlap,
    PROXIMITY_REACH,
};
pub use components::*;
pub use error::ActionError;
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_logger, LogLevel, LogPrinter};
pub use physics::{LayerMask, PhysicsPlugin, PhysicsWorld, Raycaster, StaticWalls, WallSegment};

/// Частота frame в headless режиме (Update)
pub const HEADLESS_FRAME_HZ: f64 = 60.0;

/// Конфигурация симуляции
///
/// Вставьте resource до `SimulationPlugin`, чтобы переопределить default.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Seed детерминистичного RNG (patrol waypoints)
    pub seed: u64,
    /// Частота physics tick (FixedUpdate)
    pub fixed_hz: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            fixed_hz: 50.0,
        }
    }
}

/// Порядок per-frame работы (Update)
///
/// Intents → Actions → Combat → Presentation
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Цели AI
    Intents,
    /// Init, phase markers, player hook, per-frame actions
    Actions,
    /// Hit routing, эффекты, смерть
    Combat,
    /// Transform sync для renderer
    Presentation,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<SimulationConfig>()
            .cloned()
            .unwrap_or_default();

        app
            // Fixed timestep для physics tick
            .insert_resource(Time::<Fixed>::from_hz(config.fixed_hz))
            // Детерминистичный RNG (seed из конфига)
            .insert_resource(DeterministicRng::new(config.seed))
            .insert_resource(config)
            .configure_sets(
                Update,
                (
                    SimulationSet::Intents,
                    SimulationSet::Actions,
                    SimulationSet::Combat,
                    SimulationSet::Presentation,
                )
                    .chain(),
            )
            // Подсистемы (ECS strategic layer)
            .add_plugins((ActionPlugin, CombatPlugin, AIPlugin, PhysicsPlugin))
            .add_systems(Update, physics::sync_transforms.in_set(SimulationSet::Presentation));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Frame delta фиксированный (1/60 s), поэтому прогоны с одним seed
/// совпадают бит в бит. `SimulationPlugin` добавляет caller.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(SimulationConfig { seed, ..default() })
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / HEADLESS_FRAME_HZ,
        )));

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    // Собираем все компоненты в детерминированный формат
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
