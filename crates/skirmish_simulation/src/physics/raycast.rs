//! Raycast service (контракт физики для AI line-of-sight и проверки стен)
//!
//! В игре raycast делает движок (его 2D physics). Headless симуляция и тесты
//! используют `StaticWalls`: segment colliders rapier и их `cast_ray`.

use bevy::prelude::*;
use bevy_rapier2d::prelude::{Collider, CollisionGroups, Group};

/// Битовая маска слоёв коллизий
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const WALLS: LayerMask = LayerMask(1 << 0);
    pub const ACTORS: LayerMask = LayerMask(1 << 1);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    /// Те же биты как rapier `Group`
    pub fn group(self) -> Group {
        Group::from_bits_truncate(self.0)
    }
}

/// Ближайшее блокирующее попадание луча
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec2,
    pub distance: f32,
}

pub trait Raycaster: Send + Sync {
    /// Луч из `origin` по `direction` (нормализация внутри) до `max_distance`.
    /// Нулевое направление ничего не пересекает.
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<RayHit>;
}

/// Стена-отрезок (segment collider)
#[derive(Clone)]
pub struct WallSegment {
    pub start: Vec2,
    pub end: Vec2,
    pub layers: LayerMask,
    collider: Collider,
}

impl WallSegment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self {
            start,
            end,
            layers: LayerMask::WALLS,
            collider: Collider::segment(start, end),
        }
    }

    /// Collision groups стены: membership = слои стены, filter = все слои
    pub fn groups(&self) -> CollisionGroups {
        CollisionGroups::new(self.layers.group(), Group::ALL)
    }
}

impl std::fmt::Debug for WallSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WallSegment")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("layers", &self.layers)
            .finish()
    }
}

/// Headless raycaster: segment colliders + rapier ray cast
///
/// Collider координаты уже мировые, поэтому transform = identity.
#[derive(Debug, Clone, Default)]
pub struct StaticWalls {
    pub walls: Vec<WallSegment>,
}

impl StaticWalls {
    pub fn new(walls: Vec<WallSegment>) -> Self {
        Self { walls }
    }
}

impl Raycaster for StaticWalls {
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<RayHit> {
        let dir = direction.normalize_or_zero();
        if dir == Vec2::ZERO {
            return None;
        }
        let filter = layers.group();

        // dir нормализован → time of impact == дистанция
        self.walls
            .iter()
            .filter(|wall| wall.groups().memberships.intersects(filter))
            .filter_map(|wall| wall.collider.cast_ray(Vec2::ZERO, 0.0, origin, dir, max_distance, true))
            .min_by(|a, b| a.total_cmp(b))
            .map(|distance| RayHit {
                point: origin + dir * distance,
                distance,
            })
    }
}

/// Resource: физический мир (raycast service)
#[derive(Resource)]
pub struct PhysicsWorld {
    raycaster: Box<dyn Raycaster>,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(StaticWalls::default())
    }
}

impl PhysicsWorld {
    pub fn new(raycaster: impl Raycaster + 'static) -> Self {
        Self {
            raycaster: Box::new(raycaster),
        }
    }

    pub fn raycaster(&self) -> &dyn Raycaster {
        self.raycaster.as_ref()
    }
}
