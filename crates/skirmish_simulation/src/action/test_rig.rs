//! Test rig: один актор + его `ActorController` без Bevy App
//!
//! dt фиксированный и точный в f32 (0.125), так что границы таймеров
//! проверяются без погрешности.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::action::{Action, ActorController, ActorCx, Arbitration, Positions, WorldView};
use crate::combat::CombatEffect;
use crate::components::{default_animator, Actor, AiProfile, Animator, AttackStyle, PhysicsBody};
use crate::physics::{StaticWalls, WallSegment};

pub const RIG_DT: f32 = 0.125;

pub struct Rig {
    pub entity: Entity,
    pub controller: ActorController,
    pub actor: Actor,
    pub body: PhysicsBody,
    pub animator: Animator,
    pub ai: Option<AiProfile>,
    pub positions: Positions,
    pub walls: StaticWalls,
    pub rng: ChaCha8Rng,
    pub effects: Vec<CombatEffect>,
    pub dt: f32,
}

impl Rig {
    pub fn player() -> Self {
        Self {
            entity: Entity::from_raw(1),
            controller: ActorController::default(),
            actor: Actor::new(5.0, Vec2::ZERO),
            body: PhysicsBody::default(),
            animator: default_animator(),
            ai: None,
            positions: Positions::new(),
            walls: StaticWalls::default(),
            rng: ChaCha8Rng::seed_from_u64(7),
            effects: Vec::new(),
            dt: RIG_DT,
        }
    }

    pub fn monster(style: AttackStyle) -> Self {
        let mut rig = Self::player();
        rig.actor = Actor::new(3.0, Vec2::ZERO).with_attack(style);
        rig.ai = Some(AiProfile::default());
        rig
    }

    /// Цель AI с позицией (в snapshot позиций)
    pub fn add_target(&mut self, position: Vec2) -> Entity {
        let target = Entity::from_raw(100 + self.positions.len() as u32);
        self.positions.insert(target, position);
        if let Some(profile) = self.ai.as_mut() {
            profile.target = Some(target);
        }
        target
    }

    pub fn add_wall(&mut self, start: Vec2, end: Vec2) {
        self.walls.walls.push(WallSegment::new(start, end));
    }

    pub fn with<R>(&mut self, f: impl FnOnce(&mut ActorController, &mut ActorCx) -> R) -> R {
        self.positions.insert(self.entity, self.actor.position);
        let world = WorldView {
            dt: self.dt,
            positions: &self.positions,
            raycaster: &self.walls,
            rng: &mut self.rng,
            effects: &mut self.effects,
        };
        let mut cx = ActorCx {
            entity: self.entity,
            actor: &mut self.actor,
            body: &mut self.body,
            animator: &mut self.animator,
            ai: self.ai.as_ref(),
            world,
        };
        f(&mut self.controller, &mut cx)
    }

    pub fn init(&mut self) {
        self.with(|controller, cx| controller.initialize(cx));
    }

    pub fn frame(&mut self) {
        self.with(|controller, cx| controller.per_frame(cx));
    }

    pub fn frames(&mut self, count: usize) {
        for _ in 0..count {
            self.frame();
        }
    }

    pub fn perform(&mut self, action: Action, priority: f32) -> Arbitration {
        self.with(|controller, cx| controller.do_action(cx, Some(action), priority))
    }

    pub fn physics_tick(&mut self) {
        self.controller.physics_tick(&mut self.actor, &mut self.body);
    }

    pub fn label(&self) -> Option<&'static str> {
        self.controller.current().map(|action| action.label())
    }

    pub fn current(&self) -> &Action {
        self.controller.current().expect("actor has no current action")
    }
}
