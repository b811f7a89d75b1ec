//! Locomotion actions: Idle, Patrol, Chase
//!
//! Все три — priority 0, полный move/rotate. Patrol и Chase требуют
//! `AiProfile` (без него цель отсутствует и они просто стоят).

use bevy::prelude::*;
use rand::Rng;

use crate::action::base::{default_attack_action, Action, ActionCore, Behavior, Flow, PRIORITY_DEFAULT, PRIORITY_IDLE};
use crate::action::context::ActorCx;
use crate::physics::LayerMask;

/// Порог |desired_move|, выше которого играем "Walk"
pub const WALK_THRESHOLD: f32 = 0.1;
/// Waypoints выбираются в квадрате ±PATROL_RADIUS вокруг spawn origin
pub const PATROL_RADIUS: f32 = 5.0;
/// Waypoint считается достигнутым
pub const WAYPOINT_TOLERANCE: f32 = 0.2;
/// Время полного разворота AI (секунды на 180°)
pub const AI_TURN_TIME: f32 = 0.5;
/// Длина луча "не упёрлись ли в стену"
pub const WALL_PROBE_DISTANCE: f32 = 1.0;
/// Допуск "смотрю на точку" (градусы)
pub const FACING_TOLERANCE: f32 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub enum Locomotion {
    Idle,
    Patrol { waypoint: Vec2 },
    Chase,
}

impl Locomotion {
    pub fn core() -> ActionCore {
        ActionCore {
            priority: PRIORITY_IDLE,
            move_mult: 1.0,
            rotate_mult: 1.0,
            ..default()
        }
    }
}

/// Walk/Idle в зависимости от movement intent
pub fn animate_gait(cx: &mut ActorCx) {
    if cx.actor.desired_move.length() > WALK_THRESHOLD {
        cx.animator.play("Walk");
    } else {
        cx.animator.play("Idle");
    }
}

fn pick_waypoint(cx: &mut ActorCx) -> Vec2 {
    let offset = Vec2::new(
        cx.world.rng.gen_range(-PATROL_RADIUS..PATROL_RADIUS),
        cx.world.rng.gen_range(-PATROL_RADIUS..PATROL_RADIUS),
    );
    cx.actor.spawn_origin + offset
}

/// Цель в vision range и между нами нет стены
fn sees_target(cx: &ActorCx) -> bool {
    let (Some(profile), Some(target)) = (cx.ai, cx.target_position()) else {
        return false;
    };
    if cx.actor.distance_to(target) >= profile.vision_range {
        return false;
    }

    let origin = cx.actor.position;
    cx.world
        .raycaster
        .raycast(origin, target - origin, profile.vision_range, LayerMask::WALLS)
        .is_none()
}

impl Behavior for Locomotion {
    fn on_start(&mut self, _core: &mut ActionCore, cx: &mut ActorCx) {
        if let Locomotion::Patrol { waypoint } = self {
            *waypoint = pick_waypoint(cx);
        }
    }

    fn on_frame(&mut self, _core: &mut ActionCore, cx: &mut ActorCx) -> Flow {
        animate_gait(cx);

        match self {
            Locomotion::Idle => Flow::Continue,

            Locomotion::Patrol { waypoint } => {
                if sees_target(cx) {
                    // Aggro: дальше patrol логика в этом frame не нужна
                    return Flow::Perform {
                        action: Action::chase(),
                        priority: PRIORITY_DEFAULT,
                    };
                }

                if cx.actor.distance_to(*waypoint) < WAYPOINT_TOLERANCE {
                    *waypoint = pick_waypoint(cx);
                }

                let remaining = cx.actor.look_at(*waypoint, AI_TURN_TIME, cx.world.dt);
                if remaining < FACING_TOLERANCE {
                    let forward = crate::movement::facing_vector(cx.actor.facing);
                    let blocked = cx
                        .world
                        .raycaster
                        .raycast(cx.actor.position, forward, WALL_PROBE_DISTANCE, LayerMask::WALLS)
                        .is_some();

                    if blocked {
                        *waypoint = pick_waypoint(cx);
                        return Flow::Continue;
                    }
                    cx.actor.move_towards(*waypoint, 0.0);
                }
                Flow::Continue
            }

            Locomotion::Chase => {
                let target = cx.target_position();
                let attack_range = cx.ai.map_or(0.0, |profile| profile.attack_range);

                cx.actor.move_towards_target(target, attack_range);
                cx.actor.look_at_target(target, AI_TURN_TIME, cx.world.dt);

                if cx.actor.distance_to_target(target) <= attack_range
                    && cx.actor.is_facing_target(target, FACING_TOLERANCE)
                {
                    return Flow::Perform {
                        action: default_attack_action(cx.actor),
                        priority: PRIORITY_DEFAULT,
                    };
                }
                Flow::Continue
            }
        }
    }
}
