//! Attack actions: Swing, Lunge
//!
//! Phase 0 = active (шаг вперёд / полёт), phase 1 = recovery (стоим).
//! Phase переключает анимация через `AnimationPhaseMarker`.

use bevy::prelude::*;

use crate::action::base::{ActionCore, Behavior, Flow, PRIORITY_STUN};
use crate::action::context::ActorCx;
use crate::combat::CombatEffect;
use crate::components::AttackStyle;

pub const DEFAULT_DAMAGE: f32 = 1.0;
/// 10 хватает, чтобы цель не жонглировали
pub const DEFAULT_KNOCKBACK: f32 = 10.0;
/// Длительность stun, который атака вешает на цель
pub const HIT_STUN_DURATION: f32 = 0.5;
/// Attack range для lunge, если у актора нет `AiProfile`
pub const DEFAULT_LUNGE_RANGE: f32 = 1.5;

#[derive(Debug, Clone, PartialEq)]
pub struct Attack {
    pub style: AttackStyle,
    pub damage: f32,
    pub knockback: f32,
    /// Кого уже ударили этой активацией
    pub already_hit: Vec<Entity>,
}

impl Attack {
    pub fn new(style: AttackStyle) -> Self {
        Self {
            style,
            damage: DEFAULT_DAMAGE,
            knockback: DEFAULT_KNOCKBACK,
            already_hit: Vec::new(),
        }
    }

    /// Lunge пролетает сквозь цель: без knockback
    pub fn lunge() -> Self {
        Self {
            knockback: 0.0,
            ..Self::new(AttackStyle::Lunge)
        }
    }

    pub fn swing_core() -> ActionCore {
        ActionCore {
            clip: Some("Swing".to_string()),
            ..default()
        }
    }

    pub fn lunge_core() -> ActionCore {
        ActionCore {
            clip: Some("Lunge".to_string()),
            ..default()
        }
    }
}

impl Behavior for Attack {
    fn reset(&mut self) {
        self.already_hit.clear();
    }

    fn on_frame(&mut self, core: &mut ActionCore, cx: &mut ActorCx) -> Flow {
        match self.style {
            AttackStyle::Swing => {
                if core.phase < 1 {
                    cx.actor.move_forwards();
                }
            }
            AttackStyle::Lunge => {
                if core.phase == 0 {
                    // Чем длиннее range, тем быстрее рывок
                    core.move_mult = cx.ai.map_or(DEFAULT_LUNGE_RANGE, |profile| profile.attack_range);
                    cx.actor.move_forwards();
                } else {
                    core.move_mult = 0.0;
                }
            }
        }
        Flow::Continue
    }

    fn change_phase(&mut self, core: &mut ActionCore, phase: u32) {
        core.phase = phase;
        if self.style == AttackStyle::Swing {
            core.move_mult = if phase == 0 { 1.0 } else { 0.0 };
        }
    }

    fn hit_begin(&mut self, _core: &mut ActionCore, cx: &mut ActorCx, struck: Entity, _hurtbox: Entity) {
        if self.already_hit.contains(&struck) {
            return;
        }
        self.already_hit.push(struck);

        // Порядок важен: damage → stun → knockback
        cx.world.effects.push(CombatEffect::Damage {
            target: struck,
            amount: self.damage,
            source: Some(cx.entity),
        });
        cx.world.effects.push(CombatEffect::Stun {
            target: struck,
            duration: HIT_STUN_DURATION,
            priority: PRIORITY_STUN,
        });
        cx.world.effects.push(CombatEffect::Knockback {
            target: struck,
            from: cx.actor.position,
            force: self.knockback,
        });
    }
}
