//! ActorController — слот текущего action + арбитраж
//!
//! # Arbitration (do_action)
//!
//! 1. current.priority >= challenge → Rejected (кандидат не стартует)
//! 2. кандидат = переданный action или default action актора
//! 3. current.interrupt(candidate) == veto → Vetoed
//! 4. слот = кандидат, `start()`
//!
//! Это единственный путь смены action. `end()` идёт через тот же путь
//! (очистка слота + default action).

use bevy::prelude::*;

use crate::action::base::{default_action, Action, Flow, PRIORITY_DEFAULT};
use crate::action::context::ActorCx;
use crate::components::{Actor, PhysicsBody};
use crate::error::ActionError;
use crate::physics::decay_knockback;

/// Исход `do_action` (не ошибка: caller может игнорировать)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arbitration {
    Started,
    /// Текущий action имеет priority >= challenge
    Rejected,
    /// Текущий action отказался прерываться
    Vetoed,
}

#[derive(Component, Debug, Default)]
pub struct ActorController {
    current: Option<Action>,
    /// Счётчик активаций (serial для guarded End)
    activations: u64,
    /// Сколько actions прошли termination hook (End или Interrupt)
    terminations: u64,
}

impl ActorController {
    pub fn current(&self) -> Option<&Action> {
        self.current.as_ref()
    }

    pub fn terminations(&self) -> u64 {
        self.terminations
    }

    fn is_current(&self, serial: u64) -> bool {
        self.current.as_ref().is_some_and(|action| action.serial == serial)
    }

    /// Spawn origin + default action (актор никогда не остаётся без action)
    pub fn initialize(&mut self, cx: &mut ActorCx) {
        cx.actor.spawn_origin = cx.actor.position;
        self.do_action(cx, None, PRIORITY_DEFAULT);
    }

    pub fn do_action(&mut self, cx: &mut ActorCx, candidate: Option<Action>, priority: f32) -> Arbitration {
        if let Some(current) = &self.current {
            if current.priority() >= priority {
                crate::logger::log(&format!(
                    "🚫 {:?} {} keeps slot (priority {} >= {})",
                    cx.entity,
                    current.label(),
                    current.priority(),
                    priority
                ));
                return Arbitration::Rejected;
            }
        }

        let mut next = match candidate {
            Some(action) => action,
            None => default_action(cx),
        };

        let previous = self.current.as_ref().map_or("none", |action| action.label());

        if let Some(current) = self.current.as_mut() {
            if current.interrupt(cx, &next) {
                crate::logger::log(&format!(
                    "🛡️ {:?} {} vetoed {}",
                    cx.entity,
                    current.label(),
                    next.label()
                ));
                return Arbitration::Vetoed;
            }
            self.terminations += 1;
        }

        self.activations += 1;
        next.serial = self.activations;

        crate::logger::log(&format!(
            "🎬 {:?} {} → {} (priority {})",
            cx.entity,
            previous,
            next.label(),
            priority
        ));

        self.current.insert(next).start(cx);
        Arbitration::Started
    }

    /// Per-frame: logic hook → timer → один шаг script.
    /// Если action сменился по дороге, оставшиеся шаги не выполняются.
    pub fn per_frame(&mut self, cx: &mut ActorCx) {
        let Some(action) = self.current.as_mut() else {
            return;
        };
        let serial = action.serial;

        let flow = action.frame_logic(cx);
        self.follow(cx, serial, flow);

        let expired = match self.current.as_mut() {
            Some(action) if action.serial == serial => action.advance_timer(cx.world.dt),
            _ => return,
        };
        if expired {
            self.end(cx, serial);
        }

        let flow = match self.current.as_mut() {
            Some(action) if action.serial == serial => action.resume_script(cx),
            _ => return,
        };
        self.follow(cx, serial, flow);
    }

    fn follow(&mut self, cx: &mut ActorCx, serial: u64, flow: Flow) {
        match flow {
            Flow::Continue => {}
            Flow::Perform { action, priority } => {
                self.do_action(cx, Some(action), priority);
            }
            Flow::Finish => self.end(cx, serial),
        }
    }

    /// Guarded End: только если `serial` всё ещё текущий
    pub(crate) fn end(&mut self, cx: &mut ActorCx, serial: u64) {
        if !self.is_current(serial) {
            return;
        }
        let Some(mut finished) = self.current.take() else {
            return;
        };

        let next = finished.follow_up(cx);
        self.do_action(cx, next, PRIORITY_DEFAULT);
        finished.terminate(cx);
        self.terminations += 1;
    }

    /// Per-physics-tick: decay knockback, velocity от action
    pub fn physics_tick(&self, actor: &mut Actor, body: &mut PhysicsBody) {
        actor.knockback = decay_knockback(actor.knockback);

        body.velocity = match &self.current {
            Some(action) => action.compute_velocity(actor),
            None => actor.knockback,
        };
    }

    /// No-op без текущего action
    pub fn set_phase(&mut self, phase: u32) {
        if let Some(action) = self.current.as_mut() {
            action.change_phase(phase);
        }
    }

    pub fn hit_begin(&mut self, cx: &mut ActorCx, struck: Entity, hurtbox: Entity) -> Result<(), ActionError> {
        let action = self
            .current
            .as_mut()
            .ok_or(ActionError::NoCurrentAction { actor: cx.entity })?;
        action.hit_begin(cx, struck, hurtbox);
        Ok(())
    }

    pub fn hit_end(&mut self, cx: &mut ActorCx, struck: Entity, hurtbox: Entity) -> Result<(), ActionError> {
        let action = self
            .current
            .as_mut()
            .ok_or(ActionError::NoCurrentAction { actor: cx.entity })?;
        action.hit_end(cx, struck, hurtbox);
        Ok(())
    }
}
