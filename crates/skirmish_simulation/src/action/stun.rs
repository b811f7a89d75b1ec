//! Stun — актор крутится на 360° и ничего не может сделать
//!
//! Вращение делает cooperative script (один шаг на frame), поэтому отмена
//! прерыванием оставляет актора на последнем угле, а `on_terminate`
//! возвращает исходный.

use crate::action::base::{ActionCore, Behavior, Flow, Resume, PRIORITY_STUN};
use crate::action::context::ActorCx;

#[derive(Debug, Clone, PartialEq)]
pub struct Stun {
    /// Поворот актора на момент создания stun
    pub start_facing: f32,
    /// Сколько градусов уже прокрутили
    pub spun: f32,
}

impl Stun {
    pub fn new(start_facing: f32) -> Self {
        Self {
            start_facing,
            spun: 0.0,
        }
    }

    pub fn core(duration: f32) -> ActionCore {
        ActionCore {
            duration,
            priority: PRIORITY_STUN,
            move_mult: 0.0,
            rotate_mult: 0.0,
            ..Default::default()
        }
    }
}

impl Behavior for Stun {
    fn reset(&mut self) {
        self.spun = 0.0;
    }

    fn resume(&mut self, core: &mut ActionCore, cx: &mut ActorCx) -> Resume {
        if core.duration <= 0.0 || self.spun >= 360.0 {
            return Resume::Done(Flow::Finish);
        }

        self.spun += 360.0 / core.duration * cx.world.dt;
        cx.actor.facing = self.start_facing + self.spun;
        Resume::Yield
    }

    fn on_terminate(&mut self, _core: &mut ActionCore, cx: &mut ActorCx) {
        cx.actor.facing = self.start_facing;
    }
}
