//! Player per-frame hook
//!
//! Input service заполняет `PlayerInput` (WASD, курсор, клик), hook
//! превращает его в intents до того, как текущий action сделает свой frame.

use crate::action::{Action, ActorController, ActorCx, PRIORITY_DEFAULT};
use crate::components::PlayerInput;

/// Время разворота игрока на 180° при rotate_mult = 1
pub const PLAYER_TURN_TIME: f32 = 0.1;

pub fn player_frame(controller: &mut ActorController, cx: &mut ActorCx, input: &mut PlayerInput) {
    cx.actor.desired_move = input.move_axis;

    let rotate_mult = controller.current().map_or(0.0, |action| action.core.rotate_mult);
    if rotate_mult > 0.0 {
        if let Some(aim) = input.aim_point {
            cx.actor.look_at(aim, PLAYER_TURN_TIME / rotate_mult, cx.world.dt);
        }
    }

    // One-shot: клик обрабатывается ровно один раз
    if std::mem::take(&mut input.attack_pressed) {
        controller.do_action(cx, Some(Action::swing()), PRIORITY_DEFAULT);
    }
}
