//! Movement domain — steering helpers для актора
//!
//! Содержит:
//! - steering: move_forwards / move_towards / look_at / is_facing / distance
//! - angle math в градусах (delta_angle, move_towards_angle)
//!
//! Helpers только пишут intents (desired_move, facing). Velocity считает
//! текущий action в FixedUpdate.

pub mod steering;

pub use steering::*;
