//! Dead — terminal action трупа (DeathPolicy::Linger)

use crate::action::base::{Action, ActionCore, Behavior, PRIORITY_TERMINAL};

pub const DEATH_CLIP: &str = "Die";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dead;

impl Dead {
    /// Клип "Die" играет, но его длина не заканчивает action
    pub fn core() -> ActionCore {
        ActionCore {
            priority: PRIORITY_TERMINAL,
            clip: Some(DEATH_CLIP.to_string()),
            duration_from_clip: false,
            ..Default::default()
        }
    }
}

impl Behavior for Dead {
    /// Мёртвых не прерывают
    fn vetoes(&self, _core: &ActionCore, _candidate: &Action) -> bool {
        true
    }
}
