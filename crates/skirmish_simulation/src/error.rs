//! Ошибки action core
//!
//! Все ошибки здесь recoverable: системы логируют их как warning и
//! продолжают frame loop. Отказ арбитража — не ошибка (см. `Arbitration`).

use bevy::prelude::Entity;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Hurtbox активен, а у владельца нет action (мисконфигурация коллайдеров)
    #[error("hurtbox owner {actor:?} has no current action")]
    NoCurrentAction { actor: Entity },

    /// Событие ссылается на entity без actor компонентов (despawned или не актор)
    #[error("entity {entity:?} is not an actor")]
    UnknownActor { entity: Entity },
}
