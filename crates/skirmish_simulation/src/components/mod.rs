//! ECS Components для акторов
//!
//! Организация по доменам:
//! - actor: состояние актора (Actor, Health, PhysicsBody, AiProfile, Player)
//! - animation: контракт animation playback service (Animator)
//! - archetypes: готовые наборы компонентов (player, монстры)

pub mod actor;
pub mod animation;
pub mod archetypes;

// Re-exports для удобного импорта
pub use actor::*;
pub use animation::*;
pub use archetypes::*;
