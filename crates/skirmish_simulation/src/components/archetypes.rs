//! Archetypes — готовые наборы компонентов для игрока и монстров
//!
//! Bundles не включают hit regions: они отдельные entities (дети актора),
//! их спавнит `spawn_actor_regions`.

use bevy::prelude::*;

use crate::combat::{Hitbox, Hurtbox};
use crate::components::{Actor, AiProfile, Animator, AttackStyle, DeathPolicy, Health, Player};

pub const PLAYER_SPEED: f32 = 5.0;
pub const PLAYER_MAX_HEALTH: f32 = 10.0;
pub const MONSTER_SPEED: f32 = 3.0;
pub const MONSTER_MAX_HEALTH: f32 = 3.0;

/// Вид монстра
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonsterKind {
    /// Ходит с мечом (Swing)
    Swinger,
    /// Бросается всем телом (Lunge, range 3)
    Lunger,
}

/// Стандартная библиотека клипов (длины в секундах)
pub fn default_animator() -> Animator {
    Animator::default()
        .with_clip("Idle", 1.0)
        .with_clip("Walk", 0.8)
        .with_clip("Swing", 0.4)
        .with_clip("Lunge", 0.6)
        .with_clip("Die", 1.0)
}

pub fn player_bundle(position: Vec2) -> impl Bundle {
    (
        Actor::new(PLAYER_SPEED, position),
        Health::new(PLAYER_MAX_HEALTH),
        default_animator(),
        Player,
        Name::new("Player"),
    )
}

pub fn monster_bundle(kind: MonsterKind, position: Vec2) -> impl Bundle {
    let (attack, attack_range, name) = match kind {
        MonsterKind::Swinger => (AttackStyle::Swing, 1.5, "Swinger"),
        MonsterKind::Lunger => (AttackStyle::Lunge, 3.0, "Lunger"),
    };

    (
        Actor::new(MONSTER_SPEED, position)
            .with_attack(attack)
            .with_death(DeathPolicy::Linger { seconds: 2.0 }),
        Health::new(MONSTER_MAX_HEALTH),
        default_animator(),
        AiProfile {
            attack_range,
            ..default()
        },
        Name::new(name),
    )
}

/// Hurtbox + Hitbox как дочерние entities (despawn вместе с актором)
pub fn spawn_actor_regions(commands: &mut Commands, actor: Entity) -> (Entity, Entity) {
    let hurtbox = commands.spawn((Hurtbox { owner: actor }, ChildOf(actor))).id();
    let hitbox = commands.spawn((Hitbox { owner: actor }, ChildOf(actor))).id();
    (hurtbox, hitbox)
}

pub fn spawn_player(commands: &mut Commands, position: Vec2) -> Entity {
    let player = commands.spawn(player_bundle(position)).id();
    spawn_actor_regions(commands, player);
    player
}

pub fn spawn_monster(commands: &mut Commands, kind: MonsterKind, position: Vec2) -> Entity {
    let monster = commands.spawn(monster_bundle(kind, position)).id();
    spawn_actor_regions(commands, monster);
    monster
}
