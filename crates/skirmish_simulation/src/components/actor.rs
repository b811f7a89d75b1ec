//! Базовые компоненты акторов: Actor, Health, PhysicsBody, AiProfile, Player

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::action::ActorController;
use crate::components::Animator;

/// Анимация по умолчанию, если у action нет своей
pub const DEFAULT_IDLE_CLIP: &str = "Idle";

/// Актор (игрок, монстр) — всё, что умеет выполнять actions
///
/// Автоматически добавляет Health, PhysicsBody, Animator и ActorController
/// через Required Components. Инициализация (spawn origin, full health,
/// default action) — в `initialize_actors`.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(Health, PhysicsBody, Animator, ActorController, Transform)]
pub struct Actor {
    /// Скорость ходьбы (units/sec)
    pub speed: f32,
    /// Куда актор хочет идти (WASD для игрока, AI для монстров). Не нормализован.
    pub desired_move: Vec2,
    /// Непроизвольное движение (затухает в FixedUpdate)
    pub knockback: Vec2,
    /// Позиция в мире (интегрируется физикой)
    pub position: Vec2,
    /// Поворот вокруг z, градусы. 0 = смотрит вправо (+x)
    pub facing: f32,
    /// Где актор заспавнился (patrol крутится вокруг этой точки)
    pub spawn_origin: Vec2,
    /// Клип для actions без своей анимации
    pub default_clip: String,
    /// Какой атакой бьёт по умолчанию
    pub attack: AttackStyle,
    /// Что делать при смерти
    pub death: DeathPolicy,
}

impl Default for Actor {
    fn default() -> Self {
        Self {
            speed: 0.0,
            desired_move: Vec2::ZERO,
            knockback: Vec2::ZERO,
            position: Vec2::ZERO,
            facing: 0.0,
            spawn_origin: Vec2::ZERO,
            default_clip: DEFAULT_IDLE_CLIP.to_string(),
            attack: AttackStyle::Swing,
            death: DeathPolicy::Despawn,
        }
    }
}

impl Actor {
    pub fn new(speed: f32, position: Vec2) -> Self {
        Self {
            speed,
            position,
            spawn_origin: position,
            ..default()
        }
    }

    pub fn with_attack(mut self, attack: AttackStyle) -> Self {
        self.attack = attack;
        self
    }

    pub fn with_death(mut self, death: DeathPolicy) -> Self {
        self.death = death;
        self
    }

    /// Перезаписывает (не накапливает) knockback: от `from`, сила `force`.
    pub fn take_knockback(&mut self, from: Vec2, force: f32) {
        self.knockback = (self.position - from).normalize_or_zero() * force;
    }
}

/// Атака актора по умолчанию
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum AttackStyle {
    /// Удар мечом с шагом вперёд
    #[default]
    Swing,
    /// Рывок всем телом (скорость растёт с attack range)
    Lunge,
}

/// Политика смерти актора
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect, Serialize, Deserialize)]
pub enum DeathPolicy {
    /// Сразу убрать entity из симуляции
    #[default]
    Despawn,
    /// Труп остаётся (terminal `Dead` action), despawn через `seconds`
    Linger { seconds: f32 },
}

/// Здоровье актора
///
/// Инвариант: 0 ≤ current ≤ max. `max <= 0` — актор неуязвим.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(0.0) // Неуязвим, пока не задан max
    }
}

/// Результат `Health::take_damage`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    Immune,
    Hurt,
    /// Здоровье только что дошло до нуля — death hook вызывается ровно здесь
    Killed,
    /// Уже мёртв, урон игнорируется
    AlreadyDead,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn is_immune(&self) -> bool {
        self.max <= 0.0
    }

    pub fn is_alive(&self) -> bool {
        self.is_immune() || self.current > 0.0
    }

    pub fn restore_full(&mut self) {
        self.current = self.max;
    }

    pub fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        if self.is_immune() {
            return DamageOutcome::Immune;
        }
        if self.current <= 0.0 {
            return DamageOutcome::AlreadyDead;
        }

        self.current -= amount;
        if self.current <= 0.0 {
            self.current = 0.0;
            DamageOutcome::Killed
        } else {
            DamageOutcome::Hurt
        }
    }
}

/// Физическое тело (velocity пишет core, интегрирует внешняя физика)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct PhysicsBody {
    pub velocity: Vec2,
}

/// AI capability монстра (вместо downcast к MonsterController)
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct AiProfile {
    /// Кого атакуем (None → возьмём игрока в `acquire_player_targets`)
    pub target: Option<Entity>,
    /// На каком расстоянии начинаем атаку
    pub attack_range: f32,
    /// Радиус aggro (ещё нужен line of sight)
    pub vision_range: f32,
}

impl Default for AiProfile {
    fn default() -> Self {
        Self {
            target: None,
            attack_range: 1.5,
            vision_range: 4.0,
        }
    }
}

/// Маркер игрока
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(PlayerInput)]
pub struct Player;

/// Intents от input service (заполняет движок каждый frame)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct PlayerInput {
    /// WASD ось, компоненты в [-1, 1]
    pub move_axis: Vec2,
    /// Курсор в world coordinates
    pub aim_point: Option<Vec2>,
    /// Нажатие атаки в этом frame (one-shot, сбрасывается после обработки)
    pub attack_pressed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_damage_sequence() {
        let mut health = Health::new(10.0);

        assert_eq!(health.take_damage(4.0), DamageOutcome::Hurt);
        assert_eq!(health.current, 6.0);

        assert_eq!(health.take_damage(4.0), DamageOutcome::Hurt);
        assert_eq!(health.current, 2.0);

        assert_eq!(health.take_damage(4.0), DamageOutcome::Killed);
        assert_eq!(health.current, 0.0); // Clamp к нулю
        assert!(!health.is_alive());

        // Повторный урон не убивает второй раз
        assert_eq!(health.take_damage(4.0), DamageOutcome::AlreadyDead);
    }

    #[test]
    fn test_health_immune_when_max_zero() {
        let mut health = Health::default();
        assert!(health.is_immune());
        assert_eq!(health.take_damage(100.0), DamageOutcome::Immune);
        assert!(health.is_alive());
    }

    #[test]
    fn test_knockback_overwrites() {
        let mut actor = Actor::new(5.0, Vec2::new(2.0, 0.0));
        actor.knockback = Vec2::new(0.0, 50.0);

        actor.take_knockback(Vec2::ZERO, 10.0);

        assert_eq!(actor.knockback, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn test_zero_force_knockback_clears() {
        let mut actor = Actor::new(5.0, Vec2::new(0.0, 3.0));
        actor.knockback = Vec2::new(4.0, 4.0);

        actor.take_knockback(Vec2::ZERO, 0.0);

        assert_eq!(actor.knockback, Vec2::ZERO);
    }
}
