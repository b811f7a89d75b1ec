//! Steering helpers (AI + player)
//!
//! Отсутствующая цель (`None`) — не ошибка: AI теряет цель постоянно
//! (despawn, смерть). Возвращаем нейтральные значения: стоим, не крутимся,
//! дистанция = `MISSING_TARGET_DISTANCE`.

use bevy::prelude::*;

use crate::components::Actor;

/// Дистанция до отсутствующей цели (заведомо вне любых радиусов)
pub const MISSING_TARGET_DISTANCE: f32 = 999.0;

/// Кратчайшая разница углов (градусы), результат в (-180, 180]
pub fn delta_angle(current: f32, target: f32) -> f32 {
    let mut delta = (target - current).rem_euclid(360.0);
    if delta > 180.0 {
        delta -= 360.0;
    }
    delta
}

/// Поворот `current` к `target` не больше чем на `max_delta` градусов
pub fn move_towards_angle(current: f32, target: f32, max_delta: f32) -> f32 {
    let delta = delta_angle(current, target);
    if delta.abs() <= max_delta {
        return current + delta;
    }
    current + delta.signum() * max_delta
}

/// Угол (градусы) направления `from → to`
pub fn heading_to(from: Vec2, to: Vec2) -> f32 {
    let diff = to - from;
    diff.y.atan2(diff.x).to_degrees()
}

/// Единичный вектор направления взгляда
pub fn facing_vector(facing: f32) -> Vec2 {
    let radians = facing.to_radians();
    Vec2::new(radians.cos(), radians.sin())
}

impl Actor {
    /// "Вперёд" в 2D — направление взгляда
    pub fn move_forwards(&mut self) {
        self.desired_move = facing_vector(self.facing);
    }

    /// Идти к точке. `stop_within > 0` — останавливаемся внутри радиуса,
    /// а если подошли ближе чем `stop_within - 1`, отходим назад.
    pub fn move_towards(&mut self, point: Vec2, stop_within: f32) {
        if stop_within > 0.0 {
            let distance = self.distance_to(point);
            if distance < stop_within {
                self.desired_move = if distance < stop_within - 1.0 {
                    self.position - point
                } else {
                    Vec2::ZERO
                };
                return;
            }
        }
        self.desired_move = point - self.position;
    }

    pub fn move_towards_target(&mut self, target: Option<Vec2>, stop_within: f32) {
        match target {
            Some(point) => self.move_towards(point, stop_within),
            None => self.desired_move = Vec2::ZERO,
        }
    }

    pub fn distance_to(&self, point: Vec2) -> f32 {
        self.position.distance(point)
    }

    pub fn distance_to_target(&self, target: Option<Vec2>) -> f32 {
        target.map_or(MISSING_TARGET_DISTANCE, |point| self.distance_to(point))
    }

    /// Повернуться к точке. `turn_time > 0` — полный разворот (180°) за
    /// `turn_time` секунд, иначе мгновенно. Возвращает сколько градусов ещё
    /// осталось довернуть.
    pub fn look_at(&mut self, point: Vec2, turn_time: f32, dt: f32) -> f32 {
        let wanted = heading_to(self.position, point);
        let facing = if turn_time > 0.0 {
            move_towards_angle(self.facing, wanted, (180.0 / turn_time) * dt)
        } else {
            wanted
        };
        self.facing = facing;
        delta_angle(facing, wanted).abs()
    }

    pub fn look_at_target(&mut self, target: Option<Vec2>, turn_time: f32, dt: f32) -> f32 {
        match target {
            Some(point) => self.look_at(point, turn_time, dt),
            None => 0.0,
        }
    }

    /// Смотрим ли на точку (в пределах `tolerance` градусов)
    pub fn is_facing(&self, point: Vec2, tolerance: f32) -> bool {
        delta_angle(heading_to(self.position, point), self.facing).abs() < tolerance
    }

    pub fn is_facing_target(&self, target: Option<Vec2>, tolerance: f32) -> bool {
        target.is_some_and(|point| self.is_facing(point, tolerance))
    }
}
