//! Movement компоненты: Motion (вектор движения + скорость)

use bevy::prelude::*;

/// Motion subsystem агента
///
/// Архитектура:
/// - ECS (AI) пишет direction/speed/override_animations (high-level intent)
/// - Хост читает и двигает тело своей физикой
/// - Агент без Motion просто не двигается (AI пропускает запись)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Motion {
    /// Нормализованное направление (или ноль)
    pub direction: Vec2,
    /// Скорость (единиц/сек)
    pub speed: f32,
    /// Хост не проигрывает стандартные walk-анимации (рывок)
    pub override_animations: bool,
    /// Точка, к которой ведёт direction (waypoint / цель рывка).
    /// Хост может не перелетать её за один шаг.
    pub destination: Option<Vec2>,
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            direction: Vec2::ZERO,
            speed: 0.0,
            override_animations: false,
            destination: None,
        }
    }
}

impl Motion {
    pub fn velocity(&self) -> Vec2 {
        self.direction * self.speed
    }
}
