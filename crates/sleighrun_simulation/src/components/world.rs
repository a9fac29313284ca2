//! World positioning: WorldPosition (2D)

use bevy::prelude::*;

/// Позиция агента в мире (2D, ECS authoritative)
///
/// Хост пишет сюда позицию после своей физики, AI читает для решений.
/// В headless режиме обновляется `integrate_motion`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct WorldPosition(pub Vec2);

impl WorldPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    /// Нормализованное направление на точку (ноль если совпадаем)
    pub fn direction_to(&self, point: Vec2) -> Vec2 {
        (point - self.0).normalize_or_zero()
    }

    pub fn distance(&self, point: Vec2) -> f32 {
        self.0.distance(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_to() {
        let pos = WorldPosition::new(0.0, 0.0);
        assert_eq!(pos.direction_to(Vec2::new(5.0, 0.0)), Vec2::X);
        assert_eq!(pos.direction_to(Vec2::ZERO), Vec2::ZERO);
        assert_eq!(pos.distance(Vec2::new(3.0, 4.0)), 5.0);
    }
}
