//! Health-threshold difficulty hook
//!
//! Подписчик на HealthChanged конкретного агента (`source`): каждое
//! пересечение 25%-полосы здоровья вниз даёт ровно один запрос сложности.

use bevy::prelude::*;

/// Ширина полосы здоровья
pub const HEALTH_BAND: f32 = 0.25;

/// Компонент-подписка: health агента `source` → запросы сложности
///
/// Инвариант: `step_state` только убывает (1.0 → 0.75 → 0.5 → 0.25 → 0.0),
/// лечение уже пройденные полосы не возвращает.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct DifficultyHook {
    pub source: Entity,
    step_state: f32,
}

impl DifficultyHook {
    pub fn new(source: Entity) -> Self {
        Self {
            source,
            step_state: 1.0,
        }
    }

    pub fn step_state(&self) -> f32 {
        self.step_state
    }

    /// Сколько новых полос пересекли при здоровье (current, max)
    ///
    /// Цикл, а не if: один большой удар может пройти несколько полос сразу.
    pub fn band_crossings(&mut self, current: f32, max: f32) -> u32 {
        let ratio = current / max;
        if ratio.is_nan() {
            return 0;
        }

        let mut crossings = 0;
        while self.step_state > 0.0 && ratio <= self.step_state - HEALTH_BAND {
            self.step_state -= HEALTH_BAND;
            crossings += 1;
        }
        crossings
    }
}
