//! Ошибки симуляции (конфигурация + невалидные runtime значения)
//!
//! Конфигурационные ошибки всплывают сразу при создании компонентов
//! (`Health::new`, `PatrolLunge::new`, `Difficulty::new`, spawn helpers),
//! а не на первом тике.

use thiserror::Error;

/// Ошибка симуляции
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// Patrol без точек: нечего обходить
    #[error("patrol route must contain at least one waypoint")]
    EmptyWaypoints,

    #[error("max health must be positive and finite, got {0}")]
    NonPositiveMaxHealth(f32),

    #[error("{name} must be positive and finite, got {value}")]
    NonPositiveSpeed { name: &'static str, value: f32 },

    #[error("lunge interval must be positive and finite, got {0}")]
    NonPositiveInterval(f32),

    #[error("difficulty multiplier must be positive and finite, got {0}")]
    InvalidMultiplier(f32),

    #[error("difficulty step must be non-negative and finite, got {0}")]
    InvalidDifficultyStep(f32),

    /// Урон/лечение: отрицательное или NaN/inf значение
    #[error("damage/heal amount must be non-negative and finite, got {0}")]
    InvalidAmount(f32),
}

/// Проверка `value > 0 && finite` (общая для скоростей и интервалов)
pub(crate) fn is_positive_finite(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
