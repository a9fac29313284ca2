//! Global difficulty controller (resource)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{is_positive_finite, SimulationError};

/// Параметры глобальной сложности
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyConfig {
    /// Стартовый множитель (≥ 1 по смыслу, валидируем только > 0)
    pub initial_multiplier: f32,
    /// Прибавка к множителю за один запрос
    pub step: f32,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            initial_multiplier: 1.0,
            step: 0.5,
        }
    }
}

/// Глобальная сложность (один writer: apply_difficulty_requests, читают все AI)
///
/// Увеличение это простой аддитивный шаг без гейтинга, несколько запросов
/// в одном тике дают несколько шагов.
#[derive(Resource, Debug, Clone, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct Difficulty {
    multiplier: f32,
    step: f32,
    increases: u32,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            multiplier: 1.0,
            step: 0.5,
            increases: 0,
        }
    }
}

impl Difficulty {
    pub fn new(config: DifficultyConfig) -> Result<Self, SimulationError> {
        if !is_positive_finite(config.initial_multiplier) {
            return Err(SimulationError::InvalidMultiplier(config.initial_multiplier));
        }
        if !config.step.is_finite() || config.step < 0.0 {
            return Err(SimulationError::InvalidDifficultyStep(config.step));
        }

        Ok(Self {
            multiplier: config.initial_multiplier,
            step: config.step,
            increases: 0,
        })
    }

    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Сколько раз сложность повышалась с начала энкаунтера
    pub fn increases(&self) -> u32 {
        self.increases
    }

    /// +step, возвращает новый множитель
    pub fn increase(&mut self) -> f32 {
        self.multiplier += self.step;
        self.increases += 1;
        self.multiplier
    }
}
