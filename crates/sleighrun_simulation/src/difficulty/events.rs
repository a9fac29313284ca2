//! Difficulty events

use bevy::prelude::*;

/// Event: запрос +1 шаг сложности (от health-threshold hook)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DifficultyIncreaseRequested {
    /// Агент, чей порог здоровья сработал
    pub source: Entity,
}

/// Event: глобальная сложность изменилась (broadcast для AI)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DifficultyChanged {
    pub multiplier: f32,
}
