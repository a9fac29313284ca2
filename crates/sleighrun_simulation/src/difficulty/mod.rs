//! Difficulty domain: глобальная сложность и её связь со здоровьем
//!
//! Петля обратной связи (в пределах одного тика):
//! HealthChanged → DifficultyHook (25% полосы) → DifficultyIncreaseRequested
//! → Difficulty resource → DifficultyChanged → AI rescale

use bevy::prelude::*;

use crate::SimulationSet;

pub mod controller;
pub mod events;
pub mod hook;
pub mod systems;


pub use controller::{Difficulty, DifficultyConfig};
pub use events::{DifficultyChanged, DifficultyIncreaseRequested};
pub use hook::{DifficultyHook, HEALTH_BAND};

/// Difficulty Plugin
///
/// Порядок выполнения (SimulationSet::Difficulty):
/// 1. health_threshold_difficulty: HealthChanged → запросы
/// 2. apply_difficulty_requests: запросы → множитель + broadcast
///
/// drop_orphaned_hooks: в SimulationSet::Cleanup, после dispatch_kills
#[derive(Debug, Clone, Default)]
pub struct DifficultyPlugin {
    difficulty: Difficulty,
}

impl DifficultyPlugin {
    /// Невалидный конфиг: ошибка сразу, до старта симуляции
    pub fn new(config: DifficultyConfig) -> Result<Self, crate::SimulationError> {
        Ok(Self {
            difficulty: Difficulty::new(config)?,
        })
    }
}

impl Plugin for DifficultyPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.difficulty.clone())
            .add_event::<DifficultyIncreaseRequested>()
            .add_event::<DifficultyChanged>();

        app.add_systems(
            FixedUpdate,
            (
                systems::health_threshold_difficulty,
                systems::apply_difficulty_requests,
            )
                .chain()
                .in_set(SimulationSet::Difficulty),
        )
        .add_systems(
            FixedUpdate,
            systems::drop_orphaned_hooks
                .after(crate::combat::systems::dispatch_kills)
                .in_set(SimulationSet::Cleanup),
        );
    }
}
