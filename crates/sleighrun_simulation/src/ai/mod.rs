//! AI decision-making module
//!
//! Patrol/Lunge FSM для босса: обход waypoints + периодический рывок
//! в игрока + стрельба из ranged орудий. Агрессия масштабируется
//! глобальной сложностью (crate::difficulty).

use bevy::prelude::*;

use crate::SimulationSet;

pub mod components;
pub mod systems;

// Re-export основных типов
pub use components::{LungePhase, PatrolLunge, PatrolLungeConfig, ARRIVAL_THRESHOLD};

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate (SimulationSet::Ai).
/// Порядок выполнения:
/// 1. rescale_on_difficulty_change: DifficultyChanged → пересчёт скоростей
/// 2. patrol_lunge_tick: таймер рывка, фаза, Motion, выстрелы
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                systems::rescale_on_difficulty_change,
                systems::patrol_lunge_tick,
            )
                .chain() // Последовательное выполнение для детерминизма
                .in_set(SimulationSet::Ai),
        );
    }
}
