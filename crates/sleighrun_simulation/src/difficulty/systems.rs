//! Difficulty systems.

use bevy::prelude::*;

use crate::combat::HealthChanged;
use crate::components::Health;
use crate::difficulty::{Difficulty, DifficultyChanged, DifficultyHook, DifficultyIncreaseRequested};

/// Система: HealthChanged → DifficultyIncreaseRequested
///
/// Каждый hook слушает только свой `source`. Несколько hooks с разными
/// source ведут свои step_state независимо.
pub fn health_threshold_difficulty(
    mut health_events: EventReader<HealthChanged>,
    mut hooks: Query<&mut DifficultyHook>,
    mut requests: EventWriter<DifficultyIncreaseRequested>,
) {
    for event in health_events.read() {
        for mut hook in hooks.iter_mut() {
            if hook.source != event.entity {
                continue;
            }

            let crossings = hook.band_crossings(event.current, event.max);
            for _ in 0..crossings {
                requests.write(DifficultyIncreaseRequested {
                    source: event.entity,
                });
            }

            if crossings > 0 {
                crate::log(&format!(
                    "🔥 {:?} health {}/{} crossed {} band(s), step_state={}",
                    event.entity,
                    event.current,
                    event.max,
                    crossings,
                    hook.step_state()
                ));
            }
        }
    }
}

/// Система: запросы → Difficulty resource → один DifficultyChanged за тик
pub fn apply_difficulty_requests(
    mut requests: EventReader<DifficultyIncreaseRequested>,
    mut difficulty: ResMut<Difficulty>,
    mut changed: EventWriter<DifficultyChanged>,
) {
    let count = requests.read().count();
    if count == 0 {
        return;
    }

    for _ in 0..count {
        difficulty.increase();
    }

    crate::logger::log_info(&format!(
        "⚡ Difficulty increased x{} → multiplier {}",
        count,
        difficulty.multiplier()
    ));

    changed.write(DifficultyChanged {
        multiplier: difficulty.multiplier(),
    });
}

/// Система: снимаем hooks, чей source больше не существует
///
/// Агента удалили → подписка на его здоровье тоже должна уйти.
pub fn drop_orphaned_hooks(
    mut commands: Commands,
    hooks: Query<(Entity, &DifficultyHook)>,
    sources: Query<(), With<Health>>,
) {
    for (entity, hook) in hooks.iter() {
        if sources.contains(hook.source) {
            continue;
        }

        if let Ok(mut entity_commands) = commands.get_entity(entity) {
            entity_commands.remove::<DifficultyHook>();
            crate::log(&format!(
                "🔌 {:?}: health source {:?} gone, difficulty hook removed",
                entity, hook.source
            ));
        }
    }
}
