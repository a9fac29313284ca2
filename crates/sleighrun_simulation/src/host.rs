//! Headless host: заглушка движка для headless режима и тестов
//!
//! В игре Motion → движение тела делает физика хоста. Здесь: простая
//! кинематика без коллизий: position += direction * speed * dt, с остановкой
//! ровно в `destination` если шаг её перелетает.

use bevy::prelude::*;

use crate::components::{Motion, WorldPosition};
use crate::SimulationSet;

/// Система: интегрируем Motion в WorldPosition
///
/// Без clamp'а рывок 20 ед/с при 60Hz (шаг 0.33) может вечно качаться
/// вокруг цели, не попадая в порог 0.1.
pub fn integrate_motion(mut movers: Query<(&Motion, &mut WorldPosition)>, time: Res<Time>) {
    let delta = time.delta_secs();

    for (motion, mut position) in movers.iter_mut() {
        let step = motion.speed * delta;
        if step <= 0.0 || motion.direction == Vec2::ZERO {
            continue;
        }

        match motion.destination {
            Some(destination) if position.0.distance(destination) <= step => {
                position.0 = destination;
            }
            _ => position.0 += motion.direction * step,
        }
    }
}

/// Headless Host Plugin
///
/// Движение агентов идёт после AI (SimulationSet::Cleanup), т.е. позиция,
/// которую AI увидит в следующем тике, уже учитывает текущий Motion.
pub struct HeadlessHostPlugin;

impl Plugin for HeadlessHostPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, integrate_motion.in_set(SimulationSet::Cleanup));
    }
}
