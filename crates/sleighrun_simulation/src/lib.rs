//! SLEIGHRUN Simulation Core
//!
//! ECS-симуляция на Bevy 0.16 (strategic layer): здоровье агентов,
//! patrol/lunge AI босса и петля сложности по полосам здоровья.
//!
//! HYBRID ARCHITECTURE:
//! - ECS = strategic layer (health, AI decisions, difficulty, kill rules)
//! - Хост (движок) = tactical layer (физика, снаряды, эффекты, звук)
//!
//! Порядок тика (FixedUpdate, 60Hz):
//! Damage → Difficulty → Ai → Cleanup

use std::time::Duration;

use bevy::ecs::event::event_update_system;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod difficulty;
pub mod error;
pub mod host;
pub mod logger;
pub mod spawn;

// Re-export базовых компонентов для удобства
pub use ai::{AIPlugin, LungePhase, PatrolLunge, PatrolLungeConfig};
pub use combat::{
    AgentKilled, CombatPlugin, DamageRequest, DestructionEffect, HealRequest, HealthChanged, Projectile,
    ProjectileOverlap, WeaponFired,
};
pub use components::*;
pub use difficulty::{Difficulty, DifficultyChanged, DifficultyConfig, DifficultyHook, DifficultyPlugin};
pub use error::SimulationError;
pub use host::HeadlessHostPlugin;
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use spawn::{spawn_agent, spawn_boss, AgentSpawnConfig, BossSpawnConfig};

/// Фазы симуляционного тика (chained в FixedUpdate)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Урон/лечение, projectile intake
    Damage,
    /// Health hooks → глобальная сложность
    Difficulty,
    /// Rescale + patrol/lunge tick
    Ai,
    /// Kill dispatch, despawn, отписка hooks, движение (headless)
    Cleanup,
}

/// Главный plugin симуляции (объединяет все подсистемы)
#[derive(Default)]
pub struct SimulationPlugin {
    difficulty: DifficultyPlugin,
}

impl SimulationPlugin {
    pub fn new(config: DifficultyConfig) -> Result<Self, SimulationError> {
        Ok(Self {
            difficulty: DifficultyPlugin::new(config)?,
        })
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::Damage,
                SimulationSet::Difficulty,
                SimulationSet::Ai,
                SimulationSet::Cleanup,
            )
                .chain(),
        )
        // Fixed timestep 60Hz для simulation tick (легче считать интервалы)
        .insert_resource(Time::<Fixed>::from_hz(60.0))
        // Подсистемы (ECS strategic layer)
        .add_plugins((CombatPlugin, self.difficulty.clone(), AIPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции (реальное время)
pub fn create_headless_app(seed: u64, difficulty: DifficultyConfig) -> Result<App, SimulationError> {
    init_logger();

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins((SimulationPlugin::new(difficulty)?, HeadlessHostPlugin))
        .insert_resource(DeterministicRng::new(seed));

    Ok(app)
}

/// App с ручным временем: тики гоняет `tick_simulation`
///
/// Без MinimalPlugins: `Time` двигаем сами, FixedUpdate запускаем
/// напрямую. Для тестов и воспроизводимых прогонов.
pub fn create_manual_app(seed: u64, difficulty: DifficultyConfig) -> Result<App, SimulationError> {
    let mut app = App::new();
    app.init_resource::<Time>()
        .add_plugins((SimulationPlugin::new(difficulty)?, HeadlessHostPlugin))
        .insert_resource(DeterministicRng::new(seed));

    Ok(app)
}

/// Один тик: сдвигаем `Time` на `delta` и прогоняем FixedUpdate
///
/// Перед тиком свапаем буферы событий (как First в обычном App):
/// событие живёт два тика, потом выбрасывается.
pub fn tick_simulation(world: &mut World, delta: Duration) {
    if let Err(err) = world.run_system_cached(event_update_system) {
        crate::logger::log_error(&format!("Event update failed: {}", err));
    }

    world.resource_mut::<Time>().advance_by(delta);
    world.run_schedule(FixedUpdate);
}

/// Длительность одного тика при 60Hz
pub fn fixed_tick() -> Duration {
    Duration::from_secs_f64(1.0 / 60.0)
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Debug формат: f32 печатаются полностью, расхождение видно сразу
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
