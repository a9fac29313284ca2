//! Spawn helpers для создания агентов
//!
//! Вся валидация конфигов здесь, до того как entity появится в мире.
//! Невалидный конфиг → `SimulationError`, ничего не заспавнено.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ai::{PatrolLunge, PatrolLungeConfig};
use crate::components::{
    Agent, AgentCategory, Health, Motion, Player, RangedAttachment, RangedAttachments, WorldPosition,
};
use crate::difficulty::DifficultyHook;
use crate::error::SimulationError;

/// Конфиг обычного агента (игрок / рядовой враг)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSpawnConfig {
    pub category: AgentCategory,
    pub position: Vec2,
    pub max_health: f32,
    pub attachments: Vec<RangedAttachment>,
}

impl Default for AgentSpawnConfig {
    fn default() -> Self {
        Self {
            category: AgentCategory::Enemy,
            position: Vec2::ZERO,
            max_health: 100.0,
            attachments: Vec::new(),
        }
    }
}

/// Конфиг босса: patrol/lunge AI + орудия + difficulty hook на себя
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossSpawnConfig {
    pub position: Vec2,
    pub max_health: f32,
    pub patrol: PatrolLungeConfig,
    pub attachments: Vec<RangedAttachment>,
}

impl Default for BossSpawnConfig {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            max_health: 100.0,
            patrol: PatrolLungeConfig::default(),
            attachments: vec![RangedAttachment::default()],
        }
    }
}

/// Спавн агента без AI
///
/// Категория Player дополнительно получает `Player` marker (цель для AI).
pub fn spawn_agent(commands: &mut Commands, config: &AgentSpawnConfig) -> Result<Entity, SimulationError> {
    let health = Health::new(config.max_health)?;

    let mut entity_commands = commands.spawn((
        Agent::new(config.category),
        health,
        WorldPosition(config.position),
        Motion::default(),
    ));

    if !config.attachments.is_empty() {
        entity_commands.insert(RangedAttachments(config.attachments.clone()));
    }
    if config.category == AgentCategory::Player {
        entity_commands.insert(Player);
    }

    let entity = entity_commands.id();
    crate::log(&format!(
        "Spawned {:?} {:?} at {:?} (HP {})",
        config.category, entity, config.position, config.max_health
    ));

    Ok(entity)
}

/// Спавн босса (AgentCategory::Boss)
///
/// Босс подписан на собственное здоровье: каждые потерянные 25% HP
/// повышают глобальную сложность.
pub fn spawn_boss(commands: &mut Commands, config: &BossSpawnConfig) -> Result<Entity, SimulationError> {
    let health = Health::new(config.max_health)?;
    let ai = PatrolLunge::new(&config.patrol)?;

    let entity = commands
        .spawn((
            Agent::new(AgentCategory::Boss),
            health,
            WorldPosition(config.position),
            Motion::default(),
            ai,
            RangedAttachments(config.attachments.clone()),
        ))
        .id();

    commands.entity(entity).insert(DifficultyHook::new(entity));

    crate::logger::log_info(&format!(
        "🦌 Spawned boss {:?} at {:?} (HP {}, {} waypoints, {} attachments)",
        entity,
        config.position,
        config.max_health,
        config.patrol.waypoints.len(),
        config.attachments.len()
    ));

    Ok(entity)
}
