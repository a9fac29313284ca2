//! Базовые компоненты агентов: Agent (категория), Health
//!
//! Agent: любая сущность мира со здоровьем (игрок, босс, рядовой враг).
//! Категория решает, что происходит при смерти, и отсекает friendly fire.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{is_positive_finite, SimulationError};

/// Категория агента (AgentType)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum AgentCategory {
    Player,
    Boss,
    Enemy,
}

/// Сигнал для game-state менеджера (хост)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameSignal {
    /// Игрок умер
    GameOver,
    /// Босс повержен, уровень пройден
    EncounterComplete,
}

/// Что делать при смерти агента данной категории
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KillBehaviour {
    pub signal: Option<GameSignal>,
    /// Эффект разрушения + звук смерти (проигрывает хост)
    pub destruction_effect: bool,
    pub despawn: bool,
}

impl AgentCategory {
    pub fn kill_behaviour(self) -> KillBehaviour {
        match self {
            // Игрока не удаляем: game over flow целиком на хосте
            AgentCategory::Player => KillBehaviour {
                signal: Some(GameSignal::GameOver),
                destruction_effect: false,
                despawn: false,
            },
            AgentCategory::Boss => KillBehaviour {
                signal: Some(GameSignal::EncounterComplete),
                destruction_effect: false,
                despawn: true,
            },
            AgentCategory::Enemy => KillBehaviour {
                signal: None,
                destruction_effect: true,
                despawn: true,
            },
        }
    }

    /// Снаряды своей категории не наносят урон
    pub fn is_hostile_to(self, other: AgentCategory) -> bool {
        self != other
    }
}

/// Агент: базовый компонент для живых сущностей
///
/// Автоматически добавляет Health и WorldPosition через Required Components.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
#[require(Health, crate::components::WorldPosition)]
pub struct Agent {
    pub category: AgentCategory,
}

impl Agent {
    pub fn new(category: AgentCategory) -> Self {
        Self { category }
    }
}

/// Результат применения урона
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageOutcome {
    pub current: f32,
    pub max: f32,
    /// true только на том вызове, который впервые опустил HP до ≤ 0
    pub killed_now: bool,
}

/// Здоровье агента
///
/// `current` может уйти в минус: kill срабатывает ровно один раз
/// при первом пересечении ≤ 0 (латч `killed`).
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Health {
    current: f32,
    max: f32,
    killed: bool,
}

impl Default for Health {
    fn default() -> Self {
        Self {
            current: 100.0,
            max: 100.0,
            killed: false,
        }
    }
}

impl Health {
    pub fn new(max: f32) -> Result<Self, SimulationError> {
        if !is_positive_finite(max) {
            return Err(SimulationError::NonPositiveMaxHealth(max));
        }
        Ok(Self {
            current: max,
            max,
            killed: false,
        })
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn ratio(&self) -> f32 {
        self.current / self.max
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    pub fn is_killed(&self) -> bool {
        self.killed
    }

    pub fn apply_damage(&mut self, amount: f32) -> Result<DamageOutcome, SimulationError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(SimulationError::InvalidAmount(amount));
        }

        self.current -= amount;

        let killed_now = !self.killed && self.current <= 0.0;
        if killed_now {
            self.killed = true;
        }

        Ok(DamageOutcome {
            current: self.current,
            max: self.max,
            killed_now,
        })
    }

    /// Лечение (clamp к max). Мёртвого не поднимаем: возвращает Ok(false).
    pub fn heal(&mut self, amount: f32) -> Result<bool, SimulationError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(SimulationError::InvalidAmount(amount));
        }
        if self.killed {
            return Ok(false);
        }

        self.current = (self.current + amount).min(self.max);
        Ok(true)
    }
}
