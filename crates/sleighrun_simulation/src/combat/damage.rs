//! Damage/heal события и общий helper применения урона
//!
//! HealthChanged = onHealthChanged агента. Пишется синхронно после
//! каждой мутации Health, подписчики (DifficultyHook) читают его в том же тике.

use bevy::prelude::*;

use crate::components::{Agent, AgentCategory, Health};

/// Event: нанести урон агенту (прямой вызов ApplyDamage от хоста/скриптов)
#[derive(Event, Debug, Clone)]
pub struct DamageRequest {
    pub target: Entity,
    pub amount: f32,
    /// Кто нанёс урон (для логов)
    pub source: Option<Entity>,
}

/// Event: вылечить агента
#[derive(Event, Debug, Clone)]
pub struct HealRequest {
    pub target: Entity,
    pub amount: f32,
}

/// Event: здоровье агента изменилось (current, max)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct HealthChanged {
    pub entity: Entity,
    pub current: f32,
    pub max: f32,
}

/// Event: агент умер (ровно один раз на агента)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AgentKilled {
    pub entity: Entity,
    pub category: AgentCategory,
}

/// Event: проиграть эффект разрушения + звук смерти (effects/audio хоста)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DestructionEffect {
    pub entity: Entity,
    pub position: Vec2,
}

/// Применить урон к Health и разослать HealthChanged/AgentKilled
///
/// Общий путь для DamageRequest и projectile intake.
/// Возвращает false если amount невалиден (ничего не изменено).
pub(crate) fn damage_agent(
    entity: Entity,
    agent: &Agent,
    health: &mut Health,
    amount: f32,
    changed_events: &mut EventWriter<HealthChanged>,
    killed_events: &mut EventWriter<AgentKilled>,
) -> bool {
    let outcome = match health.apply_damage(amount) {
        Ok(outcome) => outcome,
        Err(err) => {
            crate::logger::log_warning(&format!("Damage to {:?} rejected: {}", entity, err));
            return false;
        }
    };

    changed_events.write(HealthChanged {
        entity,
        current: outcome.current,
        max: outcome.max,
    });

    crate::log(&format!(
        "💥 {:?} ({:?}) took {} damage (HP: {}/{})",
        entity, agent.category, amount, outcome.current, outcome.max
    ));

    if outcome.killed_now {
        killed_events.write(AgentKilled {
            entity,
            category: agent.category,
        });
        crate::logger::log_info(&format!("☠️ {:?} ({:?}) killed", entity, agent.category));
    }

    true
}
