//! Damage intake and kill dispatch systems.

use bevy::prelude::*;

use crate::combat::damage::damage_agent;
use crate::combat::{
    AgentKilled, DamageRequest, DestructionEffect, HealRequest, HealthChanged, Projectile,
    ProjectileOverlap,
};
use crate::components::{Agent, GameSignal, Health, WorldPosition};

/// Система: DamageRequest / HealRequest → Health
///
/// 1. Применяем урон (по порядку событий)
/// 2. HealthChanged на каждую мутацию
/// 3. AgentKilled при первом пересечении ≤ 0
pub fn apply_damage_requests(
    mut damage_requests: EventReader<DamageRequest>,
    mut heal_requests: EventReader<HealRequest>,
    mut agents: Query<(&Agent, &mut Health)>,
    mut changed_events: EventWriter<HealthChanged>,
    mut killed_events: EventWriter<AgentKilled>,
) {
    for request in damage_requests.read() {
        let Ok((agent, mut health)) = agents.get_mut(request.target) else {
            crate::logger::log_warning(&format!(
                "DamageRequest: target {:?} has no Agent/Health (source {:?})",
                request.target, request.source
            ));
            continue;
        };

        damage_agent(
            request.target,
            agent,
            &mut health,
            request.amount,
            &mut changed_events,
            &mut killed_events,
        );
    }

    for request in heal_requests.read() {
        let Ok((_, mut health)) = agents.get_mut(request.target) else {
            continue;
        };

        match health.heal(request.amount) {
            Ok(true) => {
                changed_events.write(HealthChanged {
                    entity: request.target,
                    current: health.current(),
                    max: health.max(),
                });
            }
            Ok(false) => {
                crate::log(&format!("Heal ignored: {:?} is already dead", request.target));
            }
            Err(err) => {
                crate::logger::log_warning(&format!("Heal for {:?} rejected: {}", request.target, err));
            }
        }
    }
}

/// Система: collision intake (ProjectileOverlap → damage)
///
/// Снаряд своей категории игнорируется и остаётся в мире (no friendly fire).
/// Вражеский: наносит урон и удаляется. Один снаряд расходуется максимум
/// один раз за тик, даже если задел нескольких агентов.
pub fn projectile_damage_intake(
    mut commands: Commands,
    mut overlaps: EventReader<ProjectileOverlap>,
    projectiles: Query<&Projectile>,
    mut agents: Query<(&Agent, &mut Health)>,
    mut changed_events: EventWriter<HealthChanged>,
    mut killed_events: EventWriter<AgentKilled>,
) {
    let mut consumed: Vec<Entity> = Vec::new();

    for overlap in overlaps.read() {
        if consumed.contains(&overlap.projectile) {
            continue;
        }

        let Ok(projectile) = projectiles.get(overlap.projectile) else {
            continue;
        };

        let Ok((agent, mut health)) = agents.get_mut(overlap.agent) else {
            continue;
        };

        if !projectile.category.is_hostile_to(agent.category) {
            continue;
        }

        damage_agent(
            overlap.agent,
            agent,
            &mut health,
            projectile.damage,
            &mut changed_events,
            &mut killed_events,
        );

        consumed.push(overlap.projectile);
        if let Ok(mut entity_commands) = commands.get_entity(overlap.projectile) {
            entity_commands.despawn();
        }
    }
}

/// Система: kill dispatch по категории агента
///
/// - Player → GameOver (агент остаётся, дальше решает хост)
/// - Boss → EncounterComplete + despawn
/// - Enemy → DestructionEffect + despawn
pub fn dispatch_kills(
    mut commands: Commands,
    mut killed_events: EventReader<AgentKilled>,
    positions: Query<&WorldPosition>,
    mut signals: EventWriter<GameSignal>,
    mut effects: EventWriter<DestructionEffect>,
) {
    for event in killed_events.read() {
        let behaviour = event.category.kill_behaviour();

        if let Some(signal) = behaviour.signal {
            signals.write(signal);
            crate::logger::log_info(&format!("🏁 {:?} → {:?}", event.entity, signal));
        }

        if behaviour.destruction_effect {
            match positions.get(event.entity) {
                Ok(position) => {
                    effects.write(DestructionEffect {
                        entity: event.entity,
                        position: position.0,
                    });
                }
                Err(_) => {
                    crate::logger::log_warning(&format!(
                        "Destruction effect for {:?} skipped: no WorldPosition",
                        event.entity
                    ));
                }
            }
        }

        if behaviour.despawn {
            if let Ok(mut entity_commands) = commands.get_entity(event.entity) {
                entity_commands.despawn();
                crate::log(&format!("⚰️ Despawning {:?} ({:?})", event.entity, event.category));
            }
        }
    }
}
