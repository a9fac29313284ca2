//! Weapon события для ranged combat
//!
//! Architecture:
//! - ECS: решает когда стрелять (AI tick + cooldown орудия)
//! - Хост: спавнит снаряд, физика, коллизии → ProjectileOverlap
//! - Events: WeaponFired (ECS → хост)

use bevy::prelude::*;

use crate::components::{AgentCategory, RangedAttachments};

/// Event: агент стреляет (ECS → хост)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct WeaponFired {
    pub shooter: Entity,
    /// Индекс орудия в RangedAttachments
    pub attachment: usize,
    /// Позиция стрелявшего
    pub origin: Vec2,
    /// Нормализованное направление выстрела
    pub direction: Vec2,
    /// Категория стрелявшего (снаряд наследует её)
    pub category: AgentCategory,
    pub damage: f32,
    pub speed: f32,
}

/// Стреляем из всех готовых enabled орудий в направлении `direction`
///
/// Нулевое направление (цель в той же точке): не стреляем.
/// Возвращает количество выстрелов.
pub fn fire_ranged_attachments(
    shooter: Entity,
    category: AgentCategory,
    origin: Vec2,
    direction: Vec2,
    attachments: &mut RangedAttachments,
    fired_events: &mut EventWriter<WeaponFired>,
) -> usize {
    if direction == Vec2::ZERO {
        return 0;
    }

    let mut shots = 0;
    for (index, weapon) in attachments.0.iter_mut().enumerate() {
        if !weapon.try_fire() {
            continue;
        }

        fired_events.write(WeaponFired {
            shooter,
            attachment: index,
            origin,
            direction,
            category,
            damage: weapon.damage,
            speed: weapon.projectile_speed,
        });
        shots += 1;
    }

    shots
}
