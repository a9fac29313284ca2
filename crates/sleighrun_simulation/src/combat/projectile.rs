//! Projectile компонент + overlap событие от collision системы хоста
//!
//! Хост спавнит снаряд по WeaponFired, двигает его своей физикой и
//! при пересечении с коллайдером агента шлёт ProjectileOverlap.

use bevy::prelude::*;

use crate::components::AgentCategory;

/// Снаряд в мире (entity создаёт хост)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Projectile {
    /// Категория стрелявшего: своих не ранит
    pub category: AgentCategory,
    pub damage: f32,
}

/// Event: коллайдер агента пересёкся со снарядом (хост → ECS)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ProjectileOverlap {
    pub agent: Entity,
    pub projectile: Entity,
}
