//! Combat module: здоровье, урон, смерть, ranged орудия
//!
//! ECS ответственность:
//! - Game state: Health, кулдауны орудий
//! - Combat rules: friendly fire, kill dispatch по категории
//! - Events: HealthChanged, AgentKilled, WeaponFired, GameSignal
//!
//! Хост ответственность:
//! - Спавн/физика снарядов, коллизии → ProjectileOverlap
//! - Эффекты и звуки → читает DestructionEffect

use bevy::prelude::*;

use crate::components::GameSignal;
use crate::SimulationSet;

pub mod damage;
pub mod projectile;
pub mod systems;
pub mod weapon;

// Re-export основных типов
pub use damage::{AgentKilled, DamageRequest, DestructionEffect, HealRequest, HealthChanged};
pub use projectile::{Projectile, ProjectileOverlap};
pub use weapon::{fire_ranged_attachments, WeaponFired};

/// Combat Plugin
///
/// Порядок выполнения (SimulationSet::Damage):
/// 1. tick_weapon_cooldowns: кулдауны орудий
/// 2. projectile_damage_intake: ProjectileOverlap → урон
/// 3. apply_damage_requests: DamageRequest/HealRequest → урон/лечение
///
/// dispatch_kills идёт в SimulationSet::Cleanup: добивающий удар сначала
/// проходит через difficulty hooks, и только потом агент удаляется.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<DamageRequest>()
            .add_event::<HealRequest>()
            .add_event::<HealthChanged>()
            .add_event::<AgentKilled>()
            .add_event::<ProjectileOverlap>()
            .add_event::<WeaponFired>()
            .add_event::<GameSignal>()
            .add_event::<DestructionEffect>();

        app.add_systems(
            FixedUpdate,
            (
                systems::tick_weapon_cooldowns,
                systems::projectile_damage_intake,
                systems::apply_damage_requests,
            )
                .chain() // Последовательное выполнение
                .in_set(SimulationSet::Damage),
        )
        .add_systems(
            FixedUpdate,
            systems::dispatch_kills.in_set(SimulationSet::Cleanup),
        );
    }
}
