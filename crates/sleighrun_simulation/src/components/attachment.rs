//! Attachment компоненты: дальнобойные орудия, закреплённые на агенте

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Одно ranged-орудие агента
///
/// Cooldown орудие ведёт само: AI каждый тик просит выстрел,
/// а `try_fire` решает, готово ли оно.
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct RangedAttachment {
    pub enabled: bool,
    /// Урон снаряда
    pub damage: f32,
    /// Скорость снаряда (единиц/сек)
    pub projectile_speed: f32,
    /// Секунды между выстрелами (0 = каждый тик)
    pub fire_interval: f32,
    #[serde(skip)]
    pub cooldown_timer: f32,
}

impl Default for RangedAttachment {
    fn default() -> Self {
        Self {
            enabled: true,
            damage: 10.0,
            projectile_speed: 8.0,
            fire_interval: 0.5,
            cooldown_timer: 0.0,
        }
    }
}

impl RangedAttachment {
    pub fn tick_cooldown(&mut self, delta: f32) {
        if self.cooldown_timer > 0.0 {
            self.cooldown_timer = (self.cooldown_timer - delta).max(0.0);
        }
    }

    pub fn can_fire(&self) -> bool {
        self.enabled && self.cooldown_timer <= 0.0
    }

    /// Выстрел если готово, запускает cooldown
    pub fn try_fire(&mut self) -> bool {
        if !self.can_fire() {
            return false;
        }
        self.cooldown_timer = self.fire_interval;
        true
    }
}

/// Все ranged attachments агента (порядок = порядок выстрелов)
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct RangedAttachments(pub Vec<RangedAttachment>);
