//! Weapon cooldown system.

use bevy::prelude::*;

use crate::components::RangedAttachments;

/// Система: тикаем cooldown всех ranged орудий
///
/// Идёт до AI tick, чтобы готовое в этом тике орудие сразу могло выстрелить.
pub fn tick_weapon_cooldowns(mut attachments: Query<&mut RangedAttachments>, time: Res<Time>) {
    let delta = time.delta_secs();

    for mut weapons in attachments.iter_mut() {
        for weapon in weapons.0.iter_mut() {
            weapon.tick_cooldown(delta);
        }
    }
}
