//! Patrol/Lunge AI systems.

use bevy::prelude::*;

use crate::ai::PatrolLunge;
use crate::combat::{fire_ranged_attachments, WeaponFired};
use crate::components::{Agent, Health, Motion, Player, RangedAttachments, WorldPosition};
use crate::difficulty::{Difficulty, DifficultyChanged};

/// Система: Patrol/Lunge tick
///
/// Для каждого AI агента:
/// 1. Первый тик: подхватываем текущую глобальную сложность
/// 2. PatrolLunge::tick (таймер рывка → фаза → direction в Motion)
/// 3. Стреляем из готовых орудий в текущую позицию игрока
///
/// Агент без Motion/RangedAttachments: просто пропускаем эту часть.
/// Убитый агент (ждёт despawn в Cleanup) уже не действует.
pub fn patrol_lunge_tick(
    mut ai_query: Query<(
        Entity,
        &Agent,
        &Health,
        &WorldPosition,
        &mut PatrolLunge,
        Option<&mut Motion>,
        Option<&mut RangedAttachments>,
    )>,
    players: Query<(&WorldPosition, &Health), (With<Player>, Without<PatrolLunge>)>,
    difficulty: Res<Difficulty>,
    time: Res<Time>,
    mut fired_events: EventWriter<WeaponFired>,
) {
    let now = time.elapsed_secs();
    // Убитый игрок остаётся в мире (GameOver), но целью больше не является
    let target = players
        .single()
        .ok()
        .filter(|(_, health)| !health.is_killed())
        .map(|(position, _)| position.0);

    for (entity, agent, health, position, mut ai, mut motion, attachments) in ai_query.iter_mut() {
        if health.is_killed() {
            continue;
        }

        if !ai.is_started() {
            if let Err(err) = ai.update_difficulty(difficulty.multiplier(), motion.as_deref_mut()) {
                crate::logger::log_warning(&format!("AI {:?}: {}", entity, err));
            }
        }

        let was_lunging = ai.is_lunging();
        ai.tick(now, position.0, target, motion.as_deref_mut());

        match (was_lunging, ai.lunge_target()) {
            (false, Some(lunge_target)) => {
                crate::log(&format!("🦌 {:?} Patrol → Lunge (target {:?})", entity, lunge_target));
            }
            (true, None) => {
                crate::log(&format!("🦌 {:?} Lunge → Patrol", entity));
            }
            _ => {}
        }

        let (Some(target), Some(mut attachments)) = (target, attachments) else {
            continue;
        };

        fire_ranged_attachments(
            entity,
            agent.category,
            position.0,
            position.direction_to(target),
            &mut attachments,
            &mut fired_events,
        );
    }
}

/// Система: DifficultyChanged → UpdateDifficulty у всех AI
///
/// Берём последнее значение за тик.
pub fn rescale_on_difficulty_change(
    mut changes: EventReader<DifficultyChanged>,
    mut ai_query: Query<(Entity, &mut PatrolLunge, Option<&mut Motion>)>,
) {
    let Some(change) = changes.read().last() else {
        return;
    };

    for (entity, mut ai, mut motion) in ai_query.iter_mut() {
        match ai.update_difficulty(change.multiplier, motion.as_deref_mut()) {
            Ok(()) => crate::log(&format!(
                "📈 AI {:?} rescaled: lunge_speed={} interval={}",
                entity,
                ai.lunge_speed(),
                ai.time_between_lunges()
            )),
            Err(err) => crate::logger::log_warning(&format!("AI {:?}: {}", entity, err)),
        }
    }
}
