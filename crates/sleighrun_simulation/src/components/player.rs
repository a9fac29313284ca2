//! Player marker component
//!
//! Отмечает агента, которого преследует и обстреливает AI (target locator).

use bevy::prelude::Component;

/// Marker component для player-controlled агента
///
/// AI ищет цель через `Query<&WorldPosition, With<Player>>`.
/// В single-player режиме ровно один такой агент; если его нет,
/// AI продолжает патруль, но не делает рывков и не стреляет.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;
