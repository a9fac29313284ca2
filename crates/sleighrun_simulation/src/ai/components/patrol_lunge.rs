//! Patrol/Lunge FSM (boss AI).
//!
//! Босс ходит по кругу между waypoints и периодически делает рывок в
//! позицию игрока, снятую в момент старта рывка. Скорости и интервал между
//! рывками масштабируются глобальной сложностью.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::Motion;
use crate::error::{is_positive_finite, SimulationError};

/// Радиус "дошли до точки" (waypoint / цель рывка)
pub const ARRIVAL_THRESHOLD: f32 = 0.1;

/// Фаза AI
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub enum LungePhase {
    /// Обход waypoints (начальное состояние)
    #[default]
    Patrolling,

    /// Рывок к замороженной позиции цели
    Lunging {
        /// Позиция цели на момент старта рывка (не обновляется)
        target: Vec2,
    },
}

/// Параметры patrol/lunge поведения
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct PatrolLungeConfig {
    /// Маршрут патруля (циклический, ≥ 1 точки)
    pub waypoints: Vec<Vec2>,
    /// Скорость патруля при сложности 1.0
    pub base_move_speed: f32,
    /// Скорость рывка при сложности 1.0
    pub base_lunge_speed: f32,
    /// Секунды между рывками при сложности 1.0
    pub base_lunge_interval: f32,
}

impl Default for PatrolLungeConfig {
    fn default() -> Self {
        Self {
            waypoints: Vec::new(),
            base_move_speed: 10.0,
            base_lunge_speed: 20.0,
            base_lunge_interval: 4.0,
        }
    }
}

impl PatrolLungeConfig {
    pub fn with_waypoints(waypoints: impl Into<Vec<Vec2>>) -> Self {
        Self {
            waypoints: waypoints.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.waypoints.is_empty() {
            return Err(SimulationError::EmptyWaypoints);
        }
        if !is_positive_finite(self.base_move_speed) {
            return Err(SimulationError::NonPositiveSpeed {
                name: "base_move_speed",
                value: self.base_move_speed,
            });
        }
        if !is_positive_finite(self.base_lunge_speed) {
            return Err(SimulationError::NonPositiveSpeed {
                name: "base_lunge_speed",
                value: self.base_lunge_speed,
            });
        }
        if !is_positive_finite(self.base_lunge_interval) {
            return Err(SimulationError::NonPositiveInterval(self.base_lunge_interval));
        }
        Ok(())
    }
}

/// Patrol/Lunge AI агента
///
/// Создаётся только через `PatrolLunge::new` (валидация конфига),
/// поэтому `waypoints` никогда не пуст.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PatrolLunge {
    waypoints: Vec<Vec2>,
    current_waypoint: usize,
    phase: LungePhase,

    base_move_speed: f32,
    base_lunge_speed: f32,
    base_lunge_interval: f32,

    move_speed: f32,
    lunge_speed: f32,
    time_between_lunges: f32,

    /// None до первого тика (таймер стартует когда AI реально запущен)
    last_lunge_time: Option<f32>,
    /// Скорость до рывка, восстанавливается после
    saved_move_speed: f32,
}

impl PatrolLunge {
    pub fn new(config: &PatrolLungeConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        Ok(Self {
            waypoints: config.waypoints.clone(),
            current_waypoint: 0,
            phase: LungePhase::Patrolling,
            base_move_speed: config.base_move_speed,
            base_lunge_speed: config.base_lunge_speed,
            base_lunge_interval: config.base_lunge_interval,
            move_speed: config.base_move_speed,
            lunge_speed: config.base_lunge_speed,
            time_between_lunges: config.base_lunge_interval,
            last_lunge_time: None,
            saved_move_speed: config.base_move_speed,
        })
    }

    pub fn phase(&self) -> LungePhase {
        self.phase
    }

    pub fn is_lunging(&self) -> bool {
        matches!(self.phase, LungePhase::Lunging { .. })
    }

    pub fn lunge_target(&self) -> Option<Vec2> {
        match self.phase {
            LungePhase::Lunging { target } => Some(target),
            LungePhase::Patrolling => None,
        }
    }

    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    pub fn current_waypoint(&self) -> usize {
        self.current_waypoint
    }

    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    pub fn lunge_speed(&self) -> f32 {
        self.lunge_speed
    }

    pub fn time_between_lunges(&self) -> f32 {
        self.time_between_lunges
    }

    pub fn saved_move_speed(&self) -> f32 {
        self.saved_move_speed
    }

    pub fn last_lunge_time(&self) -> Option<f32> {
        self.last_lunge_time
    }

    /// Уже тикал хотя бы раз
    pub fn is_started(&self) -> bool {
        self.last_lunge_time.is_some()
    }

    /// Истёк ли таймер рывка. Первый вызов запускает таймер от `now`.
    pub fn lunge_due(&mut self, now: f32) -> bool {
        let last = *self.last_lunge_time.get_or_insert(now);
        now - last > self.time_between_lunges
    }

    /// Patrolling → Lunging. No-op (false) если уже в рывке.
    pub fn begin_lunge(&mut self, target: Vec2, motion: Option<&mut Motion>) -> bool {
        if self.is_lunging() {
            return false;
        }

        self.saved_move_speed = motion.as_ref().map_or(self.move_speed, |m| m.speed);
        if let Some(motion) = motion {
            motion.override_animations = true;
            motion.speed = self.lunge_speed;
        }
        self.phase = LungePhase::Lunging { target };
        true
    }

    /// Пересчёт скоростей/интервала под новый множитель сложности
    ///
    /// Во время рывка новая lunge_speed применяется сразу, а сохранённая
    /// скорость патруля подменяется на пересчитанную.
    pub fn update_difficulty(
        &mut self,
        multiplier: f32,
        motion: Option<&mut Motion>,
    ) -> Result<(), SimulationError> {
        if !is_positive_finite(multiplier) {
            return Err(SimulationError::InvalidMultiplier(multiplier));
        }

        self.move_speed = self.base_move_speed * multiplier;
        self.lunge_speed = self.base_lunge_speed * multiplier;
        self.time_between_lunges = self.base_lunge_interval / multiplier;

        if self.is_lunging() {
            self.saved_move_speed = self.move_speed;
            if let Some(motion) = motion {
                motion.speed = self.lunge_speed;
            }
        }

        Ok(())
    }

    /// Один тик AI. Возвращает опубликованное в Motion направление.
    ///
    /// Порядок: таймер рывка → апдейт фазы → запись direction в Motion.
    /// Без цели рывок пропускается, но таймер всё равно сбрасывается.
    pub fn tick(
        &mut self,
        now: f32,
        position: Vec2,
        target: Option<Vec2>,
        mut motion: Option<&mut Motion>,
    ) -> Vec2 {
        if self.lunge_due(now) {
            if let Some(target) = target {
                self.begin_lunge(target, motion.as_deref_mut());
            }
            self.last_lunge_time = Some(now);
        }

        let direction = match self.phase {
            LungePhase::Patrolling => self.update_patrol(position, motion.as_deref_mut()),
            LungePhase::Lunging { target } => self.update_lunge(position, target, motion.as_deref_mut()),
        };

        if let Some(motion) = motion {
            motion.direction = direction;
            motion.destination = self.destination();
        }

        direction
    }

    /// Куда сейчас ведёт AI: цель рывка или текущий waypoint
    pub fn destination(&self) -> Option<Vec2> {
        match self.phase {
            LungePhase::Lunging { target } => Some(target),
            LungePhase::Patrolling => self.waypoints.get(self.current_waypoint).copied(),
        }
    }

    fn update_patrol(&mut self, position: Vec2, motion: Option<&mut Motion>) -> Vec2 {
        if let Some(motion) = motion {
            motion.speed = self.move_speed;
        }

        let Some(&waypoint) = self.waypoints.get(self.current_waypoint) else {
            return Vec2::ZERO;
        };

        if position.distance(waypoint) < ARRIVAL_THRESHOLD {
            self.current_waypoint = (self.current_waypoint + 1) % self.waypoints.len();
        }

        self.waypoints
            .get(self.current_waypoint)
            .map_or(Vec2::ZERO, |next| (*next - position).normalize_or_zero())
    }

    fn update_lunge(&mut self, position: Vec2, target: Vec2, motion: Option<&mut Motion>) -> Vec2 {
        let direction = (target - position).normalize_or_zero();

        if position.distance(target) <= ARRIVAL_THRESHOLD {
            self.phase = LungePhase::Patrolling;
            if let Some(motion) = motion {
                motion.speed = self.saved_move_speed;
                motion.override_animations = false;
            }
        }

        direction
    }
}
