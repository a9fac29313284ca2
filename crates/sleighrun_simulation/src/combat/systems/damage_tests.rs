//! Tests for damage systems.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use std::time::Duration;

    use super::super::damage::{apply_damage_requests, dispatch_kills, projectile_damage_intake};
    use crate::combat::{
        AgentKilled, DamageRequest, DestructionEffect, HealRequest, HealthChanged, Projectile, ProjectileOverlap,
    };
    use crate::components::{Agent, AgentCategory, GameSignal, Health, WorldPosition};

    fn create_combat_app() -> App {
        let mut app = App::new();
        app.init_resource::<Time>()
            .add_event::<DamageRequest>()
            .add_event::<HealRequest>()
            .add_event::<HealthChanged>()
            .add_event::<AgentKilled>()
            .add_event::<ProjectileOverlap>()
            .add_event::<GameSignal>()
            .add_event::<DestructionEffect>()
            .add_systems(
                FixedUpdate,
                (projectile_damage_intake, apply_damage_requests, dispatch_kills).chain(),
            );
        app
    }

    fn step(app: &mut App) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_millis(16));
        app.world_mut().run_schedule(FixedUpdate);
    }

    fn spawn_agent(app: &mut App, category: AgentCategory, max: f32) -> Entity {
        app.world_mut()
            .spawn((
                Agent::new(category),
                Health::new(max).unwrap(),
                WorldPosition::new(2.0, 3.0),
            ))
            .id()
    }

    fn damage(app: &mut App, target: Entity, amount: f32) {
        app.world_mut().send_event(DamageRequest {
            target,
            amount,
            source: None,
        });
    }

    fn health_changes(app: &App) -> Vec<HealthChanged> {
        app.world()
            .resource::<Events<HealthChanged>>()
            .iter_current_update_events()
            .copied()
            .collect()
    }

    #[test]
    fn test_damage_request_reduces_health_and_notifies() {
        let mut app = create_combat_app();
        let enemy = spawn_agent(&mut app, AgentCategory::Enemy, 100.0);

        damage(&mut app, enemy, 30.0);
        damage(&mut app, enemy, 25.0);
        step(&mut app);

        assert_eq!(app.world().get::<Health>(enemy).unwrap().current(), 45.0);

        // Один HealthChanged на вызов, со значением после урона
        let changes = health_changes(&app);
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].current, 70.0);
        assert_eq!(changes[1].current, 45.0);
        assert_eq!(changes[1].max, 100.0);
        assert!(app.world().resource::<Events<AgentKilled>>().is_empty());
    }

    #[test]
    fn test_kill_fires_once() {
        let mut app = create_combat_app();
        let player = spawn_agent(&mut app, AgentCategory::Player, 50.0);

        damage(&mut app, player, 60.0);
        damage(&mut app, player, 10.0);
        step(&mut app);
        damage(&mut app, player, 10.0);
        step(&mut app);

        assert_eq!(app.world().resource::<Events<AgentKilled>>().len(), 1);
        assert_eq!(app.world().get::<Health>(player).unwrap().current(), -30.0);
    }

    #[test]
    fn test_player_kill_signals_game_over_and_keeps_entity() {
        let mut app = create_combat_app();
        let player = spawn_agent(&mut app, AgentCategory::Player, 50.0);

        damage(&mut app, player, 50.0);
        step(&mut app);

        let signals: Vec<_> = app
            .world()
            .resource::<Events<GameSignal>>()
            .iter_current_update_events()
            .copied()
            .collect();
        assert_eq!(signals, vec![GameSignal::GameOver]);
        assert!(app.world().get_entity(player).is_ok());
        assert!(app.world().resource::<Events<DestructionEffect>>().is_empty());
    }

    #[test]
    fn test_boss_kill_completes_encounter_and_despawns() {
        let mut app = create_combat_app();
        let boss = spawn_agent(&mut app, AgentCategory::Boss, 100.0);

        damage(&mut app, boss, 150.0);
        step(&mut app);

        let signals: Vec<_> = app
            .world()
            .resource::<Events<GameSignal>>()
            .iter_current_update_events()
            .copied()
            .collect();
        assert_eq!(signals, vec![GameSignal::EncounterComplete]);
        assert!(app.world().get_entity(boss).is_err());
    }

    #[test]
    fn test_enemy_kill_plays_destruction_effect() {
        let mut app = create_combat_app();
        let enemy = spawn_agent(&mut app, AgentCategory::Enemy, 20.0);

        damage(&mut app, enemy, 20.0);
        step(&mut app);

        let effects: Vec<_> = app
            .world()
            .resource::<Events<DestructionEffect>>()
            .iter_current_update_events()
            .copied()
            .collect();
        assert_eq!(
            effects,
            vec![DestructionEffect {
                entity: enemy,
                position: Vec2::new(2.0, 3.0),
            }]
        );
        assert!(app.world().resource::<Events<GameSignal>>().is_empty());
        assert!(app.world().get_entity(enemy).is_err());
    }

    #[test]
    fn test_destruction_effect_needs_position() {
        let mut app = create_combat_app();
        let enemy = spawn_agent(&mut app, AgentCategory::Enemy, 20.0);
        app.world_mut().entity_mut(enemy).remove::<WorldPosition>();

        damage(&mut app, enemy, 20.0);
        step(&mut app);

        // Эффект не играем в выдуманной точке, но despawn всё равно идёт
        assert!(app.world().resource::<Events<DestructionEffect>>().is_empty());
        assert!(app.world().get_entity(enemy).is_err());
    }

    #[test]
    fn test_invalid_amount_is_rejected() {
        let mut app = create_combat_app();
        let enemy = spawn_agent(&mut app, AgentCategory::Enemy, 100.0);

        damage(&mut app, enemy, -10.0);
        damage(&mut app, enemy, f32::NAN);
        step(&mut app);

        assert_eq!(app.world().get::<Health>(enemy).unwrap().current(), 100.0);
        assert!(health_changes(&app).is_empty());
    }

    #[test]
    fn test_damage_to_missing_target_is_skipped() {
        let mut app = create_combat_app();
        let gone = spawn_agent(&mut app, AgentCategory::Enemy, 100.0);
        app.world_mut().despawn(gone);

        damage(&mut app, gone, 10.0);
        step(&mut app);

        assert!(health_changes(&app).is_empty());
    }

    #[test]
    fn test_heal_clamps_and_ignores_dead() {
        let mut app = create_combat_app();
        let player = spawn_agent(&mut app, AgentCategory::Player, 100.0);

        damage(&mut app, player, 40.0);
        app.world_mut().send_event(HealRequest {
            target: player,
            amount: 100.0,
        });
        step(&mut app);

        assert_eq!(app.world().get::<Health>(player).unwrap().current(), 100.0);
        let changes = health_changes(&app);
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[1].current, 100.0);

        // Игрок остаётся в мире после смерти: лечение его не поднимает
        damage(&mut app, player, 120.0);
        step(&mut app);
        app.world_mut().send_event(HealRequest {
            target: player,
            amount: 50.0,
        });
        step(&mut app);

        assert_eq!(app.world().get::<Health>(player).unwrap().current(), -20.0);
    }

    #[test]
    fn test_projectile_damages_hostile_and_is_consumed() {
        let mut app = create_combat_app();
        let boss = spawn_agent(&mut app, AgentCategory::Boss, 100.0);
        let projectile = app
            .world_mut()
            .spawn(Projectile {
                category: AgentCategory::Player,
                damage: 12.0,
            })
            .id();

        app.world_mut().send_event(ProjectileOverlap {
            agent: boss,
            projectile,
        });
        step(&mut app);

        assert_eq!(app.world().get::<Health>(boss).unwrap().current(), 88.0);
        assert!(app.world().get_entity(projectile).is_err());
    }

    #[test]
    fn test_friendly_projectile_is_ignored_and_kept() {
        let mut app = create_combat_app();
        let boss = spawn_agent(&mut app, AgentCategory::Boss, 100.0);
        let projectile = app
            .world_mut()
            .spawn(Projectile {
                category: AgentCategory::Boss,
                damage: 12.0,
            })
            .id();

        app.world_mut().send_event(ProjectileOverlap {
            agent: boss,
            projectile,
        });
        step(&mut app);

        assert_eq!(app.world().get::<Health>(boss).unwrap().current(), 100.0);
        assert!(app.world().get_entity(projectile).is_ok());
        assert!(health_changes(&app).is_empty());
    }

    #[test]
    fn test_projectile_consumed_once_per_tick() {
        let mut app = create_combat_app();
        let first = spawn_agent(&mut app, AgentCategory::Enemy, 100.0);
        let second = spawn_agent(&mut app, AgentCategory::Enemy, 100.0);
        let projectile = app
            .world_mut()
            .spawn(Projectile {
                category: AgentCategory::Player,
                damage: 10.0,
            })
            .id();

        for agent in [first, second] {
            app.world_mut().send_event(ProjectileOverlap { agent, projectile });
        }
        step(&mut app);

        assert_eq!(app.world().get::<Health>(first).unwrap().current(), 90.0);
        assert_eq!(app.world().get::<Health>(second).unwrap().current(), 100.0);
    }
}
