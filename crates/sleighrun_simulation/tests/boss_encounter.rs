//! Integration tests: бой с боссом целиком (урон → сложность → AI)
//!
//! Полный SimulationPlugin + HeadlessHostPlugin, время двигаем вручную.

use bevy::prelude::*;
use sleighrun_simulation::{
    create_manual_app, fixed_tick, spawn_agent, spawn_boss, tick_simulation, AgentCategory, AgentSpawnConfig,
    BossSpawnConfig, DamageRequest, Difficulty, DifficultyConfig, DifficultyHook, GameSignal, HealRequest,
    Health, Motion, PatrolLunge, PatrolLungeConfig, Projectile, ProjectileOverlap, RangedAttachment, WeaponFired,
    WorldPosition,
};

fn create_app() -> App {
    create_manual_app(7, DifficultyConfig::default()).unwrap()
}

fn boss_config(waypoints: Vec<Vec2>) -> BossSpawnConfig {
    BossSpawnConfig {
        position: waypoints[0],
        patrol: PatrolLungeConfig::with_waypoints(waypoints),
        ..Default::default()
    }
}

fn add_boss(app: &mut App, config: &BossSpawnConfig) -> Entity {
    let boss = spawn_boss(&mut app.world_mut().commands(), config).unwrap();
    app.world_mut().flush();
    boss
}

fn add_agent(app: &mut App, category: AgentCategory, position: Vec2) -> Entity {
    let config = AgentSpawnConfig {
        category,
        position,
        ..Default::default()
    };
    let entity = spawn_agent(&mut app.world_mut().commands(), &config).unwrap();
    app.world_mut().flush();
    entity
}

fn hit(app: &mut App, target: Entity, amount: f32) {
    app.world_mut().send_event(DamageRequest {
        target,
        amount,
        source: None,
    });
    tick_simulation(app.world_mut(), fixed_tick());
}

fn run_ticks(app: &mut App, ticks: u32) {
    for _ in 0..ticks {
        tick_simulation(app.world_mut(), fixed_tick());
    }
}

fn signals(app: &App) -> Vec<GameSignal> {
    app.world()
        .resource::<Events<GameSignal>>()
        .iter_current_update_events()
        .copied()
        .collect()
}

#[test]
fn test_three_hits_raise_difficulty_three_times() {
    let mut app = create_app();
    let boss = add_boss(&mut app, &boss_config(vec![Vec2::ZERO, Vec2::new(10.0, 0.0)]));

    for _ in 0..3 {
        hit(&mut app, boss, 30.0);
    }

    let difficulty = app.world().resource::<Difficulty>();
    assert_eq!(difficulty.increases(), 3);
    assert_eq!(difficulty.multiplier(), 2.5);
    assert_eq!(app.world().get::<Health>(boss).unwrap().current(), 10.0);

    // Broadcast дошёл до AI в том же тике
    let ai = app.world().get::<PatrolLunge>(boss).unwrap();
    assert_eq!(ai.lunge_speed(), 50.0);
    assert_eq!(ai.move_speed(), 25.0);
    assert_eq!(ai.time_between_lunges(), 4.0 / 2.5);
}

#[test]
fn test_multi_band_hit_in_one_tick() {
    let mut app = create_app();
    let boss = add_boss(&mut app, &boss_config(vec![Vec2::ZERO]));

    hit(&mut app, boss, 90.0);

    let difficulty = app.world().resource::<Difficulty>();
    assert_eq!(difficulty.increases(), 3);
    assert_eq!(app.world().get::<DifficultyHook>(boss).unwrap().step_state(), 0.25);
}

#[test]
fn test_healing_does_not_restore_bands() {
    let mut app = create_app();
    let boss = add_boss(&mut app, &boss_config(vec![Vec2::ZERO]));

    hit(&mut app, boss, 30.0);
    app.world_mut().send_event(HealRequest {
        target: boss,
        amount: 30.0,
    });
    tick_simulation(app.world_mut(), fixed_tick());
    assert_eq!(app.world().get::<Health>(boss).unwrap().current(), 100.0);

    hit(&mut app, boss, 30.0);
    assert_eq!(app.world().resource::<Difficulty>().increases(), 1);
}

#[test]
fn test_rescale_mid_lunge() {
    let mut app = create_app();
    let boss = add_boss(&mut app, &boss_config(vec![Vec2::ZERO]));
    add_agent(&mut app, AgentCategory::Player, Vec2::new(0.0, 50.0));

    // Таймер 4 сек → рывок, ещё ~1 сек летим к (0, 50)
    run_ticks(&mut app, 300);
    let ai = app.world().get::<PatrolLunge>(boss).unwrap();
    assert_eq!(ai.lunge_target(), Some(Vec2::new(0.0, 50.0)));
    assert_eq!(app.world().get::<Motion>(boss).unwrap().speed, 20.0);

    // 55 урона → две полосы → множитель 2.0
    hit(&mut app, boss, 55.0);
    assert_eq!(app.world().resource::<Difficulty>().multiplier(), 2.0);

    let ai = app.world().get::<PatrolLunge>(boss).unwrap();
    assert!(ai.is_lunging());
    assert_eq!(ai.saved_move_speed(), 20.0);

    let motion = app.world().get::<Motion>(boss).unwrap();
    assert_eq!(motion.speed, 40.0);
    assert!(motion.override_animations);
}

#[test]
fn test_lunge_reaches_frozen_target_and_restores_patrol() {
    let mut app = create_app();
    let boss = add_boss(&mut app, &boss_config(vec![Vec2::ZERO]));
    let player = add_agent(&mut app, AgentCategory::Player, Vec2::new(6.0, 0.0));

    // Рывок стартует на ~4.03 сек
    run_ticks(&mut app, 243);
    assert_eq!(
        app.world().get::<PatrolLunge>(boss).unwrap().lunge_target(),
        Some(Vec2::new(6.0, 0.0))
    );

    // Игрок убегает: цель рывка не обновляется
    app.world_mut().get_mut::<WorldPosition>(player).unwrap().0 = Vec2::new(-30.0, 0.0);

    // 6 ед. при 20 ед/с ≈ 18 тиков
    run_ticks(&mut app, 25);

    let ai = app.world().get::<PatrolLunge>(boss).unwrap();
    assert!(!ai.is_lunging());
    assert_eq!(ai.saved_move_speed(), 10.0);

    let motion = app.world().get::<Motion>(boss).unwrap();
    assert!(!motion.override_animations);
    assert_eq!(motion.speed, 10.0);
}

#[test]
fn test_friendly_fire_is_ignored() {
    let mut app = create_app();
    let boss = add_boss(&mut app, &boss_config(vec![Vec2::ZERO]));

    let friendly = app
        .world_mut()
        .spawn(Projectile {
            category: AgentCategory::Boss,
            damage: 25.0,
        })
        .id();
    let hostile = app
        .world_mut()
        .spawn(Projectile {
            category: AgentCategory::Player,
            damage: 25.0,
        })
        .id();

    for projectile in [friendly, hostile] {
        app.world_mut().send_event(ProjectileOverlap {
            agent: boss,
            projectile,
        });
    }
    tick_simulation(app.world_mut(), fixed_tick());

    assert_eq!(app.world().get::<Health>(boss).unwrap().current(), 75.0);
    assert!(app.world().get_entity(friendly).is_ok());
    assert!(app.world().get_entity(hostile).is_err());
    assert_eq!(app.world().resource::<Difficulty>().increases(), 1);
}

#[test]
fn test_boss_kill_completes_encounter() {
    let mut app = create_app();
    let boss = add_boss(&mut app, &boss_config(vec![Vec2::ZERO]));
    let player = add_agent(&mut app, AgentCategory::Player, Vec2::new(0.0, 5.0));

    for _ in 0..3 {
        hit(&mut app, boss, 30.0);
    }
    assert!(signals(&app).is_empty());

    // Добивающий удар тоже проходит через hook (последняя полоса)
    hit(&mut app, boss, 10.0);

    assert_eq!(signals(&app), vec![GameSignal::EncounterComplete]);
    assert!(app.world().get_entity(boss).is_err());
    assert_eq!(app.world().resource::<Difficulty>().increases(), 4);

    // Дальше симуляция живёт без босса
    run_ticks(&mut app, 10);
    assert!(app.world().get_entity(player).is_ok());
}

#[test]
fn test_player_kill_signals_game_over() {
    let mut app = create_app();
    let player = add_agent(&mut app, AgentCategory::Player, Vec2::ZERO);

    hit(&mut app, player, 150.0);

    assert_eq!(signals(&app), vec![GameSignal::GameOver]);
    assert!(app.world().get::<Health>(player).unwrap().is_killed());
}

#[test]
fn test_hook_dropped_when_source_despawned() {
    let mut app = create_app();
    let enemy = add_agent(&mut app, AgentCategory::Enemy, Vec2::ZERO);

    // Отдельный наблюдатель за здоровьем врага
    let watcher = app.world_mut().spawn(DifficultyHook::new(enemy)).id();

    hit(&mut app, enemy, 100.0);
    run_ticks(&mut app, 1);

    assert!(app.world().get_entity(enemy).is_err());
    assert!(app.world().get::<DifficultyHook>(watcher).is_none());
    assert_eq!(app.world().resource::<Difficulty>().increases(), 4);
}

#[test]
fn test_independent_hooks_track_own_source() {
    let mut app = create_app();
    let first = add_boss(&mut app, &boss_config(vec![Vec2::ZERO]));
    let second = add_boss(&mut app, &boss_config(vec![Vec2::new(5.0, 5.0)]));

    hit(&mut app, first, 30.0);
    hit(&mut app, second, 10.0);

    assert_eq!(app.world().get::<DifficultyHook>(first).unwrap().step_state(), 0.75);
    assert_eq!(app.world().get::<DifficultyHook>(second).unwrap().step_state(), 1.0);
    assert_eq!(app.world().resource::<Difficulty>().increases(), 1);
}

#[test]
fn test_event_buffers_do_not_grow_across_ticks() {
    let mut app = create_app();
    let config = BossSpawnConfig {
        attachments: vec![RangedAttachment {
            fire_interval: 0.0,
            ..Default::default()
        }],
        ..boss_config(vec![Vec2::ZERO])
    };
    add_boss(&mut app, &config);
    add_agent(&mut app, AgentCategory::Player, Vec2::new(0.0, 50.0));

    // До первого рывка босс стреляет каждый тик
    run_ticks(&mut app, 60);
    let fired = app.world().resource::<Events<WeaponFired>>();
    assert_eq!(fired.iter_current_update_events().count(), 1);
    assert_eq!(fired.len(), 2);

    // Хранятся только события текущего и прошлого тика
    run_ticks(&mut app, 600);
    assert!(app.world().resource::<Events<WeaponFired>>().len() <= 2);
    assert!(app.world().resource::<Events<GameSignal>>().is_empty());
}

#[test]
fn test_invalid_difficulty_config_fails_fast() {
    let result = create_manual_app(
        1,
        DifficultyConfig {
            initial_multiplier: -1.0,
            step: 0.5,
        },
    );
    assert!(result.is_err());
}
