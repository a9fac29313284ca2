//! Headless симуляция SLEIGHRUN
//!
//! Бой с боссом без рендера: игрок бродит случайно (seeded RNG) и бьёт
//! босса по расписанию, часть выстрелов босса попадает в игрока.
//! Время идёт фиксированными шагами 1/60 сек, прогон воспроизводим.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::Rng;

use sleighrun_simulation::logger::{set_log_level, LogLevel};
use sleighrun_simulation::{
    create_headless_app, fixed_tick, init_logger, log_error, log_info, spawn_agent, spawn_boss, AgentCategory,
    AgentSpawnConfig, BossSpawnConfig, DamageRequest, DeterministicRng, Difficulty, DifficultyConfig,
    GameSignal, Motion, PatrolLunge, PatrolLungeConfig, Player, Projectile, ProjectileOverlap,
    SimulationSet, WeaponFired,
};

const SEED: u64 = 42;
const MAX_TICKS: u32 = 60 * 120;

/// Игрок бьёт босса раз в 1.5 сек
const PLAYER_ATTACK_INTERVAL: u32 = 90;
const PLAYER_DAMAGE: f32 = 15.0;
/// Шанс, что снаряд босса долетит до игрока
const BOSS_HIT_CHANCE: f64 = 0.2;

/// Чем закончился бой (None: ещё идёт)
#[derive(Resource, Default)]
struct Outcome(Option<GameSignal>);

#[derive(Resource, Default)]
struct TickCounter(u32);

fn main() {
    init_logger();
    // Фазовые переходы AI идут в Debug, для демо хватает Info
    set_log_level(LogLevel::Info);
    log_info(&format!("Starting SLEIGHRUN headless simulation (seed: {})", SEED));

    if let Err(err) = run() {
        log_error(&format!("Simulation failed: {}", err));
        std::process::exit(1);
    }
}

fn run() -> Result<(), sleighrun_simulation::SimulationError> {
    let mut app = create_headless_app(SEED, DifficultyConfig::default())?;

    // Каждый app.update() = ровно один fixed tick
    app.insert_resource(TimeUpdateStrategy::ManualDuration(fixed_tick()))
        .init_resource::<Outcome>()
        .init_resource::<TickCounter>()
        .add_systems(
            FixedUpdate,
            (wander_player, player_attacks_boss, resolve_boss_shots)
                .chain()
                .before(SimulationSet::Damage),
        )
        .add_systems(FixedUpdate, record_outcome.after(SimulationSet::Cleanup));

    {
        let mut commands = app.world_mut().commands();

        spawn_agent(
            &mut commands,
            &AgentSpawnConfig {
                category: AgentCategory::Player,
                position: Vec2::new(0.0, -6.0),
                max_health: 100.0,
                attachments: Vec::new(),
            },
        )?;

        spawn_boss(
            &mut commands,
            &BossSpawnConfig {
                position: Vec2::new(-8.0, 8.0),
                max_health: 100.0,
                patrol: PatrolLungeConfig::with_waypoints(vec![
                    Vec2::new(-8.0, 8.0),
                    Vec2::new(8.0, 8.0),
                    Vec2::new(0.0, -8.0),
                ]),
                ..Default::default()
            },
        )?;
    }
    app.world_mut().flush();

    for tick in 0..MAX_TICKS {
        app.update();

        if tick % 600 == 0 {
            let difficulty = app.world().resource::<Difficulty>().multiplier();
            log_info(&format!("Tick {}: difficulty x{}", tick, difficulty));
        }

        if let Some(signal) = app.world().resource::<Outcome>().0 {
            log_info(&format!("Encounter finished at tick {}: {:?}", tick, signal));
            break;
        }
    }

    let difficulty = app.world().resource::<Difficulty>();
    log_info(&format!(
        "Simulation complete! difficulty x{} after {} increase(s)",
        difficulty.multiplier(),
        difficulty.increases()
    ));

    Ok(())
}

/// Раз в секунду игрок выбирает новое случайное направление
fn wander_player(
    mut players: Query<&mut Motion, With<Player>>,
    mut rng: ResMut<DeterministicRng>,
    mut counter: ResMut<TickCounter>,
) {
    counter.0 += 1;
    if counter.0 % 60 != 1 {
        return;
    }

    for mut motion in players.iter_mut() {
        let angle: f32 = rng.rng.gen_range(0.0..std::f32::consts::TAU);
        motion.direction = Vec2::from_angle(angle);
        motion.speed = 3.0;
    }
}

fn player_attacks_boss(
    counter: Res<TickCounter>,
    players: Query<Entity, With<Player>>,
    bosses: Query<Entity, With<PatrolLunge>>,
    mut damage: EventWriter<DamageRequest>,
) {
    if counter.0 % PLAYER_ATTACK_INTERVAL != 0 {
        return;
    }

    let source = players.single().ok();
    for boss in bosses.iter() {
        damage.write(DamageRequest {
            target: boss,
            amount: PLAYER_DAMAGE,
            source,
        });
    }
}

/// Хост: часть выстрелов долетает до игрока → ProjectileOverlap
fn resolve_boss_shots(
    mut commands: Commands,
    mut fired: EventReader<WeaponFired>,
    players: Query<Entity, With<Player>>,
    mut rng: ResMut<DeterministicRng>,
    mut overlaps: EventWriter<ProjectileOverlap>,
) {
    let Ok(player) = players.single() else {
        fired.clear();
        return;
    };

    for shot in fired.read() {
        if !rng.rng.gen_bool(BOSS_HIT_CHANCE) {
            continue;
        }

        let projectile = commands
            .spawn(Projectile {
                category: shot.category,
                damage: shot.damage,
            })
            .id();
        overlaps.write(ProjectileOverlap {
            agent: player,
            projectile,
        });
    }
}

fn record_outcome(mut signals: EventReader<GameSignal>, mut outcome: ResMut<Outcome>) {
    if let Some(signal) = signals.read().last() {
        outcome.0 = Some(*signal);
    }
}
