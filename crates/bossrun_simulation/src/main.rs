//! Headless прогон BOSSRUN
//!
//! Скриптовый игрок кружит вокруг центра арены и регулярно попадает в босса.
//! Полезно для проверки баланса и детерминизма без рендера.

use bevy::prelude::*;
use bossrun_simulation::{
    create_headless_app, logger, Arena, Boss, BossDefeated, BossHit, PhaseTransitionEnded,
    PhaseTransitionStarted, PlayerDamaged, PlayerState, ProjectileSpawned, SimulationPlugin,
};

const SEED: u64 = 42;
const MAX_TICKS: u64 = 60 * 60 * 5;
/// Скриптовый игрок попадает раз в N тиков
const HIT_EVERY: u64 = 6;
const ORBIT_RADIUS: f32 = 250.0;

#[derive(Resource, Debug, Default)]
struct MatchStats {
    projectiles: u64,
    player_hits: u64,
    phase_transitions: u64,
    defeated: bool,
}

fn collect_stats(
    mut stats: ResMut<MatchStats>,
    mut spawned: EventReader<ProjectileSpawned>,
    mut damaged: EventReader<PlayerDamaged>,
    mut started: EventReader<PhaseTransitionStarted>,
    mut ended: EventReader<PhaseTransitionEnded>,
    mut defeated: EventReader<BossDefeated>,
) {
    stats.projectiles += spawned.read().count() as u64;
    stats.player_hits += damaged.read().count() as u64;
    stats.phase_transitions += started.read().count() as u64;
    if ended.read().count() > 0 {
        logger::log_info("Runner: boss entered phase 2");
    }
    if defeated.read().count() > 0 {
        stats.defeated = true;
    }
}

fn main() {
    logger::set_log_level(logger::LogLevel::Info);
    logger::log_info(&format!("Starting BOSSRUN headless simulation (seed: {})", SEED));

    let mut app = create_headless_app(SEED);
    app.add_plugins(SimulationPlugin)
        .init_resource::<MatchStats>()
        .add_systems(FixedPostUpdate, collect_stats);

    // Startup: спавн босса
    app.update();

    let center = app.world().resource::<Arena>().center();
    let boss = {
        let mut query = app.world_mut().query_filtered::<Entity, With<Boss>>();
        query.iter(app.world()).next()
    };
    let Some(boss) = boss else {
        logger::log_error("Runner: boss was not spawned");
        return;
    };

    for tick in 0..MAX_TICKS {
        let angle = tick as f32 * 0.01;
        app.world_mut().resource_mut::<PlayerState>().position =
            center + Vec2::new(angle.cos(), angle.sin()) * ORBIT_RADIUS;

        if tick % HIT_EVERY == 0 {
            app.world_mut().send_event(BossHit { boss });
        }

        app.update();

        if tick % 60 == 0 {
            if let Some(state) = app.world().get::<Boss>(boss) {
                let stats = app.world().resource::<MatchStats>();
                logger::log_info(&format!(
                    "Tick {}: {:?} {:?} health {} | projectiles {} | melee hits {}",
                    tick,
                    state.state(),
                    state.phase(),
                    state.health(),
                    stats.projectiles,
                    stats.player_hits
                ));
            }
        }

        if app.world().resource::<MatchStats>().defeated {
            logger::log_info(&format!("Boss defeated at tick {}", tick));
            break;
        }
    }

    let stats = app.world().resource::<MatchStats>();
    logger::log_info(&format!("Simulation complete: {:?}", stats));
}
