//! Тесты детерминизма
//!
//! Одинаковый seed + одинаковый сценарий попаданий → идентичный матч.

use bevy::prelude::*;
use bossrun_simulation::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Прогоняет матч и возвращает snapshot каждые 30 тиков
fn run_match(seed: u64, tick_count: usize) -> Vec<MatchSnapshot> {
    let mut app = create_headless_app(seed);
    app.insert_resource(PlayerState::at(Vec2::new(200.0, 600.0)));
    app.add_plugins(SimulationPlugin);
    app.update();

    let boss = {
        let mut query = app.world_mut().query_filtered::<Entity, With<Boss>>();
        query.iter(app.world()).next().expect("boss spawned")
    };

    let mut snapshots = Vec::new();
    for tick in 0..tick_count {
        if tick % 5 == 0 {
            app.world_mut().send_event(BossHit { boss });
        }
        app.update();

        if tick % 30 == 0 {
            snapshots.push(match_snapshot(app.world_mut()));
        }
    }

    snapshots
}

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;
    const TICK_COUNT: usize = 1500;

    let run1 = run_match(SEED, TICK_COUNT);
    let run2 = run_match(SEED, TICK_COUNT);

    assert_eq!(
        run1, run2,
        "Симуляция с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_different_seeds_diverge() {
    let run1 = run_match(1, 1500);
    let run2 = run_match(2, 1500);

    assert_ne!(run1, run2);
}

#[test]
fn test_boss_update_determinism_without_app() {
    fn run(seed: u64) -> (Vec<ProjectileSpec>, Vec<BossSignal>, BossSnapshot) {
        let mut boss = Boss::new(BossConfig::default(), &Arena::default());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut out = BossOutput::default();
        let mut projectiles = Vec::new();
        let mut signals = Vec::new();

        for tick in 0..4000 {
            let angle = tick as f32 * 0.02;
            let player = PlayerState::at(Vec2::new(384.0, 384.0) + Vec2::new(angle.cos(), angle.sin()) * 200.0);
            if tick % 7 == 0 {
                boss.take_damage();
            }

            out.clear();
            boss.update(&player, 1.0 / 60.0, &mut rng, &mut out);
            projectiles.extend_from_slice(&out.projectiles);
            signals.extend_from_slice(&out.signals);
        }

        (projectiles, signals, boss.snapshot())
    }

    let first = run(77);
    let second = run(77);
    assert!(!first.0.is_empty());
    assert_eq!(first, second);
}

#[test]
fn test_match_snapshot_serializes() {
    let snapshots = run_match(42, 300);
    let last = snapshots.last().expect("snapshots collected");

    let json = serde_json::to_string(last).unwrap();
    let restored: MatchSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(&restored, last);
}
