//! Tests for attack pattern generators.

use approx::assert_relative_eq;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::patterns::*;
use super::state::Phase;
use crate::components::Rgb;

const ORIGIN: Vec2 = Vec2::new(384.0, 384.0);

/// Кратчайшая угловая разница в градусах, [0, 180]
fn angle_diff(a: f32, b: f32) -> f32 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

#[test]
fn test_random_spread_bounds() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for phase in [Phase::Phase1, Phase::Phase2] {
        let multiplier = RANDOM_SPREAD_SPEED_MULT.get(phase);
        for _ in 0..50 {
            let specs = random_spread(ORIGIN, phase, &mut rng);
            assert_eq!(specs.len(), 12);

            for (i, spec) in specs.iter().enumerate() {
                let base = i as f32 * 30.0;
                assert!(angle_diff(spec.heading_degrees(), base) <= 20.0 + 1e-3);

                let speed = spec.speed();
                assert!(speed >= 3.0 * multiplier - 1e-4 && speed <= 5.0 * multiplier + 1e-4);

                assert_eq!(spec.position, ORIGIN);
                assert_eq!(spec.color, Rgb::YELLOW);
                assert_eq!(spec.radius, BULLET_RADIUS);
            }
        }
    }
}

#[test]
fn test_random_spread_seeded_is_reproducible() {
    let a = random_spread(ORIGIN, Phase::Phase1, &mut ChaCha8Rng::seed_from_u64(9));
    let b = random_spread(ORIGIN, Phase::Phase1, &mut ChaCha8Rng::seed_from_u64(9));
    assert_eq!(a, b);
}

#[test]
fn test_wide_spread_aims_at_target() {
    let specs = wide_spread(ORIGIN, ORIGIN + Vec2::new(200.0, 0.0), Phase::Phase1);
    assert_eq!(specs.len(), 12);

    // 60° дуга с центром на игроке: от -30° до +30°
    assert_relative_eq!(angle_diff(specs[0].heading_degrees(), 330.0), 0.0, epsilon = 1e-3);
    assert_relative_eq!(angle_diff(specs[11].heading_degrees(), 30.0), 0.0, epsilon = 1e-3);

    let step = 60.0 / 11.0;
    for pair in specs.windows(2) {
        assert_relative_eq!(
            angle_diff(pair[1].heading_degrees(), pair[0].heading_degrees()),
            step,
            epsilon = 1e-3
        );
    }

    for spec in &specs {
        assert_relative_eq!(spec.speed(), 4.0, epsilon = 1e-4);
        assert_eq!(spec.color, Rgb::RED);
    }
}

#[test]
fn test_wide_spread_phase2_speed_and_bearing() {
    // Игрок снизу (y вниз) → центр веера 90°
    let specs = wide_spread(ORIGIN, ORIGIN + Vec2::new(0.0, 50.0), Phase::Phase2);

    let middle = (specs[5].heading_degrees() + specs[6].heading_degrees()) / 2.0;
    assert_relative_eq!(middle, 90.0, epsilon = 1e-3);
    for spec in &specs {
        assert_relative_eq!(spec.speed(), 6.0, epsilon = 1e-4);
    }
}

#[test]
fn test_wide_spread_coincident_target() {
    let specs = wide_spread(ORIGIN, ORIGIN, Phase::Phase1);
    assert_eq!(specs.len(), 12);
    assert!(specs.iter().all(|s| s.velocity.is_finite()));

    let middle = (specs[5].heading_degrees() + 360.0 + specs[6].heading_degrees()) / 2.0;
    assert_relative_eq!(angle_diff(middle, 0.0), 0.0, epsilon = 1e-3);
}

#[test]
fn test_charge_explosion_phase1() {
    let waves = charge_explosion(ORIGIN, Phase::Phase1);
    assert_eq!(waves.len(), 8);

    for (i, wave) in waves.iter().enumerate() {
        assert_eq!(wave.specs.len(), 24);
        assert_relative_eq!(wave.fire_delay, i as f32 * 0.15, epsilon = 1e-5);

        for (j, spec) in wave.specs.iter().enumerate() {
            assert_relative_eq!(spec.speed(), 4.0 + 0.5 * i as f32, epsilon = 1e-4);
            assert_relative_eq!(angle_diff(spec.heading_degrees(), j as f32 * 15.0), 0.0, epsilon = 1e-3);
            assert_eq!(spec.radius, 4.0);
            assert_eq!(spec.color, Rgb::GREEN);
        }
    }

    let total: usize = waves.iter().map(|w| w.specs.len()).sum();
    assert_eq!(total, 192);
}

#[test]
fn test_charge_explosion_phase2_rotates_waves() {
    let waves = charge_explosion(ORIGIN, Phase::Phase2);
    assert_eq!(waves.len(), 10);

    let total: usize = waves.iter().map(|w| w.specs.len()).sum();
    assert_eq!(total, 320);

    let third = &waves[3];
    assert_relative_eq!(third.fire_delay, 0.36, epsilon = 1e-5);
    assert_relative_eq!(angle_diff(third.specs[0].heading_degrees(), 15.0), 0.0, epsilon = 1e-3);
    assert_relative_eq!(third.specs[0].speed(), 6.5, epsilon = 1e-4);
    assert_eq!(third.specs[0].radius, 3.0);
}

#[test]
fn test_gauntlet_rings_layout() {
    let specs = gauntlet_rings(ORIGIN, 30.0);
    assert_eq!(specs.len(), 24);

    let (outer, inner) = specs.split_at(16);
    for (i, spec) in outer.iter().enumerate() {
        assert_relative_eq!(angle_diff(spec.heading_degrees(), 30.0 + 22.5 * i as f32), 0.0, epsilon = 1e-3);
        assert_relative_eq!(spec.speed(), 8.0, epsilon = 1e-4);
    }

    // Внутреннее кольцо сдвинуто на половину своего шага (45° / 2)
    for (i, spec) in inner.iter().enumerate() {
        let reference = outer[2 * i].heading_degrees();
        assert_relative_eq!(angle_diff(spec.heading_degrees(), reference), 22.5, epsilon = 1e-3);
        assert_relative_eq!(spec.speed(), 6.0, epsilon = 1e-4);
    }

    assert!(specs.iter().all(|s| s.color == Rgb::PURPLE && s.position == ORIGIN));
}

#[test]
fn test_gauntlet_angle_wraps() {
    assert_eq!(next_gauntlet_angle(30.0, 1.0), 50.0);
    assert_eq!(next_gauntlet_angle(350.0, 1.0), 10.0);
    assert_eq!(next_gauntlet_angle(10.0, -1.0), 350.0);
}

#[test]
fn test_corner_explosion_counts_and_speeds() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let anchor = Vec2::new(120.0, 647.0);

    let phase1 = corner_explosion(anchor, Phase::Phase1, &mut rng);
    assert_eq!(phase1.len(), 16);
    assert!(phase1.iter().all(|s| (3.0 - 1e-4..=5.0 + 1e-4).contains(&s.speed())));

    let phase2 = corner_explosion(anchor, Phase::Phase2, &mut rng);
    assert_eq!(phase2.len(), 22);
    assert!(phase2.iter().all(|s| (4.0 - 1e-4..=6.0 + 1e-4).contains(&s.speed())));

    let step = 360.0 / 22.0;
    for (i, spec) in phase2.iter().enumerate() {
        assert!(angle_diff(spec.heading_degrees(), step * i as f32) <= 10.0 + 1e-3);
        assert_eq!(spec.position, anchor);
        assert_eq!(spec.color, Rgb::RED);
    }
}

#[test]
fn test_corner_delays_range() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    for _ in 0..100 {
        for delay in corner_delays(&mut rng) {
            assert!((0.2..=1.5).contains(&delay));
        }
    }
}
