//! Tests for projectile motion and culling.

use approx::assert_relative_eq;
use bevy::prelude::*;

use super::*;
use crate::components::{Arena, Rgb};

#[test]
fn test_from_polar_axes() {
    let right = ProjectileSpec::from_polar(Vec2::ZERO, 0.0, 4.0, Rgb::RED, 5.0);
    assert_relative_eq!(right.velocity.x, 4.0, epsilon = 1e-5);
    assert_relative_eq!(right.velocity.y, 0.0, epsilon = 1e-5);

    // 90° = +y (экранные координаты: вниз)
    let down = ProjectileSpec::from_polar(Vec2::ZERO, 90.0, 2.0, Rgb::RED, 5.0);
    assert_relative_eq!(down.velocity.x, 0.0, epsilon = 1e-5);
    assert_relative_eq!(down.velocity.y, 2.0, epsilon = 1e-5);
}

#[test]
fn test_heading_wraps_to_positive() {
    let spec = ProjectileSpec::from_polar(Vec2::ZERO, -30.0, 3.0, Rgb::YELLOW, 5.0);
    assert_relative_eq!(spec.heading_degrees(), 330.0, epsilon = 1e-3);
    assert_relative_eq!(spec.speed(), 3.0, epsilon = 1e-5);
}

#[test]
fn test_step_moves_linearly() {
    let arena = Arena::default();
    let mut projectile = Projectile::from(ProjectileSpec {
        position: Vec2::new(100.0, 100.0),
        velocity: Vec2::new(3.0, -2.0),
        color: Rgb::GREEN,
        radius: 4.0,
    });

    assert!(projectile.step(&arena));
    assert!(projectile.step(&arena));
    assert_eq!(projectile.position, Vec2::new(106.0, 96.0));
}

#[test]
fn test_step_culls_outside_arena() {
    let arena = Arena::default();
    let mut projectile = Projectile::from(ProjectileSpec {
        position: Vec2::new(-8.0, 300.0),
        velocity: Vec2::new(-5.0, 0.0),
        color: Rgb::RED,
        radius: 5.0,
    });

    assert!(!projectile.step(&arena));
}

#[test]
fn test_projectile_systems_spawn_and_cull() {
    let mut app = App::new();
    app.add_event::<ProjectileSpawned>()
        .insert_resource(Arena::default())
        .add_systems(Update, (spawn_projectiles, move_projectiles).chain());

    app.world_mut().send_event(ProjectileSpawned {
        spec: ProjectileSpec {
            position: Vec2::new(400.0, 400.0),
            velocity: Vec2::new(1.0, 0.0),
            color: Rgb::YELLOW,
            radius: 5.0,
        },
    });
    app.world_mut().send_event(ProjectileSpawned {
        spec: ProjectileSpec {
            position: Vec2::new(770.0, 400.0),
            velocity: Vec2::new(50.0, 0.0),
            color: Rgb::RED,
            radius: 5.0,
        },
    });

    // chain() вставляет apply_deferred: spawn и первый шаг движения в одном тике
    app.update();

    let mut query = app.world_mut().query::<&Projectile>();
    let alive: Vec<_> = query.iter(app.world()).copied().collect();
    assert_eq!(alive.len(), 1);
    assert_eq!(alive[0].position, Vec2::new(401.0, 400.0));
}
