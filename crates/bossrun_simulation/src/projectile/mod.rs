//! Projectile module: баллистические снаряды босса
//!
//! ECS ответственность:
//! - ProjectileSpec: описание выстрела (value, ещё не entity)
//! - Projectile: живая entity, линейное движение + culling по границам арены
//!
//! Коллизии с игроком считает host (у него хитбоксы и i-frames).

use bevy::prelude::*;
use crate::components::{Arena, Rgb};

#[cfg(test)]
mod projectile_tests;

/// Описание одного снаряда (позиция, скорость в units/tick, цвет, радиус)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileSpec {
    pub position: Vec2,
    pub velocity: Vec2,
    pub color: Rgb,
    pub radius: f32,
}

impl ProjectileSpec {
    /// Полярная форма: угол в градусах, 0° = +x
    pub fn from_polar(origin: Vec2, angle_degrees: f32, speed: f32, color: Rgb, radius: f32) -> Self {
        let rad = angle_degrees.to_radians();
        Self {
            position: origin,
            velocity: Vec2::new(speed * rad.cos(), speed * rad.sin()),
            color,
            radius,
        }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Направление полёта в градусах, диапазон [0, 360)
    pub fn heading_degrees(&self) -> f32 {
        self.velocity.y.atan2(self.velocity.x).to_degrees().rem_euclid(360.0)
    }
}

/// Живой снаряд босса
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub position: Vec2,
    pub velocity: Vec2,
    pub color: Rgb,
    pub radius: f32,
}

impl From<ProjectileSpec> for Projectile {
    fn from(spec: ProjectileSpec) -> Self {
        Self {
            position: spec.position,
            velocity: spec.velocity,
            color: spec.color,
            radius: spec.radius,
        }
    }
}

impl Projectile {
    /// Один тик движения. Возвращает false, если снаряд покинул арену
    pub fn step(&mut self, arena: &Arena) -> bool {
        self.position += self.velocity;
        arena.keeps_alive(self.position)
    }
}

/// Event: босс выпустил снаряд (ECS → host/spawn system)
#[derive(Event, Debug, Clone, Copy)]
pub struct ProjectileSpawned {
    pub spec: ProjectileSpec,
}

/// Система: ProjectileSpawned → Projectile entity
pub fn spawn_projectiles(mut commands: Commands, mut spawned: EventReader<ProjectileSpawned>) {
    for event in spawned.read() {
        commands.spawn(Projectile::from(event.spec));
    }
}

/// Система: движение снарядов + despawn за границами
pub fn move_projectiles(
    mut commands: Commands,
    mut projectiles: Query<(Entity, &mut Projectile)>,
    arena: Res<Arena>,
) {
    for (entity, mut projectile) in projectiles.iter_mut() {
        if !projectile.step(&arena) {
            commands.entity(entity).despawn();
        }
    }
}
