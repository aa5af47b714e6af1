//! Attack Pattern Library: генераторы залпов
//!
//! Чистые функции: позиция босса (+ игрока для прицельных атак) + фаза → набор ProjectileSpec.
//! Случайность только через переданный `rng`, так что seeded источник даёт точный набор пуль.
//! Углы в градусах, 0° = +x.

use bevy::prelude::*;
use rand::Rng;

use super::config::PhaseValue;
use super::state::Phase;
use super::waves::PendingWave;
use crate::components::Rgb;
use crate::projectile::ProjectileSpec;

/// Радиус обычной пули босса
pub const BULLET_RADIUS: f32 = 5.0;

// === RandomSpread ===
pub const RANDOM_SPREAD_COUNT: usize = 12;
pub const RANDOM_SPREAD_JITTER: f32 = 20.0;
pub const RANDOM_SPREAD_SPEED: (f32, f32) = (3.0, 5.0);
pub const RANDOM_SPREAD_SPEED_MULT: PhaseValue<f32> = PhaseValue::new(1.0, 1.2);

// === WideSpread ===
pub const WIDE_SPREAD_COUNT: usize = 12;
pub const WIDE_SPREAD_ARC: f32 = 60.0;
pub const WIDE_SPREAD_SPEED: f32 = 4.0;
pub const WIDE_SPREAD_SPEED_MULT: PhaseValue<f32> = PhaseValue::new(1.0, 1.5);

// === Gauntlet rings ===
pub const GAUNTLET_OUTER_COUNT: usize = 16;
pub const GAUNTLET_INNER_COUNT: usize = 8;
pub const GAUNTLET_OUTER_SPEED: f32 = 8.0;
pub const GAUNTLET_INNER_SPEED: f32 = 6.0;
/// Поворот базового угла за один выстрел
pub const GAUNTLET_SWEEP_STEP: f32 = 20.0;

// === Corner explosion ===
pub const CORNER_EXPLOSION_COUNT: PhaseValue<usize> = PhaseValue::new(16, 22);
pub const CORNER_EXPLOSION_SPEED: PhaseValue<(f32, f32)> = PhaseValue::new((3.0, 5.0), (4.0, 6.0));
pub const CORNER_EXPLOSION_JITTER: f32 = 10.0;
/// Случайная задержка взрыва каждого угла
pub const CORNER_DELAY_RANGE: (f32, f32) = (0.2, 1.5);

/// Параметры charge explosion для одной фазы
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChargeProfile {
    pub waves: usize,
    pub per_wave: usize,
    /// Задержка между соседними волнами (секунды)
    pub wave_delay: f32,
    pub base_speed: f32,
    /// Прибавка скорости на каждую следующую волну
    pub speed_step: f32,
    pub radius: f32,
    /// Поворот каждой следующей волны (градусы)
    pub angle_offset: f32,
}

pub const CHARGE_PROFILE: PhaseValue<ChargeProfile> = PhaseValue::new(
    ChargeProfile {
        waves: 8,
        per_wave: 24,
        wave_delay: 0.15,
        base_speed: 4.0,
        speed_step: 0.5,
        radius: 4.0,
        angle_offset: 0.0,
    },
    ChargeProfile {
        waves: 10,
        per_wave: 32,
        wave_delay: 0.12,
        base_speed: 5.0,
        speed_step: 0.5,
        radius: 3.0,
        angle_offset: 5.0,
    },
);

/// 12 пуль по кругу (шаг 30°), каждая с разбросом ±20° и случайной скоростью
pub fn random_spread<R: Rng + ?Sized>(origin: Vec2, phase: Phase, rng: &mut R) -> Vec<ProjectileSpec> {
    let multiplier = RANDOM_SPREAD_SPEED_MULT.get(phase);
    let step = 360.0 / RANDOM_SPREAD_COUNT as f32;
    let (min_speed, max_speed) = RANDOM_SPREAD_SPEED;

    (0..RANDOM_SPREAD_COUNT)
        .map(|i| {
            let angle = i as f32 * step + rng.gen_range(-RANDOM_SPREAD_JITTER..=RANDOM_SPREAD_JITTER);
            let speed = rng.gen_range(min_speed..=max_speed) * multiplier;
            ProjectileSpec::from_polar(origin, angle, speed, Rgb::YELLOW, BULLET_RADIUS)
        })
        .collect()
}

/// Веер 60° на текущую позицию игрока
///
/// Если игрок стоит ровно на боссе, стреляем вдоль +x.
pub fn wide_spread(origin: Vec2, target: Vec2, phase: Phase) -> Vec<ProjectileSpec> {
    let direction = (target - origin).try_normalize().unwrap_or(Vec2::X);
    let bearing = direction.y.atan2(direction.x).to_degrees();

    let start = bearing - WIDE_SPREAD_ARC / 2.0;
    let step = WIDE_SPREAD_ARC / (WIDE_SPREAD_COUNT - 1) as f32;
    let speed = WIDE_SPREAD_SPEED * WIDE_SPREAD_SPEED_MULT.get(phase);

    (0..WIDE_SPREAD_COUNT)
        .map(|i| ProjectileSpec::from_polar(origin, start + i as f32 * step, speed, Rgb::RED, BULLET_RADIUS))
        .collect()
}

/// Многоволновой взрыв charge attack
///
/// Волна `i` выходит через `i * wave_delay`, быстрее предыдущей на `speed_step`.
pub fn charge_explosion(origin: Vec2, phase: Phase) -> Vec<PendingWave> {
    let profile = CHARGE_PROFILE.get(phase);
    let step = 360.0 / profile.per_wave as f32;

    (0..profile.waves)
        .map(|wave| {
            let rotation = profile.angle_offset * wave as f32;
            let speed = profile.base_speed + profile.speed_step * wave as f32;

            let specs = (0..profile.per_wave)
                .map(|i| {
                    ProjectileSpec::from_polar(origin, step * i as f32 + rotation, speed, Rgb::GREEN, profile.radius)
                })
                .collect();

            PendingWave {
                specs,
                fire_delay: wave as f32 * profile.wave_delay,
            }
        })
        .collect()
}

/// Два концентрических кольца gauntlet: 16 быстрых + 8 медленных со сдвигом на полшага
pub fn gauntlet_rings(origin: Vec2, base_angle: f32) -> Vec<ProjectileSpec> {
    let outer_step = 360.0 / GAUNTLET_OUTER_COUNT as f32;
    let inner_step = 360.0 / GAUNTLET_INNER_COUNT as f32;
    let inner_offset = inner_step / 2.0;

    let outer = (0..GAUNTLET_OUTER_COUNT).map(|i| {
        ProjectileSpec::from_polar(
            origin,
            base_angle + outer_step * i as f32,
            GAUNTLET_OUTER_SPEED,
            Rgb::PURPLE,
            BULLET_RADIUS,
        )
    });
    let inner = (0..GAUNTLET_INNER_COUNT).map(|i| {
        ProjectileSpec::from_polar(
            origin,
            base_angle + inner_offset + inner_step * i as f32,
            GAUNTLET_INNER_SPEED,
            Rgb::PURPLE,
            BULLET_RADIUS,
        )
    });

    outer.chain(inner).collect()
}

/// Следующий базовый угол gauntlet, `direction` = ±1
pub fn next_gauntlet_angle(angle: f32, direction: f32) -> f32 {
    (angle + direction * GAUNTLET_SWEEP_STEP).rem_euclid(360.0)
}

/// Взрыв угловой частицы: равномерный круг с разбросом ±10°
pub fn corner_explosion<R: Rng + ?Sized>(anchor: Vec2, phase: Phase, rng: &mut R) -> Vec<ProjectileSpec> {
    let count = CORNER_EXPLOSION_COUNT.get(phase);
    let (min_speed, max_speed) = CORNER_EXPLOSION_SPEED.get(phase);
    let step = 360.0 / count as f32;

    (0..count)
        .map(|i| {
            let angle = step * i as f32 + rng.gen_range(-CORNER_EXPLOSION_JITTER..=CORNER_EXPLOSION_JITTER);
            let speed = rng.gen_range(min_speed..=max_speed);
            ProjectileSpec::from_polar(anchor, angle, speed, Rgb::RED, BULLET_RADIUS)
        })
        .collect()
}

/// Задержки взрыва 4 углов, тянутся один раз при зарядке
pub fn corner_delays<R: Rng + ?Sized>(rng: &mut R) -> [f32; 4] {
    let (min_delay, max_delay) = CORNER_DELAY_RANGE;
    std::array::from_fn(|_| rng.gen_range(min_delay..=max_delay))
}
