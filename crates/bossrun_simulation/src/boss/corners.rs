//! Corner Division: угловые частицы атаки ParticleDivision
//!
//! 4 якоря в углах collision rect живут весь матч. Атака заряжает их
//! (пульсация 8 Hz), затем каждый угол взрывается по своему таймеру.

use bevy::prelude::*;
use rand::Rng;

use super::patterns::{corner_delays, corner_explosion};
use super::state::Phase;
use crate::components::Rgb;
use crate::projectile::ProjectileSpec;

/// Базовый визуальный радиус угловой частицы
pub const CORNER_BASE_RADIUS: f32 = 15.0;
/// Частота пульсации (рад/сек в аргументе sin)
pub const CORNER_PULSE_FREQUENCY: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerParticle {
    pub anchor: Vec2,
    pub radius: f32,
    pub color: Rgb,
    pub exploded: bool,
    /// Секунды до взрыва (идёт только пока угол заряжен)
    pub countdown: f32,
}

impl CornerParticle {
    fn new(anchor: Vec2) -> Self {
        Self {
            anchor,
            radius: CORNER_BASE_RADIUS,
            color: Rgb::PURPLE,
            exploded: false,
            countdown: 0.0,
        }
    }
}

/// Sub-pattern state machine: Dormant → Pulsing → (все взорвались) → Dormant
#[derive(Debug, Clone, PartialEq)]
pub struct CornerDivision {
    corners: [CornerParticle; 4],
    pulsing: bool,
    pulse_time: f32,
    pulse_scale: f32,
}

impl CornerDivision {
    pub fn new(anchors: [Vec2; 4]) -> Self {
        Self {
            corners: anchors.map(CornerParticle::new),
            pulsing: false,
            pulse_time: 0.0,
            pulse_scale: 1.0,
        }
    }

    /// Зарядить углы: новые задержки, все углы не взорваны
    pub fn arm<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let delays = corner_delays(rng);
        for (corner, delay) in self.corners.iter_mut().zip(delays) {
            corner.exploded = false;
            corner.countdown = delay;
        }
        self.pulsing = true;
        self.pulse_time = 0.0;
        self.pulse_scale = 1.0;
    }

    /// Тик заряженных углов. Возвращает true, когда взорвался последний угол
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        phase: Phase,
        rng: &mut R,
        sink: &mut Vec<ProjectileSpec>,
    ) -> bool {
        if !self.pulsing {
            return false;
        }

        self.pulse_time += dt;
        let flash = (self.pulse_time * CORNER_PULSE_FREQUENCY).sin().abs();
        self.pulse_scale = 1.0 + flash;

        for corner in self.corners.iter_mut() {
            corner.radius = (CORNER_BASE_RADIUS * self.pulse_scale).trunc();
            corner.color = Rgb::PURPLE.lerp(Rgb::WHITE, flash);

            if corner.exploded {
                continue;
            }
            corner.countdown -= dt;
            if corner.countdown <= 0.0 {
                sink.extend(corner_explosion(corner.anchor, phase, rng));
                corner.exploded = true;
            }
        }

        if self.corners.iter().all(|c| c.exploded) {
            self.settle();
            return true;
        }

        false
    }

    /// Снять заряд без взрывов (gauntlet, reset)
    pub fn disarm(&mut self) {
        for corner in self.corners.iter_mut() {
            corner.exploded = false;
            corner.countdown = 0.0;
        }
        self.settle();
    }

    fn settle(&mut self) {
        self.pulsing = false;
        self.pulse_time = 0.0;
        self.pulse_scale = 1.0;
        for corner in self.corners.iter_mut() {
            corner.radius = CORNER_BASE_RADIUS;
            corner.color = Rgb::PURPLE;
        }
    }

    pub fn is_pulsing(&self) -> bool {
        self.pulsing
    }

    pub fn pulse_scale(&self) -> f32 {
        self.pulse_scale
    }

    pub fn corners(&self) -> &[CornerParticle; 4] {
        &self.corners
    }

    pub fn exploded_count(&self) -> usize {
        self.corners.iter().filter(|c| c.exploded).count()
    }
}
