//! Палитра снарядов и босса (8-bit RGB)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// RGB цвет без alpha
///
/// Рендер сам решает, как рисовать (glow, alpha), симуляция отдаёт только базовый цвет.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
    pub const PURPLE: Rgb = Rgb::new(200, 0, 200);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Линейная интерполяция к `target`, `t` клампится в [0, 1]
    ///
    /// Каналы усекаются (не округляются): `lerp(.., 0.0)` == self ровно.
    pub fn lerp(self, target: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let channel = |from: u8, to: u8| -> u8 {
            let value = from as f32 + (to as f32 - from as f32) * t;
            value.clamp(0.0, 255.0) as u8
        };

        Rgb::new(
            channel(self.r, target.r),
            channel(self.g, target.g),
            channel(self.b, target.b),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(Rgb::PURPLE.lerp(Rgb::WHITE, 0.0), Rgb::PURPLE);
        assert_eq!(Rgb::PURPLE.lerp(Rgb::WHITE, 1.0), Rgb::WHITE);
        // Выход за диапазон клампится
        assert_eq!(Rgb::PURPLE.lerp(Rgb::WHITE, -3.0), Rgb::PURPLE);
        assert_eq!(Rgb::PURPLE.lerp(Rgb::WHITE, 7.0), Rgb::WHITE);
    }

    #[test]
    fn test_lerp_midpoint_truncates() {
        // 200 + 55 * 0.5 = 227.5 → 227, 0 + 255 * 0.5 = 127.5 → 127
        assert_eq!(Rgb::PURPLE.lerp(Rgb::WHITE, 0.5), Rgb::new(227, 127, 227));
    }
}
