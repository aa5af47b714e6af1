//! Геометрия арены: окно, collision rect, угловые якоря

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Арена боя (квадратное окно + вписанный collision rect)
///
/// Collision rect: центрированный прямоугольник, масштабированный на
/// `collision_ratio` с усечением до целых пикселей (768 → 627, offset 70).
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub collision_ratio: f32,
    /// Отступ угловых частиц от углов collision rect
    pub corner_inset: f32,
    /// Снаряд удаляется, выйдя за окно дальше этого отступа
    pub cull_margin: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: 768.0,
            height: 768.0,
            collision_ratio: 837.0 / 1024.0,
            corner_inset: 50.0,
            cull_margin: 10.0,
        }
    }
}

/// Axis-aligned прямоугольник (min = top-left)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArenaRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl ArenaRect {
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

impl Arena {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn collision_rect(&self) -> ArenaRect {
        let width = (self.width * self.collision_ratio).trunc();
        let height = (self.height * self.collision_ratio).trunc();
        let x = ((self.width - width) / 2.0).floor();
        let y = ((self.height - height) / 2.0).floor();

        ArenaRect {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    /// Угловые якоря: top-left, top-right, bottom-left, bottom-right
    pub fn corner_anchors(&self) -> [Vec2; 4] {
        let rect = self.collision_rect();
        let inset = self.corner_inset;

        [
            Vec2::new(rect.min.x + inset, rect.min.y + inset),
            Vec2::new(rect.max.x - inset, rect.min.y + inset),
            Vec2::new(rect.min.x + inset, rect.max.y - inset),
            Vec2::new(rect.max.x - inset, rect.max.y - inset),
        ]
    }

    /// Снаряд ещё внутри зоны жизни (окно + cull margin)?
    pub fn keeps_alive(&self, position: Vec2) -> bool {
        let margin = self.cull_margin;
        position.x >= -margin
            && position.x <= self.width + margin
            && position.y >= -margin
            && position.y <= self.height + margin
    }
}
