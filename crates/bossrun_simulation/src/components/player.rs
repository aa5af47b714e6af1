//! Player snapshot: то, что босс видит от игрока каждый тик
//!
//! Сам игрок (input, roll, hearts) живёт в host game loop.

use bevy::prelude::*;

/// Состояние игрока на текущий тик
///
/// Host обновляет resource перед `FixedUpdate`; boss systems только читают.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerState {
    pub position: Vec2,
    /// Игрок в перекате, melee не срабатывает
    pub rolling: bool,
    /// i-frames после попадания/переката: melee swing есть, урона нет
    pub invulnerable: bool,
}

impl PlayerState {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            rolling: false,
            invulnerable: false,
        }
    }

    pub fn rolling(mut self) -> Self {
        self.rolling = true;
        self
    }

    pub fn invulnerable(mut self) -> Self {
        self.invulnerable = true;
        self
    }
}
