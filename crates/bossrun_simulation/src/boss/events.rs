//! Boss events (ECS ↔ host)
//!
//! Host → ECS: BossHit (пуля игрока попала в босса), ResetMatch.
//! ECS → host: всё остальное (звук, тряска экрана, экран победы).

use bevy::prelude::*;

use super::state::AttackKind;

/// Event: пуля игрока попала в босса (коллизию считает host)
#[derive(Event, Debug, Clone, Copy)]
pub struct BossHit {
    pub boss: Entity,
}

/// Event: полный сброс матча (retry с экрана смерти/победы)
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ResetMatch;

#[derive(Event, Debug, Clone, Copy)]
pub struct AttackStarted {
    pub boss: Entity,
    pub attack: AttackKind,
}

/// Event: melee замах (для вспышки радиуса и звука)
#[derive(Event, Debug, Clone, Copy)]
pub struct MeleeSwing {
    pub boss: Entity,
    pub position: Vec2,
}

/// Event: melee попал в игрока (минус одно сердце)
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerDamaged {
    pub boss: Entity,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct PhaseTransitionStarted {
    pub boss: Entity,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct PhaseTransitionEnded {
    pub boss: Entity,
}

/// Event: health босса дошёл до 0 (один раз за матч)
#[derive(Event, Debug, Clone, Copy)]
pub struct BossDefeated {
    pub boss: Entity,
}
