//! Boss FSM состояния, фазы и attack bag

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Фаза боя. Phase1 → Phase2 ровно один раз, через gauntlet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Phase1,
    Phase2,
}

/// Атаки из репертуара босса (универсум attack bag)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum AttackKind {
    RandomSpread,
    WideSpread,
    ChargeAttack,
    ParticleDivision,
}

impl AttackKind {
    pub const ALL: [AttackKind; 4] = [
        AttackKind::RandomSpread,
        AttackKind::WideSpread,
        AttackKind::ChargeAttack,
        AttackKind::ParticleDivision,
    ];
}

/// Boss FSM состояние (ровно одно активно)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
pub enum BossState {
    /// Вход на арену, иммунитет к урону
    #[default]
    Intro,
    /// Дрейф к игроку, ожидание attack cooldown
    Idle,
    RandomSpread,
    WideSpread,
    ChargeAttack,
    ParticleDivision,
    /// Интермиссия Phase1 → Phase2, иммунитет к урону
    Gauntlet,
}

impl From<AttackKind> for BossState {
    fn from(kind: AttackKind) -> Self {
        match kind {
            AttackKind::RandomSpread => BossState::RandomSpread,
            AttackKind::WideSpread => BossState::WideSpread,
            AttackKind::ChargeAttack => BossState::ChargeAttack,
            AttackKind::ParticleDivision => BossState::ParticleDivision,
        }
    }
}

impl BossState {
    /// Атака, которую сейчас исполняет босс (None для Intro/Idle/Gauntlet)
    pub fn attack(&self) -> Option<AttackKind> {
        match self {
            BossState::RandomSpread => Some(AttackKind::RandomSpread),
            BossState::WideSpread => Some(AttackKind::WideSpread),
            BossState::ChargeAttack => Some(AttackKind::ChargeAttack),
            BossState::ParticleDivision => Some(AttackKind::ParticleDivision),
            BossState::Intro | BossState::Idle | BossState::Gauntlet => None,
        }
    }
}

/// Attack bag: выбор без возвращения
///
/// Каждая из 4 атак выпадает ровно один раз за цикл, затем bag пополняется.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackBag {
    remaining: Vec<AttackKind>,
}

impl Default for AttackBag {
    fn default() -> Self {
        Self {
            remaining: AttackKind::ALL.to_vec(),
        }
    }
}

/// Результат вытягивания из bag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackDraw {
    pub attack: AttackKind,
    /// Bag был пуст и пополнился перед выбором
    pub refilled: bool,
}

impl AttackBag {
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> AttackDraw {
        let refilled = self.remaining.is_empty();
        if refilled {
            self.refill();
        }

        let index = rng.gen_range(0..self.remaining.len());
        let attack = self.remaining.remove(index);

        AttackDraw { attack, refilled }
    }

    /// Вернуть все 4 атаки (порядок универсума, без realloc)
    pub fn refill(&mut self) {
        self.remaining.clear();
        self.remaining.extend_from_slice(&AttackKind::ALL);
    }

    pub fn remaining(&self) -> &[AttackKind] {
        &self.remaining
    }

    pub fn is_full(&self) -> bool {
        self.remaining.len() == AttackKind::ALL.len()
    }
}
