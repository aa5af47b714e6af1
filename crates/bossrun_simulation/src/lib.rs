//! BOSSRUN Simulation Core
//!
//! Headless ECS-симуляция босс-файта на Bevy 0.16.
//!
//! Симуляция: boss state machine, паттерны атак, отложенные волны, снаряды.
//! Host (рендер, input, звук, экраны) живёт снаружи: пишет PlayerState и BossHit,
//! читает ProjectileSpawned / PlayerDamaged / BossDefeated и состояние Boss.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

// Публичные модули
pub mod boss;
pub mod components;
pub mod logger;
pub mod projectile;

// Re-export базовых типов для удобства
pub use boss::{
    AttackKind, AttackStarted, Boss, BossConfig, BossDefeated, BossHit, BossOutput, BossPlugin, BossSignal, BossSnapshot,
    BossState, HitResult, MeleeSwing, Phase, PhaseTransitionEnded, PhaseTransitionStarted, PlayerDamaged,
    ResetMatch,
};
pub use components::*;
pub use logger::{log, log_error, log_info, log_warning};
pub use projectile::{Projectile, ProjectileSpawned, ProjectileSpec};

/// Частота симуляции (тиков в секунду)
pub const TICK_RATE: f64 = 60.0;

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz: скорости снарядов заданы в units/tick
            .insert_resource(Time::<Fixed>::from_hz(TICK_RATE))
            // Детерминистичный RNG (seed по умолчанию, если host не вставил свой)
            .init_resource::<DeterministicRng>()
            .add_plugins(BossPlugin);
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время двигается вручную на один fixed tick за `app.update()`,
/// так что прогон не зависит от wall clock.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(TICK_RATE))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / TICK_RATE,
        )));

    app
}

/// Snapshot матча для сравнения детерминизма
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub bosses: Vec<BossSnapshot>,
    /// Позиции живых снарядов (x, y), в порядке Entity index
    pub projectiles: Vec<(f32, f32)>,
}

pub fn match_snapshot(world: &mut World) -> MatchSnapshot {
    let mut boss_query = world.query::<(Entity, &Boss)>();
    let mut bosses: Vec<_> = boss_query.iter(world).collect();
    // Сортируем по Entity ID для детерминизма
    bosses.sort_by_key(|(entity, _)| entity.index());
    let bosses = bosses.into_iter().map(|(_, boss)| boss.snapshot()).collect();

    let mut projectile_query = world.query::<(Entity, &Projectile)>();
    let mut projectiles: Vec<_> = projectile_query.iter(world).collect();
    projectiles.sort_by_key(|(entity, _)| entity.index());
    let projectiles = projectiles
        .into_iter()
        .map(|(_, p)| (p.position.x, p.position.y))
        .collect();

    MatchSnapshot { bosses, projectiles }
}
