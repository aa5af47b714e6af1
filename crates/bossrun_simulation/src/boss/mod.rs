//! Boss module: state machine, паттерны атак, отложенные волны
//!
//! Чистая логика (Boss, patterns, WaveScheduler, CornerDivision) не зависит от App:
//! host может вызывать `Boss::update` напрямую. BossPlugin оборачивает её в ECS.

use bevy::prelude::*;

pub mod config;
pub mod corners;
pub mod events;
pub mod machine;
pub mod patterns;
pub mod state;
pub mod systems;
pub mod waves;

#[cfg(test)]
mod patterns_tests;

pub use config::{BossConfig, ConfigError, PhaseValue};
pub use corners::{CornerDivision, CornerParticle};
pub use events::*;
pub use machine::{Boss, BossOutput, BossSignal, BossSnapshot, HitResult};
pub use state::{AttackBag, AttackDraw, AttackKind, BossState, Phase};
pub use waves::{PendingWave, WaveScheduler};

use crate::components::{Arena, PlayerState};
use crate::projectile::{self, ProjectileSpawned};

/// Boss Plugin
///
/// Регистрирует boss системы в FixedUpdate для детерминизма.
/// Порядок выполнения:
/// 1. reset_match: ResetMatch от host
/// 2. tick_boss: state machine → ProjectileSpawned + сигналы
/// 3. apply_boss_hits: попадания пуль игрока (после тика, как в host loop)
/// 4. spawn_projectiles: ProjectileSpawned → entities
/// 5. move_projectiles: движение + culling
pub struct BossPlugin;

impl Plugin for BossPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<BossHit>()
            .add_event::<ResetMatch>()
            .add_event::<AttackStarted>()
            .add_event::<MeleeSwing>()
            .add_event::<PlayerDamaged>()
            .add_event::<PhaseTransitionStarted>()
            .add_event::<PhaseTransitionEnded>()
            .add_event::<BossDefeated>()
            .add_event::<ProjectileSpawned>();

        // init_resource не перетирает то, что host вставил заранее
        app.init_resource::<BossConfig>()
            .init_resource::<Arena>()
            .init_resource::<PlayerState>();

        app.add_systems(Startup, systems::spawn_boss);
        app.add_systems(
            FixedUpdate,
            (
                systems::reset_match,
                systems::tick_boss,
                systems::apply_boss_hits,
                projectile::spawn_projectiles,
                projectile::move_projectiles,
            )
                .chain(), // Последовательное выполнение для детерминизма
        );
    }
}
