//! Boss systems (FixedUpdate)

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::config::BossConfig;
use super::events::*;
use super::machine::{Boss, BossOutput, BossSignal, HitResult};
use crate::components::{Arena, PlayerState};
use crate::projectile::{Projectile, ProjectileSpawned};
use crate::DeterministicRng;

/// Все writer'ы сигналов босса одним параметром
#[derive(SystemParam)]
pub struct BossSignalWriters<'w> {
    attack_started: EventWriter<'w, AttackStarted>,
    melee_swing: EventWriter<'w, MeleeSwing>,
    player_damaged: EventWriter<'w, PlayerDamaged>,
    transition_started: EventWriter<'w, PhaseTransitionStarted>,
    transition_ended: EventWriter<'w, PhaseTransitionEnded>,
}

/// Startup: спавн босса из BossConfig + Arena
///
/// Невалидный config логируется и заменяется дефолтным.
pub fn spawn_boss(mut commands: Commands, config: Res<BossConfig>, arena: Res<Arena>) {
    let config = match config.validate() {
        Ok(()) => config.clone(),
        Err(err) => {
            crate::logger::log_error(&format!("Invalid BossConfig ({}), falling back to defaults", err));
            BossConfig::default()
        }
    };

    let boss = commands.spawn(Boss::new(config, &arena)).id();
    crate::logger::log(&format!("Boss spawned: {:?}", boss));
}

/// Система: ResetMatch → boss.reset() + очистка снарядов
pub fn reset_match(
    mut commands: Commands,
    mut resets: EventReader<ResetMatch>,
    mut bosses: Query<&mut Boss>,
    projectiles: Query<Entity, With<Projectile>>,
) {
    if resets.read().count() == 0 {
        return;
    }

    for mut boss in bosses.iter_mut() {
        boss.reset();
    }
    for entity in projectiles.iter() {
        commands.entity(entity).despawn();
    }
}

/// Система: тик state machine босса
///
/// Читает PlayerState (host обновляет до FixedUpdate), снаряды → ProjectileSpawned,
/// сигналы → соответствующие events.
pub fn tick_boss(
    mut bosses: Query<(Entity, &mut Boss)>,
    player: Res<PlayerState>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
    mut output: Local<BossOutput>,
    mut spawned: EventWriter<ProjectileSpawned>,
    mut writers: BossSignalWriters,
) {
    let delta = time.delta_secs();

    for (entity, mut boss) in bosses.iter_mut() {
        output.clear();
        boss.update(&player, delta, &mut rng.rng, &mut output);

        for spec in output.projectiles.iter() {
            spawned.write(ProjectileSpawned { spec: *spec });
        }

        for signal in output.signals.iter() {
            match *signal {
                BossSignal::IntroComplete => {}
                BossSignal::AttackStarted(attack) => {
                    writers.attack_started.write(AttackStarted { boss: entity, attack });
                }
                BossSignal::MeleeSwing => {
                    writers.melee_swing.write(MeleeSwing {
                        boss: entity,
                        position: boss.position(),
                    });
                }
                BossSignal::PlayerDamaged => {
                    writers.player_damaged.write(PlayerDamaged { boss: entity });
                }
                BossSignal::PhaseTransitionStarted => {
                    writers.transition_started.write(PhaseTransitionStarted { boss: entity });
                }
                BossSignal::PhaseTransitionEnded => {
                    writers.transition_ended.write(PhaseTransitionEnded { boss: entity });
                }
            }
        }
    }
}

/// Система: BossHit → take_damage, BossDefeated на добивающем попадании
pub fn apply_boss_hits(
    mut hits: EventReader<BossHit>,
    mut bosses: Query<&mut Boss>,
    mut defeated: EventWriter<BossDefeated>,
) {
    for hit in hits.read() {
        let Ok(mut boss) = bosses.get_mut(hit.boss) else {
            crate::logger::log_warning(&format!("BossHit: {:?} is not a boss", hit.boss));
            continue;
        };

        if boss.take_damage() == HitResult::Defeated {
            defeated.write(BossDefeated { boss: hit.boss });
        }
    }
}
