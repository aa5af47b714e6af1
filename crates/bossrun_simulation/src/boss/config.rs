//! Boss tuning: тайминги state machine по фазам, health, melee
//!
//! Константы паттернов (количество пуль, скорости, углы): в patterns.rs.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::Phase;

/// Значение, зависящее от фазы боя
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseValue<T> {
    pub phase1: T,
    pub phase2: T,
}

impl<T: Copy> PhaseValue<T> {
    pub const fn new(phase1: T, phase2: T) -> Self {
        Self { phase1, phase2 }
    }

    pub fn get(&self, phase: Phase) -> T {
        match phase {
            Phase::Phase1 => self.phase1,
            Phase::Phase2 => self.phase2,
        }
    }
}

/// Ошибка валидации BossConfig
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be positive (got {value})")]
    NonPositiveDuration { field: &'static str, value: f32 },

    #[error("{field} must be within [0, 1] (got {value})")]
    ProbabilityOutOfRange { field: &'static str, value: f32 },

    #[error("phase threshold {threshold} must be below max health {max}")]
    InvalidHealth { max: u32, threshold: u32 },

    #[error("{field} must be non-zero")]
    ZeroCount { field: &'static str },
}

/// Параметры босса
///
/// Все длительности в секундах. Default: стандартный баланс боя.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossConfig {
    pub max_health: u32,
    pub damage_per_hit: u32,
    /// Health ≤ threshold → gauntlet → Phase2
    pub phase2_threshold: u32,
    pub radius: f32,

    // === Melee ===
    /// Melee range = radius + bonus
    pub melee_range_bonus: f32,
    pub melee_cooldown: f32,
    pub melee_flash_duration: f32,

    pub hit_flash_duration: f32,

    // === Intro ===
    pub intro_duration: f32,
    /// Y стартовой точки intro (x = центр арены)
    pub intro_start_y: f32,

    /// Idle: сдвиг к игроку за тик (units/tick, не масштабируется dt)
    pub idle_drift_per_tick: f32,

    // === Attacks ===
    pub spread_duration: PhaseValue<f32>,
    pub spread_cooldown: PhaseValue<f32>,
    /// Вероятность залпа за тик
    pub random_spread_chance: f32,
    pub wide_spread_chance: f32,
    pub charge_time: PhaseValue<f32>,
    pub charge_duration: PhaseValue<f32>,
    /// Cooldown после charge attack и particle division
    pub heavy_cooldown: PhaseValue<f32>,
    pub particle_division_duration: PhaseValue<f32>,
    /// Задержка от входа в ParticleDivision до зарядки углов
    pub particle_division_delay: f32,

    // === Gauntlet ===
    /// Пауза без активности перед стартом gauntlet таймера
    pub gauntlet_delay: f32,
    pub gauntlet_duration: f32,
    pub gauntlet_fire_interval: f32,
    /// Смена направления вращения колец
    pub gauntlet_switch_interval: f32,
    pub gauntlet_start_angle: f32,
    pub gauntlet_exit_cooldown: f32,
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            max_health: 700,
            damage_per_hit: 3,
            phase2_threshold: 350,
            radius: 40.0,

            melee_range_bonus: 30.0,
            melee_cooldown: 2.0,
            melee_flash_duration: 0.3,

            hit_flash_duration: 0.1,

            intro_duration: 3.0,
            intro_start_y: 50.0,

            idle_drift_per_tick: 1.0,

            spread_duration: PhaseValue::new(3.0, 2.0),
            spread_cooldown: PhaseValue::new(2.0, 1.5),
            random_spread_chance: 0.15,
            wide_spread_chance: 0.10,
            charge_time: PhaseValue::new(1.5, 1.0),
            charge_duration: PhaseValue::new(2.0, 1.5),
            heavy_cooldown: PhaseValue::new(3.0, 2.0),
            particle_division_duration: PhaseValue::new(6.0, 4.0),
            particle_division_delay: 3.0,

            gauntlet_delay: 2.0,
            gauntlet_duration: 10.0,
            gauntlet_fire_interval: 0.2,
            gauntlet_switch_interval: 2.0,
            gauntlet_start_angle: 30.0,
            gauntlet_exit_cooldown: 3.0,
        }
    }
}

impl BossConfig {
    /// Melee дистанция (центр-центр)
    pub fn melee_range(&self) -> f32 {
        self.radius + self.melee_range_bonus
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_health == 0 {
            return Err(ConfigError::ZeroCount { field: "max_health" });
        }
        if self.damage_per_hit == 0 {
            return Err(ConfigError::ZeroCount { field: "damage_per_hit" });
        }
        if self.phase2_threshold >= self.max_health {
            return Err(ConfigError::InvalidHealth {
                max: self.max_health,
                threshold: self.phase2_threshold,
            });
        }

        let durations = [
            ("intro_duration", self.intro_duration),
            ("melee_cooldown", self.melee_cooldown),
            ("melee_flash_duration", self.melee_flash_duration),
            ("hit_flash_duration", self.hit_flash_duration),
            ("spread_duration.phase1", self.spread_duration.phase1),
            ("spread_duration.phase2", self.spread_duration.phase2),
            ("charge_duration.phase1", self.charge_duration.phase1),
            ("charge_duration.phase2", self.charge_duration.phase2),
            ("particle_division_duration.phase1", self.particle_division_duration.phase1),
            ("particle_division_duration.phase2", self.particle_division_duration.phase2),
            ("gauntlet_duration", self.gauntlet_duration),
            ("gauntlet_fire_interval", self.gauntlet_fire_interval),
            ("gauntlet_switch_interval", self.gauntlet_switch_interval),
        ];
        for (field, value) in durations {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositiveDuration { field, value });
            }
        }

        let chances = [
            ("random_spread_chance", self.random_spread_chance),
            ("wide_spread_chance", self.wide_spread_chance),
        ];
        for (field, value) in chances {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange { field, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = BossConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.melee_range(), 70.0);
        assert_eq!(config.spread_duration.get(Phase::Phase2), 2.0);
        assert_eq!(config.heavy_cooldown.get(Phase::Phase1), 3.0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = BossConfig {
            phase2_threshold: 700,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidHealth { max: 700, threshold: 700 })
        );

        let config = BossConfig {
            gauntlet_fire_interval: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositiveDuration { field: "gauntlet_fire_interval", .. })
        ));

        let config = BossConfig {
            wide_spread_chance: 1.5,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "wide_spread_chance must be within [0, 1] (got 1.5)");

        let config = BossConfig {
            damage_per_hit: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroCount { field: "damage_per_hit" }));
    }

    #[test]
    fn test_config_json_round_trip() {
        let mut config = BossConfig::default();
        config.charge_time = PhaseValue::new(2.0, 0.5);

        let json = serde_json::to_string(&config).unwrap();
        let restored: BossConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, config);
    }
}
