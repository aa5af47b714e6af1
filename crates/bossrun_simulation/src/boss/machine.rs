//! Boss State Machine
//!
//! Владеет health, фазой, таймерами и решает, какую атаку запускать.
//! Host вызывает `update` раз в тик (игрок → босс → melee урон игроку),
//! попадания пуль игрока приходят через `take_damage` между тиками.
//!
//! Порядок внутри тика:
//! 1. Intro (иммунитет, easing к центру): остальное пропускается
//! 2. Проверка порога фазы → старт gauntlet (один раз)
//! 3. Transition: пауза, затем gauntlet кольца: остальное пропускается
//! 4. Таймеры → логика текущего состояния
//! 5. Melee проверка, hit flash, выпуск отложенных волн

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::config::BossConfig;
use super::corners::{CornerDivision, CornerParticle};
use super::patterns;
use super::state::{AttackBag, AttackKind, BossState, Phase};
use super::waves::WaveScheduler;
use crate::components::{Arena, PlayerState, Rgb};
use crate::projectile::ProjectileSpec;

/// Сигналы тика для host (звук, тряска экрана, UI)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossSignal {
    IntroComplete,
    AttackStarted(AttackKind),
    /// Melee замах (игрок в радиусе, не в перекате)
    MeleeSwing,
    /// Melee попал (игрок без i-frames)
    PlayerDamaged,
    PhaseTransitionStarted,
    PhaseTransitionEnded,
}

/// Выход одного тика: новые снаряды + сигналы
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BossOutput {
    pub projectiles: Vec<ProjectileSpec>,
    pub signals: Vec<BossSignal>,
}

impl BossOutput {
    pub fn clear(&mut self) {
        self.projectiles.clear();
        self.signals.clear();
    }

    pub fn has_signal(&self, signal: BossSignal) -> bool {
        self.signals.contains(&signal)
    }
}

/// Результат попадания пули игрока
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitResult {
    /// Иммунитет (intro, transition) или босс уже побеждён
    Ignored,
    Damaged,
    /// Это попадание довело health до 0 (ровно один раз за матч)
    Defeated,
}

/// Таймеры gauntlet интермиссии
#[derive(Debug, Clone, Copy, PartialEq)]
struct GauntletTimers {
    remaining: f32,
    fire_timer: f32,
    switch_timer: f32,
    angle: f32,
    /// +1 / -1
    direction: f32,
}

impl GauntletTimers {
    fn idle() -> Self {
        Self {
            remaining: 0.0,
            fire_timer: 0.0,
            switch_timer: 0.0,
            angle: 0.0,
            direction: 1.0,
        }
    }

    fn start(config: &BossConfig) -> Self {
        Self {
            remaining: config.gauntlet_duration,
            fire_timer: 0.0,
            switch_timer: config.gauntlet_switch_interval,
            angle: config.gauntlet_start_angle,
            direction: 1.0,
        }
    }
}

/// Наблюдаемое состояние босса (determinism тесты, save/replay)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossSnapshot {
    pub x: f32,
    pub y: f32,
    pub health: u32,
    pub state: BossState,
    pub phase: Phase,
    pub remaining_attacks: Vec<AttackKind>,
    pub transitioning: bool,
    pub defeated: bool,
    pub pending_waves: usize,
    pub color: Rgb,
}

/// Босс арены
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Boss {
    config: BossConfig,
    center: Vec2,
    intro_start: Vec2,

    position: Vec2,
    health: u32,
    state: BossState,
    phase: Phase,
    bag: AttackBag,

    intro_timer: f32,
    state_timer: f32,
    /// Полная длительность текущего состояния (для ParticleDivision delay)
    state_duration: f32,
    attack_cooldown: f32,
    charge_timer: f32,
    exploded: bool,
    division_armed: bool,
    melee_cooldown: f32,
    melee_flash: f32,
    hit_flash: f32,
    display_color: Rgb,

    transitioning: bool,
    threshold_hit: bool,
    intermission_delay: f32,
    gauntlet: GauntletTimers,

    waves: WaveScheduler,
    corners: CornerDivision,
    defeated: bool,
}

impl Boss {
    pub const BASE_COLOR: Rgb = Rgb::PURPLE;

    pub fn new(config: BossConfig, arena: &Arena) -> Self {
        let center = arena.center();
        let intro_start = Vec2::new(center.x, config.intro_start_y);

        Self {
            health: config.max_health,
            intro_timer: config.intro_duration,
            config,
            center,
            intro_start,

            position: intro_start,
            state: BossState::Intro,
            phase: Phase::Phase1,
            bag: AttackBag::default(),

            state_timer: 0.0,
            state_duration: 0.0,
            attack_cooldown: 0.0,
            charge_timer: 0.0,
            exploded: false,
            division_armed: false,
            melee_cooldown: 0.0,
            melee_flash: 0.0,
            hit_flash: 0.0,
            display_color: Self::BASE_COLOR,

            transitioning: false,
            threshold_hit: false,
            intermission_delay: 0.0,
            gauntlet: GauntletTimers::idle(),

            waves: WaveScheduler::new(),
            corners: CornerDivision::new(arena.corner_anchors()),
            defeated: false,
        }
    }

    /// Вернуть босса в начальное состояние (новый матч), без переаллокации
    pub fn reset(&mut self) {
        self.position = self.intro_start;
        self.health = self.config.max_health;
        self.state = BossState::Intro;
        self.phase = Phase::Phase1;
        self.bag.refill();

        self.intro_timer = self.config.intro_duration;
        self.state_timer = 0.0;
        self.state_duration = 0.0;
        self.attack_cooldown = 0.0;
        self.charge_timer = 0.0;
        self.exploded = false;
        self.division_armed = false;
        self.melee_cooldown = 0.0;
        self.melee_flash = 0.0;
        self.hit_flash = 0.0;
        self.display_color = Self::BASE_COLOR;

        self.transitioning = false;
        self.threshold_hit = false;
        self.intermission_delay = 0.0;
        self.gauntlet = GauntletTimers::idle();

        self.waves.clear();
        self.corners.disarm();
        self.defeated = false;

        crate::logger::log("Boss reset");
    }

    /// Один тик симуляции
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        player: &PlayerState,
        dt: f32,
        rng: &mut R,
        out: &mut BossOutput,
    ) {
        if self.defeated {
            return;
        }

        if self.state == BossState::Intro {
            self.tick_intro(dt, out);
            return;
        }

        if !self.threshold_hit && self.phase == Phase::Phase1 && self.health <= self.config.phase2_threshold {
            self.threshold_hit = true;
            if self.state != BossState::Gauntlet {
                self.start_gauntlet(out);
                return;
            }
        }

        if self.transitioning {
            // Вспышки гаснут и в паузе, melee cooldown заморожен
            self.tick_hit_flash(dt);
            self.tick_melee_flash(dt);
            if self.intermission_delay > 0.0 {
                self.intermission_delay -= dt;
                return;
            }
            self.tick_gauntlet(dt, out);
            return;
        }

        self.state_timer = (self.state_timer - dt).max(0.0);
        self.attack_cooldown = (self.attack_cooldown - dt).max(0.0);
        if self.melee_cooldown > 0.0 {
            self.melee_cooldown -= dt;
        }
        self.tick_melee_flash(dt);

        match self.state {
            BossState::Idle => {
                if let Some(direction) = (player.position - self.position).try_normalize() {
                    self.position += direction * self.config.idle_drift_per_tick;
                }
                if self.attack_cooldown <= 0.0 {
                    self.choose_attack(rng, out);
                }
            }
            BossState::RandomSpread => {
                if self.state_timer <= 0.0 {
                    self.finish_attack(self.config.spread_cooldown.get(self.phase));
                } else if rng.gen::<f32>() < self.config.random_spread_chance {
                    out.projectiles
                        .extend(patterns::random_spread(self.position, self.phase, rng));
                }
            }
            BossState::WideSpread => {
                if self.state_timer <= 0.0 {
                    self.finish_attack(self.config.spread_cooldown.get(self.phase));
                } else if rng.gen::<f32>() < self.config.wide_spread_chance {
                    out.projectiles
                        .extend(patterns::wide_spread(self.position, player.position, self.phase));
                }
            }
            BossState::ChargeAttack => {
                if self.charge_timer > 0.0 {
                    self.charge_timer -= dt;
                } else {
                    if !self.exploded {
                        self.waves
                            .enqueue(patterns::charge_explosion(self.position, self.phase));
                        self.exploded = true;
                    }
                    if self.state_timer <= 0.0 {
                        self.finish_attack(self.config.heavy_cooldown.get(self.phase));
                    }
                }
            }
            BossState::ParticleDivision => self.tick_particle_division(dt, rng, out),
            // Intro и Gauntlet обрабатываются выше
            BossState::Intro | BossState::Gauntlet => {}
        }

        self.check_melee(player, out);
        self.tick_hit_flash(dt);
        self.waves.advance(dt, &mut out.projectiles);
    }

    /// Попадание пули игрока
    pub fn take_damage(&mut self) -> HitResult {
        if self.defeated || self.is_immune() {
            return HitResult::Ignored;
        }

        self.hit_flash = self.config.hit_flash_duration;
        self.health = self.health.saturating_sub(self.config.damage_per_hit);

        if self.health == 0 {
            self.defeated = true;
            // Победный экран не должен видеть заряженные углы
            self.corners.disarm();
            crate::logger::log_info("Boss defeated!");
            return HitResult::Defeated;
        }

        HitResult::Damaged
    }

    fn tick_intro(&mut self, dt: f32, out: &mut BossOutput) {
        self.intro_timer -= dt;

        let progress = (1.0 - self.intro_timer / self.config.intro_duration).clamp(0.0, 1.0);
        let eased = progress * progress * (3.0 - 2.0 * progress);
        self.position = self.intro_start.lerp(self.center, eased);

        if self.intro_timer <= 0.0 {
            self.state = BossState::Idle;
            self.position = self.center;
            out.signals.push(BossSignal::IntroComplete);
            crate::logger::log_info("Boss intro complete - fight begins!");
        }
    }

    fn choose_attack<R: Rng + ?Sized>(&mut self, rng: &mut R, out: &mut BossOutput) {
        if self.attack_cooldown > 0.0 {
            return;
        }

        let draw = self.bag.draw(rng);
        if draw.refilled {
            crate::logger::log("Resetting attack pool!");
        }
        crate::logger::log(&format!(
            "Chose attack: {:?}. Remaining attacks: {:?}",
            draw.attack,
            self.bag.remaining()
        ));

        let phase = self.phase;
        self.state = BossState::from(draw.attack);
        self.state_timer = match draw.attack {
            AttackKind::RandomSpread | AttackKind::WideSpread => self.config.spread_duration.get(phase),
            AttackKind::ChargeAttack => {
                self.charge_timer = self.config.charge_time.get(phase);
                self.exploded = false;
                self.config.charge_duration.get(phase)
            }
            AttackKind::ParticleDivision => {
                self.division_armed = false;
                self.config.particle_division_duration.get(phase)
            }
        };
        self.state_duration = self.state_timer;

        out.signals.push(BossSignal::AttackStarted(draw.attack));
    }

    fn finish_attack(&mut self, cooldown: f32) {
        self.state = BossState::Idle;
        self.attack_cooldown = cooldown;
    }

    fn tick_particle_division<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R, out: &mut BossOutput) {
        let elapsed = self.state_duration - self.state_timer;
        if !self.division_armed && elapsed >= self.config.particle_division_delay {
            self.corners.arm(rng);
            self.division_armed = true;
        }

        let cooldown = self.config.heavy_cooldown.get(self.phase);
        if self.division_armed {
            // Истёкший state timer не обрывает взрывы: ждём последний угол
            if self.corners.tick(dt, self.phase, rng, &mut out.projectiles) {
                self.finish_attack(cooldown);
            }
        } else if self.state_timer <= 0.0 {
            self.finish_attack(cooldown);
        }
    }

    fn start_gauntlet(&mut self, out: &mut BossOutput) {
        self.transitioning = true;
        self.state = BossState::Gauntlet;
        self.position = self.center;
        self.gauntlet = GauntletTimers::start(&self.config);
        self.intermission_delay = self.config.gauntlet_delay;

        // Незавершённая атака отменяется целиком
        self.waves.clear();
        self.corners.disarm();

        out.signals.push(BossSignal::PhaseTransitionStarted);
        crate::logger::log_info(&format!(
            "Boss teleports to center and enters intermission gauntlet! Immune for {} seconds.",
            self.config.gauntlet_duration
        ));
    }

    fn tick_gauntlet(&mut self, dt: f32, out: &mut BossOutput) {
        let gauntlet = &mut self.gauntlet;
        gauntlet.remaining -= dt;
        gauntlet.fire_timer -= dt;
        gauntlet.switch_timer -= dt;

        if gauntlet.switch_timer <= 0.0 {
            gauntlet.direction = -gauntlet.direction;
            gauntlet.switch_timer = self.config.gauntlet_switch_interval;
        }

        if gauntlet.fire_timer <= 0.0 {
            out.projectiles
                .extend(patterns::gauntlet_rings(self.position, gauntlet.angle));
            gauntlet.angle = patterns::next_gauntlet_angle(gauntlet.angle, gauntlet.direction);
            gauntlet.fire_timer = self.config.gauntlet_fire_interval;
        }

        if gauntlet.remaining <= 0.0 {
            self.transitioning = false;
            self.phase = Phase::Phase2;
            self.state = BossState::Idle;
            self.attack_cooldown = self.config.gauntlet_exit_cooldown;
            out.signals.push(BossSignal::PhaseTransitionEnded);
            crate::logger::log_info("Phase 2 begins!");
        }
    }

    fn check_melee(&mut self, player: &PlayerState, out: &mut BossOutput) {
        let in_range = self.position.distance(player.position) < self.config.melee_range();
        if !in_range || player.rolling || self.melee_cooldown > 0.0 {
            return;
        }

        self.melee_cooldown = self.config.melee_cooldown;
        self.melee_flash = self.config.melee_flash_duration;
        out.signals.push(BossSignal::MeleeSwing);

        if !player.invulnerable {
            out.signals.push(BossSignal::PlayerDamaged);
            crate::logger::log("Boss melee swing hit the player");
        }
    }

    fn tick_melee_flash(&mut self, dt: f32) {
        if self.melee_flash > 0.0 {
            self.melee_flash = (self.melee_flash - dt).max(0.0);
        }
    }

    fn tick_hit_flash(&mut self, dt: f32) {
        if self.hit_flash > 0.0 {
            self.hit_flash = (self.hit_flash - dt).max(0.0);
        }

        self.display_color = if self.hit_flash > 0.0 {
            Self::BASE_COLOR.lerp(Rgb::WHITE, self.hit_flash / self.config.hit_flash_duration)
        } else {
            Self::BASE_COLOR
        };
    }

    // === Queries (рендер, UI, тесты) ===

    pub fn config(&self) -> &BossConfig {
        &self.config
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn radius(&self) -> f32 {
        self.config.radius
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    /// Доля health для health bar, [0, 1]
    pub fn health_fraction(&self) -> f32 {
        self.health as f32 / self.config.max_health as f32
    }

    pub fn state(&self) -> BossState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn display_color(&self) -> Rgb {
        self.display_color
    }

    pub fn melee_flash_active(&self) -> bool {
        self.melee_flash > 0.0
    }

    pub fn is_intro(&self) -> bool {
        self.state == BossState::Intro
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    /// Урон от пуль игнорируется
    pub fn is_immune(&self) -> bool {
        self.state == BossState::Intro || self.transitioning
    }

    pub fn in_gauntlet(&self) -> bool {
        self.state == BossState::Gauntlet
    }

    pub fn is_defeated(&self) -> bool {
        self.defeated
    }

    pub fn remaining_attacks(&self) -> &[AttackKind] {
        self.bag.remaining()
    }

    pub fn attack_cooldown(&self) -> f32 {
        self.attack_cooldown
    }

    pub fn pending_waves(&self) -> usize {
        self.waves.pending_len()
    }

    pub fn corners(&self) -> &[CornerParticle; 4] {
        self.corners.corners()
    }

    pub fn corners_pulsing(&self) -> bool {
        self.corners.is_pulsing()
    }

    pub fn snapshot(&self) -> BossSnapshot {
        BossSnapshot {
            x: self.position.x,
            y: self.position.y,
            health: self.health,
            state: self.state,
            phase: self.phase,
            remaining_attacks: self.bag.remaining().to_vec(),
            transitioning: self.transitioning,
            defeated: self.defeated,
            pending_waves: self.waves.pending_len(),
            color: self.display_color,
        }
    }
}
