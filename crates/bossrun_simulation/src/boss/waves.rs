//! Wave Scheduler: отложенный выпуск залпов
//!
//! Паттерн считается целиком в момент атаки (один проход RNG),
//! а пули выходят волнами по `fire_delay` относительно старта атаки.

use crate::projectile::ProjectileSpec;

/// Залп, ожидающий выпуска
#[derive(Debug, Clone, PartialEq)]
pub struct PendingWave {
    pub specs: Vec<ProjectileSpec>,
    /// Секунды от старта атаки
    pub fire_delay: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaveScheduler {
    pending: Vec<PendingWave>,
    elapsed: f32,
}

impl WaveScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Добавить волны и сбросить таймер (новая точка отсчёта)
    pub fn enqueue(&mut self, waves: impl IntoIterator<Item = PendingWave>) {
        self.pending.extend(waves);
        self.elapsed = 0.0;
    }

    /// Продвинуть таймер на `dt` и выпустить все созревшие волны в `sink`
    ///
    /// Волны выходят в порядке хранения. Возвращает число выпущенных волн.
    /// Пустой scheduler: no-op (таймер не идёт).
    pub fn advance(&mut self, dt: f32, sink: &mut Vec<ProjectileSpec>) -> usize {
        if self.pending.is_empty() {
            return 0;
        }

        self.elapsed += dt;
        let elapsed = self.elapsed;
        let mut flushed = 0;

        self.pending.retain(|wave| {
            if wave.fire_delay <= elapsed {
                sink.extend_from_slice(&wave.specs);
                flushed += 1;
                false
            } else {
                true
            }
        });

        if self.pending.is_empty() {
            self.elapsed = 0.0;
        }

        flushed
    }

    pub fn clear(&mut self) {
        self.pending.clear();
        self.elapsed = 0.0;
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}
