//! Enemy spawn scheduler.
//!
//! Accumulates frame time and, whenever the accumulator reaches the current
//! interval, asks the enemy pool for one more ship.  The overshoot is carried
//! into the next interval so the long-run spawn rate does not drift with the
//! frame rate.  There is no cap: enemies keep the pool bounded by leaving the
//! screen or dying.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::EmitterSettings;
use crate::math::{rnd_float, Rect};
use crate::pool::Handle;
use crate::pools::EnemyPool;
use crate::sprite::Resizable;

pub struct EnemyEmitter {
    settings: EmitterSettings,
    world_bounds: Rect,
    timer: f32,
    interval: f32,
    level: u32,
}

impl EnemyEmitter {
    pub fn new(settings: EmitterSettings) -> Self {
        let interval = settings.interval_max;
        Self {
            settings,
            world_bounds: Rect::default(),
            timer: 0.0,
            interval,
            level: 1,
        }
    }

    /// Advance by `delta` seconds and spawn at most one enemy.
    pub fn generate(
        &mut self,
        delta: f32,
        frags: u32,
        enemies: &mut EnemyPool,
        rng: &mut impl Rng,
    ) -> Option<Handle> {
        self.level = frags.checked_div(self.settings.frags_per_level).unwrap_or(0) + 1;
        self.timer += delta;
        if self.timer < self.interval {
            return None;
        }
        self.timer -= self.interval;
        self.interval = rnd_float(rng, self.settings.interval_min, self.settings.interval_max);

        let template = self
            .settings
            .templates
            .choose_weighted(rng, |t| t.weight)
            .ok()?;

        let half_width = template.half_width();
        let world = &self.world_bounds;
        let x = rnd_float(rng, world.left() + half_width, world.right() - half_width);
        let bullet_damage = template.damage * self.level as i32;

        let (handle, enemy) = enemies.obtain();
        enemy.set(template, bullet_damage, x, world);
        tracing::debug!(
            slot = handle.index(),
            kind = ?template.kind,
            level = self.level,
            "enemy spawned"
        );
        Some(handle)
    }

    /// Start over from an empty accumulator, for a new game.
    pub fn reset(&mut self) {
        self.timer = 0.0;
        self.interval = self.settings.interval_max;
        self.level = 1;
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Seconds accumulated towards the next spawn.
    pub fn timer(&self) -> f32 {
        self.timer
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }
}

impl Resizable for EnemyEmitter {
    fn resize(&mut self, world_bounds: &Rect) {
        self.world_bounds = *world_bounds;
    }
}
