//! Base sprite state and the capability traits every entity kind composes.

use glam::Vec2;

use crate::engine::{Region, Surface};
use crate::math::Rect;

// ── Capabilities ─────────────────────────────────────────────────────────────

pub trait Updatable {
    fn update(&mut self, delta: f32);
}

pub trait Drawable {
    fn draw(&self, surface: &mut dyn Surface);
}

pub trait Resizable {
    fn resize(&mut self, world_bounds: &Rect);
}

pub trait Destroyable {
    fn is_destroyed(&self) -> bool;

    /// Mark as destroyed.  Returns `true` only on the call that flips the
    /// flag; callers gate one-shot side effects on it.
    fn destroy(&mut self) -> bool;
}

/// An entity kind that can live in a [`Pool`](crate::pool::Pool).
pub trait Pooled: Destroyable + Drawable {
    /// A blank, inactive instance.  The caller of `obtain` re-initialises it.
    fn inactive() -> Self;

    fn sprite(&self) -> &Sprite;

    /// Clear the destroyed flag so a reclaimed slot can be reissued.
    fn flush_destroy(&mut self);
}

// ── Sprite ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub rect: Rect,
    pub region: Region,
    pub frame: usize,
    destroyed: bool,
}

impl Sprite {
    pub fn new(region: Region) -> Self {
        Self {
            rect: Rect::default(),
            region,
            frame: 0,
            destroyed: false,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.rect.pos
    }

    pub fn half_width(&self) -> f32 {
        self.rect.half_width
    }

    pub fn half_height(&self) -> f32 {
        self.rect.half_height
    }

    /// Set the height and derive the width from the region aspect ratio.
    pub fn set_height_proportion(&mut self, height: f32) {
        self.rect.set_height(height);
        self.rect.set_width(height * self.region.aspect());
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn destroy(&mut self) -> bool {
        let first = !self.destroyed;
        self.destroyed = true;
        first
    }

    pub fn flush_destroy(&mut self) {
        self.destroyed = false;
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.draw(self.region, self.frame, &self.rect);
    }
}
