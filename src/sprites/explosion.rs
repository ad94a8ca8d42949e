use glam::Vec2;

use crate::engine::{Region, Surface};
use crate::sprite::{Destroyable, Drawable, Pooled, Sprite, Updatable};

/// Seconds per animation frame.
const ANIMATE_INTERVAL: f32 = 0.017;

/// One-shot explosion.  Destroys itself after its last frame.
#[derive(Clone, Debug)]
pub struct Explosion {
    sprite: Sprite,
    timer: f32,
}

impl Explosion {
    pub fn set(&mut self, pos: Vec2, height: f32) {
        self.sprite.frame = 0;
        self.sprite.set_height_proportion(height);
        self.sprite.rect.pos = pos;
        self.timer = 0.0;
    }

    pub fn frame(&self) -> usize {
        self.sprite.frame
    }

    pub fn pos(&self) -> Vec2 {
        self.sprite.pos()
    }

    pub fn height(&self) -> f32 {
        self.sprite.rect.height()
    }
}

impl Updatable for Explosion {
    fn update(&mut self, delta: f32) {
        if self.sprite.is_destroyed() {
            return;
        }
        self.timer += delta;
        if self.timer >= ANIMATE_INTERVAL {
            self.timer = 0.0;
            self.sprite.frame += 1;
            if self.sprite.frame >= self.sprite.region.frames() {
                self.sprite.frame = self.sprite.region.frames() - 1;
                self.sprite.destroy();
            }
        }
    }
}

impl Drawable for Explosion {
    fn draw(&self, surface: &mut dyn Surface) {
        self.sprite.draw(surface);
    }
}

impl Destroyable for Explosion {
    fn is_destroyed(&self) -> bool {
        self.sprite.is_destroyed()
    }

    fn destroy(&mut self) -> bool {
        self.sprite.destroy()
    }
}

impl Pooled for Explosion {
    fn inactive() -> Self {
        Self {
            sprite: Sprite::new(Region::Explosion),
            timer: 0.0,
        }
    }

    fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    fn flush_destroy(&mut self) {
        self.sprite.flush_destroy();
    }
}
