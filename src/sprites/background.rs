use crate::engine::{Region, Surface};
use crate::math::Rect;
use crate::sprite::{Drawable, Resizable, Sprite};

/// Full-world backdrop.
#[derive(Clone, Debug)]
pub struct Background {
    sprite: Sprite,
}

impl Background {
    pub fn new() -> Self {
        Self {
            sprite: Sprite::new(Region::Background),
        }
    }

    pub fn rect(&self) -> &Rect {
        &self.sprite.rect
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::new()
    }
}

impl Resizable for Background {
    fn resize(&mut self, world_bounds: &Rect) {
        self.sprite.rect = *world_bounds;
    }
}

impl Drawable for Background {
    fn draw(&self, surface: &mut dyn Surface) {
        self.sprite.draw(surface);
    }
}
