use glam::Vec2;
use rand::Rng;

use crate::engine::{Region, Surface};
use crate::math::{rnd_float, Rect};
use crate::sprite::{Drawable, Sprite, Updatable};

const PULSE_STEP: f32 = 0.0001;
const PULSE_MAX: f32 = 0.012;
const PULSE_RESET: f32 = 0.008;

/// A drifting, twinkling background star.  Wraps around the world edges.
#[derive(Clone, Debug)]
pub struct Star {
    sprite: Sprite,
    v: Vec2,
    world_bounds: Rect,
}

impl Star {
    pub fn new(rng: &mut impl Rng) -> Self {
        let vx = rnd_float(rng, -0.0005, 0.0005);
        let vy = rnd_float(rng, -0.1, -0.05);
        Self {
            sprite: Sprite::new(Region::Star),
            v: Vec2::new(vx, vy),
            world_bounds: Rect::default(),
        }
    }

    /// Scatter the star somewhere inside the new bounds with a new size.
    pub fn resize(&mut self, world_bounds: &Rect, rng: &mut impl Rng) {
        self.world_bounds = *world_bounds;
        self.sprite.set_height_proportion(rnd_float(rng, 0.005, 0.013));
        let x = rnd_float(rng, world_bounds.left(), world_bounds.right());
        let y = rnd_float(rng, world_bounds.bottom(), world_bounds.top());
        self.sprite.rect.pos = Vec2::new(x, y);
    }

    pub fn rect(&self) -> &Rect {
        &self.sprite.rect
    }

    pub fn v(&self) -> Vec2 {
        self.v
    }

    pub fn set_pos(&mut self, pos: Vec2) {
        self.sprite.rect.pos = pos;
    }

    fn check_bounds(&mut self) {
        let world = self.world_bounds;
        let rect = &mut self.sprite.rect;
        if rect.right() < world.left() {
            rect.set_left(world.right());
        }
        if rect.left() > world.right() {
            rect.set_right(world.left());
        }
        if rect.top() < world.bottom() {
            rect.set_bottom(world.top());
        }
        if rect.bottom() > world.top() {
            rect.set_top(world.bottom());
        }
    }

    fn animate(&mut self) {
        let mut height = self.sprite.rect.height() + PULSE_STEP;
        if height >= PULSE_MAX {
            height = PULSE_RESET;
        }
        self.sprite.set_height_proportion(height);
    }
}

impl Updatable for Star {
    fn update(&mut self, delta: f32) {
        self.sprite.rect.pos += self.v * delta;
        self.check_bounds();
        self.animate();
    }
}

impl Drawable for Star {
    fn draw(&self, surface: &mut dyn Surface) {
        self.sprite.draw(surface);
    }
}
