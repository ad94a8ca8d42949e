use glam::Vec2;

use crate::engine::{Region, Sound, Surface};
use crate::math::Rect;
use crate::pool::Handle;
use crate::sprite::{Destroyable, Drawable, Pooled, Sprite, Updatable};

/// Which side fired a bullet.  Decides the collision group it can damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Owner {
    MainShip,
    /// Slot of the enemy that fired, for attribution only.  The slot may
    /// have been reissued by the time the bullet lands.
    Enemy(Handle),
}

/// Everything a ship needs to fire: bullet look, velocity, damage and the
/// sound played per shot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gun {
    pub region: Region,
    pub v: Vec2,
    pub height: f32,
    pub damage: i32,
    pub sound: Sound,
}

#[derive(Clone, Debug)]
pub struct Bullet {
    sprite: Sprite,
    v: Vec2,
    damage: i32,
    owner: Owner,
    world_bounds: Rect,
}

impl Bullet {
    pub fn set(&mut self, owner: Owner, gun: &Gun, pos: Vec2, world_bounds: &Rect) {
        self.sprite.region = gun.region;
        self.sprite.frame = 0;
        self.sprite.set_height_proportion(gun.height);
        self.sprite.rect.pos = pos;
        self.v = gun.v;
        self.damage = gun.damage;
        self.owner = owner;
        self.world_bounds = *world_bounds;
    }

    pub fn owner(&self) -> Owner {
        self.owner
    }

    pub fn damage(&self) -> i32 {
        self.damage
    }

    pub fn v(&self) -> Vec2 {
        self.v
    }

    pub fn rect(&self) -> &Rect {
        &self.sprite.rect
    }

    pub fn pos(&self) -> Vec2 {
        self.sprite.pos()
    }

    /// Move the bullet, e.g. to stage a collision.
    pub fn set_pos(&mut self, pos: Vec2) {
        self.sprite.rect.pos = pos;
    }
}

impl Updatable for Bullet {
    fn update(&mut self, delta: f32) {
        self.sprite.rect.pos += self.v * delta;
        if self.sprite.rect.is_outside(&self.world_bounds) {
            self.sprite.destroy();
        }
    }
}

impl Drawable for Bullet {
    fn draw(&self, surface: &mut dyn Surface) {
        self.sprite.draw(surface);
    }
}

impl Destroyable for Bullet {
    fn is_destroyed(&self) -> bool {
        self.sprite.is_destroyed()
    }

    fn destroy(&mut self) -> bool {
        self.sprite.destroy()
    }
}

impl Pooled for Bullet {
    fn inactive() -> Self {
        Self {
            sprite: Sprite::new(Region::BulletMainShip),
            v: Vec2::ZERO,
            damage: 0,
            owner: Owner::MainShip,
            world_bounds: Rect::default(),
        }
    }

    fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    fn flush_destroy(&mut self) {
        self.sprite.flush_destroy();
    }
}
