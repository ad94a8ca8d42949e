//! State shared by the main ship and enemy ships.

use glam::Vec2;

use crate::engine::{Audio, Region, Sound, Surface};
use crate::math::Rect;
use crate::pool::Handle;
use crate::pools::BulletPool;
use crate::sprite::Sprite;

use super::bullet::{Gun, Owner};

/// Seconds the damage frame stays up after a hit.
const DAMAGE_FLASH: f32 = 0.1;

#[derive(Clone, Debug)]
pub struct Ship {
    pub sprite: Sprite,
    pub v: Vec2,
    pub gun: Gun,
    pub hp: i32,
    /// Damage dealt on body contact.
    pub damage: i32,
    pub reload_interval: f32,
    pub reload_timer: f32,
    pub world_bounds: Rect,
    flash_timer: f32,
}

impl Ship {
    pub fn new(region: Region, gun: Gun) -> Self {
        Self {
            sprite: Sprite::new(region),
            v: Vec2::ZERO,
            gun,
            hp: 0,
            damage: 0,
            reload_interval: 0.0,
            reload_timer: 0.0,
            world_bounds: Rect::default(),
            flash_timer: 0.0,
        }
    }

    pub fn rect(&self) -> &Rect {
        &self.sprite.rect
    }

    pub fn pos(&self) -> Vec2 {
        self.sprite.pos()
    }

    pub fn is_destroyed(&self) -> bool {
        self.sprite.is_destroyed()
    }

    pub fn destroy(&mut self) -> bool {
        self.sprite.destroy()
    }

    /// Advance the reload timer.  Returns `true` when the gun is ready, and
    /// restarts the timer.
    pub fn reload(&mut self, delta: f32) -> bool {
        self.reload_timer += delta;
        if self.reload_timer >= self.reload_interval {
            self.reload_timer = 0.0;
            true
        } else {
            false
        }
    }

    pub fn shoot(
        &mut self,
        owner: Owner,
        muzzle: Vec2,
        bullets: &mut BulletPool,
        audio: &mut dyn Audio,
    ) -> Handle {
        audio.play(self.gun.sound);
        bullets.fire(owner, &self.gun, muzzle, &self.world_bounds)
    }

    /// Drop back to the normal frame once the flash has run out.
    pub fn tick_flash(&mut self, delta: f32) {
        if self.flash_timer > 0.0 {
            self.flash_timer -= delta;
            if self.flash_timer <= 0.0 {
                self.flash_timer = 0.0;
                self.sprite.frame = 0;
            }
        }
    }

    /// Apply `amount` damage.  Returns `true` only on the hit that destroys
    /// the ship; a destroyed ship ignores further damage.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if self.is_destroyed() {
            return false;
        }
        self.hp -= amount;
        self.sprite.frame = 1;
        self.flash_timer = DAMAGE_FLASH;
        if self.hp <= 0 {
            self.hp = 0;
            return self.sprite.destroy();
        }
        false
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        self.sprite.draw(surface);
    }
}

/// Gun placeholder for ships that are armed later by `set`.
pub(crate) fn unarmed(region: Region, sound: Sound) -> Gun {
    Gun {
        region,
        v: Vec2::ZERO,
        height: 0.0,
        damage: 0,
        sound,
    }
}
