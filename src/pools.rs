//! The three concrete pools and their kind-specific operations.

use glam::Vec2;

use crate::engine::{Audio, Sound};
use crate::math::Rect;
use crate::pool::{Handle, Pool};
use crate::sprites::{Bullet, EnemyShip, Explosion, Gun, Owner};

pub type BulletPool = Pool<Bullet>;
pub type EnemyPool = Pool<EnemyShip>;
pub type ExplosionPool = Pool<Explosion>;

impl Pool<Bullet> {
    pub fn fire(&mut self, owner: Owner, gun: &Gun, pos: Vec2, world_bounds: &Rect) -> Handle {
        let (handle, bullet) = self.obtain();
        bullet.set(owner, gun, pos, world_bounds);
        handle
    }
}

impl Pool<Explosion> {
    pub fn spawn(&mut self, pos: Vec2, height: f32, audio: &mut dyn Audio) -> Handle {
        let (handle, explosion) = self.obtain();
        explosion.set(pos, height);
        audio.play(Sound::Explosion);
        handle
    }
}

impl Pool<EnemyShip> {
    /// Update every active enemy, letting each fire into `bullets`.
    pub fn update_armed(&mut self, delta: f32, bullets: &mut BulletPool, audio: &mut dyn Audio) {
        self.for_each_active_mut(|handle, enemy| {
            enemy.update_armed(handle, delta, bullets, audio);
        });
    }

    /// Sweep destroyed enemies, leaving an explosion where each one was.
    pub fn free_all_destroyed_into(
        &mut self,
        explosions: &mut ExplosionPool,
        audio: &mut dyn Audio,
    ) -> usize {
        self.free_all_destroyed_with(|_, enemy| {
            explosions.spawn(enemy.pos(), enemy.rect().height(), audio);
        })
    }
}
