use glam::Vec2;

use crate::config::EnemyTemplate;
use crate::engine::{Audio, Region, Sound, Surface};
use crate::math::Rect;
use crate::pool::Handle;
use crate::pools::BulletPool;
use crate::sprite::{Destroyable, Drawable, Pooled, Sprite};

use super::bullet::{Gun, Owner};
use super::ship::{unarmed, Ship};

/// Speed at which a fresh enemy slides in from above the screen.
const DESCENT_SPEED: f32 = 0.3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Small,
    Medium,
    Big,
}

impl EnemyKind {
    pub fn region(&self) -> Region {
        match self {
            EnemyKind::Small => Region::EnemySmall,
            EnemyKind::Medium => Region::EnemyMedium,
            EnemyKind::Big => Region::EnemyBig,
        }
    }
}

#[derive(Clone, Debug)]
pub struct EnemyShip {
    ship: Ship,
    kind: EnemyKind,
    cruise_v: Vec2,
    /// Set once the ship's top edge has crossed into the world.
    entered: bool,
}

impl EnemyShip {
    /// Re-arm a pooled enemy from `template`, parked just above the world
    /// top with its centre at `x`.
    pub fn set(&mut self, template: &EnemyTemplate, bullet_damage: i32, x: f32, world_bounds: &Rect) {
        let region = template.kind.region();
        self.kind = template.kind;
        self.ship.sprite.region = region;
        self.ship.sprite.frame = 0;
        self.ship.sprite.set_height_proportion(template.height);
        self.ship.sprite.rect.pos.x = x;
        self.ship.sprite.rect.set_bottom(world_bounds.top());
        self.ship.world_bounds = *world_bounds;
        self.ship.hp = template.hp;
        self.ship.damage = template.damage;
        self.ship.gun = Gun {
            region: Region::BulletEnemy,
            v: Vec2::new(0.0, -template.bullet_speed),
            height: template.bullet_height,
            damage: bullet_damage,
            sound: Sound::Bullet,
        };
        self.ship.reload_interval = template.reload_interval;
        self.ship.reload_timer = 0.0;
        self.ship.v = Vec2::new(0.0, -DESCENT_SPEED);
        self.cruise_v = Vec2::new(0.0, -template.speed);
        self.entered = false;
    }

    /// Move, fire once entered, and self-destruct after leaving through the
    /// bottom edge.  `handle` is this enemy's own slot, stamped on its
    /// bullets.
    pub fn update_armed(
        &mut self,
        handle: Handle,
        delta: f32,
        bullets: &mut BulletPool,
        audio: &mut dyn Audio,
    ) {
        if self.is_destroyed() {
            return;
        }
        self.ship.sprite.rect.pos += self.ship.v * delta;

        let world = self.ship.world_bounds;
        if !self.entered && self.ship.rect().top() <= world.top() {
            self.entered = true;
            self.ship.v = self.cruise_v;
            self.ship.reload_timer = self.ship.reload_interval;
        }
        if self.entered && self.ship.reload(delta) {
            let muzzle = self.pos() - Vec2::new(0.0, self.ship.rect().half_height);
            self.ship.shoot(Owner::Enemy(handle), muzzle, bullets, audio);
        }
        self.ship.tick_flash(delta);

        if self.ship.rect().bottom() < world.bottom() {
            self.ship.destroy();
        }
    }

    /// Hit test against a bullet: horizontal overlap, vertical overlap with
    /// the upper half of the hull only.
    pub fn is_bullet_collision(&self, bullet: &Rect) -> bool {
        let rect = self.ship.rect();
        !(bullet.right() < rect.left()
            || bullet.left() > rect.right()
            || bullet.bottom() > rect.top()
            || bullet.top() < rect.pos.y)
    }

    /// See [`Ship::take_damage`].
    pub fn damage(&mut self, amount: i32) -> bool {
        self.ship.take_damage(amount)
    }

    /// Damage dealt by ramming.
    pub fn contact_damage(&self) -> i32 {
        self.ship.damage
    }

    pub fn bullet_damage(&self) -> i32 {
        self.ship.gun.damage
    }

    pub fn hp(&self) -> i32 {
        self.ship.hp
    }

    pub fn kind(&self) -> EnemyKind {
        self.kind
    }

    pub fn is_entered(&self) -> bool {
        self.entered
    }

    pub fn v(&self) -> Vec2 {
        self.ship.v
    }

    pub fn rect(&self) -> &Rect {
        self.ship.rect()
    }

    pub fn pos(&self) -> Vec2 {
        self.ship.pos()
    }

    pub fn set_pos(&mut self, pos: Vec2) {
        self.ship.sprite.rect.pos = pos;
    }
}

impl Drawable for EnemyShip {
    fn draw(&self, surface: &mut dyn Surface) {
        self.ship.draw(surface);
    }
}

impl Destroyable for EnemyShip {
    fn is_destroyed(&self) -> bool {
        self.ship.is_destroyed()
    }

    fn destroy(&mut self) -> bool {
        self.ship.destroy()
    }
}

impl Pooled for EnemyShip {
    fn inactive() -> Self {
        Self {
            ship: Ship::new(
                Region::EnemySmall,
                unarmed(Region::BulletEnemy, Sound::Bullet),
            ),
            kind: EnemyKind::Small,
            cruise_v: Vec2::ZERO,
            entered: false,
        }
    }

    fn sprite(&self) -> &Sprite {
        &self.ship.sprite
    }

    fn flush_destroy(&mut self) {
        self.ship.sprite.flush_destroy();
    }
}
