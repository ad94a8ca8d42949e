//! The player's ship: keyboard and pointer steering, auto-fire.

use glam::Vec2;

use crate::config::MainShipSettings;
use crate::engine::{Audio, Key, Region, Sound, Surface};
use crate::math::Rect;
use crate::pools::BulletPool;
use crate::sprite::{Destroyable, Drawable, Resizable};

use super::bullet::{Gun, Owner};
use super::ship::Ship;

#[derive(Clone, Debug)]
pub struct MainShip {
    ship: Ship,
    settings: MainShipSettings,
    pressed_left: bool,
    pressed_right: bool,
    left_pointer: Option<u32>,
    right_pointer: Option<u32>,
    fire_requested: bool,
}

impl MainShip {
    pub fn new(settings: &MainShipSettings) -> Self {
        let gun = Gun {
            region: Region::BulletMainShip,
            v: Vec2::new(0.0, settings.bullet_speed),
            height: settings.bullet_height,
            damage: settings.bullet_damage,
            sound: Sound::Laser,
        };
        let mut ship = Ship::new(Region::MainShip, gun);
        ship.hp = settings.hp;
        ship.reload_interval = settings.reload_interval;
        ship.sprite.set_height_proportion(settings.height);
        Self {
            ship,
            settings: settings.clone(),
            pressed_left: false,
            pressed_right: false,
            left_pointer: None,
            right_pointer: None,
            fire_requested: false,
        }
    }

    /// Back to full health at the centre of the world, for a new game.
    pub fn reset(&mut self) {
        self.ship.sprite.flush_destroy();
        self.ship.sprite.frame = 0;
        self.ship.hp = self.settings.hp;
        self.ship.reload_timer = 0.0;
        self.ship.sprite.rect.pos.x = self.ship.world_bounds.pos.x;
        self.pressed_left = false;
        self.pressed_right = false;
        self.left_pointer = None;
        self.right_pointer = None;
        self.fire_requested = false;
        self.stop();
    }

    pub fn update_armed(&mut self, delta: f32, bullets: &mut BulletPool, audio: &mut dyn Audio) {
        if self.is_destroyed() {
            return;
        }
        self.ship.sprite.rect.pos += self.ship.v * delta;

        let reloaded = self.ship.reload(delta);
        if reloaded || self.fire_requested {
            self.fire_requested = false;
            let muzzle = self.pos() + Vec2::new(0.0, self.ship.rect().half_height);
            self.ship.shoot(Owner::MainShip, muzzle, bullets, audio);
        }
        self.ship.tick_flash(delta);

        let world = self.ship.world_bounds;
        if self.ship.rect().right() > world.right() {
            self.ship.sprite.rect.set_right(world.right());
            self.stop();
        }
        if self.ship.rect().left() < world.left() {
            self.ship.sprite.rect.set_left(world.left());
            self.stop();
        }
    }

    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Left | Key::A => {
                self.pressed_left = true;
                self.move_left();
            }
            Key::Right | Key::D => {
                self.pressed_right = true;
                self.move_right();
            }
            Key::Up | Key::W => self.fire_requested = true,
            Key::Other => {}
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Left | Key::A => {
                self.pressed_left = false;
                if self.pressed_right {
                    self.move_right();
                } else {
                    self.stop();
                }
            }
            Key::Right | Key::D => {
                self.pressed_right = false;
                if self.pressed_left {
                    self.move_left();
                } else {
                    self.stop();
                }
            }
            _ => {}
        }
    }

    /// Pointer on the left half of the world steers left, right half
    /// steers right.  One pointer per side.
    pub fn touch_down(&mut self, touch: Vec2, pointer: u32, _button: u32) {
        if touch.x < self.ship.world_bounds.pos.x {
            if self.left_pointer.is_some() {
                return;
            }
            self.left_pointer = Some(pointer);
            self.move_left();
        } else {
            if self.right_pointer.is_some() {
                return;
            }
            self.right_pointer = Some(pointer);
            self.move_right();
        }
    }

    pub fn touch_up(&mut self, _touch: Vec2, pointer: u32, _button: u32) {
        if self.left_pointer == Some(pointer) {
            self.left_pointer = None;
            if self.right_pointer.is_some() {
                self.move_right();
            } else {
                self.stop();
            }
        } else if self.right_pointer == Some(pointer) {
            self.right_pointer = None;
            if self.left_pointer.is_some() {
                self.move_left();
            } else {
                self.stop();
            }
        }
    }

    /// Hit test against a bullet: horizontal overlap, vertical overlap with
    /// the lower half of the hull only.
    pub fn is_bullet_collision(&self, bullet: &Rect) -> bool {
        let rect = self.ship.rect();
        !(bullet.right() < rect.left()
            || bullet.left() > rect.right()
            || bullet.bottom() > rect.pos.y
            || bullet.top() < rect.bottom())
    }

    /// See [`Ship::take_damage`].
    pub fn damage(&mut self, amount: i32) -> bool {
        self.ship.take_damage(amount)
    }

    pub fn hp(&self) -> i32 {
        self.ship.hp
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

    pub fn half_width(&self) -> f32 {
        self.ship.rect().half_width
    }

    pub fn set_pos(&mut self, pos: Vec2) {
        self.ship.sprite.rect.pos = pos;
    }

    fn move_left(&mut self) {
        self.ship.v = Vec2::new(-self.settings.speed, 0.0);
    }

    fn move_right(&mut self) {
        self.ship.v = Vec2::new(self.settings.speed, 0.0);
    }

    fn stop(&mut self) {
        self.ship.v = Vec2::ZERO;
    }
}

impl Resizable for MainShip {
    fn resize(&mut self, world_bounds: &Rect) {
        self.ship.world_bounds = *world_bounds;
        self.ship.sprite.set_height_proportion(self.settings.height);
        self.ship
            .sprite
            .rect
            .set_bottom(world_bounds.bottom() + self.settings.bottom_margin);
    }
}

impl Drawable for MainShip {
    fn draw(&self, surface: &mut dyn Surface) {
        self.ship.draw(surface);
    }
}

impl Destroyable for MainShip {
    fn is_destroyed(&self) -> bool {
        self.ship.is_destroyed()
    }

    fn destroy(&mut self) -> bool {
        self.ship.destroy()
    }
}
