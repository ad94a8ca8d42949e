//! The game screen: owns every pool and drives one frame at a time.
//!
//! Frame order is `update -> check_collisions -> free_all_destroyed -> draw`.
//! Collisions see this frame's positions, and an entity destroyed during the
//! collision pass stays collidable until the sweep, which runs before
//! drawing so nothing destroyed is ever drawn.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::GameConfig;
use crate::emitter::EnemyEmitter;
use crate::engine::{Audio, Key, Surface};
use crate::error::ConfigError;
use crate::math::{world_bounds, Rect};
use crate::pools::{BulletPool, EnemyPool, ExplosionPool};
use crate::sprite::{Destroyable, Drawable, Resizable, Updatable};
use crate::sprites::{Background, MainShip, Owner, Star};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenState {
    Playing,
    GameOver,
}

pub struct GameScreen {
    config: GameConfig,
    rng: StdRng,
    world_bounds: Rect,
    background: Background,
    stars: Vec<Star>,
    bullets: BulletPool,
    enemies: EnemyPool,
    explosions: ExplosionPool,
    main_ship: MainShip,
    emitter: EnemyEmitter,
    audio: Box<dyn Audio>,
    state: ScreenState,
    frags: u32,
    disposed: bool,
}

impl GameScreen {
    pub fn new(config: GameConfig, audio: Box<dyn Audio>) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let stars = (0..config.star_count).map(|_| Star::new(&mut rng)).collect();
        let main_ship = MainShip::new(&config.main_ship);
        let emitter = EnemyEmitter::new(config.emitter.clone());

        let mut screen = Self {
            config,
            rng,
            world_bounds: Rect::default(),
            background: Background::new(),
            stars,
            bullets: BulletPool::new(),
            enemies: EnemyPool::new(),
            explosions: ExplosionPool::new(),
            main_ship,
            emitter,
            audio,
            state: ScreenState::Playing,
            frags: 0,
            disposed: false,
        };
        screen.resize(world_bounds(1.0, 1.0));
        Ok(screen)
    }

    /// Start the music.  Call once after construction.
    pub fn show(&mut self) {
        tracing::info!(seed = self.config.seed, stars = self.stars.len(), "game screen shown");
        self.audio.play_music();
    }

    /// One full frame.
    pub fn render(&mut self, delta: f32, surface: &mut dyn Surface) {
        if self.disposed {
            tracing::warn!("render called after dispose");
            return;
        }
        self.update(delta);
        self.check_collisions();
        self.free_all_destroyed();
        self.draw(surface);
    }

    pub fn update(&mut self, delta: f32) {
        if self.disposed {
            tracing::warn!("update called after dispose");
            return;
        }
        for star in &mut self.stars {
            star.update(delta);
        }
        let audio = self.audio.as_mut();
        if self.state == ScreenState::Playing {
            self.main_ship.update_armed(delta, &mut self.bullets, audio);
        }
        self.bullets.update_active_sprites(delta);
        self.enemies.update_armed(delta, &mut self.bullets, audio);
        self.explosions.update_active_sprites(delta);
        if self.state == ScreenState::Playing {
            self.emitter
                .generate(delta, self.frags, &mut self.enemies, &mut self.rng);
        }
    }

    pub fn check_collisions(&mut self) {
        if self.disposed || self.state != ScreenState::Playing {
            return;
        }
        let ship = &mut self.main_ship;
        let enemies = &mut self.enemies;
        let mut ship_destroyed = false;
        let mut frags = 0;

        enemies.for_each_active_mut(|_, enemy| {
            if enemy.is_destroyed() || ship.is_destroyed() {
                return;
            }
            let min_dist = enemy.rect().half_width + ship.half_width();
            if enemy.pos().distance(ship.pos()) < min_dist {
                enemy.destroy();
                ship_destroyed |= ship.damage(enemy.contact_damage() * 2);
            }
        });

        // A main-ship bullet keeps testing after a hit, so it can damage
        // every enemy it overlaps this frame.
        self.bullets.for_each_active_mut(|_, bullet| {
            if bullet.is_destroyed() {
                return;
            }
            match bullet.owner() {
                Owner::MainShip => {
                    enemies.for_each_active_mut(|_, enemy| {
                        if enemy.is_destroyed() {
                            return;
                        }
                        if enemy.is_bullet_collision(bullet.rect()) {
                            if enemy.damage(bullet.damage()) {
                                frags += 1;
                            }
                            bullet.destroy();
                        }
                    });
                }
                Owner::Enemy(_) => {
                    if !ship.is_destroyed() && ship.is_bullet_collision(bullet.rect()) {
                        ship_destroyed |= ship.damage(bullet.damage());
                        bullet.destroy();
                    }
                }
            }
        });

        self.frags += frags;
        if ship_destroyed {
            let pos = self.main_ship.pos();
            let height = self.main_ship.rect().height();
            self.explosions.spawn(pos, height, self.audio.as_mut());
            self.state = ScreenState::GameOver;
            tracing::info!(frags = self.frags, "main ship destroyed, game over");
        }
    }

    pub fn free_all_destroyed(&mut self) {
        if self.disposed {
            return;
        }
        let bullets = self.bullets.free_all_destroyed();
        let enemies = self
            .enemies
            .free_all_destroyed_into(&mut self.explosions, self.audio.as_mut());
        let explosions = self.explosions.free_all_destroyed();
        if bullets + enemies + explosions > 0 {
            tracing::debug!(bullets, enemies, explosions, "swept destroyed sprites");
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        if self.disposed {
            tracing::warn!("draw called after dispose");
            return;
        }
        self.background.draw(surface);
        for star in &self.stars {
            star.draw(surface);
        }
        if !self.main_ship.is_destroyed() {
            self.main_ship.draw(surface);
        }
        self.bullets.draw_active_sprites(surface);
        self.enemies.draw_active_sprites(surface);
        self.explosions.draw_active_sprites(surface);
    }

    pub fn resize(&mut self, world_bounds: Rect) {
        tracing::info!(
            width = world_bounds.width(),
            height = world_bounds.height(),
            "world resized"
        );
        self.world_bounds = world_bounds;
        self.background.resize(&world_bounds);
        for star in &mut self.stars {
            star.resize(&world_bounds, &mut self.rng);
        }
        self.main_ship.resize(&world_bounds);
        self.emitter.resize(&world_bounds);
    }

    /// Release audio and pools.  Only the first call has any effect.
    pub fn dispose(&mut self) {
        if self.disposed {
            tracing::warn!("dispose called twice");
            return;
        }
        self.disposed = true;
        self.audio.stop_music();
        self.audio.dispose();
        self.bullets.dispose();
        self.enemies.dispose();
        self.explosions.dispose();
        tracing::info!("game screen disposed");
    }

    /// Clear the field and put a fresh ship in play.
    pub fn start_new_game(&mut self) {
        if self.disposed {
            return;
        }
        self.bullets.for_each_active_mut(|_, b| {
            b.destroy();
        });
        self.enemies.for_each_active_mut(|_, e| {
            e.destroy();
        });
        self.explosions.for_each_active_mut(|_, e| {
            e.destroy();
        });
        self.bullets.free_all_destroyed();
        self.enemies.free_all_destroyed();
        self.explosions.free_all_destroyed();

        self.frags = 0;
        self.main_ship.reset();
        self.emitter.reset();
        self.state = ScreenState::Playing;
        tracing::info!("new game started");
    }

    // ── Input (never consumed) ──────────────────────────────────────────────

    pub fn key_down(&mut self, key: Key) -> bool {
        self.main_ship.key_down(key);
        false
    }

    pub fn key_up(&mut self, key: Key) -> bool {
        self.main_ship.key_up(key);
        false
    }

    pub fn touch_down(&mut self, touch: Vec2, pointer: u32, button: u32) -> bool {
        self.main_ship.touch_down(touch, pointer, button);
        false
    }

    pub fn touch_up(&mut self, touch: Vec2, pointer: u32, button: u32) -> bool {
        self.main_ship.touch_up(touch, pointer, button);
        false
    }

    // ── Accessors ───────────────────────────────────────────────────────────

    pub fn state(&self) -> ScreenState {
        self.state
    }

    pub fn frags(&self) -> u32 {
        self.frags
    }

    pub fn level(&self) -> u32 {
        self.emitter.level()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn world_bounds(&self) -> &Rect {
        &self.world_bounds
    }

    pub fn main_ship(&self) -> &MainShip {
        &self.main_ship
    }

    pub fn main_ship_mut(&mut self) -> &mut MainShip {
        &mut self.main_ship
    }

    pub fn bullets(&self) -> &BulletPool {
        &self.bullets
    }

    pub fn bullets_mut(&mut self) -> &mut BulletPool {
        &mut self.bullets
    }

    pub fn enemies(&self) -> &EnemyPool {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut EnemyPool {
        &mut self.enemies
    }

    pub fn explosions(&self) -> &ExplosionPool {
        &self.explosions
    }

    pub fn emitter(&self) -> &EnemyEmitter {
        &self.emitter
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }
}
