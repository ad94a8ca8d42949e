//! Seams to the host engine: the render surface, audio playback and input
//! key codes.  The library never talks to a terminal, window or sound card
//! directly; the host implements these traits.

use crate::math::Rect;

// ── Texture regions ──────────────────────────────────────────────────────────

/// Named regions of the texture atlas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    Background,
    Star,
    MainShip,
    EnemySmall,
    EnemyMedium,
    EnemyBig,
    BulletMainShip,
    BulletEnemy,
    Explosion,
}

impl Region {
    /// Width / height of a single animation frame.
    pub fn aspect(&self) -> f32 {
        match self {
            Region::Background => 1.0,
            Region::Star => 1.0,
            Region::MainShip => 0.68,
            Region::EnemySmall => 0.8,
            Region::EnemyMedium => 0.9,
            Region::EnemyBig => 1.0,
            Region::BulletMainShip => 1.0,
            Region::BulletEnemy => 1.0,
            Region::Explosion => 1.0,
        }
    }

    /// Number of animation frames packed in the region.
    pub fn frames(&self) -> usize {
        match self {
            Region::MainShip | Region::EnemySmall | Region::EnemyMedium | Region::EnemyBig => 2,
            Region::Explosion => 16,
            _ => 1,
        }
    }
}

/// An opaque batched-draw target.
pub trait Surface {
    /// Draw one frame of `region` stretched over `bounds`.
    fn draw(&mut self, region: Region, frame: usize, bounds: &Rect);
}

// ── Audio ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sound {
    Explosion,
    /// Enemy gun.
    Bullet,
    /// Main-ship gun.
    Laser,
}

/// Fire-and-forget sound playback plus one looping music track.
pub trait Audio {
    fn play(&mut self, sound: Sound);

    fn play_music(&mut self) {}

    fn stop_music(&mut self) {}

    /// Release every handle.  Called exactly once by the screen.
    fn dispose(&mut self) {}
}

/// Audio sink that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silence;

impl Audio for Silence {
    fn play(&mut self, _sound: Sound) {}
}

// ── Input ────────────────────────────────────────────────────────────────────

/// Key codes the game reacts to.  Hosts map everything else to `Other`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    A,
    D,
    W,
    Other,
}
