//! Geometry primitives shared by every sprite.
//!
//! World coordinates are y-up: `top` is the larger y value.  The world is
//! always 1.0 unit tall and centred on the origin, so only its width changes
//! with the viewport aspect ratio.

use glam::Vec2;
use rand::Rng;

/// Axis-aligned rectangle stored as a centre plus half extents.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub half_width: f32,
    pub half_height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, half_width: f32, half_height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            half_width,
            half_height,
        }
    }

    pub fn left(&self) -> f32 {
        self.pos.x - self.half_width
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.half_width
    }

    pub fn top(&self) -> f32 {
        self.pos.y + self.half_height
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y - self.half_height
    }

    pub fn width(&self) -> f32 {
        self.half_width * 2.0
    }

    pub fn height(&self) -> f32 {
        self.half_height * 2.0
    }

    pub fn set_left(&mut self, left: f32) {
        self.pos.x = left + self.half_width;
    }

    pub fn set_right(&mut self, right: f32) {
        self.pos.x = right - self.half_width;
    }

    pub fn set_top(&mut self, top: f32) {
        self.pos.y = top - self.half_height;
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.pos.y = bottom + self.half_height;
    }

    pub fn set_width(&mut self, width: f32) {
        self.half_width = width / 2.0;
    }

    pub fn set_height(&mut self, height: f32) {
        self.half_height = height / 2.0;
    }

    /// True if the rectangle lies wholly outside `other`.
    pub fn is_outside(&self, other: &Rect) -> bool {
        self.left() > other.right()
            || self.right() < other.left()
            || self.bottom() > other.top()
            || self.top() < other.bottom()
    }
}

/// World bounds for a viewport of the given pixel (or cell) size.
///
/// The result is 1.0 tall and `width / height` wide.  A degenerate viewport
/// yields a square world rather than a NaN-filled one.
pub fn world_bounds(width: f32, height: f32) -> Rect {
    let aspect = if width > 0.0 && height > 0.0 {
        width / height
    } else {
        1.0
    };
    Rect::new(0.0, 0.0, aspect / 2.0, 0.5)
}

/// Uniform float in `[min, max]`.  The bounds may be given in either order.
pub fn rnd_float(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    if lo == hi {
        return lo;
    }
    rng.gen_range(lo..=hi)
}
