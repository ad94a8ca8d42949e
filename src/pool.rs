//! Generic object pool.
//!
//! Entities live in an arena of slots and are addressed by [`Handle`].  A slot
//! is either active (listed in insertion order, updated, drawn, collidable)
//! or free (queued for reuse).  Slots are never deallocated during play; the
//! oldest free slot is the first to be reissued.

use std::collections::VecDeque;

use crate::engine::Surface;
use crate::sprite::{Pooled, Updatable};

/// Stable index of a pool slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(usize);

impl Handle {
    pub fn index(self) -> usize {
        self.0
    }
}

pub struct Pool<T> {
    slots: Vec<T>,
    in_use: Vec<bool>,
    active: Vec<Handle>,
    free: VecDeque<Handle>,
}

impl<T: Pooled> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Pooled> Pool<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            in_use: Vec::new(),
            active: Vec::new(),
            free: VecDeque::new(),
        }
    }

    /// Reissue the oldest free slot, or grow the arena by one.  The returned
    /// entity still holds whatever state it had; the caller must `set` it.
    pub fn obtain(&mut self) -> (Handle, &mut T) {
        let handle = match self.free.pop_front() {
            Some(handle) => handle,
            None => {
                let handle = Handle(self.slots.len());
                self.slots.push(T::inactive());
                self.in_use.push(false);
                handle
            }
        };
        self.in_use[handle.0] = true;
        self.active.push(handle);
        (handle, &mut self.slots[handle.0])
    }

    /// The entity behind `handle`, if the slot is currently active.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        if *self.in_use.get(handle.0)? {
            self.slots.get(handle.0)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        if *self.in_use.get(handle.0)? {
            self.slots.get_mut(handle.0)
        } else {
            None
        }
    }

    /// Handles of active slots in insertion order, destroyed ones included.
    pub fn active_handles(&self) -> &[Handle] {
        &self.active
    }

    /// Live view in insertion order.  Destroyed-but-unswept entries are
    /// included; callers skip them.
    pub fn active_objects(&self) -> impl Iterator<Item = (Handle, &T)> + '_ {
        self.active.iter().map(move |&h| (h, &self.slots[h.0]))
    }

    pub fn for_each_active_mut(&mut self, mut f: impl FnMut(Handle, &mut T)) {
        let slots = &mut self.slots;
        for &h in &self.active {
            f(h, &mut slots[h.0]);
        }
    }

    pub fn update_active_sprites(&mut self, delta: f32)
    where
        T: Updatable,
    {
        self.for_each_active_mut(|_, item| item.update(delta));
    }

    pub fn draw_active_sprites(&self, surface: &mut dyn Surface) {
        for (_, item) in self.active_objects() {
            item.draw(surface);
        }
    }

    /// Reclaim every destroyed active entity.  Returns the number reclaimed.
    pub fn free_all_destroyed(&mut self) -> usize {
        self.free_all_destroyed_with(|_, _| {})
    }

    /// Like [`free_all_destroyed`](Self::free_all_destroyed), running
    /// `cleanup` on each entity just before its slot is released.
    pub fn free_all_destroyed_with(&mut self, mut cleanup: impl FnMut(Handle, &T)) -> usize {
        let slots = &mut self.slots;
        let in_use = &mut self.in_use;
        let free = &mut self.free;
        let before = self.active.len();

        self.active.retain(|&h| {
            let item = &mut slots[h.0];
            if !item.is_destroyed() {
                return true;
            }
            cleanup(h, item);
            item.flush_destroy();
            in_use[h.0] = false;
            free.push_back(h);
            false
        });

        before - self.active.len()
    }

    /// Drop every slot.  Outstanding handles become dangling and resolve to
    /// `None`.
    pub fn dispose(&mut self) {
        self.slots.clear();
        self.in_use.clear();
        self.active.clear();
        self.free.clear();
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    /// Total slots ever allocated (active + free).
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
