//! Thread-safe handle to a garden shared by the tick and render loops.

use crate::garden::{Garden, GardenStats};
use crate::render::Canvas;
use garden_core::Result;
use parking_lot::Mutex;
use std::sync::Arc;

/// A garden behind one coarse lock. A tick holds the lock for its whole
/// duration, so a frame never observes a half-applied tick.
#[derive(Clone)]
pub struct SharedGarden {
    inner: Arc<Mutex<Garden>>,
}

impl SharedGarden {
    pub fn new(garden: Garden) -> Self {
        Self {
            inner: Arc::new(Mutex::new(garden)),
        }
    }

    pub fn tick(&self, dt: f32) -> Result<()> {
        self.inner.lock().tick(dt)
    }

    pub fn render(&self, canvas: &mut dyn Canvas) -> usize {
        self.inner.lock().render(canvas)
    }

    pub fn stats(&self) -> GardenStats {
        self.inner.lock().stats()
    }

    /// Run `f` with exclusive access to the garden
    pub fn with<T>(&self, f: impl FnOnce(&mut Garden) -> T) -> T {
        f(&mut self.inner.lock())
    }
}
