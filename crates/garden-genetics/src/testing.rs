//! Deterministic random sources for tests.

use rand::RngCore;
use std::collections::VecDeque;

/// Draw that `Rng::gen::<f32>()` maps to just below 1.0
pub const HIGH: u32 = u32::MAX;
/// Draw that `Rng::gen::<f32>()` maps to exactly 0.0
pub const LOW: u32 = 0;

/// Replays a fixed script of `u32` draws, then repeats `fallback` forever.
pub struct ScriptedRng {
    script: VecDeque<u32>,
    fallback: u32,
    pub draws: usize,
}

impl ScriptedRng {
    pub fn new(script: impl IntoIterator<Item = u32>, fallback: u32) -> Self {
        Self {
            script: script.into_iter().collect(),
            fallback,
            draws: 0,
        }
    }

    /// Every draw maps to the same value
    pub fn constant(value: u32) -> Self {
        Self::new([], value)
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        self.draws += 1;
        self.script.pop_front().unwrap_or(self.fallback)
    }

    fn next_u64(&mut self) -> u64 {
        let high = self.next_u32() as u64;
        let low = self.next_u32() as u64;
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
