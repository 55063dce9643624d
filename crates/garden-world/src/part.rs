//! The energy and growth contract shared by every plant part.

use crate::collision::ColliderRegistry;
use garden_core::{Position, Result};

/// Why a plant asked to be removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    /// Upkeep exceeded the energy the plant produced this tick
    Starved,
    /// A flower outlived twice its decline age
    Wilted,
}

/// Request to scatter offspring around a blooming flower
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedRequest {
    pub origin: Position,
    pub seed_count: u32,
    /// Dispersal gene of the flower; the garden turns it into a spread radius
    pub dispersal: u32,
}

/// Lifecycle changes a plant requests while growing. The garden applies them
/// after the plant's growth step, never during it.
#[derive(Debug, Default)]
pub struct GrowthEffects {
    pub seed_requests: Vec<SeedRequest>,
    pub death: Option<DeathCause>,
}

impl GrowthEffects {
    /// Mark the plant for removal. Only the first cause is kept.
    pub fn die(&mut self, cause: DeathCause) {
        self.death.get_or_insert(cause);
    }

    pub fn is_dying(&self) -> bool {
        self.death.is_some()
    }
}

/// Everything a part may touch while growing
pub struct GrowthContext<'a> {
    pub dt: f32,
    pub colliders: &'a mut ColliderRegistry,
    pub effects: &'a mut GrowthEffects,
}

pub trait Part {
    /// Total time this part has spent growing
    fn age(&self) -> f32;

    fn produce_energy(&self) -> f32;

    fn consume_energy(&self) -> f32;

    /// Advance the part by `ctx.dt`
    fn grow(&mut self, ctx: &mut GrowthContext<'_>) -> Result<()>;
}
