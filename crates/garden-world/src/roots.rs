//! Roots: the energy-producing, space-competing part of a plant.

use crate::collision::{Circle, ColliderRegistry, ColliderShape};
use crate::part::{GrowthContext, Part};
use crate::render::{Canvas, Drawable, Rgb};
use garden_core::{ColliderHandle, Position, Result};
use garden_genetics::RootsTraits;
use tracing::trace;

const SOIL_BROWN: Rgb = Rgb::new(128, 93, 18);

/// Roots spread outwards until they touch another plant's roots, then stop for good
#[derive(Debug)]
pub struct Roots {
    traits: RootsTraits,
    origin: Position,
    age: f32,
    width_factor: f32,
    collided: bool,
    collider: ColliderHandle,
}

impl Roots {
    /// Decode the roots chromosome and register the (zero-radius) roots
    /// with the collider registry straight away.
    pub fn new(origin: Position, chromosome: u64, colliders: &mut ColliderRegistry) -> Self {
        let collider = colliders.register(ColliderShape::Roots(Circle::new(origin, 0.0)));
        Self {
            traits: RootsTraits::decode(chromosome),
            origin,
            age: 0.0,
            width_factor: 0.0,
            collided: false,
            collider,
        }
    }

    pub fn traits(&self) -> &RootsTraits {
        &self.traits
    }

    pub fn origin(&self) -> Position {
        self.origin
    }

    pub fn collider(&self) -> ColliderHandle {
        self.collider
    }

    pub fn has_collided(&self) -> bool {
        self.collided
    }

    pub fn radius(&self) -> f32 {
        self.width_factor * self.traits.width as f32 / 2.0
    }

    pub fn shape(&self) -> ColliderShape {
        ColliderShape::Roots(Circle::new(self.origin, self.radius()))
    }

    /// Pairwise collision test against another plant's roots
    pub fn overlaps(&self, other: &Roots) -> bool {
        self.shape().collides_with(&other.shape())
    }

    pub(crate) fn detach(&self, colliders: &mut ColliderRegistry) -> Result<()> {
        colliders.remove(self.collider).map(|_| ())
    }
}

impl Part for Roots {
    fn age(&self) -> f32 {
        self.age
    }

    fn produce_energy(&self) -> f32 {
        self.traits.depth as f32 * self.radius()
    }

    fn consume_energy(&self) -> f32 {
        (self.traits.depth * self.traits.width) as f32 * self.age
    }

    /// Collided roots are frozen: no further aging, so neither production nor
    /// upkeep changes after the latch.
    fn grow(&mut self, ctx: &mut GrowthContext<'_>) -> Result<()> {
        if self.collided {
            return Ok(());
        }

        self.age += ctx.dt;
        self.width_factor += ctx.dt;
        ctx.colliders.update(self.collider, self.shape())?;
        if let Some(other) = ctx.colliders.first_collision(self.collider)? {
            self.collided = true;
            trace!(
                collider = %self.collider,
                other = %other,
                radius = self.radius(),
                "Roots collided, growth frozen"
            );
        }
        Ok(())
    }
}

impl Drawable for Roots {
    fn draw(&self, canvas: &mut dyn Canvas) {
        let shade = 1.0 - self.traits.depth as f32 / 16.0;
        canvas.fill_circle(self.origin, self.radius(), SOIL_BROWN.scaled(shade));
    }
}
