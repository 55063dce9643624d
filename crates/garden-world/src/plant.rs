//! Plant state and its energy-gated growth schedule.

use crate::collision::ColliderRegistry;
use crate::flower::Flower;
use crate::part::{DeathCause, GrowthContext, GrowthEffects, Part};
use crate::render::{Canvas, Drawable, RenderScheduler, Rgb};
use crate::roots::Roots;
use garden_core::{PlantId, Position, Result};
use garden_genetics::Genome;

/// Draw priorities: roots at the back, flowers in front
pub const ROOTS_LAYER: i32 = 0;
pub const STEM_LAYER: i32 = 1;
pub const FLOWER_LAYER: i32 = 2;

const STEM_GREEN: Rgb = Rgb::new(53, 196, 70);
const STEM_RADIUS: f32 = 3.0;

/// A plant in the garden: one set of roots and at least one flower
#[derive(Debug)]
pub struct Plant {
    id: PlantId,
    position: Position,
    genome: Genome,
    age: f32,
    roots: Roots,
    flowers: Vec<Flower>,
}

impl Plant {
    /// Build a plant from its genome. The roots join the collider registry
    /// immediately, before the plant itself is part of any population.
    pub fn new(
        id: PlantId,
        position: Position,
        genome: Genome,
        colliders: &mut ColliderRegistry,
    ) -> Self {
        let roots = Roots::new(position, genome.roots(), colliders);
        let flowers = vec![Flower::new(position, genome.flower())];
        Self {
            id,
            position,
            genome,
            age: 0.0,
            roots,
            flowers,
        }
    }

    pub fn id(&self) -> PlantId {
        self.id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    pub fn age(&self) -> f32 {
        self.age
    }

    pub fn roots(&self) -> &Roots {
        &self.roots
    }

    pub fn flowers(&self) -> &[Flower] {
        &self.flowers
    }

    /// Energy all parts would produce right now
    pub fn produce_energy(&self) -> f32 {
        self.parts().map(|part| part.produce_energy()).sum()
    }

    /// Upkeep all parts would charge right now
    pub fn consume_energy(&self) -> f32 {
        self.parts().map(|part| part.consume_energy()).sum()
    }

    fn parts(&self) -> impl Iterator<Item = &dyn Part> + '_ {
        std::iter::once(&self.roots as &dyn Part)
            .chain(self.flowers.iter().map(|flower| flower as &dyn Part))
    }

    /// Grow every part the plant can afford this tick.
    ///
    /// The budget is what the parts produce before any of them grows. Parts
    /// are visited roots first, then flowers in order. A part grows only if
    /// the budget still covers its upkeep, but its upkeep is charged either
    /// way, so a plant that cannot pay for all its parts ends in deficit and
    /// dies. Growth already applied this tick is kept.
    pub fn grow(
        &mut self,
        dt: f32,
        colliders: &mut ColliderRegistry,
        effects: &mut GrowthEffects,
    ) -> Result<()> {
        self.age += dt;
        let mut budget = self.produce_energy();

        let mut ctx = GrowthContext {
            dt,
            colliders,
            effects,
        };
        let parts = std::iter::once(&mut self.roots as &mut dyn Part)
            .chain(self.flowers.iter_mut().map(|flower| flower as &mut dyn Part));
        for part in parts {
            let upkeep = part.consume_energy();
            if upkeep <= budget {
                part.grow(&mut ctx)?;
            }
            budget -= upkeep;
        }

        if budget < 0.0 {
            ctx.effects.die(DeathCause::Starved);
        }
        Ok(())
    }

    /// Remove the roots from the collider registry. Called once, when the
    /// plant actually leaves the garden.
    pub fn detach_colliders(&self, colliders: &mut ColliderRegistry) -> Result<()> {
        self.roots.detach(colliders)
    }

    /// Queue this plant's drawables for the current frame
    pub fn schedule_draw<'a>(&'a self, scheduler: &mut RenderScheduler<'a>) {
        scheduler.add(&self.roots, ROOTS_LAYER);
        scheduler.add(self, STEM_LAYER);
        for flower in &self.flowers {
            scheduler.add(flower, FLOWER_LAYER);
        }
    }
}

impl Drawable for Plant {
    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.fill_circle(self.position, STEM_RADIUS, STEM_GREEN);
    }
}
