//! Flowers: the reproductive part of a plant.

use crate::part::{DeathCause, GrowthContext, Part, SeedRequest};
use crate::render::{Canvas, Drawable, Rgb};
use garden_core::{Position, Result};
use garden_genetics::FlowerTraits;
use std::f32::consts::TAU;

/// Phase of a flower's life
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BloomStage {
    Blooming,
    Declining,
    Withered,
}

/// A flower opens until its decline age, releases its seeds exactly once,
/// closes again and finally takes its whole plant down with it.
#[derive(Debug)]
pub struct Flower {
    traits: FlowerTraits,
    origin: Position,
    age: f32,
    flower_age: f32,
    petal_extent: f32,
    seeded: bool,
}

impl Flower {
    pub fn new(origin: Position, chromosome: u64) -> Self {
        Self {
            traits: FlowerTraits::decode(chromosome),
            origin,
            age: 0.0,
            flower_age: 0.0,
            petal_extent: 0.0,
            seeded: false,
        }
    }

    pub fn traits(&self) -> &FlowerTraits {
        &self.traits
    }

    pub fn flower_age(&self) -> f32 {
        self.flower_age
    }

    /// Current visual petal length
    pub fn petal_extent(&self) -> f32 {
        self.petal_extent
    }

    pub fn has_seeded(&self) -> bool {
        self.seeded
    }

    pub fn stage(&self) -> BloomStage {
        let decline_age = self.traits.decline_age;
        if self.flower_age >= 2.0 * decline_age {
            BloomStage::Withered
        } else if self.flower_age > decline_age {
            BloomStage::Declining
        } else {
            BloomStage::Blooming
        }
    }

    fn petal(&self, index: u32) -> [Position; 3] {
        let petals = self.traits.num_petals as f32;
        let angle = index as f32 / petals * TAU;
        let half_width = TAU / (petals * 0.9);
        let tip = |theta: f32| {
            self.origin
                .offset(self.petal_extent * theta.cos(), self.petal_extent * theta.sin())
        };
        [self.origin, tip(angle - half_width), tip(angle + half_width)]
    }
}

impl Part for Flower {
    fn age(&self) -> f32 {
        self.age
    }

    fn produce_energy(&self) -> f32 {
        0.0
    }

    /// Bloom-scaled upkeep: ramps up over the first unit of flower age.
    fn consume_energy(&self) -> f32 {
        let seeds = self.traits.seed_num as f32 / self.traits.petal_size as f32;
        let spread = self.traits.seed_dispersal as f32 / self.traits.num_petals as f32;
        seeds * spread * self.flower_age.min(1.0)
    }

    fn grow(&mut self, ctx: &mut GrowthContext<'_>) -> Result<()> {
        self.age += ctx.dt;
        self.flower_age += ctx.dt;

        let decline_age = self.traits.decline_age;
        let petal_size = self.traits.petal_size as f32;
        let progress = self.flower_age / decline_age;

        if self.flower_age <= decline_age {
            self.petal_extent = petal_size * progress;
        } else {
            if !self.seeded {
                self.seeded = true;
                ctx.effects.seed_requests.push(SeedRequest {
                    origin: self.origin,
                    seed_count: self.traits.seed_num,
                    dispersal: self.traits.seed_dispersal,
                });
            }
            self.petal_extent = (2.0 - progress).max(0.0) * petal_size;
        }

        if self.flower_age >= 2.0 * decline_age {
            self.petal_extent = 0.0;
            ctx.effects.die(DeathCause::Wilted);
        }
        Ok(())
    }
}

impl Drawable for Flower {
    fn draw(&self, canvas: &mut dyn Canvas) {
        if self.petal_extent <= 0.0 {
            return;
        }
        let fill = Rgb::from_hsb(self.traits.hue, 0.7, 1.0);
        let outline = Rgb::from_hsb(self.traits.hue, 0.7, 0.7);
        for index in 0..self.traits.num_petals {
            let petal = self.petal(index);
            canvas.fill_polygon(&petal, fill);
            canvas.stroke_polyline(&petal, outline);
        }
    }
}
