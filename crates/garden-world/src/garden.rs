//! Population manager: owns the live plants and commits lifecycle changes
//! between ticks.

use crate::collision::ColliderRegistry;
use crate::part::{GrowthEffects, SeedRequest};
use crate::plant::Plant;
use crate::render::{Canvas, RenderScheduler};
use garden_core::{Error, GardenConfig, PlantId, Position, Result, ScatterMode};
use garden_genetics::{Genome, GenomeEngine};
use rand::seq::SliceRandom;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::f32::consts::TAU;
use tracing::{debug, event, info, instrument, trace, Level};

/// Snapshot of population counters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GardenStats {
    pub tick: u64,
    pub elapsed: f32,
    pub live: usize,
    pub pending_add: usize,
    pub pending_destroy: usize,
    pub births: u64,
    pub deaths: u64,
    pub seeds_dropped: u64,
    pub mean_root_radius: f32,
}

/// The garden: a bounded arena of plants that grow, compete and reproduce.
///
/// Lifecycle changes requested while a tick is running are buffered and only
/// committed once every live plant has grown, so no plant ever sees another
/// plant appear or vanish mid-tick.
pub struct Garden {
    config: GardenConfig,
    engine: GenomeEngine,
    colliders: ColliderRegistry,
    plants: Vec<Plant>,
    pending_add: Vec<Plant>,
    pending_destroy: Vec<PlantId>,
    rng: ChaCha8Rng,
    next_plant_id: u64,
    tick: u64,
    elapsed: f32,
    births: u64,
    deaths: u64,
    seeds_dropped: u64,
}

impl Garden {
    /// Create a garden seeded with `config.seed_count` random plants at
    /// uniformly random positions.
    #[instrument(skip_all, fields(seed = config.seed, seed_count = config.seed_count))]
    pub fn new(config: GardenConfig) -> Result<Self> {
        let mut garden = Self::empty(config)?;
        for _ in 0..garden.config.seed_count {
            let position = Position::new(
                garden.rng.gen_range(0.0..garden.config.width),
                garden.rng.gen_range(0.0..garden.config.height),
            );
            let genome = garden.engine.generate(&mut garden.rng);
            garden.enqueue_plant(position, genome);
        }
        garden.commit_pending()?;
        info!(
            width = garden.config.width,
            height = garden.config.height,
            plants = garden.plants.len(),
            seed = garden.config.seed,
            "Garden initialized"
        );
        Ok(garden)
    }

    /// Create a garden from explicit founders instead of random ones.
    /// `config.seed_count` is ignored.
    pub fn with_seeds(
        config: GardenConfig,
        seeds: impl IntoIterator<Item = (Position, Genome)>,
    ) -> Result<Self> {
        let mut garden = Self::empty(config)?;
        for (position, genome) in seeds {
            if !position.within(garden.config.width, garden.config.height) {
                return Err(Error::Validation(format!(
                    "founder at ({}, {}) lies outside the arena",
                    position.x, position.y
                )));
            }
            garden.enqueue_plant(position, genome);
        }
        garden.commit_pending()?;
        info!(plants = garden.plants.len(), "Garden initialized from founders");
        Ok(garden)
    }

    fn empty(config: GardenConfig) -> Result<Self> {
        config.validate()?;
        let engine = GenomeEngine::new(config.genetics.clone())?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Ok(Self {
            config,
            engine,
            colliders: ColliderRegistry::new(),
            plants: Vec::new(),
            pending_add: Vec::new(),
            pending_destroy: Vec::new(),
            rng,
            next_plant_id: 0,
            tick: 0,
            elapsed: 0.0,
            births: 0,
            deaths: 0,
            seeds_dropped: 0,
        })
    }

    pub fn config(&self) -> &GardenConfig {
        &self.config
    }

    /// Live plants in the order they entered the garden
    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    pub fn plant(&self, id: PlantId) -> Option<&Plant> {
        self.plants.iter().find(|plant| plant.id() == id)
    }

    pub fn len(&self) -> usize {
        self.plants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }

    pub fn colliders(&self) -> &ColliderRegistry {
        &self.colliders
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advance the whole population by `dt`.
    ///
    /// Every live plant grows against pre-tick state first. Only then are the
    /// plants born during the tick added, followed by the removal of the
    /// plants that died.
    ///
    /// Panics if `dt` is negative or not finite.
    #[instrument(skip(self), fields(tick = self.tick))]
    pub fn tick(&mut self, dt: f32) -> Result<()> {
        assert!(
            dt.is_finite() && dt >= 0.0,
            "tick length must be non-negative and finite, got {dt}"
        );

        for index in 0..self.plants.len() {
            let mut effects = GrowthEffects::default();
            let plant = &mut self.plants[index];
            plant.grow(dt, &mut self.colliders, &mut effects)?;
            let id = plant.id();

            for request in effects.seed_requests {
                self.release_seeds(index, request);
            }
            if let Some(cause) = effects.death {
                trace!(plant = %id, ?cause, "Plant marked for removal");
                self.notify_death(id);
            }
        }

        self.commit_pending()?;
        self.tick += 1;
        self.elapsed += dt;

        if self.config.metrics_interval > 0 && self.tick % self.config.metrics_interval == 0 {
            self.emit_population_metrics();
        }
        Ok(())
    }

    /// Queue a plant for removal at the end of the current tick. Asking twice
    /// is the same as asking once.
    pub fn notify_death(&mut self, id: PlantId) {
        if !self.pending_destroy.contains(&id) {
            self.pending_destroy.push(id);
        }
    }

    /// Scatter one seed per genome around `origin`, each at a uniformly random
    /// angle and a distance below `spread`. Seeds landing outside the arena
    /// are dropped. Returns how many seeds were planted; they join the live
    /// set when the current tick commits.
    pub fn reproduce(&mut self, genomes: &[Genome], origin: Position, spread: f32) -> usize {
        let mut planted = 0;
        for genome in genomes {
            let angle = self.rng.gen_range(0.0..TAU);
            let distance = if spread > 0.0 {
                self.rng.gen_range(0.0..spread)
            } else {
                0.0
            };
            let (dx, dy) = match self.config.reproduction.scatter {
                ScatterMode::Disk => (distance * angle.cos(), distance * angle.sin()),
                ScatterMode::Legacy => {
                    let distance = distance.trunc();
                    (distance * distance.cos(), distance * distance.sin())
                }
            };

            let position = origin.offset(dx, dy);
            if position.within(self.config.width, self.config.height) {
                let id = self.enqueue_plant(position, *genome);
                debug!(plant = %id, x = position.x, y = position.y, "Seed planted");
                planted += 1;
            } else {
                self.seeds_dropped += 1;
                trace!(x = position.x, y = position.y, "Seed landed outside the arena");
            }
        }
        planted
    }

    /// A uniformly random live plant
    pub fn random_mate(&mut self) -> Result<&Plant> {
        self.plants
            .choose(&mut self.rng)
            .ok_or(Error::NoMatesAvailable)
    }

    /// Add a plant that joins the live set at the next commit. Its roots are
    /// registered right away.
    pub fn sow(&mut self, position: Position, genome: Genome) -> PlantId {
        self.enqueue_plant(position, genome)
    }

    /// Draw every live plant through a fresh render scheduler. Returns the
    /// number of drawables painted.
    pub fn render(&self, canvas: &mut dyn Canvas) -> usize {
        let mut scheduler = RenderScheduler::new();
        for plant in &self.plants {
            plant.schedule_draw(&mut scheduler);
        }
        scheduler.render(canvas)
    }

    pub fn stats(&self) -> GardenStats {
        let mean_root_radius = if self.plants.is_empty() {
            0.0
        } else {
            self.plants
                .iter()
                .map(|plant| plant.roots().radius())
                .sum::<f32>()
                / self.plants.len() as f32
        };
        GardenStats {
            tick: self.tick,
            elapsed: self.elapsed,
            live: self.plants.len(),
            pending_add: self.pending_add.len(),
            pending_destroy: self.pending_destroy.len(),
            births: self.births,
            deaths: self.deaths,
            seeds_dropped: self.seeds_dropped,
            mean_root_radius,
        }
    }

    fn enqueue_plant(&mut self, position: Position, genome: Genome) -> PlantId {
        let id = PlantId(self.next_plant_id);
        self.next_plant_id += 1;
        self.pending_add
            .push(Plant::new(id, position, genome, &mut self.colliders));
        id
    }

    /// Cross the parent with a random mate once per seed and scatter the offspring
    fn release_seeds(&mut self, parent_index: usize, request: SeedRequest) {
        if request.seed_count == 0 {
            return;
        }
        let mother = *self.plants[parent_index].genome();
        let father = match self.random_mate() {
            Ok(mate) => *mate.genome(),
            Err(err) => {
                debug!(%err, "Seed release skipped");
                return;
            }
        };

        let genomes: Vec<Genome> = (0..request.seed_count)
            .map(|_| self.engine.mate(&mother, &father, &mut self.rng))
            .collect();
        let spread = request.dispersal as f32 * self.config.reproduction.spread_per_dispersal;
        let planted = self.reproduce(&genomes, request.origin, spread);
        debug!(
            seeds = genomes.len(),
            planted,
            spread,
            "Flower released its seeds"
        );
    }

    /// Move pending births into the live set, then remove pending deaths and
    /// detach their colliders.
    fn commit_pending(&mut self) -> Result<()> {
        self.births += self.pending_add.len() as u64;
        self.plants.append(&mut self.pending_add);

        for id in std::mem::take(&mut self.pending_destroy) {
            let Some(index) = self.plants.iter().position(|plant| plant.id() == id) else {
                debug!(plant = %id, "Removal requested for a plant that is not live");
                continue;
            };
            let plant = self.plants.remove(index);
            plant.detach_colliders(&mut self.colliders)?;
            self.deaths += 1;
            debug!(plant = %id, age = plant.age(), "Plant removed");
        }
        Ok(())
    }

    fn emit_population_metrics(&self) {
        let stats = self.stats();
        info!(
            event = "population_metrics",
            tick = stats.tick,
            elapsed = stats.elapsed,
            live = stats.live,
            births = stats.births,
            deaths = stats.deaths,
            seeds_dropped = stats.seeds_dropped,
            mean_root_radius = stats.mean_root_radius,
            "Population metrics snapshot"
        );

        event!(
            Level::INFO,
            gauge_name = "population_total",
            gauge_value = stats.live,
            tick = stats.tick,
            "Population gauge"
        );
    }
}
