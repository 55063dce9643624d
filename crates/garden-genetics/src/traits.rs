//! Decoding of chromosomes into part traits.

use crate::gene::Gene;
use serde::{Deserialize, Serialize};

/// Gene layout of the roots chromosome
pub mod roots_genes {
    use super::Gene;

    pub const DEPTH: Gene = Gene::new(60, 4);
    /// Squared on decode
    pub const WIDTH: Gene = Gene::new(56, 4);
}

/// Gene layout of the flower chromosome
pub mod flower_genes {
    use super::Gene;

    pub const HUE: Gene = Gene::new(56, 8);
    pub const SEED_SIZE: Gene = Gene::new(52, 4);
    pub const SEED_NUM: Gene = Gene::new(48, 2);
    pub const SEED_DISPERSAL: Gene = Gene::new(44, 4);
    pub const NUM_PETALS: Gene = Gene::new(42, 2);
    pub const PETAL_SIZE: Gene = Gene::new(38, 4);
    pub const DECLINE_AGE: Gene = Gene::new(35, 3);
}

/// Decoded roots parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RootsTraits {
    /// 0 to 15
    pub depth: u32,
    /// Squared width gene, 0 to 225
    pub width: u32,
}

impl RootsTraits {
    pub fn decode(chromosome: u64) -> Self {
        let width = roots_genes::WIDTH.read(chromosome) as u32;
        Self {
            depth: roots_genes::DEPTH.read(chromosome) as u32,
            width: width * width,
        }
    }
}

/// Decoded flower parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowerTraits {
    /// Hue in `[0, 1)`
    pub hue: f32,
    pub seed_size: u32,
    /// Offspring produced by one bloom, 0 to 3
    pub seed_num: u32,
    /// Scales how far seeds travel, 0 to 15
    pub seed_dispersal: u32,
    /// 3 to 6
    pub num_petals: u32,
    /// 10 to 40
    pub petal_size: u32,
    /// Age at which the flower releases its seeds and starts to wilt, 0.5 to 3.5
    pub decline_age: f32,
}

impl FlowerTraits {
    pub fn decode(chromosome: u64) -> Self {
        let read = |gene: Gene| gene.read(chromosome) as u32;
        let decline_steps = flower_genes::DECLINE_AGE.max_value() as f32;
        Self {
            hue: read(flower_genes::HUE) as f32 / 256.0,
            seed_size: read(flower_genes::SEED_SIZE),
            seed_num: read(flower_genes::SEED_NUM),
            seed_dispersal: read(flower_genes::SEED_DISPERSAL),
            num_petals: 3 + read(flower_genes::NUM_PETALS),
            petal_size: 10 + read(flower_genes::PETAL_SIZE) * 2,
            decline_age: 0.5 + 3.0 * (read(flower_genes::DECLINE_AGE) as f32 / decline_steps),
        }
    }
}
