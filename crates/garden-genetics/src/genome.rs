//! Genome structure.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five chromosomes of a genome, each controlling one subsystem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chromosome {
    /// Energy intake
    Roots,
    /// Light absorption
    Leaf,
    /// Energy distribution
    Stem,
    /// Reproduction
    Flower,
    /// Whole-organism traits such as lifespan
    Whole,
}

impl Chromosome {
    pub const ALL: [Chromosome; 5] = [
        Chromosome::Roots,
        Chromosome::Leaf,
        Chromosome::Stem,
        Chromosome::Flower,
        Chromosome::Whole,
    ];

    const fn index(self) -> usize {
        match self {
            Chromosome::Roots => 0,
            Chromosome::Leaf => 1,
            Chromosome::Stem => 2,
            Chromosome::Flower => 3,
            Chromosome::Whole => 4,
        }
    }
}

/// Immutable set of five 64-bit chromosomes
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genome {
    chromosomes: [u64; 5],
}

impl Genome {
    pub fn new(roots: u64, leaf: u64, stem: u64, flower: u64, whole: u64) -> Self {
        Self {
            chromosomes: [roots, leaf, stem, flower, whole],
        }
    }

    pub(crate) fn from_fn(mut f: impl FnMut(Chromosome) -> u64) -> Self {
        let mut chromosomes = [0u64; 5];
        for chromosome in Chromosome::ALL {
            chromosomes[chromosome.index()] = f(chromosome);
        }
        Self { chromosomes }
    }

    pub fn get(&self, chromosome: Chromosome) -> u64 {
        self.chromosomes[chromosome.index()]
    }

    /// Copy of this genome with one chromosome replaced
    pub fn with(&self, chromosome: Chromosome, value: u64) -> Self {
        let mut chromosomes = self.chromosomes;
        chromosomes[chromosome.index()] = value;
        Self { chromosomes }
    }

    pub fn roots(&self) -> u64 {
        self.get(Chromosome::Roots)
    }

    pub fn leaf(&self) -> u64 {
        self.get(Chromosome::Leaf)
    }

    pub fn stem(&self) -> u64 {
        self.get(Chromosome::Stem)
    }

    pub fn flower(&self) -> u64 {
        self.get(Chromosome::Flower)
    }

    pub fn whole(&self) -> u64 {
        self.get(Chromosome::Whole)
    }
}

impl fmt::Debug for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Genome")
            .field("roots", &format_args!("{:#018x}", self.roots()))
            .field("leaf", &format_args!("{:#018x}", self.leaf()))
            .field("stem", &format_args!("{:#018x}", self.stem()))
            .field("flower", &format_args!("{:#018x}", self.flower()))
            .field("whole", &format_args!("{:#018x}", self.whole()))
            .finish()
    }
}
