//! Genome generation, crossover and mutation.

use crate::genome::Genome;
use garden_core::{GeneticsConfig, Result};
use rand::Rng;

/// Number of bit positions visited per chromosome
const CHROMOSOME_BITS: u32 = u64::BITS;

/// Produces random genomes and offspring genomes.
///
/// All randomness comes from the caller's `Rng`, so a seeded or scripted source
/// makes every operation reproducible.
#[derive(Debug, Clone)]
pub struct GenomeEngine {
    config: GeneticsConfig,
}

impl GenomeEngine {
    pub fn new(config: GeneticsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneticsConfig {
        &self.config
    }

    /// Genome with five uniformly random chromosomes
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Genome {
        Genome::from_fn(|_| rng.gen())
    }

    /// Cross every chromosome pair of the parents independently
    pub fn mate<R: Rng + ?Sized>(&self, mother: &Genome, father: &Genome, rng: &mut R) -> Genome {
        Genome::from_fn(|chromosome| {
            self.cross_chromosome(mother.get(chromosome), father.get(chromosome), rng)
        })
    }

    /// Single-point crossover plus independent point mutations.
    ///
    /// Bits are visited from most to least significant with one uniform draw
    /// each. The first draw at or below the crossover rate copies the father's
    /// bits from the current position downwards; there is at most one such
    /// breakpoint. Any draw below the mutation rate flips the current bit, both
    /// before and after the breakpoint.
    pub fn cross_chromosome<R: Rng + ?Sized>(&self, mother: u64, father: u64, rng: &mut R) -> u64 {
        let mut child = mother;
        let mut crossed = false;
        let mut remaining = u64::MAX;
        let mut bit = 1u64 << (CHROMOSOME_BITS - 1);

        for _ in 0..CHROMOSOME_BITS {
            let draw: f32 = rng.gen();
            if !crossed && draw <= self.config.crossover_rate {
                child = (child & !remaining) | (father & remaining);
                crossed = true;
            }
            if draw < self.config.mutation_rate {
                child ^= bit;
            }

            remaining &= !bit;
            bit >>= 1;
        }

        child
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::Chromosome;
    use crate::testing::{ScriptedRng, HIGH, LOW};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn engine(crossover_rate: f32, mutation_rate: f32) -> GenomeEngine {
        GenomeEngine::new(GeneticsConfig {
            crossover_rate,
            mutation_rate,
        })
        .unwrap()
    }

    /// Bits strictly above position `63 - step` from the mother, the rest from the father
    fn expected_cross(mother: u64, father: u64, step: u32) -> u64 {
        let from_father = u64::MAX >> step;
        (mother & !from_father) | (father & from_father)
    }

    #[test]
    fn test_rejects_invalid_rates() {
        let result = GenomeEngine::new(GeneticsConfig {
            crossover_rate: -0.1,
            mutation_rate: 0.0,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_crossover_at_first_position_takes_father() {
        let engine = engine(0.7, 0.0);
        let mut rng = ScriptedRng::constant(LOW);
        let child = engine.cross_chromosome(0x1234, 0xABCD_0000_0000_5678, &mut rng);
        assert_eq!(child, 0xABCD_0000_0000_5678);
    }

    #[test]
    fn test_crossover_breakpoint_is_bit_exact() {
        let engine = engine(0.7, 0.0);
        let mother = 0xFFFF_FFFF_FFFF_FFFF;
        let father = 0;
        let mut rng = ScriptedRng::new(std::iter::repeat(HIGH).take(16), LOW);

        let child = engine.cross_chromosome(mother, father, &mut rng);
        assert_eq!(child, 0xFFFF_0000_0000_0000);
        assert_eq!(rng.draws, 64);
    }

    #[test]
    fn test_no_crossover_keeps_mother() {
        let engine = engine(0.7, 0.0);
        let mut rng = ScriptedRng::constant(HIGH);
        assert_eq!(engine.cross_chromosome(42, 7, &mut rng), 42);
    }

    #[test]
    fn test_certain_mutation_flips_every_bit() {
        let engine = engine(0.0, 1.0);
        let mother = 0x0F0F_1234_8000_0001;
        let mut rng = ScriptedRng::constant(HIGH);
        assert_eq!(engine.cross_chromosome(mother, 0, &mut rng), !mother);
    }

    #[test]
    fn test_mutation_continues_after_crossover() {
        let engine = engine(1.0, 1.0);
        let father = 0x00FF_00FF_00FF_00FF;
        let mut rng = ScriptedRng::constant(HIGH);
        assert_eq!(engine.cross_chromosome(u64::MAX, father, &mut rng), !father);
    }

    #[test]
    fn test_single_mutation_hits_current_bit() {
        // The third draw (bit 61) is the only one below the mutation rate.
        let engine = engine(0.0, 0.5);
        let mut rng = ScriptedRng::new([HIGH, HIGH, 1 << 8], HIGH);
        assert_eq!(engine.cross_chromosome(0, 0, &mut rng), 1 << 61);
    }

    #[test]
    fn test_mate_draws_once_per_bit_per_chromosome() {
        let engine = engine(0.7, 0.001);
        let mut rng = ScriptedRng::constant(HIGH);
        let mother = Genome::new(1, 2, 3, 4, 5);
        let father = Genome::new(6, 7, 8, 9, 10);

        let child = engine.mate(&mother, &father, &mut rng);
        assert_eq!(child, mother);
        assert_eq!(rng.draws, 5 * 64);
    }

    #[test]
    fn test_mate_crosses_chromosomes_independently() {
        let engine = engine(0.7, 0.0);
        // Roots crosses at the first bit, all later chromosomes never cross.
        let mut rng = ScriptedRng::new([LOW], HIGH);
        let mother = Genome::new(0, 0, 0, 0, 0);
        let father = Genome::new(u64::MAX, u64::MAX, u64::MAX, u64::MAX, u64::MAX);

        let child = engine.mate(&mother, &father, &mut rng);
        assert_eq!(child.get(Chromosome::Roots), u64::MAX);
        for chromosome in &Chromosome::ALL[1..] {
            assert_eq!(child.get(*chromosome), 0);
        }
    }

    #[test]
    fn test_generate_is_reproducible() {
        let engine = engine(0.7, 0.001);
        let a = engine.generate(&mut ChaCha8Rng::seed_from_u64(42));
        let b = engine.generate(&mut ChaCha8Rng::seed_from_u64(42));
        let c = engine.generate(&mut ChaCha8Rng::seed_from_u64(43));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_identical_parents_without_mutation_breed_true() {
        let engine = engine(0.7, 0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let parent = engine.generate(&mut rng);
        for _ in 0..20 {
            assert_eq!(engine.mate(&parent, &parent, &mut rng), parent);
        }
    }

    proptest! {
        #[test]
        fn prop_breakpoint_splits_parents(mother: u64, father: u64, step in 0u32..64) {
            let engine = engine(0.7, 0.0);
            let script = std::iter::repeat(HIGH).take(step as usize);
            let mut rng = ScriptedRng::new(script, LOW);
            let child = engine.cross_chromosome(mother, father, &mut rng);
            prop_assert_eq!(child, expected_cross(mother, father, step));
        }

        #[test]
        fn prop_child_bits_come_from_a_parent(mother: u64, father: u64, seed: u64) {
            let engine = engine(0.7, 0.0);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let child = engine.cross_chromosome(mother, father, &mut rng);
            let explained = (0..64).any(|step| child == expected_cross(mother, father, step));
            prop_assert!(explained);
        }
    }
}
