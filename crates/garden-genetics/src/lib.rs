//! Bit-packed plant genomes and the genetic operators that produce them.
//!
//! A [`Genome`] is five independent 64-bit chromosomes. Each chromosome is a
//! bag of fixed-width [`Gene`]s decoded by shift and mask into the traits of
//! one plant subsystem.

pub mod gene;
pub mod genome;
pub mod engine;
pub mod traits;

pub use engine::GenomeEngine;
pub use gene::Gene;
pub use genome::{Chromosome, Genome};
pub use traits::{FlowerTraits, RootsTraits};

#[cfg(test)]
pub(crate) mod testing;
