//! Fixed-width gene descriptors.

/// A contiguous run of bits inside a 64-bit chromosome.
///
/// Descriptors are built in `const` context, so a gene that does not fit its
/// chromosome fails the build rather than decoding garbage at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gene {
    shift: u32,
    width: u32,
}

impl Gene {
    pub const fn new(shift: u32, width: u32) -> Self {
        assert!(width > 0 && width <= 64, "gene width must be 1..=64 bits");
        assert!(shift + width <= 64, "gene must fit inside a 64-bit chromosome");
        Self { shift, width }
    }

    pub const fn shift(&self) -> u32 {
        self.shift
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Largest value the gene can hold
    pub const fn max_value(&self) -> u64 {
        if self.width == 64 {
            u64::MAX
        } else {
            (1u64 << self.width) - 1
        }
    }

    /// Read the gene out of a chromosome
    pub const fn read(&self, chromosome: u64) -> u64 {
        (chromosome >> self.shift) & self.max_value()
    }

    /// Return `chromosome` with this gene replaced by `value`.
    ///
    /// Panics if `value` does not fit the gene.
    pub fn write(&self, chromosome: u64, value: u64) -> u64 {
        assert!(
            value <= self.max_value(),
            "value {value} does not fit a {}-bit gene",
            self.width
        );
        let mask = self.max_value() << self.shift;
        (chromosome & !mask) | (value << self.shift)
    }
}
