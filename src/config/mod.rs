//! Configuration for generators and the factory harness

mod builder;
mod factory;

use std::time::Duration;

pub use builder::GeneratorConfigBuilder;
pub use builder::{
    DEFAULT_GENERATION_INTERVAL, DEFAULT_MACHINE_BITS, DEFAULT_SEQUENCE_BITS, DEFAULT_TIME_BITS,
};
pub use factory::{FactoryConfig, FactoryConfigBuilder};

/// Raw configuration for an id generator
///
/// - `time_bits` bounds the generator lifetime: it expires after 2^time_bits intervals
/// - `machine_bits` bounds the number of distinct machines
/// - `sequence_bits` bounds how many ids fit in one interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    time_bits: u8,
    machine_bits: u8,
    sequence_bits: u8,
    machine_id: u64,
    generation_interval: Duration,
}

impl GeneratorConfig {
    pub(crate) const fn from_builder(b: GeneratorConfigBuilder) -> Self {
        Self {
            time_bits: b.time_bits,
            machine_bits: b.machine_bits,
            sequence_bits: b.sequence_bits,
            machine_id: b.machine_id,
            generation_interval: b.generation_interval,
        }
    }

    /// Create a new configuration builder
    pub const fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::new()
    }

    /// Copy of this config with a different machine identity
    pub const fn with_machine_id(mut self, machine_id: u64) -> Self {
        self.machine_id = machine_id;
        self
    }

    #[inline(always)]
    pub const fn time_bits(&self) -> u8 {
        self.time_bits
    }

    #[inline(always)]
    pub const fn machine_bits(&self) -> u8 {
        self.machine_bits
    }

    #[inline(always)]
    pub const fn sequence_bits(&self) -> u8 {
        self.sequence_bits
    }

    #[inline(always)]
    pub const fn machine_id(&self) -> u64 {
        self.machine_id
    }

    #[inline(always)]
    pub const fn generation_interval(&self) -> Duration {
        self.generation_interval
    }

    /// Whether every width is below 64 and the total fits in 64 bits
    pub fn fits_in_u64(&self) -> bool {
        let widths = [self.time_bits, self.machine_bits, self.sequence_bits];
        widths.iter().all(|&b| b < 64) && widths.iter().map(|&b| b as u32).sum::<u32>() <= 64
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfigBuilder::new().build()
    }
}
