//! GeneratorConfig builder for constructing configuration

use std::time::Duration;

use super::GeneratorConfig;

/// Default configuration values
pub const DEFAULT_TIME_BITS: u8 = 38;
pub const DEFAULT_MACHINE_BITS: u8 = 16;
pub const DEFAULT_SEQUENCE_BITS: u8 = 10;
pub const DEFAULT_GENERATION_INTERVAL: Duration = Duration::from_millis(1);

/// Builder for GeneratorConfig
///
/// Values are stored as given. Zero widths, a zero interval and oversized
/// machine ids are repaired (or rejected) when a generator is built from the
/// resulting config.
#[derive(Debug, Clone)]
pub struct GeneratorConfigBuilder {
    pub(super) time_bits: u8,
    pub(super) machine_bits: u8,
    pub(super) sequence_bits: u8,
    pub(super) machine_id: u64,
    pub(super) generation_interval: Duration,
}

impl GeneratorConfigBuilder {
    /// Create a new GeneratorConfigBuilder with default values
    pub const fn new() -> Self {
        Self {
            time_bits: DEFAULT_TIME_BITS,
            machine_bits: DEFAULT_MACHINE_BITS,
            sequence_bits: DEFAULT_SEQUENCE_BITS,
            machine_id: 0,
            generation_interval: DEFAULT_GENERATION_INTERVAL,
        }
    }

    /// Set the width of the interval counter field
    pub const fn time_bits(mut self, bits: u8) -> Self {
        self.time_bits = bits;
        self
    }

    /// Set the width of the machine identity field
    pub const fn machine_bits(mut self, bits: u8) -> Self {
        self.machine_bits = bits;
        self
    }

    /// Set the width of the sequence field
    pub const fn sequence_bits(mut self, bits: u8) -> Self {
        self.sequence_bits = bits;
        self
    }

    /// Set the machine identity embedded in every id
    pub const fn machine_id(mut self, id: u64) -> Self {
        self.machine_id = id;
        self
    }

    /// Set the length of one generation interval.
    /// With 16 sequence bits and a 1s interval, up to 2^16 ids fit in a second.
    pub const fn generation_interval(mut self, interval: Duration) -> Self {
        self.generation_interval = interval;
        self
    }

    /// Build the final GeneratorConfig
    pub const fn build(self) -> GeneratorConfig {
        GeneratorConfig::from_builder(self)
    }
}

impl Default for GeneratorConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
