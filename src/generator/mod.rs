//! Bit-packed id generator
//!
//! Split into modules:
//! - `state` - Interval/sequence bookkeeping behind the generator lock
//! - `time` - Wall-clock sources
//! - `wait` - Remaining-interval computation for rollover sleeps
//! - `generate` - The `next_id` algorithm
//!
//! Throughput scales by running more generators with distinct machine ids,
//! not by sharing one: every call on a generator is serialized by its lock.

mod generate;
mod state;
pub(crate) mod time;
mod wait;

use std::time::Duration;

use parking_lot::Mutex;
use tracing::warn;

use crate::config::{
    GeneratorConfig, DEFAULT_GENERATION_INTERVAL, DEFAULT_MACHINE_BITS, DEFAULT_SEQUENCE_BITS,
    DEFAULT_TIME_BITS,
};
use crate::error::{IdGenError, Result};
use crate::extractor::{IdExtractor, IdLayout};
use crate::identity::{IdentitySource, OutboundIpIdentity};

use state::State;
use time::{duration_nanos, Clock, SystemClock};

/// Snowflake-style generator: `interval | machine | sequence`
#[derive(Debug)]
pub struct Generator<C: Clock = SystemClock> {
    layout: IdLayout,
    machine_id: u64,
    interval: Duration,
    interval_nanos: i64,
    state: Mutex<State>,
    clock: C,
    pub extract: IdExtractor,
}

impl Generator {
    /// Create with the default layout and the outbound-interface machine identity
    pub fn new() -> Result<Self> {
        Self::with_parts(None, &OutboundIpIdentity::new(), SystemClock)
    }

    /// Create from a config. The network is only consulted if the machine
    /// id overflows its field.
    pub fn with_config(config: GeneratorConfig) -> Result<Self> {
        Self::with_parts(Some(config), &OutboundIpIdentity::new(), SystemClock)
    }

    /// Create with a caller-supplied fallback identity
    pub fn with_identity(
        config: Option<GeneratorConfig>,
        identity: &dyn IdentitySource,
    ) -> Result<Self> {
        Self::with_parts(config, identity, SystemClock)
    }
}

impl<C: Clock> Generator<C> {
    /// Create from an optional config, a fallback identity source and a clock.
    ///
    /// Zero widths, a zero interval and an overflowing machine id are
    /// repaired field by field. Only a layout that cannot fit in 64 bits
    /// is rejected.
    pub fn with_parts(
        config: Option<GeneratorConfig>,
        identity: &dyn IdentitySource,
        clock: C,
    ) -> Result<Self> {
        let config = match config {
            Some(config) => config,
            None => GeneratorConfig::default().with_machine_id(identity.machine_id()?),
        };
        let Resolved {
            layout,
            machine_id,
            interval,
        } = resolve(&config, identity)?;

        let started_at = clock.now_nanos();
        Ok(Self {
            layout,
            machine_id,
            interval,
            interval_nanos: duration_nanos(interval),
            state: Mutex::new(State::new(started_at)),
            clock,
            extract: IdExtractor::new(layout),
        })
    }

    /// Effective bit layout
    #[inline(always)]
    pub fn layout(&self) -> IdLayout {
        self.layout
    }

    /// Effective machine identity
    #[inline(always)]
    pub fn machine_id(&self) -> u64 {
        self.machine_id
    }

    /// Effective generation interval
    #[inline(always)]
    pub fn generation_interval(&self) -> Duration {
        self.interval
    }

    /// Intervals counted since creation
    pub fn intervals_elapsed(&self) -> u64 {
        self.state.lock().intervals
    }

    /// True once the interval counter has used up its bits
    pub fn is_expired(&self) -> bool {
        self.intervals_elapsed() >= self.layout.max_intervals()
    }
}

struct Resolved {
    layout: IdLayout,
    machine_id: u64,
    interval: Duration,
}

fn resolve(config: &GeneratorConfig, identity: &dyn IdentitySource) -> Result<Resolved> {
    if !config.fits_in_u64() {
        return Err(IdGenError::InvalidBitLayout {
            time_bits: config.time_bits(),
            machine_bits: config.machine_bits(),
            sequence_bits: config.sequence_bits(),
        });
    }

    let (machine_bits, machine_id) = if config.machine_bits() == 0 {
        warn!(
            default = DEFAULT_MACHINE_BITS,
            "machine bits can't be 0, using default machine bits"
        );
        (DEFAULT_MACHINE_BITS, config.machine_id())
    } else if config.machine_id() >= 1u64 << config.machine_bits() {
        let fallback = fit_fallback_identity(identity.machine_id()?, config.machine_bits());
        warn!(
            machine_id = config.machine_id(),
            fallback, "machine id overflows its field, using default machine identity"
        );
        (config.machine_bits(), fallback)
    } else {
        (config.machine_bits(), config.machine_id())
    };

    let interval = if config.generation_interval().is_zero() {
        warn!(
            default = ?DEFAULT_GENERATION_INTERVAL,
            "generation interval can't be 0, using default interval"
        );
        DEFAULT_GENERATION_INTERVAL
    } else {
        config.generation_interval()
    };

    let time_bits = if config.time_bits() == 0 {
        warn!(default = DEFAULT_TIME_BITS, "time bits can't be 0, using default time bits");
        DEFAULT_TIME_BITS
    } else {
        config.time_bits()
    };

    let sequence_bits = if config.sequence_bits() == 0 {
        warn!(
            default = DEFAULT_SEQUENCE_BITS,
            "sequence bits can't be 0, using default sequence bits"
        );
        DEFAULT_SEQUENCE_BITS
    } else {
        config.sequence_bits()
    };

    // Defaults substituted above can push a narrow layout past 64 bits
    if time_bits as u32 + machine_bits as u32 + sequence_bits as u32 > 64 {
        return Err(IdGenError::InvalidBitLayout {
            time_bits,
            machine_bits,
            sequence_bits,
        });
    }

    Ok(Resolved {
        layout: IdLayout::new(time_bits, machine_bits, sequence_bits),
        machine_id,
        interval,
    })
}

/// The default identity is 16 bits wide; narrower fields keep its low bits
fn fit_fallback_identity(fallback: u64, machine_bits: u8) -> u64 {
    let max = 1u64 << machine_bits;
    if fallback >= max {
        warn!(
            fallback,
            machine_bits, "default machine identity is wider than the field, keeping its low bits"
        );
        fallback & (max - 1)
    } else {
        fallback
    }
}
