//! # Snowforge
//!
//! Snowflake-style 64-bit identifiers built from a local clock, a fixed
//! machine identity and a per-interval sequence counter, plus a harness that
//! drives many generators concurrently and drains their output in
//! approximate timestamp order.
//!
//! Identifier layout, most significant first:
//!
//! ```text
//! | interval counter (time_bits) | machine id (machine_bits) | sequence (sequence_bits) |
//! ```
//!
//! Defaults are 38/16/10 bits with a 1ms interval.
//!
//! ```no_run
//! use snowforge::{Generator, GeneratorConfig};
//!
//! let generator = Generator::with_config(GeneratorConfig::builder().machine_id(7).build())?;
//! let id = generator.next_id()?;
//! let (interval, machine, sequence) = generator.extract.decompose(id.value());
//! assert_eq!(machine, 7);
//! # let _ = (interval, sequence);
//! # Ok::<(), snowforge::IdGenError>(())
//! ```

#![forbid(unsafe_code)]

mod config;
mod error;
mod extractor;
mod factory;
mod generator;
mod id;
mod identity;
mod queue;

#[cfg(test)]
pub mod tests;

// Re-export main types
pub use config::{
    FactoryConfig, FactoryConfigBuilder, GeneratorConfig, GeneratorConfigBuilder,
    DEFAULT_GENERATION_INTERVAL, DEFAULT_MACHINE_BITS, DEFAULT_SEQUENCE_BITS, DEFAULT_TIME_BITS,
};
pub use error::{IdGenError, Result};
pub use extractor::{IdExtractor, IdLayout};
pub use factory::{ConsumeSummary, IdFactory, IdSink, LogSink, RunReport, Worker, WorkerReport};
pub use generator::time::{Clock, ManualClock, SystemClock};
pub use generator::Generator;
pub use id::Id;
pub use identity::{FixedIdentity, IdentitySource, OutboundIpIdentity};
pub use queue::{IdQueue, Popped, SharedQueue};
