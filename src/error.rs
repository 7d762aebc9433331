use thiserror::Error;

/// Represents errors that can occur while building or running generators
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdGenError {
    /// A single bit width is 64 or more, or the widths add up past 64
    #[error(
        "Invalid bit layout {time_bits}/{machine_bits}/{sequence_bits}. A single width >= 64 or a sum > 64 is not allowed"
    )]
    InvalidBitLayout {
        time_bits: u8,
        machine_bits: u8,
        sequence_bits: u8,
    },
    /// Explicit worker identities don't line up with the worker count
    #[error("Factory has {workers} workers but {worker_ids} worker ids were given")]
    WorkerCountMismatch { workers: usize, worker_ids: usize },
    /// Clock moved backwards (system time issue)
    #[error("Clock moved backwards by {delta_nanos} nanoseconds. Refusing to generate id")]
    ClockRegression { delta_nanos: i64 },
    /// The interval counter ran out of bits
    #[error("Generator expired after {max_intervals} intervals. Create a new generator to keep producing unique ids")]
    GeneratorExpired { max_intervals: u64 },
    /// The default machine identity could not be derived
    #[error("Failed to obtain a default machine identity ({reason}). Provide an explicit machine id")]
    IdentityUnavailable { reason: String },
}

impl IdGenError {
    /// True for both configuration rejections (bit layout and worker identities)
    pub fn is_config_invalid(&self) -> bool {
        matches!(
            self,
            IdGenError::InvalidBitLayout { .. } | IdGenError::WorkerCountMismatch { .. }
        )
    }
}

pub type Result<T, E = IdGenError> = std::result::Result<T, E>;
