use std::cmp::Ordering;
use std::fmt;

/// A generated identifier together with the wall-clock reading taken when it
/// was produced.
///
/// The timestamp is not part of the 64-bit value. It only orders ids
/// downstream: earlier timestamps first, ties broken by the numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id {
    value: u64,
    timestamp: i64,
}

impl Id {
    pub const fn new(value: u64, timestamp_nanos: i64) -> Self {
        Self {
            value,
            timestamp: timestamp_nanos,
        }
    }

    /// The bit-packed identifier
    #[inline(always)]
    pub const fn value(&self) -> u64 {
        self.value
    }

    /// Creation time in nanoseconds since the Unix epoch
    #[inline(always)]
    pub const fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

impl Ord for Id {
    fn cmp(&self, other: &Self) -> Ordering {
        self.timestamp
            .cmp(&other.timestamp)
            .then_with(|| self.value.cmp(&other.value))
    }
}

impl PartialOrd for Id {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<Id> for u64 {
    fn from(id: Id) -> Self {
        id.value
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
