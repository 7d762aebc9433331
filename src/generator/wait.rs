//! Waiting out the rest of an interval after sequence rollover

use std::time::Duration;

/// Time left until the interval that opened at `interval_start` closes.
/// Zero when it already has.
#[inline]
pub fn remaining_in_interval(interval_start: i64, interval_nanos: i64, now: i64) -> Duration {
    let end = interval_start.saturating_add(interval_nanos);
    let left = end.saturating_sub(now);
    Duration::from_nanos(u64::try_from(left).unwrap_or(0))
}
