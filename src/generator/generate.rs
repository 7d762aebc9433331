//! ID generation logic

use tracing::debug;

use super::time::Clock;
use super::wait::remaining_in_interval;
use super::Generator;
use crate::error::{IdGenError, Result};
use crate::id::Id;

impl<C: Clock> Generator<C> {
    /// Generate the next id.
    ///
    /// Serialized by the generator lock. When the sequence saturates before
    /// the current interval is over, the caller sleeps for the rest of the
    /// interval (holding the lock) and the id lands in the next interval.
    ///
    /// # Errors
    /// - [`IdGenError::ClockRegression`] if the clock is behind the last
    ///   interval boundary. State is left untouched.
    /// - [`IdGenError::GeneratorExpired`] once the interval counter reaches
    ///   2^time_bits. Permanent.
    pub fn next_id(&self) -> Result<Id> {
        let mut state = self.state.lock();
        let max_intervals = self.layout.max_intervals();
        let expired = IdGenError::GeneratorExpired { max_intervals };

        let now = self.clock.now_nanos();
        let elapsed = now.saturating_sub(state.last_timestamp);
        if elapsed < 0 {
            return Err(IdGenError::ClockRegression {
                delta_nanos: -elapsed,
            });
        }
        if state.intervals >= max_intervals {
            return Err(expired);
        }

        if elapsed >= self.interval_nanos {
            state.open_interval(now);
        }
        if state.intervals >= max_intervals {
            return Err(expired);
        }

        if state.bump_sequence(self.layout.max_sequence()) && elapsed < self.interval_nanos {
            let wait = remaining_in_interval(state.last_timestamp, self.interval_nanos, now);
            debug!(machine_id = self.machine_id, ?wait, "sequence rolled over, waiting for next interval");
            self.clock.sleep(wait);
            state.intervals += 1;
            if state.intervals >= max_intervals {
                return Err(expired);
            }
        }

        let value = self
            .layout
            .compose(state.intervals, self.machine_id, state.sequence);
        Ok(Id::new(value, self.clock.now_nanos()))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::config::GeneratorConfig;
    use crate::error::IdGenError;
    use crate::identity::FixedIdentity;
    use crate::{Clock, Generator, ManualClock};

    const MS: Duration = Duration::from_millis(1);

    fn manual(config: GeneratorConfig) -> (Generator<ManualClock>, ManualClock) {
        let clock = ManualClock::new(1_000_000_000);
        let g = Generator::with_parts(Some(config), &FixedIdentity(0), clock.clone()).unwrap();
        (g, clock)
    }

    #[test]
    fn test_first_id_uses_sequence_one() {
        let (g, _) = manual(GeneratorConfig::builder().machine_id(1).build());
        let id = g.next_id().unwrap();
        assert_eq!(g.extract.decompose(id.value()), (0, 1, 1));
    }

    #[test]
    fn test_interval_advances_with_clock() {
        let (g, clock) = manual(GeneratorConfig::builder().machine_id(2).build());
        g.next_id().unwrap();
        clock.advance(MS);
        let id = g.next_id().unwrap();
        let (interval, machine, sequence) = g.extract.decompose(id.value());
        assert_eq!(interval, 1);
        assert_eq!(machine, 2);
        // Sequence keeps counting across intervals
        assert_eq!(sequence, 2);
    }

    #[test]
    fn test_clock_regression_leaves_state() {
        let (g, clock) = manual(GeneratorConfig::default());
        let first = g.next_id().unwrap();
        clock.rewind(Duration::from_nanos(500));
        assert_eq!(
            g.next_id(),
            Err(IdGenError::ClockRegression { delta_nanos: 500 })
        );
        clock.advance(Duration::from_nanos(500));
        let next = g.next_id().unwrap();
        assert_eq!(g.extract.sequence(next.value()), 2);
        assert!(next.value() > first.value());
    }

    #[test]
    fn test_expires_after_time_budget() {
        let (g, clock) = manual(GeneratorConfig::builder().time_bits(2).build());
        for expected in 0..4 {
            let id = g.next_id().unwrap();
            assert_eq!(g.extract.interval(id.value()), expected);
            clock.advance(MS);
        }
        let expired = IdGenError::GeneratorExpired { max_intervals: 4 };
        assert_eq!(g.next_id(), Err(expired.clone()));
        assert!(g.is_expired());
        // Permanent, even without further clock movement
        assert_eq!(g.next_id(), Err(expired));
    }

    #[test]
    fn test_rollover_sleeps_into_next_interval() {
        let (g, clock) = manual(GeneratorConfig::builder().sequence_bits(2).build());
        let start = clock.now_nanos();
        let ids: Vec<u64> = (0..5).map(|_| g.next_id().unwrap().value()).collect();
        let parts: Vec<_> = ids.iter().map(|&id| g.extract.decompose(id)).collect();

        assert_eq!(parts[..3], [(0, 0, 1), (0, 0, 2), (0, 0, 3)]);
        assert_eq!(parts[3], (1, 0, 0));
        assert_eq!(parts[4], (2, 0, 1));
        // The manual clock was slept forward by exactly one interval
        assert_eq!(clock.now_nanos() - start, 1_000_000);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_rollover_at_interval_boundary_does_not_sleep() {
        let (g, clock) = manual(GeneratorConfig::builder().sequence_bits(1).build());
        g.next_id().unwrap();
        clock.advance(MS);
        let before = clock.now_nanos();
        let id = g.next_id().unwrap();
        assert_eq!(clock.now_nanos(), before);
        assert_eq!(g.extract.decompose(id.value()), (1, 0, 0));
    }

    #[test]
    fn test_timestamp_taken_after_bookkeeping() {
        let (g, clock) = manual(GeneratorConfig::builder().sequence_bits(1).build());
        g.next_id().unwrap();
        let rolled = g.next_id().unwrap();
        assert_eq!(rolled.timestamp(), clock.now_nanos());
    }
}
