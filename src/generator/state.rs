//! Mutable bookkeeping guarded by the generator lock

/// Interval counter, sequence counter and the last interval boundary
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct State {
    pub(crate) intervals: u64,
    pub(crate) sequence: u64,
    pub(crate) last_timestamp: i64,
}

impl State {
    pub(crate) const fn new(started_at: i64) -> Self {
        Self {
            intervals: 0,
            sequence: 0,
            last_timestamp: started_at,
        }
    }

    /// Start a new interval at `now`
    #[inline(always)]
    pub(crate) fn open_interval(&mut self, now: i64) {
        self.intervals += 1;
        self.last_timestamp = now;
    }

    /// Advance the sequence. Returns true when the field was saturated and
    /// has wrapped to 0 instead.
    #[inline(always)]
    pub(crate) fn bump_sequence(&mut self, max_sequence: u64) -> bool {
        if self.sequence >= max_sequence {
            self.sequence = 0;
            true
        } else {
            self.sequence += 1;
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_interval() {
        let mut state = State::new(100);
        state.open_interval(250);
        assert_eq!(state.intervals, 1);
        assert_eq!(state.last_timestamp, 250);
    }

    #[test]
    fn test_bump_sequence_wraps_at_max() {
        let mut state = State::new(0);
        assert!(!state.bump_sequence(2));
        assert!(!state.bump_sequence(2));
        assert_eq!(state.sequence, 2);
        assert!(state.bump_sequence(2));
        assert_eq!(state.sequence, 0);
    }
}
