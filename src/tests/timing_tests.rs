//! Real-clock generation

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crate::tests::test_utils::{assert_strictly_increasing, assert_unique_ids, generator};
    use crate::*;

    #[test]
    fn test_rollover_liveness_on_system_clock() {
        let g = generator(
            GeneratorConfig::builder()
                .sequence_bits(4)
                .generation_interval(Duration::from_millis(2))
                .build(),
        );
        let start = Instant::now();
        let ids: Vec<u64> = (0..64).map(|_| g.next_id().unwrap().value()).collect();

        // 64 ids with 15 per interval need a handful of intervals, not seconds
        assert!(start.elapsed() < Duration::from_secs(5));
        assert_strictly_increasing(&ids);
    }

    #[test]
    fn test_uniqueness_over_a_busy_period() {
        let g = generator(GeneratorConfig::default());
        let start = Instant::now();
        let mut ids = Vec::new();
        while start.elapsed() < Duration::from_millis(200) {
            ids.push(g.next_id().unwrap().value());
        }
        assert_unique_ids(&ids, ids.len());
        assert_strictly_increasing(&ids);
    }
}
