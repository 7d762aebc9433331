#[cfg(test)]
mod tests {
    use crate::tests::test_utils::{assert_strictly_increasing, assert_unique_ids, generator};
    use crate::*;
    use rand::seq::index::sample;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_distributed_generators_are_disjoint() {
        let num_generators = 8;
        let ids_per_generator = 1 << 14;
        let mut handles = Vec::with_capacity(num_generators);

        for machine in 0..num_generators {
            let config = GeneratorConfig::builder()
                .time_bits(38)
                .machine_bits(6)
                .sequence_bits(16)
                .machine_id(machine as u64)
                .build();
            let g = generator(config);
            handles.push(thread::spawn(move || {
                (0..ids_per_generator)
                    .map(|_| g.next_id().unwrap().value())
                    .collect::<Vec<_>>()
            }));
        }

        let mut all_ids = Vec::with_capacity(num_generators * ids_per_generator);
        for h in handles {
            let ids = h.join().expect("thread panicked");
            assert_strictly_increasing(&ids);
            all_ids.extend(ids);
        }
        assert_unique_ids(&all_ids, num_generators * ids_per_generator);
    }

    #[test]
    fn test_random_machine_ids_are_disjoint() {
        let machines = sample(&mut rand::rng(), 64, 6);
        let handles: Vec<_> = machines
            .into_iter()
            .map(|machine| {
                let g = generator(
                    GeneratorConfig::builder()
                        .machine_bits(6)
                        .machine_id(machine as u64)
                        .build(),
                );
                thread::spawn(move || {
                    (0..2000)
                        .map(|_| g.next_id().unwrap().value())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let all_ids: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        assert_unique_ids(&all_ids, 6 * 2000);
    }

    #[test]
    fn test_shared_generator_serializes_callers() {
        let g = Arc::new(generator(GeneratorConfig::default()));
        let num_threads = 10;
        let ids_per_thread = 2000;

        let handles: Vec<_> = (0..num_threads)
            .map(|_| {
                let g = Arc::clone(&g);
                thread::spawn(move || {
                    (0..ids_per_thread)
                        .map(|_| g.next_id().unwrap().value())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut all_ids = Vec::with_capacity(num_threads * ids_per_thread);
        for h in handles {
            let ids = h.join().unwrap();
            // Each caller still sees its own ids increase
            assert_strictly_increasing(&ids);
            all_ids.extend(ids);
        }
        assert_unique_ids(&all_ids, num_threads * ids_per_thread);
    }
}
