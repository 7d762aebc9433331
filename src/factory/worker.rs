use tracing::{debug, warn};

use crate::error::IdGenError;
use crate::generator::time::{Clock, SystemClock};
use crate::queue::SharedQueue;
use crate::Generator;

/// Producer that owns one generator and a fixed quota
#[derive(Debug)]
pub struct Worker<C: Clock = SystemClock> {
    index: usize,
    generator: Generator<C>,
    quota: u64,
}

/// What a worker did before it stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerReport {
    pub worker: usize,
    pub machine_id: u64,
    pub produced: u64,
    /// Set when generation failed before the quota was reached
    pub error: Option<IdGenError>,
}

impl<C: Clock> Worker<C> {
    pub fn new(index: usize, generator: Generator<C>, quota: u64) -> Self {
        Self {
            index,
            generator,
            quota,
        }
    }

    pub fn generator(&self) -> &Generator<C> {
        &self.generator
    }

    /// Generate up to `quota` ids into `queue`. Stops at the first error.
    /// Never pops.
    pub fn run(&self, queue: &SharedQueue) -> WorkerReport {
        let machine_id = self.generator.machine_id();
        debug!(worker = self.index, machine_id, quota = self.quota, "worker started");

        let mut produced = 0;
        let mut error = None;
        while produced < self.quota {
            match self.generator.next_id() {
                Ok(id) => {
                    queue.push(id);
                    produced += 1;
                }
                Err(e) => {
                    warn!(worker = self.index, machine_id, produced, error = %e, "worker stopped early");
                    error = Some(e);
                    break;
                }
            }
        }

        debug!(worker = self.index, produced, "worker finished");
        WorkerReport {
            worker: self.index,
            machine_id,
            produced,
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::identity::FixedIdentity;
    use crate::queue::Popped;
    use crate::ManualClock;
    use std::time::Duration;

    #[test]
    fn test_worker_fills_quota() {
        let generator = Generator::with_parts(
            Some(GeneratorConfig::builder().machine_id(3).build()),
            &FixedIdentity(0),
            ManualClock::new(0),
        )
        .unwrap();
        let worker = Worker::new(0, generator, 25);
        let queue = SharedQueue::new(1);

        let report = worker.run(&queue);
        assert_eq!(report.produced, 25);
        assert_eq!(report.machine_id, 3);
        assert!(report.error.is_none());
        assert_eq!(queue.len(), 25);
    }

    #[test]
    fn test_worker_stops_on_expiry() {
        // Two intervals of budget: the second call rolls over into interval 1,
        // the third opens interval 2 and expires
        let config = GeneratorConfig::builder()
            .time_bits(1)
            .sequence_bits(1)
            .generation_interval(Duration::from_secs(1))
            .build();
        let generator =
            Generator::with_parts(Some(config), &FixedIdentity(0), ManualClock::new(0)).unwrap();
        let worker = Worker::new(7, generator, 10);
        let queue = SharedQueue::new(1);

        let report = worker.run(&queue);
        assert_eq!(report.worker, 7);
        assert_eq!(report.produced, 2);
        assert_eq!(
            report.error,
            Some(IdGenError::GeneratorExpired { max_intervals: 2 })
        );
        queue.close_producer();
        let mut drained = 0;
        while let Popped::Item(_) = queue.pop_wait() {
            drained += 1;
        }
        assert_eq!(drained, 2);
    }
}
