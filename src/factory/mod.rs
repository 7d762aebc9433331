//! Multi-producer, single-consumer harness around the generator
//!
//! [`IdFactory`] builds one [`Worker`] per configured unit, each with its own
//! generator and machine identity, runs them on their own threads and drains
//! the shared ordered queue from a single consumer. Output is roughly sorted
//! by creation timestamp.
//!
//! The consumer stops once it has delivered every expected id, or once all
//! workers have finished (some possibly early, after a generator error) and
//! the queue is empty.

mod sink;
mod worker;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::{Condvar, Mutex};
use tracing::{error, info, warn};

use crate::config::FactoryConfig;
use crate::error::Result;
use crate::generator::time::{Clock, SystemClock};
use crate::identity::{IdentitySource, OutboundIpIdentity};
use crate::queue::{Popped, SharedQueue};
use crate::Generator;

pub use sink::{IdSink, LogSink};
pub use worker::{Worker, WorkerReport};

/// Counts outstanding participants (workers plus the consumer)
#[derive(Debug)]
struct Completion {
    pending: Mutex<usize>,
    done: Condvar,
}

impl Completion {
    fn new(pending: usize) -> Self {
        Self {
            pending: Mutex::new(pending),
            done: Condvar::new(),
        }
    }

    fn release(&self, n: usize) {
        let mut pending = self.pending.lock();
        *pending = pending.saturating_sub(n);
        if *pending == 0 {
            self.done.notify_all();
        }
    }

    fn wait(&self) {
        let mut pending = self.pending.lock();
        while *pending > 0 {
            self.done.wait(&mut pending);
        }
    }
}

/// Closes one producer slot when a worker thread ends, including by panic
struct ProducerSlot {
    queue: Arc<SharedQueue>,
    completion: Arc<Completion>,
}

impl Drop for ProducerSlot {
    fn drop(&mut self) {
        self.queue.close_producer();
        self.completion.release(1);
    }
}

/// Result of one consumer run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsumeSummary {
    pub delivered: u64,
    pub expected: u64,
}

impl ConsumeSummary {
    pub fn is_complete(&self) -> bool {
        self.delivered == self.expected
    }
}

/// Result of [`IdFactory::run`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub delivered: u64,
    pub expected: u64,
    pub workers: Vec<WorkerReport>,
}

impl RunReport {
    pub fn is_complete(&self) -> bool {
        self.delivered == self.expected
    }

    /// Workers that stopped before their quota
    pub fn failures(&self) -> impl Iterator<Item = &WorkerReport> {
        self.workers.iter().filter(|w| w.error.is_some())
    }
}

/// Owns the shared ordered queue and the completion barrier
pub struct IdFactory<C: Clock + Clone = SystemClock> {
    config: FactoryConfig,
    queue: Arc<SharedQueue>,
    completion: Arc<Completion>,
    identity: Arc<dyn IdentitySource>,
    clock: C,
    started: AtomicBool,
}

impl IdFactory {
    /// Create a factory on the system clock. The outbound-interface identity
    /// is only used for workers whose identity overflows the machine field.
    pub fn new(config: FactoryConfig) -> Result<Self> {
        Self::with_parts(config, Arc::new(OutboundIpIdentity::new()), SystemClock)
    }
}

impl<C: Clock + Clone + 'static> IdFactory<C> {
    /// Create with an explicit fallback identity source and clock.
    ///
    /// # Errors
    /// [`IdGenError::WorkerCountMismatch`](crate::IdGenError::WorkerCountMismatch)
    /// when explicit worker ids don't match the worker count.
    pub fn with_parts(
        config: FactoryConfig,
        identity: Arc<dyn IdentitySource>,
        clock: C,
    ) -> Result<Self> {
        config.validate()?;
        let workers = config.workers();
        Ok(Self {
            queue: Arc::new(SharedQueue::new(workers)),
            completion: Arc::new(Completion::new(workers + 1)),
            config,
            identity,
            clock,
            started: AtomicBool::new(false),
        })
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    /// Ids currently waiting for the consumer
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    fn hire_workers(&self) -> Result<Vec<Worker<C>>> {
        let template = *self.config.generator();
        (0..self.config.workers())
            .map(|index| {
                let config = template.with_machine_id(self.config.worker_id(index));
                let generator =
                    Generator::with_parts(Some(config), &*self.identity, self.clock.clone())?;
                Ok(Worker::new(index, generator, self.config.ids_per_worker()))
            })
            .collect()
    }

    /// Build every worker and start each on its own thread.
    ///
    /// Only the first call starts workers; later calls return no handles.
    ///
    /// # Errors
    /// Fails before spawning anything if a worker's generator can't be
    /// built. All producer slots are then closed so a waiting consumer ends.
    pub fn produce(&self) -> Result<Vec<JoinHandle<WorkerReport>>> {
        if self.started.swap(true, Ordering::AcqRel) {
            warn!("factory already producing");
            return Ok(Vec::new());
        }

        let workers = match self.hire_workers() {
            Ok(workers) => workers,
            Err(e) => {
                error!(error = %e, "failed to produce");
                self.queue.close_all();
                self.completion.release(self.config.workers());
                return Err(e);
            }
        };

        let handles = workers
            .into_iter()
            .map(|worker| {
                let slot = ProducerSlot {
                    queue: Arc::clone(&self.queue),
                    completion: Arc::clone(&self.completion),
                };
                thread::spawn(move || {
                    let slot = slot;
                    worker.run(&slot.queue)
                })
            })
            .collect();
        Ok(handles)
    }

    /// Drain the queue in `(timestamp, value)` order into `sink`.
    ///
    /// Returns after `workers * ids_per_worker` deliveries, or earlier when
    /// every worker has finished and nothing is left to pop.
    pub fn consume<S: IdSink>(&self, mut sink: S) -> ConsumeSummary {
        let expected = self.config.total_expected();
        let mut delivered = 0;

        while delivered < expected {
            match self.queue.pop_wait() {
                Popped::Item(id) => {
                    sink.emit(&id);
                    delivered += 1;
                }
                Popped::Drained => {
                    warn!(delivered, expected, "workers finished before delivering every id");
                    break;
                }
            }
        }

        info!(delivered, expected, "all work done");
        self.completion.release(1);
        ConsumeSummary {
            delivered,
            expected,
        }
    }

    /// Block until every worker and the consumer have finished
    pub fn wait(&self) {
        self.completion.wait();
    }

    /// Produce, consume on the calling thread, then collect worker reports.
    ///
    /// A panicking worker's panic is propagated.
    pub fn run<S: IdSink>(&self, sink: S) -> Result<RunReport> {
        let handles = self.produce()?;
        let summary = self.consume(sink);
        let workers = handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
            .collect();
        self.wait();

        Ok(RunReport {
            delivered: summary.delivered,
            expected: summary.expected,
            workers,
        })
    }
}
