//! Factory configuration: how many workers, how much work each, which identities

use super::GeneratorConfig;
use crate::error::{IdGenError, Result};

/// Configuration for an [`IdFactory`](crate::IdFactory)
///
/// Worker identities double as machine ids. When `worker_ids` is empty the
/// workers are numbered `0..workers`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactoryConfig {
    workers: usize,
    ids_per_worker: u64,
    worker_ids: Vec<u64>,
    generator: GeneratorConfig,
}

impl FactoryConfig {
    /// Create a new configuration builder
    pub fn builder() -> FactoryConfigBuilder {
        FactoryConfigBuilder::default()
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn ids_per_worker(&self) -> u64 {
        self.ids_per_worker
    }

    pub fn worker_ids(&self) -> &[u64] {
        &self.worker_ids
    }

    /// Template shared by every worker's generator
    pub fn generator(&self) -> &GeneratorConfig {
        &self.generator
    }

    /// Total number of ids the consumer expects when every worker finishes
    pub fn total_expected(&self) -> u64 {
        self.workers as u64 * self.ids_per_worker
    }

    /// Machine identity of the worker at `index`
    pub fn worker_id(&self, index: usize) -> u64 {
        self.worker_ids
            .get(index)
            .copied()
            .unwrap_or(index as u64)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !self.worker_ids.is_empty() && self.worker_ids.len() != self.workers {
            return Err(IdGenError::WorkerCountMismatch {
                workers: self.workers,
                worker_ids: self.worker_ids.len(),
            });
        }
        Ok(())
    }
}

/// Builder for FactoryConfig
#[derive(Debug, Default)]
pub struct FactoryConfigBuilder {
    workers: usize,
    ids_per_worker: u64,
    worker_ids: Vec<u64>,
    generator: GeneratorConfig,
}

impl FactoryConfigBuilder {
    /// Set the number of producer workers
    pub fn workers(mut self, n: usize) -> Self {
        self.workers = n;
        self
    }

    /// Set how many ids each worker produces
    pub fn ids_per_worker(mut self, n: u64) -> Self {
        self.ids_per_worker = n;
        self
    }

    /// Set explicit worker identities; the length must match the worker count
    pub fn worker_ids(mut self, ids: impl Into<Vec<u64>>) -> Self {
        self.worker_ids = ids.into();
        self
    }

    /// Set the generator template; its machine id is replaced per worker
    pub fn generator(mut self, config: GeneratorConfig) -> Self {
        self.generator = config;
        self
    }

    /// Build the final FactoryConfig
    pub fn build(self) -> FactoryConfig {
        FactoryConfig {
            workers: self.workers,
            ids_per_worker: self.ids_per_worker,
            worker_ids: self.worker_ids,
            generator: self.generator,
        }
    }
}
