//! Partitioned Bloom filter.
//!
//! The `m` bits are split into `k` equally sized partitions (slices) and
//! every hash value addresses its own partition, so one item sets exactly
//! one bit per partition. Compared to a classic filter this removes
//! collisions between the hash values of a single item.
//!
//! References:
//!   * Chang, Feng, Li, "Approximate Caches for Packet Classification"
//!   * Almeida et al., "Scalable Bloom Filters"
use crate::config::FilterConfig;
use crate::error::BloomResult;
use crate::hash::{BitIndices, HashFunction};
use crate::params::FilterParams;
use crate::storage::BitStorage;
use crate::traits::{BloomFilterOps, BloomFilterStats, SubFilter};
use bitvec::{order::Lsb0, vec::BitVec};
use tracing::debug;

#[derive(Clone)]
pub struct PartitionedFilter<B: BitStorage = BitVec<usize, Lsb0>> {
    // Settings the current partitions were built from
    config: FilterConfig,
    // Settings the next reset will apply
    staged: FilterConfig,
    params: FilterParams,
    partitions: Vec<B>,
    insert_count: usize,
}

impl PartitionedFilter {
    /// Creates a filter backed by [`BitVec`] partitions.
    pub fn new(config: FilterConfig) -> BloomResult<Self> {
        Self::from_config(config)
    }
}

impl<B: BitStorage> PartitionedFilter<B> {
    pub fn from_config(config: FilterConfig) -> BloomResult<Self> {
        config.validate()?;
        let config = config.normalized();
        let params = FilterParams::from(&config);

        debug!(
            capacity = config.capacity,
            error_rate = config.error_rate,
            fill_ratio = config.fill_ratio,
            k = params.num_hashes,
            m = params.total_bits,
            s = params.partition_size,
            "Creating partitioned filter"
        );

        Ok(Self {
            staged: config.clone(),
            config,
            params,
            partitions: make_partitions(&params),
            insert_count: 0,
        })
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn params(&self) -> FilterParams {
        self.params
    }

    pub fn num_hashes(&self) -> usize {
        self.params.num_hashes
    }

    pub fn partition_size(&self) -> usize {
        self.params.partition_size
    }

    pub fn partitions(&self) -> &[B] {
        &self.partitions
    }

    /// Analytic false positive probability at the current load,
    /// `estimated_fill_ratio ^ k`.
    pub fn estimated_error_rate(&self) -> f64 {
        let exponent = i32::try_from(self.params.num_hashes).unwrap_or(i32::MAX);
        self.estimated_fill_ratio().powi(exponent)
    }

    fn indices(&self, item: &[u8]) -> BitIndices {
        BitIndices::for_item(
            self.config.hash_function,
            item,
            self.params.num_hashes,
            self.params.partition_size,
        )
    }
}

fn make_partitions<B: BitStorage>(params: &FilterParams) -> Vec<B> {
    (0..params.num_hashes)
        .map(|_| B::zeroed(params.partition_size))
        .collect()
}

impl<B: BitStorage> BloomFilterOps for PartitionedFilter<B> {
    fn insert(&mut self, item: &[u8]) {
        let indices = self.indices(item);
        for (partition, idx) in self.partitions.iter_mut().zip(indices) {
            partition.set_bit(idx);
        }
        self.insert_count += 1;
    }

    fn contains(&self, item: &[u8]) -> bool {
        self.partitions
            .iter()
            .zip(self.indices(item))
            .all(|(partition, idx)| partition.test_bit(idx))
    }

    fn reset(&mut self) {
        self.config = self.staged.clone().normalized();
        self.staged = self.config.clone();
        let params = FilterParams::from(&self.config);
        if params == self.params {
            for partition in &mut self.partitions {
                partition.clear_all();
            }
        } else {
            self.params = params;
            self.partitions = make_partitions(&self.params);
        }
        self.insert_count = 0;

        debug!(
            error_rate = self.config.error_rate,
            k = self.params.num_hashes,
            m = self.params.total_bits,
            s = self.params.partition_size,
            "Partitioned filter reset"
        );
    }
}

impl<B: BitStorage> BloomFilterStats for PartitionedFilter<B> {
    fn capacity(&self) -> usize {
        self.config.capacity
    }

    fn error_rate(&self) -> f64 {
        self.config.error_rate
    }

    fn insert_count(&self) -> usize {
        self.insert_count
    }

    fn fill_ratio(&self) -> f64 {
        let s = self.params.partition_size as f64;
        let total: f64 = self
            .partitions
            .iter()
            .map(|partition| partition.count_set() as f64 / s)
            .sum();
        total / self.partitions.len() as f64
    }

    fn estimated_fill_ratio(&self) -> f64 {
        1.0 - (-(self.insert_count as f64)
            / self.params.partition_size as f64)
            .exp()
    }
}

impl<B: BitStorage> SubFilter for PartitionedFilter<B> {
    fn create(config: FilterConfig) -> BloomResult<Self> {
        Self::from_config(config)
    }

    fn set_error_rate(&mut self, error_rate: f64) {
        self.staged.error_rate = error_rate;
    }

    fn set_hash_function(&mut self, hash_function: HashFunction) {
        self.staged.hash_function = hash_function;
    }

    fn total_bits(&self) -> usize {
        self.params.total_bits
    }
}

impl<B: BitStorage> std::fmt::Debug for PartitionedFilter<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PartitionedFilter {{ capacity: {}, error_rate: {}, fill_ratio: {}, k: {}, m: {}, s: {}, insert_count: {} }}",
            self.config.capacity,
            self.config.error_rate,
            self.config.fill_ratio,
            self.params.num_hashes,
            self.params.total_bits,
            self.params.partition_size,
            self.insert_count
        )
    }
}
