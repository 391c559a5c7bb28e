//! Classic Bloom filter: a single vector of `m` bits shared by all `k`
//! hash values. Sized with the same formulas as the partitioned filter.
use crate::config::FilterConfig;
use crate::error::BloomResult;
use crate::hash::{BitIndices, HashFunction};
use crate::params::FilterParams;
use crate::storage::BitStorage;
use crate::traits::{BloomFilterOps, BloomFilterStats, SubFilter};
use bitvec::{order::Lsb0, vec::BitVec};
use tracing::debug;

#[derive(Clone)]
pub struct StandardFilter<B: BitStorage = BitVec<usize, Lsb0>> {
    config: FilterConfig,
    staged: FilterConfig,
    params: FilterParams,
    bits: B,
    insert_count: usize,
}

impl StandardFilter {
    pub fn new(config: FilterConfig) -> BloomResult<Self> {
        Self::from_config(config)
    }
}

impl<B: BitStorage> StandardFilter<B> {
    pub fn from_config(config: FilterConfig) -> BloomResult<Self> {
        config.validate()?;
        let config = config.normalized();
        let params = FilterParams::from(&config);

        debug!(
            capacity = config.capacity,
            error_rate = config.error_rate,
            k = params.num_hashes,
            m = params.total_bits,
            "Creating standard filter"
        );

        Ok(Self {
            staged: config.clone(),
            config,
            params,
            bits: B::zeroed(params.total_bits),
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

    fn indices(&self, item: &[u8]) -> BitIndices {
        BitIndices::for_item(
            self.config.hash_function,
            item,
            self.params.num_hashes,
            self.params.total_bits,
        )
    }
}

impl<B: BitStorage> BloomFilterOps for StandardFilter<B> {
    fn insert(&mut self, item: &[u8]) {
        for idx in self.indices(item) {
            self.bits.set_bit(idx);
        }
        self.insert_count += 1;
    }

    fn contains(&self, item: &[u8]) -> bool {
        self.indices(item).all(|idx| self.bits.test_bit(idx))
    }

    fn reset(&mut self) {
        self.config = self.staged.clone().normalized();
        self.staged = self.config.clone();
        let params = FilterParams::from(&self.config);
        if params == self.params {
            self.bits.clear_all();
        } else {
            self.params = params;
            self.bits = B::zeroed(self.params.total_bits);
        }
        self.insert_count = 0;

        debug!(
            error_rate = self.config.error_rate,
            k = self.params.num_hashes,
            m = self.params.total_bits,
            "Standard filter reset"
        );
    }
}

impl<B: BitStorage> BloomFilterStats for StandardFilter<B> {
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
        self.bits.count_set() as f64 / self.params.total_bits as f64
    }

    fn estimated_fill_ratio(&self) -> f64 {
        let set_attempts =
            self.insert_count as f64 * self.params.num_hashes as f64;
        1.0 - (-set_attempts / self.params.total_bits as f64).exp()
    }
}

impl<B: BitStorage> SubFilter for StandardFilter<B> {
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

impl<B: BitStorage> std::fmt::Debug for StandardFilter<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "StandardFilter {{ capacity: {}, error_rate: {}, k: {}, m: {}, insert_count: {} }}",
            self.config.capacity,
            self.config.error_rate,
            self.params.num_hashes,
            self.params.total_bits,
            self.insert_count
        )
    }
}
