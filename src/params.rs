//! Sizing math shared by all filters.
//!
//! Given capacity `n`, fill ratio `p` and error rate `e`:
//!
//! * `k = ceil(log2(1 / e))` hash values (one per partition)
//! * `m = ceil(n / ((ln(p) * ln(1 - p)) / |ln(e)|))` total bits
//! * `s = ceil(m / k)` bits per partition
//!
//! Callers are expected to pass `n > 0`, `0 < p < 1` and `0 < e < 1`;
//! [`crate::FilterConfig::normalized`] takes care of the rates.
use crate::config::FilterConfig;

/// Number of hash values (and partitions) for error rate `e`.
pub fn num_hashes(e: f64) -> usize {
    (1.0 / e).log2().ceil() as usize
}

/// Total number of bits for `n` items at fill ratio `p` and error rate `e`.
pub fn total_bits(n: usize, p: f64, e: f64) -> usize {
    let bits_per_item = (p.ln() * (1.0 - p).ln()) / e.ln().abs();
    (n as f64 / bits_per_item).ceil() as usize
}

/// Size of one partition when `m` bits are split across `k` partitions.
pub fn partition_size(m: usize, k: usize) -> usize {
    (m as f64 / k as f64).ceil() as usize
}

/// Derived parameters calculated from a [`FilterConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterParams {
    /// Hash count `k`
    pub num_hashes: usize,
    /// Total bit budget `m`
    pub total_bits: usize,
    /// Partition size `s`
    pub partition_size: usize,
}

impl FilterParams {
    pub fn new(n: usize, p: f64, e: f64) -> Self {
        let num_hashes = num_hashes(e);
        let total_bits = total_bits(n, p, e);
        let partition_size = partition_size(total_bits, num_hashes);

        Self {
            num_hashes,
            total_bits,
            partition_size,
        }
    }
}

impl From<&FilterConfig> for FilterParams {
    fn from(config: &FilterConfig) -> Self {
        Self::new(config.capacity, config.fill_ratio, config.error_rate)
    }
}
