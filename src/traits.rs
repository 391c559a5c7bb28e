use crate::config::FilterConfig;
use crate::error::BloomResult;
use crate::hash::HashFunction;

/// Core membership operations.
///
/// None of these can fail: a filter that was constructed successfully is
/// always able to insert and answer queries.
pub trait BloomFilterOps {
    /// Records `item` as present
    fn insert(&mut self, item: &[u8]);

    /// `false` means definitely absent, `true` means possibly present
    fn contains(&self, item: &[u8]) -> bool;

    /// Drops all items and rebuilds the filter from its current settings
    fn reset(&mut self);

    fn insert_bulk(&mut self, items: &[&[u8]]) {
        for item in items {
            self.insert(item);
        }
    }

    fn contains_bulk(&self, items: &[&[u8]]) -> Vec<bool> {
        items.iter().map(|item| self.contains(item)).collect()
    }
}

pub trait BloomFilterStats {
    fn capacity(&self) -> usize;
    fn error_rate(&self) -> f64;
    /// Total `insert` calls since the last reset, duplicates included
    fn insert_count(&self) -> usize;
    /// Measured proportion of set bits
    fn fill_ratio(&self) -> f64;
    /// O(1) approximation of [`BloomFilterStats::fill_ratio`]
    fn estimated_fill_ratio(&self) -> f64;

    fn is_empty(&self) -> bool {
        self.insert_count() == 0
    }
}

/// A filter that can serve as one segment of a [`crate::ScalableFilter`].
pub trait SubFilter: BloomFilterOps + BloomFilterStats {
    fn create(config: FilterConfig) -> BloomResult<Self>
    where
        Self: Sized;

    /// Staged until the next [`BloomFilterOps::reset`]
    fn set_error_rate(&mut self, error_rate: f64);

    /// Staged until the next [`BloomFilterOps::reset`]
    fn set_hash_function(&mut self, hash_function: HashFunction);

    /// Total bits allocated
    fn total_bits(&self) -> usize;
}
