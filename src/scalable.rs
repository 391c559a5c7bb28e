//! Scalable Bloom filter.
//!
//! Grows by appending sub-filters instead of requiring the final set size
//! up front. Sub-filter `i` is created with error rate `e0 * r^i`, so the
//! compound false positive probability stays below `e0 / (1 - r)` however
//! many sub-filters are appended.
//!
//! Only the newest sub-filter receives writes. Older ones are kept
//! read-only until the whole structure is reset.
//!
//! Reference: Almeida et al., "Scalable Bloom Filters".
use crate::config::ScalableFilterConfig;
use crate::error::BloomResult;
use crate::hash::HashFunction;
use crate::partitioned::PartitionedFilter;
use crate::traits::{BloomFilterOps, BloomFilterStats, SubFilter};
use tracing::{error, info};

pub struct ScalableFilter<F: SubFilter = PartitionedFilter> {
    config: ScalableFilterConfig,
    // Applied on the next reset
    staged: ScalableFilterConfig,
    filters: Vec<F>,
    insert_count: usize,
}

impl ScalableFilter {
    /// Creates a scalable filter made of [`PartitionedFilter`] segments.
    pub fn new(config: ScalableFilterConfig) -> BloomResult<Self> {
        Self::from_config(config)
    }
}

impl<F: SubFilter> ScalableFilter<F> {
    pub fn from_config(config: ScalableFilterConfig) -> BloomResult<Self> {
        config.validate()?;
        let config = config.normalized();

        let mut filter = Self {
            staged: config.clone(),
            config,
            filters: Vec::new(),
            insert_count: 0,
        };
        filter.add_sub_filter()?;

        Ok(filter)
    }

    pub fn config(&self) -> &ScalableFilterConfig {
        &self.config
    }

    pub fn tightening_ratio(&self) -> f64 {
        self.config.tightening_ratio
    }

    pub fn sub_filter_count(&self) -> usize {
        self.filters.len()
    }

    /// Sub-filters in creation order; the last one is the active one.
    pub fn sub_filters(&self) -> &[F] {
        &self.filters
    }

    pub fn total_capacity(&self) -> usize {
        self.config.capacity * self.filters.len()
    }

    pub fn total_bits(&self) -> usize {
        self.filters.iter().map(SubFilter::total_bits).sum()
    }

    /// `1 - ∏(1 - e_i)` over the existing sub-filters.
    pub fn compound_error_rate(&self) -> f64 {
        1.0 - self
            .filters
            .iter()
            .map(|f| 1.0 - f.error_rate())
            .product::<f64>()
    }

    /// Union bound `Σ e_i`, never below [`Self::compound_error_rate`].
    pub fn max_error_rate(&self) -> f64 {
        self.filters.iter().map(|f| f.error_rate()).sum()
    }

    /// Staged until the next reset.
    pub fn set_error_rate(&mut self, error_rate: f64) {
        self.staged.error_rate = error_rate;
    }

    /// Staged until the next reset.
    pub fn set_hash_function(&mut self, hash_function: HashFunction) {
        self.staged.hash_function = hash_function;
    }

    /// Staged until the next reset.
    pub fn set_tightening_ratio(&mut self, tightening_ratio: f64) {
        self.staged.tightening_ratio = tightening_ratio;
    }

    fn add_sub_filter(&mut self) -> BloomResult<()> {
        let index = self.filters.len();
        let sub_config = self.config.sub_filter_config(index);
        let error_rate = sub_config.error_rate;

        let filter = F::create(sub_config)?;
        self.filters.push(filter);

        info!(
            index,
            error_rate,
            sub_filters = self.filters.len(),
            inserted = self.insert_count,
            "Added sub-filter"
        );
        Ok(())
    }

    fn needs_sub_filter(&self) -> bool {
        self.filters.last().is_none_or(|filter| {
            filter.estimated_fill_ratio() > self.config.fill_ratio
        })
    }
}

impl<F: SubFilter> BloomFilterOps for ScalableFilter<F> {
    fn insert(&mut self, item: &[u8]) {
        if self.needs_sub_filter() {
            if let Err(err) = self.add_sub_filter() {
                // Keep writing into the current segment; it only overfills
                error!(%err, "Failed to add sub-filter");
            }
        }

        if let Some(filter) = self.filters.last_mut() {
            filter.insert(item);
        }
        self.insert_count += 1;
    }

    fn contains(&self, item: &[u8]) -> bool {
        // Newest first: recent items are the most likely to be queried
        self.filters.iter().rev().any(|filter| filter.contains(item))
    }

    fn reset(&mut self) {
        self.config = self.staged.clone().normalized();
        self.staged = self.config.clone();
        self.filters.clear();
        self.insert_count = 0;

        if let Err(err) = self.add_sub_filter() {
            error!(%err, "Failed to rebuild first sub-filter");
        }
    }
}

impl<F: SubFilter> BloomFilterStats for ScalableFilter<F> {
    fn capacity(&self) -> usize {
        self.config.capacity
    }

    fn error_rate(&self) -> f64 {
        self.config.error_rate
    }

    fn insert_count(&self) -> usize {
        self.insert_count
    }

    /// Mean of the sub-filters' measured fill ratios.
    fn fill_ratio(&self) -> f64 {
        if self.filters.is_empty() {
            return 0.0;
        }
        let total: f64 = self.filters.iter().map(|f| f.fill_ratio()).sum();
        total / self.filters.len() as f64
    }

    /// Estimate for the active sub-filter.
    fn estimated_fill_ratio(&self) -> f64 {
        self.filters
            .last()
            .map_or(0.0, |filter| filter.estimated_fill_ratio())
    }
}

impl<F: SubFilter> std::fmt::Debug for ScalableFilter<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ScalableFilter {{ capacity: {}, error_rate: {}, fill_ratio: {}, tightening_ratio: {}, sub_filters: {}, insert_count: {} }}",
            self.config.capacity,
            self.config.error_rate,
            self.config.fill_ratio,
            self.config.tightening_ratio,
            self.filters.len(),
            self.insert_count
        )
    }
}
