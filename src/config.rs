use crate::error::{BloomError, BloomResult};
use crate::hash::{HashFunction, default_hash_function};
use derive_builder::Builder;
use tracing::warn;

pub const DEFAULT_CAPACITY: usize = 1_000_000;
pub const DEFAULT_ERROR_RATE: f64 = 0.001;
pub const DEFAULT_FILL_RATIO: f64 = 0.5;
pub const DEFAULT_TIGHTENING_RATIO: f64 = 0.9;

/// Configuration for a single (partitioned or standard) filter
#[derive(Clone, Debug, Builder)]
#[builder(pattern = "owned")]
pub struct FilterConfig {
    /// Number of items the filter is expected to hold at `error_rate`
    #[builder(default = "DEFAULT_CAPACITY")]
    pub capacity: usize,

    /// Target false positive rate (0.0 to 1.0, exclusive)
    #[builder(default = "DEFAULT_ERROR_RATE")]
    pub error_rate: f64,

    /// Maximum proportion of bits expected to be set in each partition.
    /// Not enforced: overfilling silently raises the error rate.
    #[builder(default = "DEFAULT_FILL_RATIO")]
    pub fill_ratio: f64,

    /// Digest function used to derive bit indices
    #[builder(default = "default_hash_function")]
    pub hash_function: HashFunction,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            error_rate: DEFAULT_ERROR_RATE,
            fill_ratio: DEFAULT_FILL_RATIO,
            hash_function: default_hash_function,
        }
    }
}

impl FilterConfig {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> BloomResult<()> {
        if self.capacity == 0 {
            return Err(BloomError::ZeroCapacity);
        }
        Ok(())
    }

    /// Replaces out-of-range rates with their defaults.
    pub fn normalized(mut self) -> Self {
        self.error_rate =
            clamp_rate("error_rate", self.error_rate, DEFAULT_ERROR_RATE);
        self.fill_ratio =
            clamp_rate("fill_ratio", self.fill_ratio, DEFAULT_FILL_RATIO);
        self
    }
}

/// Configuration for a [`crate::ScalableFilter`]
#[derive(Clone, Debug, Builder)]
#[builder(pattern = "owned")]
pub struct ScalableFilterConfig {
    /// Capacity of every sub-filter
    #[builder(default = "DEFAULT_CAPACITY")]
    pub capacity: usize,

    /// Error rate of the first sub-filter (`e0`)
    #[builder(default = "DEFAULT_ERROR_RATE")]
    pub error_rate: f64,

    /// Fill ratio that triggers a new sub-filter
    #[builder(default = "DEFAULT_FILL_RATIO")]
    pub fill_ratio: f64,

    /// Error tightening ratio `r`; sub-filter `i` targets `e0 * r^i`
    #[builder(default = "DEFAULT_TIGHTENING_RATIO")]
    pub tightening_ratio: f64,

    /// Digest function shared by all sub-filters
    #[builder(default = "default_hash_function")]
    pub hash_function: HashFunction,
}

impl Default for ScalableFilterConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            error_rate: DEFAULT_ERROR_RATE,
            fill_ratio: DEFAULT_FILL_RATIO,
            tightening_ratio: DEFAULT_TIGHTENING_RATIO,
            hash_function: default_hash_function,
        }
    }
}

impl ScalableFilterConfig {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> BloomResult<()> {
        if self.capacity == 0 {
            return Err(BloomError::ZeroCapacity);
        }
        Ok(())
    }

    pub fn normalized(mut self) -> Self {
        self.error_rate =
            clamp_rate("error_rate", self.error_rate, DEFAULT_ERROR_RATE);
        self.fill_ratio =
            clamp_rate("fill_ratio", self.fill_ratio, DEFAULT_FILL_RATIO);
        self.tightening_ratio = clamp_rate(
            "tightening_ratio",
            self.tightening_ratio,
            DEFAULT_TIGHTENING_RATIO,
        );
        self
    }

    /// Error rate of the sub-filter at `index` (creation order).
    pub fn sub_filter_error_rate(&self, index: usize) -> f64 {
        let exponent = i32::try_from(index).unwrap_or(i32::MAX);
        (self.error_rate * self.tightening_ratio.powi(exponent))
            .max(f64::MIN_POSITIVE)
    }

    /// Configuration of the sub-filter at `index`.
    pub fn sub_filter_config(&self, index: usize) -> FilterConfig {
        FilterConfig {
            capacity: self.capacity,
            error_rate: self.sub_filter_error_rate(index),
            fill_ratio: self.fill_ratio,
            hash_function: self.hash_function,
        }
    }
}

fn clamp_rate(field: &'static str, value: f64, default: f64) -> f64 {
    // Subnormal values overflow the sizing math
    if value.is_normal() && value > 0.0 && value < 1.0 {
        value
    } else {
        warn!(
            setting = field,
            value,
            default,
            "Rate out of range (0, 1), using default"
        );
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = FilterConfigBuilder::default()
            .capacity(1000)
            .build()
            .expect("Failed to build FilterConfig");

        assert_eq!(config.capacity, 1000);
        assert_eq!(config.error_rate, 0.001);
        assert_eq!(config.fill_ratio, 0.5);

        let scalable = ScalableFilterConfigBuilder::default()
            .build()
            .expect("Failed to build ScalableFilterConfig");
        assert_eq!(scalable.capacity, DEFAULT_CAPACITY);
        assert_eq!(scalable.tightening_ratio, 0.9);
    }

    #[test]
    fn test_clamping() {
        let config = FilterConfig {
            error_rate: 0.0,
            fill_ratio: -1.0,
            ..FilterConfig::with_capacity(10)
        }
        .normalized();
        assert_eq!(config.error_rate, DEFAULT_ERROR_RATE);
        assert_eq!(config.fill_ratio, DEFAULT_FILL_RATIO);

        let config = FilterConfig {
            error_rate: f64::NAN,
            fill_ratio: 1.0,
            ..FilterConfig::with_capacity(10)
        }
        .normalized();
        assert_eq!(config.error_rate, DEFAULT_ERROR_RATE);
        assert_eq!(config.fill_ratio, DEFAULT_FILL_RATIO);

        let config = FilterConfig {
            error_rate: 0.02,
            fill_ratio: 0.3,
            ..FilterConfig::with_capacity(10)
        }
        .normalized();
        assert_eq!(config.error_rate, 0.02);
        assert_eq!(config.fill_ratio, 0.3);
    }

    #[test]
    fn test_subnormal_rates_are_clamped() {
        assert_eq!(clamp_rate("error_rate", 1e-310, 0.001), 0.001);
        assert_eq!(clamp_rate("error_rate", f64::INFINITY, 0.001), 0.001);
        assert_eq!(
            clamp_rate("error_rate", f64::MIN_POSITIVE, 0.001),
            f64::MIN_POSITIVE
        );
    }

    #[test]
    fn test_tightening_ratio_clamping() {
        let config = ScalableFilterConfig {
            tightening_ratio: 1.5,
            ..ScalableFilterConfig::with_capacity(10)
        }
        .normalized();
        assert_eq!(config.tightening_ratio, DEFAULT_TIGHTENING_RATIO);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            FilterConfig::with_capacity(0).validate(),
            Err(BloomError::ZeroCapacity)
        ));
        assert!(matches!(
            ScalableFilterConfig::with_capacity(0).validate(),
            Err(BloomError::ZeroCapacity)
        ));
        assert!(FilterConfig::with_capacity(1).validate().is_ok());
    }

    #[test]
    fn test_sub_filter_error_rates() {
        let config = ScalableFilterConfig {
            error_rate: 0.01,
            tightening_ratio: 0.5,
            ..ScalableFilterConfig::with_capacity(100)
        };

        assert_eq!(config.sub_filter_error_rate(0), 0.01);
        assert_eq!(config.sub_filter_error_rate(1), 0.005);
        assert_eq!(config.sub_filter_error_rate(2), 0.0025);

        let sub = config.sub_filter_config(3);
        assert_eq!(sub.capacity, 100);
        assert_eq!(sub.error_rate, 0.00125);
        assert_eq!(sub.fill_ratio, config.fill_ratio);

        // Never reaches zero, which would be clamped back to the default
        assert!(config.sub_filter_error_rate(100_000) > 0.0);
    }
}
