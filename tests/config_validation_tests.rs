use scalable_bloom_rs::{
    BloomError, BloomFilterOps, BloomFilterStats, FilterConfig,
    FilterConfigBuilder, FilterParams, PartitionedFilter, ScalableFilter,
    ScalableFilterConfigBuilder, StandardFilter, SubFilter,
    params::{num_hashes, partition_size, total_bits},
};

#[cfg(test)]
mod capacity_validation_tests {
    use super::*;

    #[test]
    fn test_zero_capacity_fails() {
        let config = FilterConfigBuilder::default()
            .capacity(0)
            .build()
            .unwrap();

        let result = config.validate();
        assert!(matches!(result, Err(BloomError::ZeroCapacity)));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Capacity must be greater than 0"
        );
    }

    #[test]
    fn test_zero_capacity_aborts_construction() {
        assert!(matches!(
            PartitionedFilter::new(FilterConfig::with_capacity(0)),
            Err(BloomError::ZeroCapacity)
        ));
        assert!(matches!(
            StandardFilter::new(FilterConfig::with_capacity(0)),
            Err(BloomError::ZeroCapacity)
        ));
    }

    #[test]
    fn test_minimum_valid_capacity() {
        let config = FilterConfigBuilder::default().capacity(1).build().unwrap();
        assert!(config.validate().is_ok());

        let filter = PartitionedFilter::new(config).unwrap();
        assert_eq!(filter.num_hashes(), 10);
        assert_eq!(filter.partition_size(), 2);
    }

    #[test]
    fn test_scalable_zero_capacity_fails() {
        let config = ScalableFilterConfigBuilder::default()
            .capacity(0)
            .build()
            .unwrap();
        assert!(matches!(config.validate(), Err(BloomError::ZeroCapacity)));
    }
}

#[cfg(test)]
mod rate_clamping_tests {
    use super::*;

    fn filter_with_rates(error_rate: f64, fill_ratio: f64) -> PartitionedFilter {
        let config = FilterConfigBuilder::default()
            .capacity(1000)
            .error_rate(error_rate)
            .fill_ratio(fill_ratio)
            .build()
            .unwrap();
        PartitionedFilter::new(config).expect("Invalid rates must not fail")
    }

    #[test]
    fn test_non_positive_error_rate_defaults() {
        for error_rate in [0.0, -0.01, f64::NAN, 1.0, 2.0] {
            let filter = filter_with_rates(error_rate, 0.5);
            assert_eq!(filter.error_rate(), 0.001);
            assert_eq!(filter.num_hashes(), 10);
        }
    }

    #[test]
    fn test_non_positive_fill_ratio_defaults() {
        for fill_ratio in [0.0, -1.0, f64::NAN, 1.0] {
            let filter = filter_with_rates(0.001, fill_ratio);
            assert_eq!(filter.config().fill_ratio, 0.5);
            assert_eq!(filter.total_bits(), 14378);
        }
    }

    #[test]
    fn test_subnormal_error_rate_defaults() {
        for error_rate in [1e-310, f64::MIN_POSITIVE / 2.0, 5e-324] {
            let filter = filter_with_rates(error_rate, 0.5);
            assert_eq!(filter.error_rate(), 0.001);
            assert_eq!(filter.num_hashes(), 10);
            assert_eq!(filter.total_bits(), 14378);
        }
    }

    #[test]
    fn test_subnormal_rates_on_scalable_filter() {
        let config = ScalableFilterConfigBuilder::default()
            .capacity(10)
            .error_rate(1e-310)
            .fill_ratio(1e-320)
            .tightening_ratio(1e-315)
            .build()
            .unwrap();
        let mut filter = ScalableFilter::new(config).unwrap();
        filter.insert(b"tiny");

        assert!(filter.contains(b"tiny"));
        assert_eq!(filter.error_rate(), 0.001);
        assert_eq!(filter.config().fill_ratio, 0.5);
        assert_eq!(filter.tightening_ratio(), 0.9);
    }

    #[test]
    fn test_smallest_normal_error_rate_builds() {
        let filter = filter_with_rates(f64::MIN_POSITIVE, 0.5);
        assert_eq!(filter.error_rate(), f64::MIN_POSITIVE);
        assert_eq!(filter.num_hashes(), 1022);
    }

    #[test]
    fn test_valid_rates_are_kept() {
        let filter = filter_with_rates(0.01, 0.3);
        assert_eq!(filter.error_rate(), 0.01);
        assert_eq!(filter.config().fill_ratio, 0.3);
        assert_eq!(filter.params(), FilterParams::new(1000, 0.3, 0.01));
    }
}

#[cfg(test)]
mod parameter_determinism_tests {
    use super::*;

    #[test]
    fn test_hash_count_for_default_error_rate() {
        assert_eq!(num_hashes(0.001), 10);
    }

    #[test]
    fn test_default_parameters() {
        let m = total_bits(1000, 0.5, 0.001);
        assert_eq!(m, 14378);
        assert_eq!(partition_size(m, 10), 1438);
    }

    #[test]
    fn test_params_recomputed_only_on_reset() {
        let mut filter =
            PartitionedFilter::new(FilterConfig::with_capacity(1000)).unwrap();
        let before = filter.params();

        filter.set_error_rate(0.1);
        assert_eq!(filter.params(), before);

        filter.reset();
        assert_eq!(filter.params(), FilterParams::new(1000, 0.5, 0.1));
        assert_eq!(filter.num_hashes(), 4);
    }
}
