//! Partitioned and Scalable Bloom filters.
//!
//! This crate provides approximate membership query structures: they answer
//! "has this key possibly been seen?" with no false negatives and a bounded
//! false positive probability, using far less memory than storing the keys.
//!
//! HowTo:
//!    * Partitioned filter: `m` bits are split into `k` partitions of `s`
//!      bits. Each key sets exactly one bit in every partition.
//!    * Scalable filter: an append-only list of partitioned filters. When
//!      the newest one reaches its fill ratio a new one is appended with a
//!      tighter error rate (`e0 * r^i`).
//!
//! Insertion:
//!     * The key is hashed once; the 8-byte digest is split into two 32-bit
//!       values `a` and `b` and bit `i` is `(a + i * b) mod s`.
//!     * Only the newest sub-filter of a scalable filter is written.
//! Query:
//!     * A key is possibly present if all `k` bits are set in any filter.
//!     * Sub-filters are queried newest first.
//!
//! Obvious problems:
//!     * Overfilling a partitioned filter is not prevented; its error rate
//!       silently climbs past the target.
//!     * No internal locking. Wrap a filter in a `Mutex` (or shard keys over
//!       several filters) to share it between threads.
//!     * Items cannot be removed; only a full reset clears a filter.
//!
//! ```
//! use scalable_bloom_rs::{
//!     BloomFilterOps, BloomFilterStats, ScalableFilter,
//!     ScalableFilterConfigBuilder,
//! };
//!
//! let config = ScalableFilterConfigBuilder::default()
//!     .capacity(1_000)
//!     .error_rate(0.001)
//!     .build()
//!     .unwrap();
//! let mut filter = ScalableFilter::new(config).unwrap();
//!
//! filter.insert(b"hello");
//! assert!(filter.contains(b"hello"));
//! assert_eq!(filter.insert_count(), 1);
//! ```
pub mod common;
pub mod config;
mod error;
pub mod hash;
pub mod params;
mod partitioned;
mod scalable;
mod standard;
pub mod storage;
mod traits;

pub use config::{
    FilterConfig, FilterConfigBuilder, FilterConfigBuilderError,
    ScalableFilterConfig, ScalableFilterConfigBuilder,
    ScalableFilterConfigBuilderError,
};
pub use error::{BloomError, BloomResult};
pub use hash::{
    BitIndices, DIGEST_LEN, HashFunction, default_hash_function, fnv64_digest,
    murmur3_digest,
};
pub use params::FilterParams;
pub use partitioned::PartitionedFilter;
pub use scalable::ScalableFilter;
pub use standard::StandardFilter;
pub use storage::BitStorage;
pub use traits::{BloomFilterOps, BloomFilterStats, SubFilter};
