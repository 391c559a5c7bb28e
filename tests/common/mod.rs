#![allow(dead_code)]
use rand::{Rng, distr::Alphanumeric};

/// Generate consistent, distinct keys with a prefix
pub fn generate_test_items(prefix: &str, count: usize) -> Vec<Vec<u8>> {
    (0..count)
        .map(|i| format!("{prefix}_{i:08}").into_bytes())
        .collect()
}

pub fn generate_random_string(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Fraction of `items` reported as present
pub fn positive_rate<F>(items: &[Vec<u8>], contains: F) -> f64
where
    F: Fn(&[u8]) -> bool,
{
    let hits = items.iter().filter(|item| contains(item.as_slice())).count();
    hits as f64 / items.len() as f64
}
