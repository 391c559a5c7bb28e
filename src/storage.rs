use bitvec::{bitvec, order::Lsb0, vec::BitVec};

/// Fixed-size bit vector backing one filter partition.
///
/// Implementations are allocated once with [`BitStorage::zeroed`] and never
/// resized. Indices passed in are always `< bit_len()`.
pub trait BitStorage {
    /// Allocates `len` bits, all cleared
    fn zeroed(len: usize) -> Self
    where
        Self: Sized;
    /// Sets the bit at `index`
    fn set_bit(&mut self, index: usize);
    /// Returns whether the bit at `index` is set
    fn test_bit(&self, index: usize) -> bool;
    /// Clears every bit
    fn clear_all(&mut self);
    /// Number of set bits
    fn count_set(&self) -> usize;
    /// Number of addressable bits
    fn bit_len(&self) -> usize;
}

impl BitStorage for BitVec<usize, Lsb0> {
    fn zeroed(len: usize) -> Self {
        bitvec![usize, Lsb0; 0; len]
    }

    fn set_bit(&mut self, index: usize) {
        self.as_mut_bitslice().set(index, true);
    }

    fn test_bit(&self, index: usize) -> bool {
        self[index]
    }

    fn clear_all(&mut self) {
        self.fill(false);
    }

    fn count_set(&self) -> usize {
        self.count_ones()
    }

    fn bit_len(&self) -> usize {
        self.len()
    }
}

// One byte per bit; simple but eight times larger than `BitVec`.
impl BitStorage for Vec<bool> {
    fn zeroed(len: usize) -> Self {
        vec![false; len]
    }

    fn set_bit(&mut self, index: usize) {
        self[index] = true;
    }

    fn test_bit(&self, index: usize) -> bool {
        self[index]
    }

    fn clear_all(&mut self) {
        self.fill(false);
    }

    fn count_set(&self) -> usize {
        self.iter().filter(|&&bit| bit).count()
    }

    fn bit_len(&self) -> usize {
        self.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise<B: BitStorage>() {
        let mut bits = B::zeroed(100);
        assert_eq!(bits.bit_len(), 100);
        assert_eq!(bits.count_set(), 0);

        for idx in [0, 17, 63, 64, 99] {
            bits.set_bit(idx);
        }
        bits.set_bit(17);

        assert_eq!(bits.count_set(), 5);
        assert!(bits.test_bit(64));
        assert!(!bits.test_bit(65));

        bits.clear_all();
        assert_eq!(bits.count_set(), 0);
        assert_eq!(bits.bit_len(), 100);
        assert!(!bits.test_bit(0));
    }

    #[test]
    fn test_bitvec_storage() {
        exercise::<BitVec<usize, Lsb0>>();
    }

    #[test]
    fn test_vec_bool_storage() {
        exercise::<Vec<bool>>();
    }
}
