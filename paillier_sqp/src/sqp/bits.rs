use std::fmt;

use num_bigint::BigUint;
use num_traits::Zero;

/// Fixed-length bit decomposition of an integer.
///
/// Index 0 is the least-significant bit. The comparison circuit indexes
/// the masked value and the mask with the same convention, so both must be
/// built through [`BitVector::from_biguint`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitVector(Vec<bool>);

impl BitVector {
    /// The low `len` bits of `value`, i.e. `value mod 2^len`, zero-padded on
    /// the most-significant side.
    pub fn from_biguint(value: &BigUint, len: u64) -> Self {
        BitVector((0..len).map(|i| value.bit(i)).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn bit(&self, index: usize) -> bool {
        self.0[index]
    }

    /// Bits from least to most significant.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }

    pub fn to_biguint(&self) -> BigUint {
        let mut value = BigUint::zero();
        for (i, bit) in self.iter().enumerate() {
            if bit {
                value.set_bit(i as u64, true);
            }
        }
        value
    }

    /// Most-significant bit first, padded to the full length.
    pub fn to_binary_string(&self) -> String {
        self.0.iter().rev().map(|&b| if b { '1' } else { '0' }).collect()
    }
}

impl fmt::Display for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_binary_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_significant_bit_first() {
        let bits = BitVector::from_biguint(&BigUint::from(0b0110u32), 4);
        assert_eq!(bits.iter().collect::<Vec<_>>(), vec![false, true, true, false]);
        assert!(!bits.bit(0));
        assert!(bits.bit(2));
    }

    #[test]
    fn padded_and_truncated_to_length() {
        let bits = BitVector::from_biguint(&BigUint::from(5u32), 8);
        assert_eq!(bits.to_binary_string(), "00000101");
        assert_eq!(bits.len(), 8);

        // 0b1_0110 reduced mod 2^4
        let bits = BitVector::from_biguint(&BigUint::from(22u32), 4);
        assert_eq!(bits.to_string(), "0110");
        assert_eq!(bits.to_biguint(), BigUint::from(6u32));
    }

    #[test]
    fn zero_length_is_empty() {
        let bits = BitVector::from_biguint(&BigUint::from(9u32), 0);
        assert!(bits.is_empty());
        assert_eq!(bits.to_binary_string(), "");
        assert!(bits.to_biguint().is_zero());
    }
}
