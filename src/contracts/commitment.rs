// src/contracts/commitment.rs
//! Commitment comparison.

use crate::models::credential::{Commitment, CredentialRecord};

/// True iff the stored commitment equals `candidate` byte for byte.
pub fn matches(record: &CredentialRecord, candidate: &Commitment) -> bool {
    record.commitment.as_bytes() == candidate.as_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers_core::types::{Address, H256};

    #[test]
    fn test_single_bit_difference_does_not_match() {
        let stored = H256::repeat_byte(0x5a);
        let record = CredentialRecord::new(0, Address::from_low_u64_be(1), stored);
        assert!(matches(&record, &stored));

        let mut flipped = stored;
        flipped.0[31] ^= 0x01;
        assert!(!matches(&record, &flipped));

        let mut flipped_high = stored;
        flipped_high.0[0] ^= 0x80;
        assert!(!matches(&record, &flipped_high));
    }
}
