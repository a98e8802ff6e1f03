// src/utils/crypto.rs
//! Cryptographic utilities optimized for blockchain compatibility.
//!
//! Uses Keccak-256 (Ethereum's standard hash function) for all commitments.

use crate::models::credential::Commitment;
use crate::utils::serialization::serialize;
use ethers_core::types::H256;
use ethers_core::utils::keccak256;
use serde::Serialize;

/// Computes a Keccak-256 hash of the input data (Ethereum-compatible).
///
/// # Arguments
/// * `data` - Binary data to hash (as bytes slice)
///
/// # Returns
/// Fixed-size 32-byte array (`[u8; 32]`) containing the hash.
pub fn hash_data(data: &[u8]) -> [u8; 32] {
    keccak256(data)
}

/// Derives the commitment of an off-ledger document.
///
/// The document is serialized to compact JSON and the UTF-8 bytes are
/// hashed, so issuer and verifier arrive at the same value as long as they
/// hold the same document.
///
/// # Errors
/// Fails only if the document cannot be represented as JSON.
pub fn commitment_of<T: Serialize>(document: &T) -> Result<Commitment, serde_json::Error> {
    let json = serialize(document)?;
    Ok(H256::from(hash_data(json.as_bytes())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::degree::DegreeRecord;

    #[test]
    fn test_hash_data_known_vector() {
        // keccak256("") from the Ethereum yellow paper
        let expected: H256 = "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
            .parse()
            .unwrap();
        assert_eq!(H256::from(hash_data(b"")), expected);
    }

    #[test]
    fn test_commitment_matches_json_hash() {
        let json = serde_json::to_string(&DegreeRecord::sample()).unwrap();
        assert_eq!(
            commitment_of(&DegreeRecord::sample()).unwrap(),
            H256::from(hash_data(json.as_bytes()))
        );
    }

    #[test]
    fn test_any_field_change_alters_commitment() {
        let original = commitment_of(&DegreeRecord::sample()).unwrap();

        let mut tampered = DegreeRecord::sample();
        tampered.program = "Medicine".into();
        assert_ne!(commitment_of(&tampered).unwrap(), original);

        let mut one_char = DegreeRecord::sample();
        one_char.date = "2024-06-15".into();
        assert_ne!(commitment_of(&one_char).unwrap(), original);

        assert!(!original.is_zero());
    }
}
