// src/storage/credential_store.rs
//! Credential store: record arena plus identifier allocation.
//!
//! Records live in a dense vector indexed by id. The `next_id` counter only
//! grows, ids are never reused and records are never removed, so a lookup can
//! always tell "never issued" apart from "issued and later revoked".

use crate::error::{RegistryError, RegistryResult};
use crate::models::credential::{Commitment, CredentialId, CredentialRecord};
use ethers_core::types::Address;

/// Append-only storage for credential records.
///
/// # Invariants
/// - `records[k].id == k` for every stored record
/// - `next_id == records.len()`
/// - no stored commitment is zero
#[derive(Debug, Default)]
pub struct CredentialStore {
    records: Vec<CredentialRecord>,
    next_id: CredentialId,
}

impl CredentialStore {
    /// Creates an empty store whose first allocated id is 0.
    pub fn new() -> Self {
        CredentialStore {
            records: Vec::new(),
            next_id: 0,
        }
    }

    /// Allocates a new record for `holder` and returns its id.
    ///
    /// # Errors
    /// `InvalidCommitment` if `commitment` is zero. Nothing is allocated in
    /// that case.
    pub fn allocate(&mut self, holder: Address, commitment: Commitment) -> RegistryResult<CredentialId> {
        if commitment.is_zero() {
            return Err(RegistryError::InvalidCommitment);
        }

        let id = self.next_id;
        self.records.push(CredentialRecord::new(id, holder, commitment));
        self.next_id += 1;
        Ok(id)
    }

    /// Vector index of an allocated id.
    fn index_of(&self, id: CredentialId) -> RegistryResult<usize> {
        if id >= self.next_id {
            return Err(RegistryError::NotFound(id));
        }
        usize::try_from(id).map_err(|_| RegistryError::NotFound(id))
    }

    /// Returns the record with the given id, revoked or not.
    ///
    /// # Errors
    /// `NotFound` if `id >= next_id`.
    pub fn get(&self, id: CredentialId) -> RegistryResult<&CredentialRecord> {
        let index = self.index_of(id)?;
        self.records.get(index).ok_or(RegistryError::NotFound(id))
    }

    /// Flips the revocation flag of an existing, active record.
    ///
    /// # Errors
    /// - `NotFound` if no record has that id
    /// - `AlreadyRevoked` if the flag is already set
    pub fn mark_revoked(&mut self, id: CredentialId) -> RegistryResult<()> {
        let index = self.index_of(id)?;
        let record = self
            .records
            .get_mut(index)
            .ok_or(RegistryError::NotFound(id))?;
        if record.revoked {
            return Err(RegistryError::AlreadyRevoked(id));
        }
        record.revoked = true;
        Ok(())
    }

    /// Id the next allocation will receive; equals the number of issued records.
    pub fn next_id(&self) -> CredentialId {
        self.next_id
    }

    /// Number of records bound to `holder`, revoked ones included.
    pub fn count_for_holder(&self, holder: Address) -> usize {
        self.records.iter().filter(|record| record.holder == holder).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers_core::types::H256;

    fn holder() -> Address {
        Address::from_low_u64_be(0x42)
    }

    #[test]
    fn test_allocate_assigns_dense_ids() {
        let mut store = CredentialStore::new();
        for expected in 0..5u64 {
            let id = store
                .allocate(holder(), H256::from_low_u64_be(expected + 1))
                .unwrap();
            assert_eq!(id, expected);
        }
        assert_eq!(store.next_id(), 5);
        assert!((0..5u64).all(|k| store.get(k).map(|r| r.id) == Ok(k)));
    }

    #[test]
    fn test_allocate_rejects_zero_commitment() {
        let mut store = CredentialStore::new();
        assert_eq!(
            store.allocate(holder(), H256::zero()),
            Err(RegistryError::InvalidCommitment)
        );
        // A failed allocation does not consume an id
        assert_eq!(store.next_id(), 0);
        assert_eq!(store.allocate(holder(), H256::repeat_byte(1)), Ok(0));
    }

    #[test]
    fn test_get_out_of_range() {
        let mut store = CredentialStore::new();
        assert_eq!(store.get(0), Err(RegistryError::NotFound(0)));

        store.allocate(holder(), H256::repeat_byte(1)).unwrap();
        assert!(store.get(0).is_ok());
        assert_eq!(store.get(1), Err(RegistryError::NotFound(1)));
        assert_eq!(store.get(u64::MAX), Err(RegistryError::NotFound(u64::MAX)));
    }

    #[test]
    fn test_mark_revoked_once() {
        let mut store = CredentialStore::new();
        let commitment = H256::repeat_byte(7);
        let id = store.allocate(holder(), commitment).unwrap();

        store.mark_revoked(id).unwrap();
        assert_eq!(store.mark_revoked(id), Err(RegistryError::AlreadyRevoked(id)));

        // Revoked records remain readable and otherwise unchanged
        let record = store.get(id).unwrap();
        assert!(record.revoked);
        assert_eq!(record.commitment, commitment);
        assert_eq!(record.holder, holder());
    }

    #[test]
    fn test_mark_revoked_missing() {
        let mut store = CredentialStore::new();
        assert_eq!(store.mark_revoked(3), Err(RegistryError::NotFound(3)));

        store.allocate(holder(), H256::repeat_byte(1)).unwrap();
        assert_eq!(store.mark_revoked(1), Err(RegistryError::NotFound(1)));
        assert_eq!(store.mark_revoked(u64::MAX), Err(RegistryError::NotFound(u64::MAX)));
        assert!(!store.get(0).unwrap().revoked);

        // Only the targeted record flips
        store.allocate(holder(), H256::repeat_byte(2)).unwrap();
        store.mark_revoked(1).unwrap();
        assert!(!store.get(0).unwrap().revoked);
        assert!(store.get(1).unwrap().revoked);
    }

    #[test]
    fn test_count_for_holder_includes_revoked() {
        let mut store = CredentialStore::new();
        let other = Address::from_low_u64_be(0x99);
        store.allocate(holder(), H256::repeat_byte(1)).unwrap();
        store.allocate(other, H256::repeat_byte(2)).unwrap();
        store.allocate(holder(), H256::repeat_byte(3)).unwrap();
        store.mark_revoked(0).unwrap();

        assert_eq!(store.count_for_holder(holder()), 2);
        assert_eq!(store.count_for_holder(other), 1);
        assert_eq!(store.count_for_holder(Address::zero()), 0);
    }
}
