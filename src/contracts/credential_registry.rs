// src/contracts/credential_registry.rs
//! Credential Registry.
//!
//! Composition root of the registry core. Exposes issuance, verification,
//! revocation and queries over the credential store, gated by the access
//! control guard, and records every successful state change in the audit log.
//!
//! Each operation runs to completion before the next one starts; callers
//! sharing a registry serialize access externally (see
//! [`SharedRegistry`](crate::services::SharedRegistry)). All checks happen
//! before any mutation, so a failed call leaves the store and the log
//! untouched.

use crate::contracts::access_control::AccessControl;
use crate::contracts::commitment::matches;
use crate::contracts::transfer_guard::{self, TransferAttempt};
use crate::error::{RegistryError, RegistryResult};
use crate::models::credential::{Commitment, CredentialId, CredentialInfo, CredentialStatus};
use crate::models::event::{EventLog, EventRecord, RegistryEvent};
use crate::storage::credential_store::CredentialStore;
use ethers_core::types::Address;

/// Default collection name.
pub const DEFAULT_NAME: &str = "UniversityDegree";

/// Default collection symbol.
pub const DEFAULT_SYMBOL: &str = "UDEG";

/// Tamper-evident registry of non-transferable credentials.
///
/// Stores only commitments. The credential data itself stays with the issuer
/// and is disclosed to verifiers out-of-band.
#[derive(Debug)]
pub struct CredentialRegistry {
    name: String,
    symbol: String,
    access: AccessControl,
    store: CredentialStore,
    events: EventLog,
}

impl CredentialRegistry {
    /// Creates an empty registry owned by `authority`, with the default
    /// name and symbol.
    pub fn new(authority: Address) -> Self {
        Self::with_metadata(authority, DEFAULT_NAME, DEFAULT_SYMBOL)
    }

    /// Creates an empty registry with explicit collection metadata.
    pub fn with_metadata(authority: Address, name: impl Into<String>, symbol: impl Into<String>) -> Self {
        CredentialRegistry {
            name: name.into(),
            symbol: symbol.into(),
            access: AccessControl::new(authority),
            store: CredentialStore::new(),
            events: EventLog::new(),
        }
    }

    // =====================
    // State-changing operations
    // =====================

    /// Issues a credential bound to `holder` and returns its id.
    ///
    /// # Errors
    /// Checked in this order:
    /// - `Unauthorized` if `caller` is not the authority
    /// - `InvalidCommitment` if `commitment` is zero
    /// - `InvalidHolder` if `holder` is the zero address
    ///
    /// # Events
    /// Emits `Issued { id, holder }`.
    pub fn issue(&mut self, caller: Address, holder: Address, commitment: Commitment) -> RegistryResult<CredentialId> {
        self.access.require_authority(caller)?;
        if commitment.is_zero() {
            return Err(RegistryError::InvalidCommitment);
        }
        if holder.is_zero() {
            return Err(RegistryError::InvalidHolder);
        }

        let id = self.store.allocate(holder, commitment)?;
        self.events.emit(RegistryEvent::Issued { id, holder });
        log::info!("issued credential {} to {:?}", id, holder);
        Ok(id)
    }

    /// Revokes an active credential.
    ///
    /// # Errors
    /// - `Unauthorized` if `caller` is not the authority
    /// - `NotFound` if `id` was never issued
    /// - `AlreadyRevoked` if the credential is already revoked
    ///
    /// # Events
    /// Emits `Revoked { id }`.
    pub fn revoke(&mut self, caller: Address, id: CredentialId) -> RegistryResult<()> {
        self.access.require_authority(caller)?;
        self.store.mark_revoked(id)?;
        self.events.emit(RegistryEvent::Revoked { id });
        log::info!("revoked credential {}", id);
        Ok(())
    }

    // =====================
    // Read-only operations
    // =====================

    /// Checks a candidate commitment against credential `id`.
    ///
    /// Returns `true` only if the commitment matches exactly and the
    /// credential is not revoked. A revoked credential with a matching
    /// commitment yields `false`.
    ///
    /// # Errors
    /// `NotFound` if `id` was never issued. This is deliberately distinct
    /// from a `false` result, so "never issued" and "forged" can be told apart.
    pub fn verify(&self, id: CredentialId, candidate: &Commitment) -> RegistryResult<bool> {
        let record = self.store.get(id)?;
        let valid = matches(record, candidate) && !record.revoked;
        log::debug!("verification of credential {}: {}", id, valid);
        Ok(valid)
    }

    /// Stored commitment of credential `id`.
    pub fn get_commitment(&self, id: CredentialId) -> RegistryResult<Commitment> {
        Ok(self.store.get(id)?.commitment)
    }

    /// Stored commitment and revocation flag of credential `id`.
    pub fn get_info(&self, id: CredentialId) -> RegistryResult<CredentialInfo> {
        self.store.get(id).map(CredentialInfo::from)
    }

    /// Lifecycle state of credential `id`.
    pub fn status(&self, id: CredentialId) -> RegistryResult<CredentialStatus> {
        Ok(self.store.get(id)?.status())
    }

    /// Holder credential `id` is bound to.
    pub fn owner_of(&self, id: CredentialId) -> RegistryResult<Address> {
        Ok(self.store.get(id)?.holder)
    }

    /// Number of credentials bound to `holder`, revoked ones included.
    ///
    /// # Errors
    /// `InvalidHolder` for the zero address, which can never hold a credential.
    pub fn balance_of(&self, holder: Address) -> RegistryResult<usize> {
        if holder.is_zero() {
            return Err(RegistryError::InvalidHolder);
        }
        Ok(self.store.count_for_holder(holder))
    }

    /// Address of the issuing authority.
    pub fn owner(&self) -> Address {
        self.access.authority()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Number of credentials ever issued; also the next id to be assigned.
    pub fn total_issued(&self) -> CredentialId {
        self.store.next_id()
    }

    /// Audit log in emission order.
    pub fn events(&self) -> &[EventRecord] {
        self.events.entries()
    }

    // =====================
    // Transfer entry points (always rejected)
    // =====================

    /// Always fails with `NonTransferable`.
    pub fn transfer(&mut self, caller: Address, from: Address, to: Address, id: CredentialId) -> RegistryResult<()> {
        transfer_guard::deny(caller, TransferAttempt::Transfer { from, to, id })
    }

    /// Always fails with `NonTransferable`.
    pub fn safe_transfer(&mut self, caller: Address, from: Address, to: Address, id: CredentialId) -> RegistryResult<()> {
        transfer_guard::deny(caller, TransferAttempt::Transfer { from, to, id })
    }

    /// Always fails with `NonTransferable`.
    pub fn approve_transfer(&mut self, caller: Address, spender: Address, id: CredentialId) -> RegistryResult<()> {
        transfer_guard::deny(caller, TransferAttempt::Approve { spender, id })
    }

    /// Always fails with `NonTransferable`.
    pub fn set_transfer_approval_for_all(&mut self, caller: Address, operator: Address, allowed: bool) -> RegistryResult<()> {
        transfer_guard::deny(caller, TransferAttempt::ApprovalForAll { operator, allowed })
    }
}
