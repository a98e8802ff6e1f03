// src/contracts/transfer_guard.rs
//! Blanket non-transferability policy.
//!
//! Every entry point that could move a credential to another holder, or let
//! someone else do so, calls [`deny`] first and returns its error. The policy
//! does not look at the record, the caller or any flag.

use crate::error::{RegistryError, RegistryResult};
use crate::models::credential::CredentialId;
use ethers_core::types::Address;

/// A rejected attempt to move holder identity, kept for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferAttempt {
    Transfer {
        from: Address,
        to: Address,
        id: CredentialId,
    },
    Approve {
        spender: Address,
        id: CredentialId,
    },
    ApprovalForAll {
        operator: Address,
        allowed: bool,
    },
    /// Arguments could not be decoded; rejected all the same.
    Malformed,
}

/// Rejects the attempt with `NonTransferable`.
pub fn deny<T>(caller: Address, attempt: TransferAttempt) -> RegistryResult<T> {
    log::warn!("rejected {:?} requested by {:?}", attempt, caller);
    Err(RegistryError::NonTransferable)
}
