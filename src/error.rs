// src/error.rs
//! Failure kinds of the credential registry.
//!
//! Every error aborts the operation that raised it; no registry state is
//! changed by a failed call.

use crate::models::credential::CredentialId;
use ethers_core::types::Address;
use thiserror::Error;

/// Registry operation errors.
///
/// # Taxonomy
/// - Authorization: `Unauthorized`
/// - Validation: `InvalidCommitment`, `InvalidHolder`
/// - State: `NotFound`, `AlreadyRevoked`
/// - Policy: `NonTransferable`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("caller {caller:?} is not the registry authority")]
    Unauthorized { caller: Address },

    #[error("commitment must not be the zero value")]
    InvalidCommitment,

    #[error("holder must not be the zero address")]
    InvalidHolder,

    #[error("credential {0} does not exist")]
    NotFound(CredentialId),

    #[error("credential {0} is already revoked")]
    AlreadyRevoked(CredentialId),

    #[error("credentials are non-transferable")]
    NonTransferable,
}

impl RegistryError {
    /// Stable machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            RegistryError::Unauthorized { .. } => "unauthorized",
            RegistryError::InvalidCommitment => "invalid_commitment",
            RegistryError::InvalidHolder => "invalid_holder",
            RegistryError::NotFound(_) => "not_found",
            RegistryError::AlreadyRevoked(_) => "already_revoked",
            RegistryError::NonTransferable => "non_transferable",
        }
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;
