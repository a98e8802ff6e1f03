// src/services/credential_issuer.rs
//! Credential Issuer Service
//!
//! Acts on behalf of the issuing party (e.g. a university). It keeps the
//! credential documents off-ledger, derives their commitments, and issues or
//! revokes the matching registry records under the issuer's address.

use crate::error::RegistryResult;
use crate::models::credential::{Commitment, CredentialId};
use crate::services::SharedRegistry;
use crate::utils::crypto::commitment_of;
use ethers_core::types::Address;
use serde::Serialize;
use thiserror::Error;

/// Failure of a document-based issue or verify call.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document could not be serialized: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Registry(#[from] crate::error::RegistryError),
}

/// Service for issuing and revoking credentials as a given issuer.
///
/// Calls made through this service use `issuer` as the caller identity, so
/// they succeed only if `issuer` is the registry authority.
#[derive(Clone)]
pub struct CredentialIssuer {
    /// Shared registry handle
    registry: SharedRegistry,

    /// Address the service acts as
    issuer: Address,
}

impl CredentialIssuer {
    /// Creates a new CredentialIssuer instance
    ///
    /// # Arguments
    /// * `registry` - Shared registry handle
    /// * `issuer` - Address used as caller for every operation
    pub fn new(registry: SharedRegistry, issuer: Address) -> Self {
        Self { registry, issuer }
    }

    pub fn issuer(&self) -> Address {
        self.issuer
    }

    /// Issues a credential for a precomputed commitment.
    pub async fn issue_commitment(&self, holder: Address, commitment: Commitment) -> RegistryResult<CredentialId> {
        let mut registry = self.registry.lock().await;
        registry.issue(self.issuer, holder, commitment)
    }

    /// Derives the commitment of `document` and issues a credential for it.
    ///
    /// # Returns
    /// The new credential id together with the recorded commitment.
    pub async fn issue_document<T: Serialize>(
        &self,
        holder: Address,
        document: &T,
    ) -> Result<(CredentialId, Commitment), DocumentError> {
        let commitment = commitment_of(document)?;
        let id = self.issue_commitment(holder, commitment).await?;
        Ok((id, commitment))
    }

    /// Revokes credential `id`.
    pub async fn revoke(&self, id: CredentialId) -> RegistryResult<()> {
        let mut registry = self.registry.lock().await;
        registry.revoke(self.issuer, id)
    }
}
