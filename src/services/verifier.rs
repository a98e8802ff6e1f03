// src/services/verifier.rs
//! Credential verification service.
//!
//! Used by a verifying party (e.g. an employer) that received a credential
//! document out-of-band: it recomputes the commitment and checks it against
//! the registry. Verification needs no privileges.

use crate::error::RegistryResult;
use crate::models::credential::{Commitment, CredentialId};
use crate::services::credential_issuer::DocumentError;
use crate::services::SharedRegistry;
use crate::utils::crypto::commitment_of;
use serde::Serialize;

/// Credential verifier over the shared registry.
#[derive(Clone)]
pub struct Verifier {
    registry: SharedRegistry,
}

impl Verifier {
    pub fn new(registry: SharedRegistry) -> Self {
        Self { registry }
    }

    /// Verifies a candidate commitment against credential `id`.
    ///
    /// # Returns
    /// - `Ok(true)` if the commitment matches and the credential is active
    /// - `Ok(false)` if it does not match, or the credential is revoked
    /// - `Err(NotFound)` if the credential was never issued
    pub async fn verify_commitment(&self, id: CredentialId, commitment: &Commitment) -> RegistryResult<bool> {
        let registry = self.registry.lock().await;
        registry.verify(id, commitment)
    }

    /// Recomputes the commitment of a disclosed document and verifies it.
    pub async fn verify_document<T: Serialize>(&self, id: CredentialId, document: &T) -> Result<bool, DocumentError> {
        let commitment = commitment_of(document)?;
        Ok(self.verify_commitment(id, &commitment).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::credential_registry::CredentialRegistry;
    use crate::error::RegistryError;
    use crate::models::degree::DegreeRecord;
    use crate::services::credential_issuer::CredentialIssuer;
    use crate::services::share;
    use ethers_core::types::Address;

    #[tokio::test]
    async fn test_fraud_and_revocation_are_detected() {
        let university = Address::from_low_u64_be(1);
        let registry = share(CredentialRegistry::new(university));
        let issuer = CredentialIssuer::new(registry.clone(), university);
        let verifier = Verifier::new(registry);

        let (id, _) = issuer
            .issue_document(Address::from_low_u64_be(3), &DegreeRecord::sample())
            .await
            .unwrap();
        assert!(verifier.verify_document(id, &DegreeRecord::sample()).await.unwrap());

        let fake = DegreeRecord { program: "Medicina".into(), ..DegreeRecord::sample() };
        assert!(!verifier.verify_document(id, &fake).await.unwrap());

        issuer.revoke(id).await.unwrap();
        assert!(!verifier.verify_document(id, &DegreeRecord::sample()).await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_credential_is_an_error() {
        let verifier = Verifier::new(share(CredentialRegistry::new(Address::from_low_u64_be(1))));
        let result = verifier.verify_commitment(0, &Commitment::repeat_byte(1)).await;
        assert_eq!(result, Err(RegistryError::NotFound(0)));
    }
}
