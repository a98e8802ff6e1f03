// src/models/credential.rs
//! Credential record data model.
//!
//! A record binds a holder address to a 32-byte commitment of credential data
//! that is kept off-ledger by the issuing party. Only the commitment is
//! recorded here.

use ethers_core::types::{Address, H256};
use serde::{Deserialize, Serialize};

/// Sequential identifier of a credential record, starting at 0.
pub type CredentialId = u64;

/// Keccak-256 commitment of the off-ledger credential data.
pub type Commitment = H256;

/// A credential record as held by the registry.
///
/// # Fields
/// - `id`: Dense sequential identifier, assigned at issuance
/// - `holder`: Address the credential is permanently bound to
/// - `commitment`: One-way hash of the credential data, never zero
/// - `revoked`: Revocation overlay flag, flips to `true` at most once
///
/// Every field except `revoked` is fixed once the record exists.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub id: CredentialId,
    pub holder: Address,
    pub commitment: Commitment,
    pub revoked: bool,
}

impl CredentialRecord {
    /// Creates a fresh, non-revoked record.
    pub fn new(id: CredentialId, holder: Address, commitment: Commitment) -> Self {
        CredentialRecord {
            id,
            holder,
            commitment,
            revoked: false,
        }
    }

    /// Lifecycle state derived from the revocation flag.
    pub fn status(&self) -> CredentialStatus {
        if self.revoked {
            CredentialStatus::Revoked
        } else {
            CredentialStatus::Active
        }
    }
}

/// Per-record lifecycle state. `Revoked` is terminal.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CredentialStatus {
    Active,
    Revoked,
}

/// Public view of a record returned by `get_info`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialInfo {
    pub commitment: Commitment,
    pub revoked: bool,
}

impl From<&CredentialRecord> for CredentialInfo {
    fn from(record: &CredentialRecord) -> Self {
        CredentialInfo {
            commitment: record.commitment,
            revoked: record.revoked,
        }
    }
}
