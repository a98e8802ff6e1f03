// src/lib.rs

//! # Credential Registry
//!
//! Tamper-evident registry for issuing, verifying and revoking identity
//! credentials such as academic degrees. Only a Keccak-256 commitment of each
//! credential is recorded; the data itself stays with the issuer and is shown
//! to verifiers out-of-band, who recompute the commitment and compare.
//!
//! ## Architecture Overview
//! 1. **Contracts Layer**: `CredentialRegistry` with its access control,
//!    commitment check and non-transferability guard
//! 2. **Storage Layer**: append-only `CredentialStore`
//! 3. **Services Layer**: issuer and verifier services plus the REST API
//! 4. **Models / Utils**: records, events, hashing and serialization helpers

pub mod config;
pub mod contracts;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

pub use contracts::credential_registry::CredentialRegistry;
pub use error::{RegistryError, RegistryResult};
pub use models::credential::{Commitment, CredentialId, CredentialInfo, CredentialRecord};
pub use models::event::{EventRecord, RegistryEvent};
