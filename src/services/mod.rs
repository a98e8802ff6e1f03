// src/services/mod.rs
//! Services layered over the registry core: issuing party, verifying party
//! and the HTTP API.

use crate::contracts::credential_registry::CredentialRegistry;
use std::sync::Arc;
use tokio::sync::Mutex;

pub mod api_server;
pub mod credential_issuer;
pub mod verifier;

/// Registry handle shared by all services.
///
/// The mutex is the single serialization point: one operation holds it from
/// start to finish, so operations are observed in a total order.
pub type SharedRegistry = Arc<Mutex<CredentialRegistry>>;

/// Wraps a registry for sharing between services.
pub fn share(registry: CredentialRegistry) -> SharedRegistry {
    Arc::new(Mutex::new(registry))
}
