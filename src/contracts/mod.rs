// src/contracts/mod.rs
//! Registry core: the credential registry and the guards it composes.

pub mod access_control;
pub mod commitment;
pub mod credential_registry;
pub mod transfer_guard;
