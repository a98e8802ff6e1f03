// src/models/mod.rs
//! Data structures shared across the registry, services and API.

pub mod credential;
pub mod degree;
pub mod event;
