// src/main.rs

//! # Credential Registry - Main Entry Point
//!
//! Bootstraps a registry owned by the configured authority and serves the
//! REST API over it.
//!
//! ## Environment Variables
//! - `REGISTRY_AUTHORITY`: Address allowed to issue and revoke (required)
//! - `REGISTRY_BIND_ADDRESS`: (Optional) listen address (default: 127.0.0.1:3000)
//! - `REGISTRY_NAME` / `REGISTRY_SYMBOL`: (Optional) collection metadata
//! - `RUST_LOG`: (Optional) log filter, overrides `REGISTRY_LOG_LEVEL`

use anyhow::Context;
use credential_registry::config::Settings;
use credential_registry::services::api_server::ApiServer;
use credential_registry::services::share;
use credential_registry::CredentialRegistry;
use dotenv::dotenv;

/// Main application entry point
///
/// # Initialization Sequence
/// 1. Load environment configuration
/// 2. Initialize logging
/// 3. Create the registry with its authority
/// 4. Start API server
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let settings = Settings::load().context("failed to load registry settings")?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&settings.log_level)).init();

    let registry = CredentialRegistry::with_metadata(settings.authority, &settings.name, &settings.symbol);
    log::info!(
        "registry {} ({}) deployed, authority {:?}",
        registry.name(),
        registry.symbol(),
        registry.owner()
    );

    let api_server = ApiServer::new(share(registry));
    api_server
        .run(settings.bind_address)
        .await
        .context("API server terminated")?;
    Ok(())
}
