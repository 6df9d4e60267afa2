//! # Tender Node
//!
//! Thin process bootstrap around the contract core. It owns nothing but
//! wiring: environment-derived server identity, the tracing subscriber,
//! contract construction, the `InitLedger` call, and a clean shutdown on
//! ctrl-c. The transport between this process and the ledger peer is an
//! external collaborator and is not implemented here.
//!
//! ## Startup Sequence
//!
//! 1. Install the tracing subscriber (`RUST_LOG` respected)
//! 2. Read server config from the environment
//! 3. Wire the contract over its backend
//! 4. Run `InitLedger`
//! 5. Park until a shutdown signal arrives

use anyhow::{Context, Result};
use tender_contract::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Chaincode id environment variable.
const ENV_CHAINCODE_ID: &str = "CHAINCODE_ID";
/// Listen address environment variable.
const ENV_SERVER_ADDRESS: &str = "CHAINCODE_SERVER_ADDRESS";

/// Process-level server configuration.
#[derive(Debug, Clone)]
struct ServerConfig {
    /// Chaincode identity the peer addresses us by.
    ccid: String,
    /// Address the contract server listens on.
    address: String,
    /// TLS is explicitly disabled at the transport layer.
    tls_disabled: bool,
}

impl ServerConfig {
    /// Read configuration from the environment. Missing values come back
    /// empty and are flagged at startup rather than failing the process.
    fn from_env() -> Self {
        Self {
            ccid: std::env::var(ENV_CHAINCODE_ID).unwrap_or_default(),
            address: std::env::var(ENV_SERVER_ADDRESS).unwrap_or_default(),
            tls_disabled: true,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install tracing subscriber")?;

    let config = ServerConfig::from_env();
    if config.ccid.is_empty() {
        warn!(var = ENV_CHAINCODE_ID, "chaincode id not set");
    }
    if config.address.is_empty() {
        warn!(var = ENV_SERVER_ADDRESS, "server address not set");
    }
    info!(
        ccid = %config.ccid,
        address = %config.address,
        tls_disabled = config.tls_disabled,
        "starting tender contract server"
    );

    let contract = TenderService::new(InMemoryLedger::new());
    contract
        .init_ledger()
        .await
        .context("ledger initialization failed")?;

    info!("tender contract ready, waiting for shutdown signal");
    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;
    info!("shutdown signal received, stopping");

    Ok(())
}
