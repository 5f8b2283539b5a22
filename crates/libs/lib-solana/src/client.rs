//! # Solana RPC Client
//!
//! Thin wrapper over the nonblocking `RpcClient` used to read native balances.

use crate::balance::NativeBalanceSource;
use async_trait::async_trait;
use lib_core::{AppError, Result};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Lamports per whole SOL.
pub const LAMPORTS_PER_SOL: f64 = 1_000_000_000.0;

/// Well-known Solana clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Devnet,
}

impl Network {
    pub fn rpc_url(&self) -> &'static str {
        match self {
            Network::Mainnet => "https://api.mainnet-beta.solana.com",
            Network::Devnet => "https://api.devnet.solana.com",
        }
    }
}

/// Solana RPC client for balance lookups.
#[derive(Clone)]
pub struct SolanaClient {
    rpc: Arc<RpcClient>,
    rpc_url: String,
}

impl SolanaClient {
    /// Create a client against a well-known cluster with the default timeout.
    pub fn new(network: Network) -> Self {
        Self::builder().network(network).build()
    }

    pub fn builder() -> SolanaClientBuilder {
        SolanaClientBuilder::default()
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Raw balance in lamports.
    pub async fn get_balance_lamports(&self, address: &str) -> Result<u64> {
        let pubkey = parse_pubkey(address)?;

        self.rpc
            .get_balance(&pubkey)
            .await
            .map_err(|e| AppError::Network(format!("getBalance failed: {}", e)))
    }

    /// Balance in whole SOL.
    pub async fn get_balance_sol(&self, address: &str) -> Result<f64> {
        let lamports = self.get_balance_lamports(address).await?;
        Ok(lamports as f64 / LAMPORTS_PER_SOL)
    }
}

#[async_trait]
impl NativeBalanceSource for SolanaClient {
    async fn native_balance(&self, address: &str) -> Result<f64> {
        self.get_balance_sol(address).await
    }
}

/// Parse a base58 account address.
pub fn parse_pubkey(address: &str) -> Result<Pubkey> {
    Pubkey::from_str(address.trim())
        .map_err(|e| AppError::InvalidInput(format!("Invalid address '{}': {}", address, e)))
}

/// Builder for [`SolanaClient`].
pub struct SolanaClientBuilder {
    network: Network,
    custom_rpc_url: Option<String>,
    timeout: Duration,
}

impl Default for SolanaClientBuilder {
    fn default() -> Self {
        Self {
            network: Network::Devnet,
            custom_rpc_url: None,
            timeout: Duration::from_secs(lib_core::config::DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl SolanaClientBuilder {
    pub fn network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }

    /// Overrides the cluster URL.
    pub fn custom_rpc_url(mut self, url: impl Into<String>) -> Self {
        self.custom_rpc_url = Some(url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> SolanaClient {
        let rpc_url = self
            .custom_rpc_url
            .unwrap_or_else(|| self.network.rpc_url().to_string());

        tracing::debug!("[SOLANA] RPC client for {}", rpc_url);

        SolanaClient {
            rpc: Arc::new(RpcClient::new_with_timeout(rpc_url.clone(), self.timeout)),
            rpc_url,
        }
    }
}
