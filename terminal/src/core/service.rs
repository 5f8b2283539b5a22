//! # Service Traits
//!
//! Traits for dependency injection, enabling better testability and modularity.
//!
//! - [`ChatApi`] / [`WalletApi`]: the backend endpoints (implemented by `ApiClient`)
//! - [`WalletProvider`]: a wallet the user can connect (implemented by `KeypairWallet`)
//! - [`ConnectApproval`]: the approval prompt shown before a connect succeeds

use async_trait::async_trait;
use lib_core::Result;
use shared::dto::chat::ChatMessage;
use shared::dto::wallet::WalletSnapshotResponse;
use tokio::sync::broadcast;

/// Completion endpoint (`POST /api/chat`).
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Send a message log, returning the assistant reply text.
    async fn send_chat(&self, messages: Vec<ChatMessage>) -> Result<String>;
}

/// Wallet snapshot endpoint (`GET /api/wallet/snapshot`).
#[async_trait]
pub trait WalletApi: Send + Sync {
    async fn wallet_snapshot(&self, address: &str) -> Result<WalletSnapshotResponse>;
}

/// Lifecycle notifications emitted by a wallet provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletEvent {
    Connected(String),
    Disconnected,
}

/// A connectable wallet.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Connect, returning the public address.
    async fn connect(&self) -> Result<String>;

    async fn disconnect(&self) -> Result<()>;

    fn public_key(&self) -> Option<String>;

    fn is_connected(&self) -> bool {
        self.public_key().is_some()
    }

    /// Receiver for `connect` / `disconnect` notifications.
    fn subscribe(&self) -> broadcast::Receiver<WalletEvent>;
}

/// Decides whether a connect request for `address` is approved.
pub trait ConnectApproval: Send + Sync {
    fn approve(&self, address: &str) -> bool;
}

impl<F> ConnectApproval for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn approve(&self, address: &str) -> bool {
        self(address)
    }
}

/// Approves every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoApprove;

impl ConnectApproval for AutoApprove {
    fn approve(&self, _address: &str) -> bool {
        true
    }
}
