//! # Keypair Wallet
//!
//! [`WalletProvider`] backed by a local Solana CLI keypair file.
//!
//! ## Features
//! - Reads the keypair on every `connect`, so a replaced file is picked up
//! - Accepts the 64-byte CLI JSON array, a 32-byte secret array, or base58
//! - Asks a [`ConnectApproval`] hook before reporting the wallet connected
//! - Broadcasts [`WalletEvent`]s to subscribers
//!
//! Only the public key is kept in memory after a connect.

use crate::core::service::{ConnectApproval, WalletEvent, WalletProvider};
use async_trait::async_trait;
use lib_core::{AppError, Result};
use parking_lot::RwLock;
use solana_sdk::signature::{Keypair, Signer};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::broadcast;

const EVENT_CAPACITY: usize = 16;

pub struct KeypairWallet {
    path: PathBuf,
    approval: Arc<dyn ConnectApproval>,
    public_key: RwLock<Option<String>>,
    events: broadcast::Sender<WalletEvent>,
}

impl KeypairWallet {
    pub fn new(path: impl Into<PathBuf>, approval: Arc<dyn ConnectApproval>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            path: path.into(),
            approval,
            public_key: RwLock::new(None),
            events,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn emit(&self, event: WalletEvent) {
        // No subscribers is not an error
        let _ = self.events.send(event);
    }
}

#[async_trait]
impl WalletProvider for KeypairWallet {
    async fn connect(&self) -> Result<String> {
        if let Some(address) = self.public_key() {
            return Ok(address);
        }

        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            AppError::WalletUnavailable(format!("Failed to read {}: {}", self.path.display(), e))
        })?;

        let keypair = parse_keypair(&contents)?;
        let address = keypair.pubkey().to_string();

        if !self.approval.approve(&address) {
            tracing::info!("[WALLET] Connection to {} declined", address);
            return Err(AppError::UserRejected("User rejected the request".to_string()));
        }

        *self.public_key.write() = Some(address.clone());
        self.emit(WalletEvent::Connected(address.clone()));

        tracing::info!("[WALLET] Connected {}", address);
        Ok(address)
    }

    async fn disconnect(&self) -> Result<()> {
        let previous = self.public_key.write().take();
        if previous.is_some() {
            self.emit(WalletEvent::Disconnected);
            tracing::info!("[WALLET] Disconnected");
        }
        Ok(())
    }

    fn public_key(&self) -> Option<String> {
        self.public_key.read().clone()
    }

    fn subscribe(&self) -> broadcast::Receiver<WalletEvent> {
        self.events.subscribe()
    }
}

/// Parse keypair file contents.
///
/// JSON arrays may hold 64 bytes (secret followed by public key, checked for
/// consistency) or a bare 32-byte secret. Anything else is read as base58.
pub fn parse_keypair(contents: &str) -> Result<Keypair> {
    let trimmed = contents.trim();

    let bytes: Vec<u8> = if trimmed.starts_with('[') {
        serde_json::from_str(trimmed)
            .map_err(|e| AppError::WalletUnavailable(format!("Invalid JSON keypair: {}", e)))?
    } else {
        bs58::decode(trimmed)
            .into_vec()
            .map_err(|e| AppError::WalletUnavailable(format!("Invalid base58 keypair: {}", e)))?
    };

    keypair_from_bytes(&bytes)
}

fn keypair_from_bytes(bytes: &[u8]) -> Result<Keypair> {
    if bytes.len() != 32 && bytes.len() != 64 {
        return Err(AppError::WalletUnavailable(format!(
            "Expected 32 or 64 bytes, got {}",
            bytes.len()
        )));
    }

    let mut secret = [0u8; 32];
    secret.copy_from_slice(&bytes[..32]);
    let keypair = Keypair::new_from_array(secret);

    if bytes.len() == 64 && keypair.pubkey().to_bytes()[..] != bytes[32..] {
        return Err(AppError::WalletUnavailable(
            "Public key does not match secret key".to_string(),
        ));
    }

    Ok(keypair)
}
