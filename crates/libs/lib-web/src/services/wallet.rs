//! # Wallet Service
//!
//! Builds wallet snapshots for `GET /api/wallet/snapshot` so that the
//! indexing credential never leaves the server.
//!
//! ## Architecture
//!
//! ```text
//! WalletService → BalanceAggregator → SolanaClient   → Solana RPC (getBalance)
//!                                   → BitqueryClient → Bitquery GraphQL
//! ```
//!
//! ## Error Handling
//!
//! - `AppError::InvalidInput` - malformed wallet address
//! - `AppError::Network` / `AppError::Parse` - RPC or indexer failure

use lib_core::Result;
use lib_solana::BalanceAggregator;
use shared::dto::wallet::WalletSnapshotResponse;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Service for wallet snapshot queries.
pub struct WalletService {
    balances: Arc<BalanceAggregator>,
}

impl WalletService {
    pub fn new(balances: Arc<BalanceAggregator>) -> Self {
        Self { balances }
    }

    /// Fetch balances for `address` and derive the totals.
    ///
    /// # Returns
    ///
    /// * `Ok(WalletSnapshotResponse)` - snapshot plus summary
    /// * `Err(AppError::InvalidInput)` - invalid wallet address format
    /// * `Err(AppError::Network | AppError::Parse)` - upstream failure
    #[instrument(skip(self), fields(address = %address))]
    pub async fn get_snapshot(&self, address: &str) -> Result<WalletSnapshotResponse> {
        debug!("[WALLET] Building snapshot");

        let snapshot = self.balances.refresh(address).await?;
        let summary = self.balances.summarize(&snapshot);

        Ok(WalletSnapshotResponse { snapshot, summary })
    }
}
