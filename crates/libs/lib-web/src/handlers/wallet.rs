//! # Wallet Handlers
//!
//! HTTP endpoint for querying a Solana wallet's balances.
//!
//! ## Endpoints
//!
//! - `GET /api/wallet/snapshot` - SOL balance, token holdings and derived totals
//!
//! ## Authentication
//!
//! This endpoint is public. Any valid Solana wallet address can be queried.
//!
//! ## Request Example
//!
//! ```bash
//! curl "http://localhost:3001/api/wallet/snapshot?address=8W6QginkhTTxoP2deQjq7rZ9YMwN5FH9JYuLfSKuJKAL"
//! ```
//!
//! Response:
//! ```json
//! {
//!   "snapshot": {
//!     "address": "8W6QginkhTTxoP2deQjq7rZ9YMwN5FH9JYuLfSKuJKAL",
//!     "native_balance": 1.5,
//!     "tokens": [ { "symbol": "SOL", "name": "Solana", "amount": 1.5, "usd_value": 225.0 } ],
//!     "loading": false
//!   },
//!   "summary": { "total_usd": 225.0, "native_price": 150.0, "total_native": 1.5 }
//! }
//! ```
//!
//! ## Address Validation
//!
//! Invalid addresses return 400 Bad Request; RPC or indexer failures return
//! 502 Bad Gateway.

use crate::services::WalletService;
use axum::extract::{Query, State};
use axum::Json;
use lib_core::AppError;
use lib_solana::BalanceAggregator;
use serde::Deserialize;
use shared::dto::wallet::WalletSnapshotResponse;
use std::sync::Arc;
use tracing::{error, info, instrument};

#[derive(Debug, Deserialize)]
pub struct WalletQuery {
    #[serde(default)]
    pub address: String,
}

#[instrument(skip(balances))]
pub async fn get_wallet_snapshot(
    State(balances): State<Arc<BalanceAggregator>>,
    Query(params): Query<WalletQuery>,
) -> Result<Json<WalletSnapshotResponse>, AppError> {
    info!("[WALLET] Snapshot request: {}", params.address);

    let service = WalletService::new(balances);
    let response = service.get_snapshot(&params.address).await.map_err(|e| {
        error!("[WALLET] Failed to build snapshot: {}", e);
        e
    })?;

    Ok(Json(response))
}
