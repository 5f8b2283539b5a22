//! # Wallet API
//!
//! Balance snapshot endpoint: `GET /api/wallet/snapshot?address=...`.

use super::client::{error_from_response, network_error, ApiClient};
use lib_core::{AppError, Result};
use shared::dto::wallet::WalletSnapshotResponse;

pub async fn get_wallet_snapshot(api: &ApiClient, address: &str) -> Result<WalletSnapshotResponse> {
    let url = api.url("/api/wallet/snapshot");
    tracing::debug!("[WALLET] GET {} for {}", url, address);

    let response = api
        .client
        .get(&url)
        .query(&[("address", address)])
        .send()
        .await
        .map_err(network_error)?;

    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }

    response
        .json::<WalletSnapshotResponse>()
        .await
        .map_err(|e| AppError::Parse(format!("Failed to parse wallet snapshot: {}", e)))
}
