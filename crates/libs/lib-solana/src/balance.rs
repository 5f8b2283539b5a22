//! # Balance Aggregator
//!
//! Combines the native balance (chain RPC) and the token list (indexing API)
//! into a single [`WalletSnapshot`]. Both calls run concurrently; neither is
//! retried. A failure of either fails the whole refresh so that a snapshot is
//! never half-updated.
//!
//! Derived totals live on [`WalletSnapshot::summary`]. Display formatting is
//! in `shared::utils`.

use crate::client::SolanaClient;
use crate::indexer::BitqueryClient;
use async_trait::async_trait;
use lib_core::{AppError, ChainConfig, Result};
use shared::dto::wallet::{BalanceSummary, TokenBalance, WalletSnapshot};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Source of the native balance, in whole units.
#[async_trait]
pub trait NativeBalanceSource: Send + Sync {
    async fn native_balance(&self, address: &str) -> Result<f64>;
}

/// Source of fungible-token holdings.
#[async_trait]
pub trait TokenIndexer: Send + Sync {
    async fn token_balances(&self, address: &str) -> Result<Vec<TokenBalance>>;
}

pub struct BalanceAggregator {
    native: Arc<dyn NativeBalanceSource>,
    indexer: Arc<dyn TokenIndexer>,
    native_symbol: String,
}

impl BalanceAggregator {
    pub fn new(
        native: Arc<dyn NativeBalanceSource>,
        indexer: Arc<dyn TokenIndexer>,
        native_symbol: impl Into<String>,
    ) -> Self {
        Self {
            native,
            indexer,
            native_symbol: native_symbol.into(),
        }
    }

    /// Build the RPC and Bitquery clients from configuration.
    pub fn from_config(config: &ChainConfig) -> Result<Self> {
        let rpc = SolanaClient::builder()
            .custom_rpc_url(config.rpc_url.clone())
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build();
        let indexer = BitqueryClient::from_config(config)?;

        if config.indexer_token.is_none() {
            warn!("[BALANCE] BITQUERY_API_TOKEN not set, token lookups will likely be rejected");
        }

        Ok(Self::new(Arc::new(rpc), Arc::new(indexer), config.native_symbol.clone()))
    }

    pub fn native_symbol(&self) -> &str {
        &self.native_symbol
    }

    /// Fetch a fresh snapshot of `address`.
    pub async fn refresh(&self, address: &str) -> Result<WalletSnapshot> {
        let address = address.trim();
        if address.is_empty() {
            return Err(AppError::InvalidInput("Address must not be empty".to_string()));
        }

        debug!("[BALANCE] Refreshing {}", address);

        let (native, tokens) = tokio::join!(
            self.native.native_balance(address),
            self.indexer.token_balances(address)
        );

        let native_balance = native?;
        let mut tokens = tokens?;
        sort_by_amount_desc(&mut tokens);

        debug!(
            "[BALANCE] {} holds {} native, {} tokens",
            address,
            native_balance,
            tokens.len()
        );

        Ok(WalletSnapshot {
            address: Some(address.to_string()),
            native_balance: Some(native_balance),
            tokens,
            loading: false,
        })
    }

    pub fn summarize(&self, snapshot: &WalletSnapshot) -> BalanceSummary {
        snapshot.summary(&self.native_symbol)
    }
}

/// Stable descending sort by amount.
pub fn sort_by_amount_desc(tokens: &mut [TokenBalance]) {
    tokens.sort_by(|a, b| b.amount.total_cmp(&a.amount));
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::dto::wallet::CurrencyDisplay;
    use shared::utils::format_total;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedNative(Result<f64>);

    #[async_trait]
    impl NativeBalanceSource for FixedNative {
        async fn native_balance(&self, _address: &str) -> Result<f64> {
            self.0.clone()
        }
    }

    struct FixedTokens {
        result: Result<Vec<TokenBalance>>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TokenIndexer for FixedTokens {
        async fn token_balances(&self, _address: &str) -> Result<Vec<TokenBalance>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    fn token(symbol: &str, amount: f64, usd: f64) -> TokenBalance {
        TokenBalance {
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            amount,
            usd_value: Some(usd),
        }
    }

    fn aggregator(native: Result<f64>, tokens: Result<Vec<TokenBalance>>) -> BalanceAggregator {
        BalanceAggregator::new(
            Arc::new(FixedNative(native)),
            Arc::new(FixedTokens {
                result: tokens,
                calls: AtomicUsize::new(0),
            }),
            "SOL",
        )
    }

    // ========== Refresh Tests ==========

    #[tokio::test]
    async fn test_empty_token_list_uses_native_fallback() {
        // Arrange
        let agg = aggregator(Ok(2.5), Ok(vec![]));

        // Act
        let snapshot = agg.refresh("wallet").await.unwrap();
        let summary = agg.summarize(&snapshot);

        // Assert
        assert_eq!(snapshot.address.as_deref(), Some("wallet"));
        assert!(!snapshot.loading);
        assert_eq!(format_total(&summary, CurrencyDisplay::Usd), "$0.00");
        assert_eq!(format_total(&summary, CurrencyDisplay::Native), "2.5000");
    }

    #[tokio::test]
    async fn test_native_price_inferred_from_token_list() {
        let agg = aggregator(
            Ok(2.0),
            Ok(vec![token("BONK", 1_000_000.0, 100.0), token("SOL", 2.0, 300.0)]),
        );

        let snapshot = agg.refresh("wallet").await.unwrap();
        let summary = agg.summarize(&snapshot);

        assert_eq!(summary.total_usd, 400.0);
        assert_eq!(summary.native_price, 150.0);
        assert_eq!(format_total(&summary, CurrencyDisplay::Native), "2.6667");
    }

    #[tokio::test]
    async fn test_tokens_sorted_descending_and_stable() {
        let agg = aggregator(
            Ok(0.0),
            Ok(vec![
                token("A", 1.0, 0.0),
                token("B", 5.0, 0.0),
                token("C", 1.0, 0.0),
            ]),
        );

        let snapshot = agg.refresh("wallet").await.unwrap();
        let symbols: Vec<_> = snapshot.tokens.iter().map(|t| t.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["B", "A", "C"]);
    }

    #[tokio::test]
    async fn test_native_failure_fails_refresh() {
        let agg = aggregator(Err(AppError::Network("rpc down".into())), Ok(vec![]));
        let err = agg.refresh("wallet").await.unwrap_err();
        assert_eq!(err, AppError::Network("rpc down".into()));
    }

    #[tokio::test]
    async fn test_indexer_failure_fails_refresh() {
        let agg = aggregator(Ok(1.0), Err(AppError::Parse("bad json".into())));
        let err = agg.refresh("wallet").await.unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[tokio::test]
    async fn test_blank_address_rejected() {
        let agg = aggregator(Ok(1.0), Ok(vec![]));
        assert!(matches!(agg.refresh("  ").await, Err(AppError::InvalidInput(_))));
    }
}
