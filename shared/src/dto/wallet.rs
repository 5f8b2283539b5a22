//! # Wallet Data Transfer Objects
//!
//! Snapshot of a connected wallet's native and token balances, plus the
//! totals derived from it. Returned by `GET /api/wallet/snapshot` and held by
//! the console client's wallet store.

use serde::{Deserialize, Serialize};

/// One fungible-token holding as reported by the indexing API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenBalance {
    pub symbol: String,
    pub name: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usd_value: Option<f64>,
}

/// Last-fetched view of a wallet.
///
/// Rebuilt wholesale on every refresh; never patched field by field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WalletSnapshot {
    pub address: Option<String>,
    /// Native balance in whole SOL.
    pub native_balance: Option<f64>,
    pub tokens: Vec<TokenBalance>,
    pub loading: bool,
}

impl WalletSnapshot {
    /// The disconnected state.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Sum of every token's USD value.
    pub fn total_usd(&self) -> f64 {
        self.tokens
            .iter()
            .filter_map(|t| t.usd_value)
            .fold(0.0, |acc, v| acc + v)
    }

    /// Derive totals, inferring the native price from the token list entry
    /// whose symbol equals `native_symbol`.
    ///
    /// With no usable native entry the price is `0.0` and `total_native` falls
    /// back to the directly fetched native balance.
    pub fn summary(&self, native_symbol: &str) -> BalanceSummary {
        let total_usd = self.total_usd();

        let native_price = self
            .tokens
            .iter()
            .find(|t| t.symbol == native_symbol)
            .filter(|t| t.amount > 0.0)
            .map(|t| t.usd_value.unwrap_or(0.0) / t.amount)
            .unwrap_or(0.0);

        let total_native = if native_price > 0.0 {
            total_usd / native_price
        } else {
            self.native_balance.unwrap_or(0.0)
        };

        BalanceSummary {
            total_usd,
            native_price,
            total_native,
        }
    }
}

/// Totals derived from a [`WalletSnapshot`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceSummary {
    pub total_usd: f64,
    /// USD per native unit, `0.0` when the native token is not in the list.
    pub native_price: f64,
    /// Portfolio value expressed in native units.
    pub total_native: f64,
}

/// Body of `GET /api/wallet/snapshot`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletSnapshotResponse {
    pub snapshot: WalletSnapshot,
    pub summary: BalanceSummary,
}

/// Which derived total the wallet panel shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyDisplay {
    #[default]
    Native,
    Usd,
}

impl CurrencyDisplay {
    pub fn toggled(self) -> Self {
        match self {
            CurrencyDisplay::Native => CurrencyDisplay::Usd,
            CurrencyDisplay::Usd => CurrencyDisplay::Native,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(symbol: &str, amount: f64, usd: Option<f64>) -> TokenBalance {
        TokenBalance {
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            amount,
            usd_value: usd,
        }
    }

    #[test]
    fn test_summary_infers_native_price() {
        let snapshot = WalletSnapshot {
            address: Some("addr".into()),
            native_balance: Some(2.0),
            tokens: vec![token("SOL", 2.0, Some(300.0)), token("BONK", 1000.0, Some(100.0))],
            loading: false,
        };

        let summary = snapshot.summary("SOL");
        assert_eq!(summary.total_usd, 400.0);
        assert_eq!(summary.native_price, 150.0);
        assert!((summary.total_native - 400.0 / 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_falls_back_without_native_entry() {
        let snapshot = WalletSnapshot {
            address: Some("addr".into()),
            native_balance: Some(2.5),
            tokens: vec![],
            loading: false,
        };

        let summary = snapshot.summary("SOL");
        assert_eq!(summary.total_usd, 0.0);
        assert_eq!(summary.native_price, 0.0);
        assert_eq!(summary.total_native, 2.5);
    }

    #[test]
    fn test_summary_missing_usd_counts_as_zero() {
        let snapshot = WalletSnapshot {
            native_balance: Some(1.0),
            tokens: vec![token("SOL", 1.0, None), token("USDC", 5.0, Some(5.0))],
            ..WalletSnapshot::default()
        };

        let summary = snapshot.summary("SOL");
        assert_eq!(summary.total_usd, 5.0);
        assert_eq!(summary.native_price, 0.0);
        assert_eq!(summary.total_native, 1.0);
    }

    #[test]
    fn test_empty_total_is_positive_zero() {
        let total = WalletSnapshot::empty().total_usd();
        assert_eq!(total, 0.0);
        assert!(total.is_sign_positive());
    }

    #[test]
    fn test_display_toggle() {
        assert_eq!(CurrencyDisplay::default(), CurrencyDisplay::Native);
        assert_eq!(CurrencyDisplay::Native.toggled(), CurrencyDisplay::Usd);
        assert_eq!(CurrencyDisplay::Usd.toggled().toggled(), CurrencyDisplay::Usd);
    }
}
