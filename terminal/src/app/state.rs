//! # Application State Types
//!
//! Wallet and view state owned by [`App`](crate::app::App). The conversation
//! store lives in [`conversation`](crate::app::conversation).

use shared::dto::wallet::{BalanceSummary, CurrencyDisplay, WalletSnapshot};

/// Wallet store: the current snapshot, its derived totals and the refresh
/// generation that produced them.
#[derive(Debug, Clone, Default)]
pub struct WalletState {
    pub snapshot: WalletSnapshot,
    pub summary: BalanceSummary,
    /// Bumped on connect, disconnect and every refresh; results tagged with an
    /// older generation are dropped.
    pub generation: u64,
    /// Bridge-initiated connects awaiting the provider; their `Connected`
    /// events are left to those calls.
    pub connecting: usize,
}

impl WalletState {
    pub fn is_connected(&self) -> bool {
        self.snapshot.address.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.snapshot.loading
    }
}

/// Presentation-only flags.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub display: CurrencyDisplay,
    /// Set once at start-up; prefixes user lines.
    pub username: Option<String>,
}

impl ViewState {
    pub fn toggle_display(&mut self) -> CurrencyDisplay {
        self.display = self.display.toggled();
        self.display
    }

    pub fn user_label(&self) -> String {
        self.username
            .as_deref()
            .map(|u| u.to_uppercase())
            .unwrap_or_else(|| "YOU".to_string())
    }
}
