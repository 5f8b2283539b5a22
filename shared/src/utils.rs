//! # Shared Utility Functions
//!
//! Common utility functions used across the backend and the console client.
//!
//! ## Address Formatting
//!
//! Functions for formatting Solana wallet addresses for display:
//! - [`format_address`] - Format address with ellipsis (first N and last M characters)
//! - [`truncate_address`] - Alias for `format_address` with default parameters
//!
//! ## Balance Formatting
//!
//! - [`format_usd`] - Dollar amount with two decimals (`$12.34`)
//! - [`format_amount`] - Token or native amount with four decimals (`2.5000`)
//! - [`format_total`] - Portfolio total in the selected [`CurrencyDisplay`]
//! - [`format_token_line`] - One aligned row of the token list
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::format_address;
//!
//! let address = "8W6QginkhTTxoP2deQjq7rZ9YMwN5FH9JYuLfSKuJKAL";
//! let formatted = format_address(address, 4, 4);
//! assert_eq!(formatted, "8W6Q...JKAL");
//! ```

use crate::dto::wallet::{BalanceSummary, CurrencyDisplay, TokenBalance};

/// Format a wallet address by showing the first `prefix_len` and last `suffix_len` characters.
///
/// If the address is shorter than `prefix_len + suffix_len`, it is returned as-is.
///
/// # Arguments
///
/// * `address` - The wallet address to format
/// * `prefix_len` - Number of characters to show at the start (default: 4)
/// * `suffix_len` - Number of characters to show at the end (default: 4)
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_address;
///
/// let addr = "8W6QginkhTTxoP2deQjq7rZ9YMwN5FH9JYuLfSKuJKAL";
/// assert_eq!(format_address(addr, 4, 4), "8W6Q...JKAL");
/// assert_eq!(format_address(addr, 6, 6), "8W6Qgi...KuJKAL");
/// assert_eq!(format_address("short", 4, 4), "short");
/// ```
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let address_len = address.len();
    
    // Return early if address is too short to truncate meaningfully
    // Also guard against individual lengths exceeding address length to prevent panics
    if address_len <= prefix_len + suffix_len
        || prefix_len >= address_len
        || suffix_len >= address_len
    {
        return address.to_string();
    }
    
    // Safe to slice: we've verified prefix_len and suffix_len are within bounds
    // For Solana addresses (base58), we can safely use byte indexing as they're ASCII-only
    let prefix = &address[..prefix_len];
    let suffix = &address[address_len - suffix_len..];
    
    format!("{}...{}", prefix, suffix)
}

/// Format a wallet address with default 4-character prefix and suffix.
///
/// This is a convenience function that calls [`format_address`] with `prefix_len=4` and `suffix_len=4`.
///
/// # Examples
///
/// ```rust
/// use shared::utils::truncate_address;
///
/// let addr = "8W6QginkhTTxoP2deQjq7rZ9YMwN5FH9JYuLfSKuJKAL";
/// assert_eq!(truncate_address(addr), "8W6Q...JKAL");
/// ```
pub fn truncate_address(address: &str) -> String {
    format_address(address, 4, 4)
}

/// Format a USD value as `$X.XX`.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_usd;
///
/// assert_eq!(format_usd(0.0), "$0.00");
/// assert_eq!(format_usd(1234.5), "$1234.50");
/// ```
pub fn format_usd(value: f64) -> String {
    // `-0.0` would print as `$-0.00`
    let value = if value == 0.0 { 0.0 } else { value };
    format!("${:.2}", value)
}

/// Format an optional USD value, treating `None` as zero.
pub fn format_usd_opt(value: Option<f64>) -> String {
    format_usd(value.unwrap_or(0.0))
}

/// Format a token or native amount with four decimals.
///
/// ```rust
/// use shared::utils::format_amount;
///
/// assert_eq!(format_amount(2.5), "2.5000");
/// ```
pub fn format_amount(value: f64) -> String {
    format!("{:.4}", value)
}

/// The portfolio total in the selected currency: `$X.XX` or `X.XXXX`.
pub fn format_total(summary: &BalanceSummary, display: CurrencyDisplay) -> String {
    match display {
        CurrencyDisplay::Usd => format_usd(summary.total_usd),
        CurrencyDisplay::Native => format_amount(summary.total_native),
    }
}

/// One row of the token list: `SYMBOL  amount  $usd`.
pub fn format_token_line(token: &TokenBalance) -> String {
    format!(
        "{:<8} {:>16} {:>12}",
        token.symbol,
        format_amount(token.amount),
        format_usd_opt(token.usd_value)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_address() {
        let addr = "8W6QginkhTTxoP2deQjq7rZ9YMwN5FH9JYuLfSKuJKAL";
        assert_eq!(format_address(addr, 4, 4), "8W6Q...JKAL");
        assert_eq!(format_address(addr, 6, 6), "8W6Qgi...KuJKAL");
        assert_eq!(format_address(addr, 2, 2), "8W...AL");
    }

    #[test]
    fn test_format_address_short() {
        assert_eq!(format_address("short", 4, 4), "short");
        assert_eq!(format_address("abc", 4, 4), "abc");
    }

    #[test]
    fn test_truncate_address() {
        let addr = "8W6QginkhTTxoP2deQjq7rZ9YMwN5FH9JYuLfSKuJKAL";
        assert_eq!(truncate_address(addr), "8W6Q...JKAL");
    }

    #[test]
    fn test_balance_formatting() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(12.346), "$12.35");
        assert_eq!(format_usd(-0.0), "$0.00");
        assert_eq!(format_usd_opt(None), "$0.00");
        assert_eq!(format_amount(2.5), "2.5000");
        assert_eq!(format_amount(0.00001), "0.0000");
    }

    #[test]
    fn test_format_total_follows_toggle() {
        let summary = BalanceSummary {
            total_usd: 0.0,
            native_price: 0.0,
            total_native: 2.5,
        };
        assert_eq!(format_total(&summary, CurrencyDisplay::Usd), "$0.00");
        assert_eq!(format_total(&summary, CurrencyDisplay::Native), "2.5000");
    }

    #[test]
    fn test_format_token_line() {
        let line = format_token_line(&TokenBalance {
            symbol: "BONK".into(),
            name: "Bonk".into(),
            amount: 12.5,
            usd_value: None,
        });
        assert!(line.starts_with("BONK"));
        assert!(line.contains("12.5000"));
        assert!(line.ends_with("$0.00"));
    }
}
