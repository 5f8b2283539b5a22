//! # Solana Library
//!
//! Wallet balance data sources and the aggregator that combines them.
//!
//! - [`client`]: native balance via Solana JSON-RPC
//! - [`indexer`]: fungible-token holdings via the Bitquery GraphQL API
//! - [`balance`]: the [`BalanceAggregator`] and derived totals

pub mod balance;
pub mod client;
pub mod indexer;

// Re-export commonly used types from root for convenience
pub use balance::{BalanceAggregator, NativeBalanceSource, TokenIndexer};
pub use client::{Network, SolanaClient};
pub use indexer::BitqueryClient;
