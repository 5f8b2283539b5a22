//! # Bitquery Token Indexer
//!
//! Fetches an owner's fungible-token holdings from the Bitquery streaming
//! GraphQL API. Each holding is the latest post-balance above the configured
//! threshold, with its USD value.

use crate::balance::TokenIndexer;
use crate::client::parse_pubkey;
use async_trait::async_trait;
use lib_core::{AppError, ChainConfig, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::dto::wallet::TokenBalance;
use std::time::Duration;

/// HTTP client for the Bitquery balance-updates query.
#[derive(Clone)]
pub struct BitqueryClient {
    http: Client,
    url: String,
    token: Option<String>,
    min_balance: f64,
}

impl BitqueryClient {
    pub fn new(url: impl Into<String>, token: Option<String>, min_balance: f64, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            url: url.into(),
            token,
            min_balance,
        })
    }

    pub fn from_config(config: &ChainConfig) -> Result<Self> {
        Self::new(
            config.indexer_url.clone(),
            config.indexer_token.clone(),
            config.min_token_balance,
            Duration::from_secs(config.http_timeout_secs),
        )
    }

    /// Holdings of `address`, in the order the API returns them.
    pub async fn fetch_balances(&self, address: &str) -> Result<Vec<TokenBalance>> {
        // Only a valid base58 key is interpolated into the query.
        let owner = parse_pubkey(address)?.to_string();

        let body = GraphQlRequest {
            query: balance_query(&owner, self.min_balance),
            variables: "{}",
        };

        let mut request = self.http.post(&self.url).json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Indexer request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Network(format!("Indexer returned {}", status)));
        }

        let text = response
            .text()
            .await
            .map_err(|e| AppError::Network(format!("Failed to read indexer response: {}", e)))?;

        parse_balances(&text)
    }
}

#[async_trait]
impl TokenIndexer for BitqueryClient {
    async fn token_balances(&self, address: &str) -> Result<Vec<TokenBalance>> {
        self.fetch_balances(address).await
    }
}

// region: --- GraphQL wire types

#[derive(Serialize)]
struct GraphQlRequest {
    query: String,
    variables: &'static str,
}

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<QueryData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
struct QueryData {
    #[serde(rename = "Solana")]
    solana: SolanaData,
}

#[derive(Deserialize)]
struct SolanaData {
    #[serde(rename = "BalanceUpdates")]
    balance_updates: Vec<BalanceUpdateRow>,
}

#[derive(Deserialize)]
struct BalanceUpdateRow {
    #[serde(rename = "BalanceUpdate")]
    balance_update: BalanceUpdate,
}

#[derive(Deserialize)]
struct BalanceUpdate {
    #[serde(rename = "Balance")]
    balance: NumberLike,
    #[serde(rename = "Currency")]
    currency: Currency,
    #[serde(rename = "AmountInUSD", default)]
    amount_in_usd: Option<NumberLike>,
}

#[derive(Deserialize)]
struct Currency {
    #[serde(rename = "Name", default)]
    name: Option<String>,
    #[serde(rename = "Symbol", default)]
    symbol: Option<String>,
}

/// Bitquery returns decimals as strings; accept plain numbers too.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberLike {
    Number(f64),
    Text(String),
}

impl NumberLike {
    fn to_f64(&self, field: &str) -> Result<f64> {
        match self {
            NumberLike::Number(n) => Ok(*n),
            NumberLike::Text(s) if s.trim().is_empty() => Ok(0.0),
            NumberLike::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| AppError::Parse(format!("{} is not a number: '{}'", field, s))),
        }
    }
}

// endregion: --- GraphQL wire types

fn balance_query(owner: &str, min_balance: f64) -> String {
    format!(
        r#"query MyQuery {{
  Solana {{
    BalanceUpdates(
      where: {{BalanceUpdate: {{Account: {{Owner: {{is: "{owner}"}}}}}}}}
      orderBy: {{descendingByField: "BalanceUpdate_Balance_maximum"}}
    ) {{
      BalanceUpdate {{
        Balance: PostBalance(maximum: Block_Slot, selectWhere: {{gt: "{min_balance}"}})
        Currency {{
          Name
          Symbol
        }}
        AmountInUSD: PostBalanceInUSD(maximum: Block_Slot)
      }}
    }}
  }}
}}"#
    )
}

fn parse_balances(text: &str) -> Result<Vec<TokenBalance>> {
    let parsed: GraphQlResponse = serde_json::from_str(text)?;

    if let Some(first) = parsed.errors.first() {
        return Err(AppError::Parse(format!("Indexer query failed: {}", first.message)));
    }

    let data = parsed
        .data
        .ok_or_else(|| AppError::Parse("Indexer response has no data".to_string()))?;

    data.solana
        .balance_updates
        .into_iter()
        .map(|row| {
            let update = row.balance_update;
            let usd = match &update.amount_in_usd {
                Some(value) => value.to_f64("AmountInUSD")?,
                None => 0.0,
            };

            Ok(TokenBalance {
                symbol: update.currency.symbol.unwrap_or_default(),
                name: update.currency.name.unwrap_or_default(),
                amount: update.balance.to_f64("Balance")?,
                usd_value: Some(usd),
            })
        })
        .collect()
}
