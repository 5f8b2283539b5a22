//! # Console Configuration
//!
//! Environment-driven settings for the console client. `.env` is loaded by
//! `main` before [`TerminalConfig::from_env`] runs.

use lib_core::config::DEFAULT_HTTP_TIMEOUT_SECS;
use lib_core::{AppError, Result};
use lib_utils::envs::{get_env_opt, get_env_or, get_env_parse_or};
use std::path::PathBuf;

/// Default Solana CLI keypair location, relative to the home directory.
const DEFAULT_KEYPAIR_PATH: &str = ".config/solana/id.json";

#[derive(Debug, Clone)]
pub struct TerminalConfig {
    /// Backend base URL, without a trailing slash
    pub api_base_url: String,
    /// Keypair file used by the local wallet provider
    pub keypair_path: PathBuf,
    pub http_timeout_secs: u64,
    /// Symbol shown next to the native total
    pub native_symbol: String,
    /// Directory for the rolling log file
    pub log_dir: PathBuf,
}

impl TerminalConfig {
    pub fn from_env() -> Result<Self> {
        let keypair_path = get_env_opt("SOLANA_KEYPAIR_PATH")
            .map(|p| expand_home(&p))
            .unwrap_or_else(|| expand_home(&format!("~/{}", DEFAULT_KEYPAIR_PATH)));

        let config = Self {
            api_base_url: get_env_or("API_BASE_URL", "http://127.0.0.1:3001")
                .trim_end_matches('/')
                .to_string(),
            keypair_path,
            http_timeout_secs: get_env_parse_or("HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)
                .map_err(|e| AppError::Config(e.to_string()))?,
            native_symbol: get_env_or("NATIVE_SYMBOL", "SOL"),
            log_dir: PathBuf::from(get_env_or("LOG_DIR", "logs")),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://") {
            return Err(AppError::Config(format!(
                "API_BASE_URL must start with http:// or https://, got '{}'",
                self.api_base_url
            )));
        }

        if self.http_timeout_secs == 0 || self.http_timeout_secs > 300 {
            return Err(AppError::Config("HTTP_TIMEOUT_SECS must be between 1 and 300".to_string()));
        }

        Ok(())
    }
}

/// Replace a leading `~/` with the user's home directory.
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), std::env::var_os("HOME")) {
        (Some(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => PathBuf::from(path),
    }
}
