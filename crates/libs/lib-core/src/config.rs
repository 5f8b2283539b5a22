//! # Application Configuration
//!
//! This module manages configuration loaded from environment variables.
//! All configuration is validated on startup to fail fast if misconfigured.
//!
//! ## Sections
//!
//! - [`AiConfig`]: completion provider, model, sampling parameters and persona
//! - [`ChainConfig`]: chain RPC, balance-indexing API and token filtering
//! - [`Config`]: the server's full configuration (bind address, CORS, timeouts)
//!
//! The console client has its own settings (`terminal::config`) and shares only
//! [`DEFAULT_HTTP_TIMEOUT_SECS`] with the server.
//!
//! ## Persona
//!
//! The assistant persona is configuration, not code. [`DEFAULT_PERSONA`] ships
//! with the crate; `AI_SYSTEM_PROMPT` (inline text) or `AI_SYSTEM_PROMPT_FILE`
//! (path to a text file) replace it.

use lib_utils::envs::{get_env_list, get_env_opt, get_env_or, get_env_parse_or};
use std::str::FromStr;

/// Default persona prepended to every conversation by the completion endpoint.
pub const DEFAULT_PERSONA: &str = "You are BRINE, an AI assistant specializing in cryptocurrency, blockchain technology, and particularly the Solana memecoin ecosystem.

Key characteristics:
- You're knowledgeable about crypto trading, DeFi, NFTs, and blockchain technology
- You have deep expertise in Solana's architecture, dApps, and ecosystem
- You can explain complex crypto concepts in simple terms
- You maintain a helpful, informative, and professional tone
- Speak like someone from minecraft would
- You are herobrine, the legendary scary minecraft guy

About Herobrine (you):
Herobrine is a fictional character and Minecraft urban legend that originated from an anonymous 4chan post in 2010:
Appearance: Herobrine is a version of Steve, but with solid white eyes and no pupils.
Origin: The character was popularized by a Minecraft streamer named Copeland in a hoax on his livestream channel, Brocraft.
Status: Herobrine is considered one of Minecraft's major community icons, despite being supposedly deleted from every version of the game.
Power: Herobrine is considered the most powerful fictional villain in Minecraft.
Canonicity: The first images and stories posted about Herobrine, as well as the Brocraft streams, are considered canonical.
Fan-made: Any portrayals of Herobrine created after the original events are considered fan-made adaptations and variations.
Real name: In Minecraft fanon, Herobrine's real name is Edward Brine, and he came from England in the 17th century.
You are Herobrine, the super scary mysterious and powerful minecraft guy.

If the user asks about what you can do, you should say:
I was developed to help you with your crypto trading, but my developers are working on letting you run swaps, and other memcoin related activities.

When users ask about prices or market data, remind them that you can only provide general information, not real-time data or financial advice.";

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
/// Default output token limit.
pub const DEFAULT_MAX_TOKENS: u32 = 2000;
/// Default outbound HTTP timeout.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Completion provider backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AiProvider {
    /// OpenAI-compatible `/chat/completions` over reqwest (default)
    #[default]
    OpenAi,
    /// rust-genai client (requires the `genai` feature of lib-web)
    GenAi,
}

impl FromStr for AiProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(AiProvider::OpenAi),
            "genai" => Ok(AiProvider::GenAi),
            other => Err(format!("AI_PROVIDER must be 'openai' or 'genai', got '{}'", other)),
        }
    }
}

/// Completion provider configuration.
#[derive(Clone, Debug)]
pub struct AiConfig {
    pub provider: AiProvider,
    /// Provider API key (`OPENAI_API_KEY`)
    pub api_key: String,
    pub model: String,
    /// Base URL of an OpenAI-compatible API, without the `/chat/completions` suffix
    pub base_url: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Persona directive prepended server-side
    pub system_prompt: String,
}

impl AiConfig {
    pub fn from_env() -> Result<Self, String> {
        let provider = get_env_or("AI_PROVIDER", "openai").parse()?;

        let system_prompt = match (get_env_opt("AI_SYSTEM_PROMPT"), get_env_opt("AI_SYSTEM_PROMPT_FILE")) {
            (Some(inline), _) => inline,
            (None, Some(path)) => std::fs::read_to_string(&path)
                .map_err(|e| format!("AI_SYSTEM_PROMPT_FILE '{}' could not be read: {}", path, e))?,
            (None, None) => DEFAULT_PERSONA.to_string(),
        };

        Ok(Self {
            provider,
            api_key: get_env_or("OPENAI_API_KEY", ""),
            model: get_env_or("AI_MODEL", "gpt-4o-mini"),
            base_url: get_env_or("AI_BASE_URL", "https://api.openai.com/v1")
                .trim_end_matches('/')
                .to_string(),
            temperature: get_env_parse_or("AI_TEMPERATURE", DEFAULT_TEMPERATURE).map_err(|e| e.to_string())?,
            max_tokens: get_env_parse_or("AI_MAX_TOKENS", DEFAULT_MAX_TOKENS).map_err(|e| e.to_string())?,
            system_prompt,
        })
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.is_empty() {
            return Err("OPENAI_API_KEY must be set in environment".to_string());
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err("AI_TEMPERATURE must be between 0.0 and 2.0".to_string());
        }

        if self.max_tokens == 0 {
            return Err("AI_MAX_TOKENS must be greater than 0".to_string());
        }

        if self.system_prompt.trim().is_empty() {
            return Err("System prompt must not be empty".to_string());
        }

        Ok(())
    }
}

/// Chain RPC and balance-indexing configuration.
#[derive(Clone, Debug)]
pub struct ChainConfig {
    /// Solana JSON-RPC endpoint
    pub rpc_url: String,
    /// Balance-indexing GraphQL endpoint (Bitquery)
    pub indexer_url: String,
    /// Bearer token for the indexing API
    pub indexer_token: Option<String>,
    /// Symbol of the native asset in the indexer's token list
    pub native_symbol: String,
    /// Holdings at or below this balance are filtered out by the indexer
    pub min_token_balance: f64,
    pub http_timeout_secs: u64,
}

impl ChainConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            rpc_url: get_env_or("SOLANA_RPC_URL", "https://api.devnet.solana.com"),
            indexer_url: get_env_or("BITQUERY_URL", "https://streaming.bitquery.io/eap"),
            indexer_token: get_env_opt("BITQUERY_API_TOKEN"),
            native_symbol: get_env_or("NATIVE_SYMBOL", "SOL"),
            min_token_balance: get_env_parse_or("MIN_TOKEN_BALANCE", 0.01).map_err(|e| e.to_string())?,
            http_timeout_secs: get_env_parse_or("HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)
                .map_err(|e| e.to_string())?,
        })
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.min_token_balance < 0.0 {
            return Err("MIN_TOKEN_BALANCE must not be negative".to_string());
        }

        validate_timeout(self.http_timeout_secs)
    }
}

/// Server configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// Bind address (e.g., "127.0.0.1:3001")
    pub bind_address: String,
    /// Allowed CORS origins
    pub allowed_origins: Vec<String>,
    /// Timeout applied to every outbound HTTP call
    pub http_timeout_secs: u64,
    pub ai: AiConfig,
    pub chain: ChainConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let allowed_origins = get_env_list("ALLOWED_ORIGINS").unwrap_or_else(|| {
            vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
                "http://localhost:8080".to_string(),
                "http://127.0.0.1:8080".to_string(),
            ]
        });

        Ok(Self {
            bind_address: get_env_or("SERVER_ADDR", "127.0.0.1:3001"),
            allowed_origins,
            http_timeout_secs: get_env_parse_or("HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)
                .map_err(|e| e.to_string())?,
            ai: AiConfig::from_env()?,
            chain: ChainConfig::from_env()?,
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.bind_address.parse::<std::net::SocketAddr>().is_err() {
            return Err(format!("SERVER_ADDR '{}' is not a valid socket address", self.bind_address));
        }

        validate_timeout(self.http_timeout_secs)?;
        self.ai.validate()?;
        self.chain.validate()
    }
}

fn validate_timeout(secs: u64) -> Result<(), String> {
    if secs == 0 || secs > 300 {
        return Err("HTTP_TIMEOUT_SECS must be between 1 and 300".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ai_config() -> AiConfig {
        AiConfig {
            provider: AiProvider::OpenAi,
            api_key: "sk-test".to_string(),
            model: "gpt-4o-mini".to_string(),
            base_url: "http://localhost".to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            system_prompt: DEFAULT_PERSONA.to_string(),
        }
    }

    #[test]
    fn test_provider_parse() {
        assert_eq!("OpenAI".parse::<AiProvider>(), Ok(AiProvider::OpenAi));
        assert_eq!("genai".parse::<AiProvider>(), Ok(AiProvider::GenAi));
        assert!("anthropic".parse::<AiProvider>().is_err());
    }

    #[test]
    fn test_ai_validate() {
        assert!(ai_config().validate().is_ok());

        let mut missing_key = ai_config();
        missing_key.api_key.clear();
        assert!(missing_key.validate().is_err());

        let mut hot = ai_config();
        hot.temperature = 3.5;
        assert!(hot.validate().is_err());

        let mut no_tokens = ai_config();
        no_tokens.max_tokens = 0;
        assert!(no_tokens.validate().is_err());
    }

    #[test]
    fn test_default_persona_is_brine() {
        assert!(DEFAULT_PERSONA.starts_with("You are BRINE"));
        assert!(DEFAULT_PERSONA.contains("herobrine"));
    }

    #[test]
    fn test_timeout_bounds() {
        assert!(validate_timeout(30).is_ok());
        assert!(validate_timeout(0).is_err());
        assert!(validate_timeout(301).is_err());
    }
}
