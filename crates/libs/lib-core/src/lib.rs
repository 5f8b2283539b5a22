//! # Core Library
//!
//! Error taxonomy and configuration shared by every crate in the workspace.

pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::{AiConfig, AiProvider, ChainConfig, Config};
pub use error::{AppError, Result};
