//! Configuration module for codeorigin
//!
//! This module handles:
//! - Engine tuning (jitter amplitude, reproducible seed)
//! - Input size limits
//! - HTTP server bind address

mod settings;

pub use settings::{
    Config, EngineConfig, ServerConfig, CONFIG_FILE_NAME, DEFAULT_HOST, DEFAULT_PORT,
};
