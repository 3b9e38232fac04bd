//! Configuration loading
//!
//! Sources, lowest to highest priority:
//! 1. Built-in defaults
//! 2. `~/.config/codeorigin/config.toml`
//! 3. `codeorigin.toml` in the working directory
//! 4. Environment variables (`PORT`/`API_PORT`, `API_HOST`, `CODEORIGIN_SEED`)
//!
//! A file that fails to parse is skipped with a warning.

use crate::detector::InputLimits;
use crate::scoring::jitter::DEFAULT_JITTER;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Project-level config file name
pub const CONFIG_FILE_NAME: &str = "codeorigin.toml";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    pub limits: InputLimits,
    pub server: ServerConfig,
}

/// `[engine]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Half-width of the uniform jitter interval
    pub jitter: f64,
    /// Fixed seed for a reproducible jitter stream
    pub seed: Option<u64>,
}

impl EngineConfig {
    /// Replace an unusable jitter amplitude with the default
    pub fn sanitize(&mut self) {
        if !self.jitter.is_finite() || self.jitter < 0.0 {
            warn!(
                "Ignoring jitter = {}: must be a finite, non-negative number (using {})",
                self.jitter, DEFAULT_JITTER
            );
            self.jitter = DEFAULT_JITTER;
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            jitter: DEFAULT_JITTER,
            seed: None,
        }
    }
}

/// `[server]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Config {
    /// Load from the user config, then `dir/codeorigin.toml`, then the environment
    pub fn load(dir: &Path) -> Self {
        let mut config = Self::user_config_path()
            .filter(|p| p.exists())
            .and_then(|p| load_file_or_warn(&p))
            .unwrap_or_default();

        let project_path = dir.join(CONFIG_FILE_NAME);
        if project_path.exists() {
            if let Some(project) = load_file_or_warn(&project_path) {
                config = project;
            }
        }

        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config.engine.sanitize();
        Ok(config)
    }

    /// User-level config location
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("codeorigin").join("config.toml"))
    }

    /// Apply environment overrides through `lookup`. Unparsable values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("API_HOST") {
            self.server.host = host;
        }
        for key in ["API_PORT", "PORT"] {
            if let Some(raw) = lookup(key) {
                match raw.parse::<u16>() {
                    Ok(port) => self.server.port = port,
                    Err(_) => warn!("Ignoring {}={:?}: not a valid port", key, raw),
                }
            }
        }
        if let Some(raw) = lookup("CODEORIGIN_SEED") {
            match raw.parse::<u64>() {
                Ok(seed) => self.engine.seed = Some(seed),
                Err(_) => warn!("Ignoring CODEORIGIN_SEED={:?}: not an integer", raw),
            }
        }
    }

    /// Example config written by `codeorigin init`
    pub fn example_toml() -> &'static str {
        r#"# codeorigin configuration

[engine]
# Half-width of the random jitter added before clamping (0 disables it)
jitter = 0.05
# Fixed seed for reproducible scores
# seed = 42

[limits]
# Characters, measured after trimming surrounding whitespace
min_code_length = 10
max_code_length = 50000

[server]
host = "0.0.0.0"
port = 5000
"#
    }
}

fn load_file_or_warn(path: &Path) -> Option<Config> {
    match Config::from_file(path) {
        Ok(config) => {
            debug!("Loaded config from {}", path.display());
            Some(config)
        }
        Err(e) => {
            warn!("{:#}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.engine.jitter, 0.05);
        assert_eq!(config.engine.seed, None);
        assert_eq!(config.limits.min_code_length, 10);
        assert_eq!(config.limits.max_code_length, 50_000);
        assert_eq!(config.server.bind_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn test_example_toml_parses_to_defaults() {
        let parsed: Config = toml::from_str(Config::example_toml()).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let parsed: Config = toml::from_str("[engine]\nseed = 7\n[server]\nport = 8080\n").unwrap();
        assert_eq!(parsed.engine.seed, Some(7));
        assert_eq!(parsed.engine.jitter, 0.05);
        assert_eq!(parsed.server.port, 8080);
        assert_eq!(parsed.server.host, "0.0.0.0");
        assert_eq!(parsed.limits.max_code_length, 50_000);
    }

    #[test]
    fn test_non_finite_jitter_falls_back_to_default() {
        for raw in ["nan", "inf", "-inf", "-0.5"] {
            let mut parsed: Config = toml::from_str(&format!("[engine]\njitter = {raw}\n")).unwrap();
            parsed.engine.sanitize();
            assert_eq!(parsed.engine.jitter, DEFAULT_JITTER, "jitter = {raw}");
        }

        let mut zero: Config = toml::from_str("[engine]\njitter = 0.0\n").unwrap();
        zero.engine.sanitize();
        assert_eq!(zero.engine.jitter, 0.0);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("API_HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("CODEORIGIN_SEED", "11"),
        ]
        .into_iter()
        .collect();
        let mut config = Config::default();
        config.apply_env(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.server.bind_addr(), "127.0.0.1:9000");
        assert_eq!(config.engine.seed, Some(11));
    }

    #[test]
    fn test_port_takes_priority_over_api_port() {
        let env: HashMap<&str, &str> = [("API_PORT", "7000"), ("PORT", "7001")]
            .into_iter()
            .collect();
        let mut config = Config::default();
        config.apply_env(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.server.port, 7001);
    }

    #[test]
    fn test_invalid_env_values_ignored() {
        let env: HashMap<&str, &str> = [("PORT", "http"), ("CODEORIGIN_SEED", "-x")]
            .into_iter()
            .collect();
        let mut config = Config::default();
        config.apply_env(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.engine.seed, None);
    }
}
