//! Configuration loading, validation, and management for Motormind.
//!
//! Loads configuration from `~/.motormind/config.toml` with environment
//! variable overrides for secrets. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// The root configuration structure.
///
/// Maps directly to `~/.motormind/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Generation backend settings
    #[serde(default)]
    pub generation: BackendConfig,

    /// Vision backend settings (defaults to the generation backend's keys)
    #[serde(default)]
    pub vision: BackendConfig,

    /// Embedding backend settings
    #[serde(default)]
    pub embedding: BackendConfig,

    /// SQL lookup settings
    #[serde(default)]
    pub sql: SqlConfig,

    /// Reasoning loop settings
    #[serde(default)]
    pub agent: AgentConfig,

    /// Retrieval settings
    #[serde(default)]
    pub retrieval: RetrievalConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            generation: BackendConfig::default(),
            vision: BackendConfig::default(),
            embedding: BackendConfig::default(),
            sql: SqlConfig::default(),
            agent: AgentConfig::default(),
            retrieval: RetrievalConfig::default(),
        }
    }
}

/// Settings for one LLM backend (generation, vision, or embedding).
#[derive(Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Backend name: "openai", "groq", or "ollama"
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// API key (prefer the environment variables)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Custom base URL (overrides the backend's default endpoint)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Maximum characters accepted in one input prompt
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,

    /// Default max tokens per response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Default sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_backend() -> String {
    "openai".into()
}
fn default_model() -> String {
    "gpt-4o-mini".into()
}
fn default_max_input_chars() -> usize {
    10_000
}
fn default_max_tokens() -> u32 {
    1000
}
fn default_temperature() -> f32 {
    0.0
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            model: default_model(),
            api_key: None,
            base_url: None,
            max_input_chars: default_max_input_chars(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

/// SQL lookup configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqlConfig {
    /// Path to the SQLite car database
    #[serde(default = "default_sql_path")]
    pub database_path: String,
}

fn default_sql_path() -> String {
    "cars.db".into()
}

impl Default for SqlConfig {
    fn default() -> Self {
        Self {
            database_path: default_sql_path(),
        }
    }
}

/// Reasoning loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Maximum reasoning iterations per invocation
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Wall-clock timeout per generation call, in seconds
    #[serde(default = "default_generation_timeout_secs")]
    pub generation_timeout_secs: u64,
}

fn default_max_iterations() -> u32 {
    3
}
fn default_generation_timeout_secs() -> u64 {
    60
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            generation_timeout_secs: default_generation_timeout_secs(),
        }
    }
}

/// Retrieval configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Maximum snippets returned per similarity search
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
}

fn default_search_limit() -> usize {
    3
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            search_limit: default_search_limit(),
        }
    }
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("generation", &self.generation)
            .field("vision", &self.vision)
            .field("embedding", &self.embedding)
            .field("sql", &self.sql)
            .field("agent", &self.agent)
            .field("retrieval", &self.retrieval)
            .finish()
    }
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("backend", &self.backend)
            .field("model", &self.model)
            .field("api_key", &redact(&self.api_key))
            .field("base_url", &self.base_url)
            .field("max_input_chars", &self.max_input_chars)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the default path with env-var overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Environment variables win over file contents for secrets and backends.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("MOTORMIND_API_KEY") {
            self.generation.api_key = Some(key.clone());
            self.vision.api_key.get_or_insert(key.clone());
            self.embedding.api_key.get_or_insert(key);
        }
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            self.generation.api_key.get_or_insert(key.clone());
            self.vision.api_key.get_or_insert(key.clone());
            self.embedding.api_key.get_or_insert(key);
        }
        if let Ok(key) = std::env::var("GROQ_API_KEY")
            && self.generation.backend == "groq"
        {
            self.generation.api_key.get_or_insert(key);
        }
        if let Ok(backend) = std::env::var("MOTORMIND_BACKEND") {
            self.generation.backend = backend;
        }
        if let Ok(model) = std::env::var("MOTORMIND_MODEL") {
            self.generation.model = model;
        }
        if let Ok(path) = std::env::var("MOTORMIND_SQL_DB") {
            self.sql.database_path = path;
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".motormind")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        for (name, backend) in [
            ("generation", &self.generation),
            ("vision", &self.vision),
            ("embedding", &self.embedding),
        ] {
            if backend.temperature < 0.0 || backend.temperature > 2.0 {
                return Err(ConfigError::ValidationError(format!(
                    "{name}.temperature must be between 0.0 and 2.0"
                )));
            }
            if backend.max_input_chars == 0 {
                return Err(ConfigError::ValidationError(format!(
                    "{name}.max_input_chars must be > 0"
                )));
            }
        }

        if self.agent.max_iterations == 0 {
            return Err(ConfigError::ValidationError(
                "agent.max_iterations must be > 0".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(windows)]
fn dirs_home() -> PathBuf {
    std::env::var("USERPROFILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

#[cfg(not(windows))]
fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.agent.max_iterations, 3);
        assert_eq!(config.retrieval.search_limit, 3);
    }

    #[test]
    fn load_from_missing_file_uses_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.generation.backend, "openai");
    }

    #[test]
    fn load_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[generation]
backend = "groq"
model = "llama-3.3-70b-versatile"
temperature = 0.2

[agent]
max_iterations = 5

[sql]
database_path = "/data/cars.db"
"#
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.generation.backend, "groq");
        assert_eq!(config.generation.model, "llama-3.3-70b-versatile");
        assert_eq!(config.agent.max_iterations, 5);
        assert_eq!(config.sql.database_path, "/data/cars.db");
        // Unspecified sections fall back to defaults.
        assert_eq!(config.vision.backend, "openai");
    }

    #[test]
    fn invalid_temperature_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[generation]\ntemperature = 3.5").unwrap();
        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn zero_iterations_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[agent]\nmax_iterations = 0").unwrap();
        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn env_overrides_win_over_file_values() {
        let mut config = AppConfig::default();
        config.generation.api_key = Some("sk-from-file".into());
        config.vision.api_key = Some("sk-vision-file".into());
        config.generation.model = "model-from-file".into();

        unsafe {
            std::env::set_var("MOTORMIND_API_KEY", "sk-from-env");
            std::env::set_var("MOTORMIND_BACKEND", "groq");
            std::env::set_var("MOTORMIND_MODEL", "llama-3.3-70b-versatile");
            std::env::set_var("MOTORMIND_SQL_DB", "/env/cars.db");
        }
        config.apply_env_overrides();
        unsafe {
            std::env::remove_var("MOTORMIND_API_KEY");
            std::env::remove_var("MOTORMIND_BACKEND");
            std::env::remove_var("MOTORMIND_MODEL");
            std::env::remove_var("MOTORMIND_SQL_DB");
        }

        // The generic key replaces the generation key outright...
        assert_eq!(config.generation.api_key.as_deref(), Some("sk-from-env"));
        // ...but only fills vision/embedding when they have no key of their own.
        assert_eq!(config.vision.api_key.as_deref(), Some("sk-vision-file"));
        assert_eq!(config.embedding.api_key.as_deref(), Some("sk-from-env"));

        assert_eq!(config.generation.backend, "groq");
        assert_eq!(config.generation.model, "llama-3.3-70b-versatile");
        assert_eq!(config.sql.database_path, "/env/cars.db");
    }

    #[test]
    fn debug_redacts_api_keys() {
        let mut config = AppConfig::default();
        config.generation.api_key = Some("sk-super-secret".into());
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
