// src/config.rs
//! Configuration: optional `config.yaml` per environment, then environment variable overrides

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_TEXT_GENERATION_URL: &str =
    "https://api-inference.huggingface.co/models/mistralai/Mistral-7B-Instruct-v0.2";
pub const DEFAULT_CHAT_COMPLETION_URL: &str = "https://router.huggingface.co/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.2";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variables that may carry the inference token, in lookup order.
const TOKEN_VARS: [&str; 3] = [
    "HF_API_TOKEN",
    "VITE_HUGGINGFACE_API_TOKEN",
    "VITE_HF_TOKEN",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InferenceMode {
    /// Raw prompt in, `generated_text` out.
    #[default]
    TextGeneration,
    /// Structured role/content messages, `choices[0].message.content` out.
    ChatCompletion,
}

impl FromStr for InferenceMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text-generation" | "text" | "prompt" => Ok(Self::TextGeneration),
            "chat-completion" | "chat" => Ok(Self::ChatCompletion),
            other => anyhow::bail!(
                "Unsupported inference mode: {}. Use text-generation or chat-completion",
                other
            ),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub github_api_url: String,
    pub github_token: Option<String>,
    /// Base URL of the internal listings backend; `None` leaves those adapters empty.
    pub backend_url: Option<String>,
    pub timeout_seconds: u64,
    pub synthetic_count: usize,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            github_token: None,
            backend_url: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            synthetic_count: 0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    pub mode: InferenceMode,
    pub url: Option<String>,
    pub model: String,
    pub api_token: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            mode: InferenceMode::default(),
            url: None,
            model: DEFAULT_MODEL.to_string(),
            api_token: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl InferenceConfig {
    /// Configured endpoint, or the default for the current mode.
    pub fn endpoint(&self) -> &str {
        match (&self.url, self.mode) {
            (Some(url), _) => url.as_str(),
            (None, InferenceMode::TextGeneration) => DEFAULT_TEXT_GENERATION_URL,
            (None, InferenceMode::ChatCompletion) => DEFAULT_CHAT_COMPLETION_URL,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_file: PathBuf,
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from("/tmp/oppgenie.log"),
            filter: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct EnvironmentSection {
    sources: SourcesConfig,
    inference: InferenceConfig,
    logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    local: Option<EnvironmentSection>,
    production: Option<EnvironmentSection>,
}

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: String,
    pub sources: SourcesConfig,
    pub inference: InferenceConfig,
    pub logging: LoggingConfig,
}

impl ConfigManager {
    /// Load `.env`, then `config.yaml` from the working directory, then process environment overrides
    pub fn load() -> Result<Self> {
        // A missing .env is the normal case
        let _ = dotenvy::dotenv();
        Self::load_from(Path::new("config.yaml"), |key| std::env::var(key).ok())
    }

    /// Load from an explicit config path with a custom variable lookup
    pub fn load_from<F>(config_path: &Path, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Self::get_environment(&lookup);
        let section = Self::load_section(config_path, &environment)?;
        let mut config = Self {
            environment,
            sources: section.sources,
            inference: section.inference,
            logging: section.logging,
        };
        config.apply_overrides(&lookup)?;
        Ok(config)
    }

    fn get_environment<F>(lookup: &F) -> String
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup("OPPGENIE_ENV")
            .or_else(|| lookup("ENVIRONMENT"))
            .unwrap_or_else(|| "local".to_string())
    }

    fn load_section(config_path: &Path, environment: &str) -> Result<EnvironmentSection> {
        if !config_path.exists() {
            return Ok(EnvironmentSection::default());
        }

        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let file: ConfigFile = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        let section = match environment {
            "production" => file.production,
            _ => file.local,
        };
        Ok(section.unwrap_or_default())
    }

    fn apply_overrides<F>(&mut self, lookup: &F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty("GITHUB_API_URL") {
            self.sources.github_api_url = url;
        }
        if let Some(token) = non_empty("GITHUB_TOKEN") {
            self.sources.github_token = Some(token);
        }
        if let Some(url) = non_empty("OPPORTUNITY_BACKEND_URL") {
            self.sources.backend_url = Some(url);
        }
        if let Some(count) = non_empty("SYNTHETIC_COUNT") {
            self.sources.synthetic_count = count
                .trim()
                .parse()
                .context("SYNTHETIC_COUNT must be a non-negative integer")?;
        }
        if let Some(secs) = non_empty("HTTP_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .context("HTTP_TIMEOUT_SECS must be a number of seconds")?;
            self.sources.timeout_seconds = secs;
            self.inference.timeout_seconds = secs;
        }

        if let Some(token) = TOKEN_VARS.iter().find_map(|key| non_empty(*key)) {
            self.inference.api_token = Some(token);
        }
        if let Some(url) = non_empty("INFERENCE_URL") {
            self.inference.url = Some(url);
        }
        if let Some(model) = non_empty("INFERENCE_MODEL") {
            self.inference.model = model;
        }
        if let Some(mode) = non_empty("INFERENCE_MODE") {
            self.inference.mode = mode.parse()?;
        }

        if let Some(path) = non_empty("OPPGENIE_LOG_FILE") {
            self.logging.log_file = PathBuf::from(path);
        }
        if let Some(filter) = non_empty("RUST_LOG") {
            self.logging.filter = filter;
        }

        Ok(())
    }
}
