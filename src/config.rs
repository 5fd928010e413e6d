use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::{Error, Result};

/// Environment variable holding the chat bot token
pub const TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FramestockConfig {
    pub database: Option<String>,
    #[serde(default)]
    pub bot: BotConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BotConfig {
    pub token_file: Option<String>,
    pub poll_timeout_secs: Option<u64>,
    pub reply_limit: Option<usize>,
}

impl BotConfig {
    pub const DEFAULT_TOKEN_FILE: &'static str = "bot_token.txt";
    pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;
    pub const DEFAULT_REPLY_LIMIT: usize = 20;

    pub fn token_file(&self) -> PathBuf {
        PathBuf::from(self.token_file.as_deref().unwrap_or(Self::DEFAULT_TOKEN_FILE))
    }

    pub fn poll_timeout_secs(&self) -> u64 {
        self.poll_timeout_secs.unwrap_or(Self::DEFAULT_POLL_TIMEOUT_SECS)
    }

    pub fn reply_limit(&self) -> usize {
        self.reply_limit.unwrap_or(Self::DEFAULT_REPLY_LIMIT).max(1)
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("framestock.toml")
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from("output").join("frames.db")
}

pub fn load_config(path: Option<&Path>) -> Result<Option<FramestockConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: FramestockConfig = toml::from_str(&contents)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
    Ok(Some(config))
}

/// Command-line flag first, then the config file, then `output/frames.db`
pub fn resolve_database_path(flag: Option<&Path>, config: &FramestockConfig) -> PathBuf {
    flag.map(Path::to_path_buf)
        .or_else(|| config.database.as_ref().map(PathBuf::from))
        .unwrap_or_else(default_database_path)
}

/// Read the bot token: environment variable first, then the token file.
pub fn load_token(config: &BotConfig) -> Result<String> {
    token_from_sources(std::env::var(TOKEN_ENV).ok(), &config.token_file())
}

fn token_from_sources(env_value: Option<String>, token_file: &Path) -> Result<String> {
    if let Some(token) = env_value.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()) {
        tracing::debug!("Using bot token from {}", TOKEN_ENV);
        return Ok(token);
    }

    tracing::debug!("Looking for token file {}", token_file.display());
    if token_file.is_file() {
        let token = std::fs::read_to_string(token_file)?.trim().to_string();
        if !token.is_empty() {
            return Ok(token);
        }
    }

    Err(Error::Config(format!(
        "Bot token not found. Set {} or create {}",
        TOKEN_ENV,
        token_file.display()
    )))
}
