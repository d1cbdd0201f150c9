#![allow(clippy::module_name_repetitions)]

use serde::Deserialize;
use std::{
    env::{self, VarError},
    fs, io,
    path::Path,
    time::Duration,
};
use thiserror::Error;

#[derive(Deserialize, Clone, Debug)]
pub struct BotConfig {
    #[serde(default)]
    pub token: Option<Box<str>>,
    #[serde(default = "default_bot_name")]
    pub name: Box<str>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: None,
            name: default_bot_name(),
        }
    }
}

fn default_bot_name() -> Box<str> {
    "TG Media Downloader Bot".into()
}

#[derive(Deserialize, Clone, Debug)]
pub struct DatabaseConfig {
    pub url: Box<str>,
    #[serde(default = "default_schema")]
    pub schema: Box<str>,
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

fn default_schema() -> Box<str> {
    "public".into()
}

const fn default_true() -> bool {
    true
}

#[derive(Deserialize, Clone, Debug)]
pub struct ServerConfig {
    pub host: Box<str>,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    pub fn get_address(&self) -> String {
        format!("{host}:{port}", host = self.host, port = self.port)
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct TelegramBotApiConfig {
    pub url: Box<str>,
}

impl Default for TelegramBotApiConfig {
    fn default() -> Self {
        Self {
            url: "https://api.telegram.org".into(),
        }
    }
}

/// Outbound call timeouts in seconds. Calls are never retried.
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct TimeoutsConfig {
    pub text: f32,
    pub forward: f32,
    pub media: f32,
}

impl TimeoutsConfig {
    /// Every timeout must be a positive number of seconds that fits a [`Duration`].
    fn validate(&self) -> Result<(), ParseError> {
        for (name, value) in [("timeouts.text", self.text), ("timeouts.forward", self.forward), ("timeouts.media", self.media)] {
            if !(value > 0.0 && Duration::try_from_secs_f32(value).is_ok()) {
                return Err(ParseError::InvalidTimeout { name, value });
            }
        }
        Ok(())
    }
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            text: 10.0,
            forward: 15.0,
            media: 30.0,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct HistoryConfig {
    pub limit: u64,
    pub max_limit: u64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { limit: 20, max_limit: 100 }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub telegram_bot_api: TelegramBotApiConfig,
    #[serde(default)]
    pub timeouts: TimeoutsConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error(transparent)]
    IO(#[from] io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
    #[error("Schema name `{0}` is not a plain identifier")]
    InvalidSchema(Box<str>),
    #[error("`{name}` must be a positive number of seconds, got {value}")]
    InvalidTimeout { name: &'static str, value: f32 },
    #[error("`{name}` env variable is not a valid UTF-8 string")]
    NotUnicode { name: &'static str },
}

/// # Panics
///
/// Panics if the `CONFIG_PATH` environment variable is not valid UTF-8.
#[must_use]
pub fn get_path() -> Box<str> {
    let path = match env::var("CONFIG_PATH") {
        Ok(val) => val,
        Err(VarError::NotPresent) => String::from("config.toml"),
        Err(VarError::NotUnicode(_)) => {
            panic!("`CONFIG_PATH` env variable is not a valid UTF-8 string!");
        }
    };

    path.into_boxed_str()
}

#[allow(clippy::missing_errors_doc)]
pub fn parse_from_fs(path: impl AsRef<Path>) -> Result<Config, ParseError> {
    let raw = fs::read_to_string(path)?;
    let cfg = parse_from_str(&raw)?;
    Ok(cfg)
}

#[allow(clippy::missing_errors_doc)]
pub fn parse_from_str(raw: &str) -> Result<Config, ParseError> {
    let cfg: Config = toml::from_str(raw)?;
    validate_schema(&cfg.database.schema)?;
    cfg.timeouts.validate()?;
    Ok(cfg)
}

/// Secrets and the connection string may come from the environment instead of the file.
#[allow(clippy::missing_errors_doc)]
pub fn apply_env_overrides(mut cfg: Config) -> Result<Config, ParseError> {
    if let Some(token) = read_env("BOT_TOKEN")? {
        cfg.bot.token = Some(token);
    }
    if let Some(url) = read_env("DATABASE_URL")? {
        cfg.database.url = url;
    }
    if let Some(schema) = read_env("DATABASE_SCHEMA")? {
        validate_schema(&schema)?;
        cfg.database.schema = schema;
    }
    Ok(cfg)
}

fn read_env(name: &'static str) -> Result<Option<Box<str>>, ParseError> {
    match env::var(name) {
        Ok(val) if val.trim().is_empty() => Ok(None),
        Ok(val) => Ok(Some(val.into_boxed_str())),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(ParseError::NotUnicode { name }),
    }
}

/// The schema goes into the connection's search path, so only plain identifiers are accepted.
fn validate_schema(schema: &str) -> Result<(), ParseError> {
    let mut chars = schema.chars();
    let valid = chars.next().is_some_and(|ch| ch.is_ascii_alphabetic() || ch == '_')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        && schema.len() <= 63;

    if valid {
        Ok(())
    } else {
        Err(ParseError::InvalidSchema(schema.into()))
    }
}
