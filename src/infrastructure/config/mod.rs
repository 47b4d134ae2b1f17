//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;
use crate::domain::entities::Presence;

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    #[serde(default)]
    pub connection: ConnectionConfig,
    #[serde(default)]
    pub presence: PresenceConfig,
    #[serde(default)]
    pub plugins: PluginConfig,
    #[serde(default)]
    pub console: ConsoleConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    #[serde(default = "default_name")]
    pub name: String,
    /// Leading symbol that marks a message as a command
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default = "default_help_text")]
    pub help_text: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConnectionConfig {
    pub token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PresenceConfig {
    pub activity: String,
    pub banner: String,
}

/// Order in which plugin hooks run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PluginInitOrder {
    /// pre then post for each plugin before moving on
    #[default]
    Interleaved,
    /// every pre hook, then every post hook
    Batched,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PluginConfig {
    #[serde(default)]
    pub init_order: PluginInitOrder,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConsoleConfig {
    pub enabled: bool,
}

fn default_name() -> String {
    "ybot".to_string()
}

fn default_prefix() -> String {
    "!".to_string()
}

fn default_help_text() -> String {
    "Help hint!".to_string()
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            activity: "online".to_string(),
            banner: "Music".to_string(),
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: default_name(),
                prefix: default_prefix(),
                help_text: default_help_text(),
            },
            connection: ConnectionConfig::default(),
            presence: PresenceConfig::default(),
            plugins: PluginConfig::default(),
            console: ConsoleConfig::default(),
        }
    }
}

impl PresenceConfig {
    pub fn to_presence(&self) -> Presence {
        Presence::new(&self.activity, &self.banner)
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, |_| None)
    }

    /// Load a config file, then let `BOT_TOKEN`/`BOT_PREFIX` from `lookup` override it
    pub fn load_with_env<F>(path: impl Into<PathBuf>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        let mut config = Self::parse_yaml(&content)?;
        config.apply_env(lookup);
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config = Self::parse_yaml(content)?;
        config.validate()?;
        Ok(config)
    }

    fn parse_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn load_env() -> Self {
        let mut config = Config::default();
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Overlay `BOT_TOKEN` and `BOT_PREFIX` from a variable lookup
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup("BOT_TOKEN") {
            self.connection.token = Some(token);
        }

        if let Some(prefix) = lookup("BOT_PREFIX") {
            self.bot.prefix = prefix;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot.prefix.is_empty() {
            return Err(ConfigError::MissingField("bot.prefix".to_string()));
        }
        if self.bot.prefix.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidValue(format!(
                "bot.prefix must not contain whitespace: {:?}",
                self.bot.prefix
            )));
        }
        Ok(())
    }

    pub fn token(&self) -> Option<&str> {
        self.connection.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }
}
