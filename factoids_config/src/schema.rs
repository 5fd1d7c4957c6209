use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use factoids_core::FactoidsConfig;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub factoids: FactoidsConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TelegramConfig {
    #[serde(default = "TelegramConfig::default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub token: String,
    /// Chat ids the bot listens to; empty means every chat.
    #[serde(default)]
    pub allow_from: Vec<String>,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            token: String::new(),
            allow_from: Vec::new(),
        }
    }
}

impl TelegramConfig {
    const fn default_enabled() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default = "DatabaseConfig::default_url")]
    pub url: String,
    /// Upper bound for connecting and for each store call.
    #[serde(default = "DatabaseConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: Self::default_url(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

impl DatabaseConfig {
    fn default_url() -> String {
        Config::config_dir().map_or_else(
            |_| "sqlite://factoids.db?mode=rwc".to_string(),
            |dir| format!("sqlite://{}?mode=rwc", dir.join("factoids.db").display()),
        )
    }

    const fn default_timeout_secs() -> u64 {
        5
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// `~/factoids`, where the config file and the default database live.
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("factoids"))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'factoids init' to create config.",
                config_path.display()
            );
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config file {}: {e}", path.display()))?;

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        std::fs::write(&config_path, Self::template())?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Edit the config file and add your Telegram bot token");
        println!("   2. Optionally point database.url at PostgreSQL (SQLite is used by default)");
        println!("   3. Run 'factoids telegram' to start the bot");
        println!();
        println!("🔧 Configuration options:");
        println!("   - factoids.answer_format: reply template ({{username}}, {{subject}}, {{verb}}, {{predicate}})");
        println!("   - factoids.unknown_username: name shown when the author is unknown");
        println!("   - factoids.disabled_subjects: subjects that are never stored or answered");
        println!("   - telegram.allow_from: restrict the bot to these chat ids");
        println!();
        Ok(())
    }

    fn template() -> String {
        let database_url = serde_json::Value::String(DatabaseConfig::default_url());
        format!(
            r#"{{
  "telegram": {{
    "enabled": true,
    "token": "your-telegram-bot-token-here",
    "allow_from": []
  }},
  "database": {{
    "url": {database_url},
    "timeout_secs": 5
  }},
  "factoids": {{
    "enabled": true,
    "unknown_username": "Someone",
    "answer_format": "{{username}} said that {{subject}} {{verb}} {{predicate}}",
    "rich_text": false,
    "disabled_subjects": ["por que", "why", "si", "eso", "que", "no", "cual", "quien", "donde", "cuando", "porque"]
  }}
}}"#
        )
    }
}
