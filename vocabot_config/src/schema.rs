use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use vocabot_core::DEFAULT_DISTRACTORS;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    pub translator: TranslatorConfig,
    #[serde(default)]
    pub quiz: QuizConfig,
    #[serde(default)]
    pub import: ImportConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TelegramConfig {
    pub token: String,
    /// Chat ids allowed to talk to the bot; empty allows everyone.
    #[serde(default)]
    pub allow_from: Vec<String>,
}

/// Database location, either as a full URL or as connection parts.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default = "DatabaseConfig::default_user")]
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "DatabaseConfig::default_server")]
    pub server: String,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default = "DatabaseConfig::default_database")]
    pub database: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            user: Self::default_user(),
            password: String::new(),
            server: Self::default_server(),
            port: None,
            database: Self::default_database(),
        }
    }
}

impl DatabaseConfig {
    const DEFAULT_PORT: u16 = 5432;

    fn default_user() -> String {
        "postgres".to_string()
    }

    fn default_server() -> String {
        "localhost".to_string()
    }

    fn default_database() -> String {
        "vocabot".to_string()
    }

    /// Configured port; a missing or zero port falls back to 5432.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port.filter(|p| *p != 0).unwrap_or(Self::DEFAULT_PORT)
    }

    /// Connection string for the store.
    ///
    /// An explicit `url` wins; otherwise a `PostgreSQL` DSN is assembled.
    #[must_use]
    pub fn dsn(&self) -> String {
        if let Some(url) = self.url.as_ref().filter(|u| !u.is_empty()) {
            return url.clone();
        }
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.user,
            self.password,
            self.server,
            self.port(),
            self.database
        )
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TranslatorConfig {
    pub api_key: String,
    #[serde(default = "TranslatorConfig::default_lang")]
    pub lang: String,
    #[serde(default = "TranslatorConfig::default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub retry_delays_ms: Vec<u64>,
}

impl TranslatorConfig {
    fn default_lang() -> String {
        "ru-en".to_string()
    }

    const fn default_timeout_secs() -> u64 {
        10
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    #[must_use]
    pub fn retry_delays(&self) -> Vec<Duration> {
        self.retry_delays_ms
            .iter()
            .copied()
            .map(Duration::from_millis)
            .collect()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct QuizConfig {
    #[serde(default = "QuizConfig::default_distractors")]
    pub distractors: usize,
    /// Drop idle in-memory sessions after this many seconds; unset keeps them forever.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_idle_secs: Option<u64>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            distractors: Self::default_distractors(),
            session_idle_secs: None,
        }
    }
}

impl QuizConfig {
    const fn default_distractors() -> usize {
        DEFAULT_DISTRACTORS
    }

    #[must_use]
    pub fn session_idle(&self) -> Option<Duration> {
        self.session_idle_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ImportConfig {
    #[serde(default = "ImportConfig::default_words_file")]
    pub words_file: PathBuf,
    /// Import `words_file` before the bot starts polling.
    #[serde(default)]
    pub on_startup: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            words_file: Self::default_words_file(),
            on_startup: false,
        }
    }
}

impl ImportConfig {
    fn default_words_file() -> PathBuf {
        PathBuf::from("words.txt")
    }
}

const CONFIG_TEMPLATE: &str = r#"{
  "telegram": {
    "token": "your-telegram-bot-token-here",
    "allow_from": []
  },
  "database": {
    "user": "postgres",
    "password": "",
    "server": "localhost",
    "port": 5432,
    "database": "vocabot"
  },
  "translator": {
    "api_key": "your-yandex-dictionary-key-here",
    "lang": "ru-en",
    "timeout_secs": 10,
    "retry_delays_ms": [500, 1000]
  },
  "quiz": {
    "distractors": 3
  },
  "import": {
    "words_file": "words.txt",
    "on_startup": false
  }
}"#;

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("vocabot"))
    }

    pub fn default_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load from `~/vocabot/config.json`.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    pub fn load_from(config_path: &Path) -> anyhow::Result<Self> {
        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'vocabot init' to create config.",
                config_path.display()
            );
        }

        let content = std::fs::read_to_string(config_path)?;
        let config = Self::from_json(&content)?;
        info!("Loaded config from {}", config_path.display());

        Ok(config)
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
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

        std::fs::write(&config_path, CONFIG_TEMPLATE)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Add your Telegram bot token and Yandex Dictionary key");
        println!("   2. Ensure PostgreSQL is running at the configured server");
        println!("   3. Optionally run 'vocabot import' to seed the dictionary");
        println!("   4. Run 'vocabot run' to start the bot");
        println!();
        Ok(())
    }
}
