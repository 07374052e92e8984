use super::{connect_store, load_config};
use std::path::PathBuf;
use tracing::info;
use vocabot_core::VocabularyStore;

/// Keep the first and last four characters of a secret.
fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "***".to_string()
    }
}

/// Strategy for displaying configuration and database status.
///
/// Secrets are masked; the database is probed with a real connection.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = Option<PathBuf>;

    async fn execute(&self, config_path: Self::Input) -> anyhow::Result<()> {
        let config = load_config(config_path.as_deref())?;

        println!("=== vocabot Configuration ===\n");

        println!("Telegram:");
        println!("  Token: {}", mask(&config.telegram.token));
        if config.telegram.allow_from.is_empty() {
            println!("  Allowed chats: all");
        } else {
            println!("  Allowed chats: {}", config.telegram.allow_from.join(", "));
        }
        println!();

        println!("Translator:");
        println!("  API key: {}", mask(&config.translator.api_key));
        println!("  Lang: {}", config.translator.lang);
        println!("  Timeout: {}s", config.translator.timeout_secs);
        println!();

        println!("Quiz:");
        println!("  Distractors: {}", config.quiz.distractors);
        match config.quiz.session_idle_secs {
            Some(secs) => println!("  Session idle limit: {secs}s"),
            None => println!("  Session idle limit: none"),
        }
        println!();

        println!("Database:");
        println!(
            "  Server: {}:{}",
            config.database.server,
            config.database.port()
        );
        println!("  Database: {}", config.database.database);

        info!("Testing database connection");
        match connect_store(&config).await {
            Ok(store) => {
                println!("  Status: Connected");
                let words = store.word_count().await?;
                let users = store.list_users().await?.len();
                println!("  Words: {words}");
                println!("  Users: {users}");
            }
            Err(e) => {
                println!("  Status: Connection failed");
                println!("  Error: {e:#}");
            }
        }

        Ok(())
    }
}
