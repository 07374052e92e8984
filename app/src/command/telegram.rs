use super::{build_translator, connect_store, import, load_config};
use crate::command::CommandStrategy;
use anyhow::Context;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use vocabot_quiz::QuizEngine;
use vocabot_telegram::TelegramBot;

/// Input for Telegram bot command.
pub struct TelegramInput {
    pub config_path: Option<PathBuf>,
    /// Optional bot token (overrides config)
    pub token: Option<String>,
    /// Optional allowed chat IDs (overrides config)
    pub allow_from: Option<Vec<String>>,
}

/// Strategy for running Telegram bot.
pub struct TelegramStrategy;

impl CommandStrategy for TelegramStrategy {
    type Input = TelegramInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = load_config(input.config_path.as_deref())?;

        // Get token from input or config
        let token = if let Some(t) = input.token {
            t
        } else if !config.telegram.token.is_empty() {
            config.telegram.token.clone()
        } else {
            anyhow::bail!("Telegram bot token not configured. Set \"telegram.token\" in config");
        };

        // Get allowed chats from input or config
        let allow_from = input
            .allow_from
            .unwrap_or_else(|| config.telegram.allow_from.clone());

        info!("Starting Telegram bot...");

        let store = Arc::new(connect_store(&config).await?);
        let translator = Arc::new(build_translator(&config)?);

        if config.import.on_startup {
            match import::import_file(&store, translator.as_ref(), &config.import.words_file).await
            {
                Ok(report) => info!(
                    "Startup import: {} added, {} skipped",
                    report.imported,
                    report.skipped.len()
                ),
                Err(e) => warn!("Startup import failed: {e:#}"),
            }
        }

        let engine = QuizEngine::new(store, translator)
            .await
            .context("Failed to load registered users")?
            .with_distractors(config.quiz.distractors);

        let bot = TelegramBot::new(token, Arc::new(engine), &allow_from)
            .with_session_idle(config.quiz.session_idle());

        info!("Telegram bot is running. Press Ctrl+C to stop.");
        bot.run().await?;

        Ok(())
    }
}
