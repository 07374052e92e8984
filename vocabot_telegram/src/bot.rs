use crate::{Command, Result};
use std::{sync::Arc, time::Duration};
use teloxide::prelude::*;
use tokio::time::sleep;
use tracing::{info, warn};
use vocabot_quiz::QuizEngine;

/// Telegram front end of the quiz engine
#[derive(Clone)]
pub struct TelegramBot {
    /// Teloxide bot instance
    pub bot: Bot,
    /// Shared quiz engine
    pub engine: Arc<QuizEngine>,
    /// Allowed chat IDs
    allowed_chats: Vec<i64>,
    /// Evict idle sessions after this long
    session_idle: Option<Duration>,
}

impl TelegramBot {
    /// Create a new Telegram bot
    #[must_use]
    pub fn new(token: String, engine: Arc<QuizEngine>, allowed_chats: &[String]) -> Self {
        // Parse allowed chat IDs
        let allowed_chats = allowed_chats
            .iter()
            .filter_map(|s| s.parse::<i64>().ok())
            .collect();

        let bot = Bot::new(token);

        Self {
            bot,
            engine,
            allowed_chats,
            session_idle: None,
        }
    }

    #[must_use]
    pub const fn with_session_idle(mut self, idle: Option<Duration>) -> Self {
        self.session_idle = idle;
        self
    }

    /// Check if a chat is allowed
    #[must_use]
    pub fn is_allowed(&self, chat_id: i64) -> bool {
        self.allowed_chats.is_empty() || self.allowed_chats.contains(&chat_id)
    }

    /// Test connection to Telegram API with backoff retry.
    /// Starts at 2s, increases by 2s each attempt, max 10s delay.
    /// Retries indefinitely until connection succeeds.
    async fn test_connection(&self) -> Result<()> {
        const INITIAL_DELAY_SECS: u64 = 2;
        const MAX_DELAY_SECS: u64 = 10;

        let mut attempt = 1u64;
        loop {
            match self.bot.get_me().await {
                Ok(bot_user) => {
                    info!(
                        "Connected to Telegram API: @{} (id: {})",
                        bot_user
                            .user
                            .username
                            .unwrap_or_else(|| "no username".to_string()),
                        bot_user.user.id
                    );
                    return Ok(());
                }
                Err(e) => {
                    let delay_secs = (INITIAL_DELAY_SECS * attempt).min(MAX_DELAY_SECS);

                    warn!("Connection attempt {attempt} failed: {e}. Retrying in {delay_secs}s...");

                    if attempt == 1 {
                        warn!("This may be due to:");
                        warn!("  - Network connectivity issues");
                        warn!("  - Firewall blocking api.telegram.org");
                        warn!("  - Invalid bot token");
                        warn!("  - Proxy or VPN configuration required");
                    }

                    sleep(Duration::from_secs(delay_secs)).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Periodically drop idle sessions; runs until the process exits.
    fn spawn_eviction(&self, max_idle: Duration) {
        let engine = Arc::clone(&self.engine);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(max_idle);
            loop {
                ticker.tick().await;
                engine.evict_idle(max_idle).await;
            }
        });
        info!("Evicting sessions idle for {}s", max_idle.as_secs());
    }

    /// Run the bot
    pub async fn run(self) -> Result<()> {
        use teloxide::dispatching::{Dispatcher, UpdateFilterExt};
        use teloxide::dptree;
        use teloxide::types::Update;

        // Test connection with backoff retry before starting dispatcher
        self.test_connection().await?;

        if let Err(e) = self.bot.set_my_commands(Command::bot_commands()).await {
            warn!("Failed to register command menu: {e}");
        }

        if let Some(max_idle) = self.session_idle.filter(|d| !d.is_zero()) {
            self.spawn_eviction(max_idle);
        }

        let bot = self.bot.clone();

        let schema = dptree::entry().branch(Update::filter_message().endpoint({
            let bot_clone = self.clone();
            move |_bot: Bot, msg: teloxide::types::Message| {
                let bot_clone = bot_clone.clone();
                async move { crate::handler::handle_message(bot_clone, msg).await }
            }
        }));

        Dispatcher::builder(bot, schema)
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        Ok(())
    }
}
