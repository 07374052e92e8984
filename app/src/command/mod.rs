//! Static strategy pattern for CLI commands.
//!
//! Each subcommand is a separate strategy type with its own input, so
//! dispatch in `main` is resolved at compile time.

use anyhow::Context;
use std::path::Path;
use vocabot_config::Config;
use vocabot_providers::YandexTranslator;
use vocabot_store::SeaOrmStore;

mod import;
mod info;
mod init;
mod telegram;
mod version;

pub use import::{ImportInput, ImportStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use telegram::{TelegramInput, TelegramStrategy};
pub use version::VersionStrategy;

/// Load the config from `path`, or from the default location.
fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    path.map_or_else(Config::load, Config::load_from)
}

/// Connect to the configured database. Failures are fatal.
async fn connect_store(config: &Config) -> anyhow::Result<SeaOrmStore> {
    SeaOrmStore::connect(config.database.dsn())
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database at {}:{}/{}",
                config.database.server,
                config.database.port(),
                config.database.database
            )
        })
}

fn build_translator(config: &Config) -> anyhow::Result<YandexTranslator> {
    let translator = &config.translator;
    if translator.api_key.is_empty() {
        anyhow::bail!("Translator API key not configured. Set \"translator.api_key\" in config");
    }

    Ok(YandexTranslator::new(
        translator.api_key.clone(),
        translator.lang.clone(),
        translator.timeout(),
    )?
    .with_retry_delays(translator.retry_delays()))
}

/// Core trait defining the contract for all command strategies.
///
/// Each strategy defines its own input type via the associated type, and
/// calls are monomorphized at compile time.
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}
