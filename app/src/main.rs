#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod command;

use command::{
    CommandStrategy, ImportInput, ImportStrategy, InfoStrategy, InitStrategy, TelegramInput,
    TelegramStrategy, VersionStrategy,
};

#[derive(Parser)]
#[command(name = "vocabot")]
#[command(about = "Telegram vocabulary trainer", long_about = None)]
struct Cli {
    /// Config file (defaults to ~/vocabot/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the Telegram bot
    Run {
        /// Bot token (overrides config)
        #[arg(short, long)]
        token: Option<String>,

        /// Allowed chat IDs (overrides config)
        #[arg(long, value_delimiter = ',')]
        allow_from: Option<Vec<String>>,
    },
    /// Translate and add the words of a list to the dictionary
    Import {
        /// Whitespace-separated word list (defaults to import.words_file)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Show configuration and database status
    Info,
    /// Initialize configuration
    Init,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token, allow_from } => {
            TelegramStrategy
                .execute(TelegramInput {
                    config_path: cli.config,
                    token,
                    allow_from,
                })
                .await?;
        }
        Commands::Import { file } => {
            ImportStrategy
                .execute(ImportInput {
                    config_path: cli.config,
                    file,
                })
                .await?;
        }
        Commands::Info => InfoStrategy.execute(cli.config).await?,
        Commands::Init => InitStrategy.execute(()).await?,
        Commands::Version => VersionStrategy.execute(()).await?,
    }

    Ok(())
}
