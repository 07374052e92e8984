mod schema;

pub use schema::{
    Config, DatabaseConfig, ImportConfig, QuizConfig, TelegramConfig, TranslatorConfig,
};
