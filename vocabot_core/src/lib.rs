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

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub mod error;
pub mod script;

pub use error::{StoreError, StoreResult};
pub use script::{is_source_script, is_target_script};

/// Transport-provided chat identifier used as the user key.
pub type ChatId = i64;

/// Default number of wrong options shown next to the right one.
pub const DEFAULT_DISTRACTORS: usize = 3;

/// A word together with its translation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordPair {
    pub source_text: String,
    pub translated_text: String,
}

impl WordPair {
    #[must_use]
    pub fn new(source_text: impl Into<String>, translated_text: impl Into<String>) -> Self {
        Self {
            source_text: source_text.into(),
            translated_text: translated_text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// A new user row was created and seeded with `seeded` memberships.
    Registered { seeded: usize },
    AlreadyRegistered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddWordOutcome {
    Created,
    AlreadyExists,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    AlreadyExists,
    TranslationUnavailable,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyExists => write!(f, "already exists"),
            Self::TranslationUnavailable => write!(f, "translation unavailable"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedWord {
    pub word: String,
    pub reason: SkipReason,
}

/// Summary of a bulk import run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: Vec<SkippedWord>,
}

/// Looks up a translation for a source-language word.
///
/// Implementations are network-backed; any failure is reported as `Err` and
/// callers treat it as "translation unavailable".
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, source_text: &str) -> anyhow::Result<String>;
}

/// Persistence contract for users, shared words and per-user memberships.
#[async_trait]
pub trait VocabularyStore: Send + Sync {
    async fn list_users(&self) -> StoreResult<BTreeSet<ChatId>>;

    /// Create the user and seed a membership for every existing word, atomically.
    async fn register_user(&self, chat_id: ChatId) -> StoreResult<RegisterOutcome>;

    /// Uniformly sample one word from the user's pool.
    async fn random_word_for_user(&self, chat_id: ChatId) -> StoreResult<Option<WordPair>>;

    /// Sample up to `limit` distinct translations from the pool, none equal to `excluding`.
    async fn other_translations_for_user(
        &self,
        chat_id: ChatId,
        excluding: &str,
        limit: usize,
    ) -> StoreResult<Vec<String>>;

    /// Sample up to `limit` distinct source words whose translation differs from
    /// `excluding_translation`.
    async fn other_source_words_for_user(
        &self,
        chat_id: ChatId,
        excluding_translation: &str,
        limit: usize,
    ) -> StoreResult<Vec<String>>;

    /// Remove the user's membership for the word with this translation.
    ///
    /// Several pool words may share a translation, so `source_text` picks the
    /// one meant. Returns the number of memberships removed, or
    /// `StoreError::NotFound`.
    async fn delete_word_for_user(
        &self,
        chat_id: ChatId,
        source_text: &str,
        translated_text: &str,
    ) -> StoreResult<usize>;

    async fn add_word_for_user(
        &self,
        chat_id: ChatId,
        source_text: &str,
        translated_text: &str,
    ) -> StoreResult<AddWordOutcome>;

    async fn import_words(
        &self,
        source_texts: &[String],
        translator: &dyn Translator,
    ) -> StoreResult<ImportReport>;
}
