//! Bulk seeding of the shared dictionary from a word list.

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use std::collections::HashSet;
use tracing::{debug, info, warn};
use vocabot_core::{ImportReport, SkipReason, SkippedWord, StoreError, StoreResult, Translator};
use vocabot_entities::words;

use crate::store::map_db_err;

/// Split a whitespace-delimited word list.
#[must_use]
pub fn parse_word_list(content: &str) -> Vec<String> {
    content.split_whitespace().map(ToString::to_string).collect()
}

/// Translate and insert every word that is not in the dictionary yet.
///
/// A failed translation or a uniqueness conflict skips only that word.
pub(crate) async fn import_words(
    db: &DatabaseConnection,
    source_texts: &[String],
    translator: &dyn Translator,
) -> StoreResult<ImportReport> {
    let mut known: HashSet<String> = words::Entity::find()
        .all(db)
        .await
        .map_err(map_db_err)?
        .into_iter()
        .map(|w| w.source_text)
        .collect();

    let mut report = ImportReport::default();

    for word in source_texts.iter().filter(|w| !w.is_empty()) {
        if known.contains(word) {
            report.skipped.push(SkippedWord {
                word: word.clone(),
                reason: SkipReason::AlreadyExists,
            });
            continue;
        }

        let translated = match translator.translate(word).await {
            Ok(t) if !t.trim().is_empty() => t,
            Ok(_) => {
                warn!("Empty translation for \"{word}\"");
                report.skipped.push(SkippedWord {
                    word: word.clone(),
                    reason: SkipReason::TranslationUnavailable,
                });
                continue;
            }
            Err(e) => {
                warn!("No translation for \"{word}\": {e}");
                report.skipped.push(SkippedWord {
                    word: word.clone(),
                    reason: SkipReason::TranslationUnavailable,
                });
                continue;
            }
        };

        let inserted = words::ActiveModel {
            source_text: Set(word.clone()),
            translated_text: Set(translated.clone()),
            ..Default::default()
        }
        .insert(db)
        .await;

        match inserted.map_err(map_db_err) {
            Ok(_) => {
                debug!("{word} - {translated} added");
                report.imported += 1;
            }
            Err(StoreError::Conflict(_)) => {
                report.skipped.push(SkippedWord {
                    word: word.clone(),
                    reason: SkipReason::AlreadyExists,
                });
            }
            Err(e) => return Err(e),
        }
        known.insert(word.clone());
    }

    info!(
        "Imported {} words, skipped {}",
        report.imported,
        report.skipped.len()
    );
    Ok(report)
}
