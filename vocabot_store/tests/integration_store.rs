//! Integration tests for the sea-orm vocabulary store.
//!
//! These tests verify that:
//! - Registration is idempotent and seeds every existing word
//! - Random selection and distractor sampling stay inside the user's pool
//! - Add/delete report conflicts and missing rows as typed outcomes
//! - Bulk import skips known words and failed translations

use async_trait::async_trait;
use sea_orm::ConnectOptions;
use std::collections::{BTreeSet, HashMap};
use vocabot_core::{
    AddWordOutcome, RegisterOutcome, SkipReason, StoreError, Translator, VocabularyStore,
};
use vocabot_store::{SeaOrmStore, parse_word_list};

struct DictTranslator(HashMap<&'static str, &'static str>);

impl DictTranslator {
    fn new(pairs: &[(&'static str, &'static str)]) -> Self {
        Self(pairs.iter().copied().collect())
    }
}

#[async_trait]
impl Translator for DictTranslator {
    async fn translate(&self, source_text: &str) -> anyhow::Result<String> {
        self.0
            .get(source_text)
            .map(ToString::to_string)
            .ok_or_else(|| anyhow::anyhow!("no entry for {source_text}"))
    }
}

const PAIRS: &[(&str, &str)] = &[
    ("собака", "dog"),
    ("кот", "cat"),
    ("дом", "house"),
    ("мир", "peace"),
    ("зелёный", "green"),
];

async fn memory_store() -> SeaOrmStore {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);
    SeaOrmStore::connect(options).await.unwrap()
}

async fn seeded_store(pairs: &[(&'static str, &'static str)]) -> SeaOrmStore {
    let store = memory_store().await;
    let words: Vec<String> = pairs.iter().map(|(s, _)| (*s).to_string()).collect();
    let report = store
        .import_words(&words, &DictTranslator::new(pairs))
        .await
        .unwrap();
    assert_eq!(report.imported, pairs.len());
    store
}

#[tokio::test]
async fn test_register_seeds_all_existing_words() {
    let store = seeded_store(PAIRS).await;

    let outcome = store.register_user(42).await.unwrap();

    assert_eq!(outcome, RegisterOutcome::Registered { seeded: 5 });
    assert_eq!(store.membership_count(42).await.unwrap(), 5);
    assert_eq!(store.list_users().await.unwrap(), BTreeSet::from([42]));
}

#[tokio::test]
async fn test_register_twice_is_idempotent() {
    let store = seeded_store(PAIRS).await;

    store.register_user(7).await.unwrap();
    let second = store.register_user(7).await.unwrap();

    assert_eq!(second, RegisterOutcome::AlreadyRegistered);
    assert_eq!(store.membership_count(7).await.unwrap(), 5);
    assert_eq!(store.list_users().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_concurrent_registration_creates_one_user() {
    let store = seeded_store(PAIRS).await;

    let (a, b) = tokio::join!(store.register_user(9), store.register_user(9));
    let outcomes = [a.unwrap(), b.unwrap()];

    let registered = outcomes
        .iter()
        .filter(|o| matches!(o, RegisterOutcome::Registered { .. }))
        .count();
    assert_eq!(registered, 1);
    assert_eq!(store.membership_count(9).await.unwrap(), 5);
}

#[tokio::test]
async fn test_register_with_empty_dictionary() {
    let store = memory_store().await;

    let outcome = store.register_user(1).await.unwrap();

    assert_eq!(outcome, RegisterOutcome::Registered { seeded: 0 });
    assert_eq!(store.random_word_for_user(1).await.unwrap(), None);
}

#[tokio::test]
async fn test_random_word_comes_from_pool() {
    let store = seeded_store(PAIRS).await;
    store.register_user(1).await.unwrap();

    for _ in 0..20 {
        let pair = store.random_word_for_user(1).await.unwrap().unwrap();
        assert!(
            PAIRS
                .iter()
                .any(|(s, t)| pair.source_text == *s && pair.translated_text == *t)
        );
    }
}

#[tokio::test]
async fn test_random_word_for_unknown_user_is_none() {
    let store = seeded_store(PAIRS).await;

    assert_eq!(store.random_word_for_user(404).await.unwrap(), None);
}

#[tokio::test]
async fn test_other_translations_exclude_and_dedup() {
    let store = seeded_store(PAIRS).await;
    store.register_user(1).await.unwrap();

    for _ in 0..20 {
        let others = store
            .other_translations_for_user(1, "dog", 3)
            .await
            .unwrap();
        assert_eq!(others.len(), 3);
        assert!(!others.contains(&"dog".to_string()));
        let unique: BTreeSet<_> = others.iter().collect();
        assert_eq!(unique.len(), others.len());
    }
}

#[tokio::test]
async fn test_other_translations_small_pool() {
    let store = seeded_store(&PAIRS[..2]).await;
    store.register_user(1).await.unwrap();

    let others = store
        .other_translations_for_user(1, "dog", 3)
        .await
        .unwrap();

    assert_eq!(others, vec!["cat".to_string()]);
}

#[tokio::test]
async fn test_other_source_words_skip_target_translation() {
    let store = seeded_store(&PAIRS[..3]).await;
    store.register_user(1).await.unwrap();
    store.add_word_for_user(1, "пёс", "dog").await.unwrap();

    let others = store
        .other_source_words_for_user(1, "dog", 3)
        .await
        .unwrap();

    let others: BTreeSet<_> = others.into_iter().collect();
    assert_eq!(
        others,
        BTreeSet::from(["кот".to_string(), "дом".to_string()])
    );
}

#[tokio::test]
async fn test_add_word_creates_word_and_membership() {
    let store = memory_store().await;
    store.register_user(1).await.unwrap();

    let outcome = store.add_word_for_user(1, "окно", "window").await.unwrap();

    assert_eq!(outcome, AddWordOutcome::Created);
    assert_eq!(store.word_count().await.unwrap(), 1);
    assert_eq!(store.membership_count(1).await.unwrap(), 1);
    let pair = store.random_word_for_user(1).await.unwrap().unwrap();
    assert_eq!(pair.source_text, "окно");
    assert_eq!(pair.translated_text, "window");
}

#[tokio::test]
async fn test_add_existing_word_is_rejected() {
    let store = seeded_store(PAIRS).await;
    store.register_user(1).await.unwrap();

    let outcome = store.add_word_for_user(1, "кот", "kitty").await.unwrap();

    assert_eq!(outcome, AddWordOutcome::AlreadyExists);
    assert_eq!(store.word_count().await.unwrap(), 5);
    assert_eq!(store.membership_count(1).await.unwrap(), 5);
}

#[tokio::test]
async fn test_add_word_for_unregistered_user_fails() {
    let store = memory_store().await;

    let result = store.add_word_for_user(5, "окно", "window").await;

    assert!(matches!(result, Err(StoreError::NotFound(_))));
    assert_eq!(store.word_count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_added_word_only_joins_its_author() {
    let store = memory_store().await;
    store.register_user(1).await.unwrap();
    store.register_user(2).await.unwrap();

    store.add_word_for_user(1, "окно", "window").await.unwrap();

    assert_eq!(store.membership_count(1).await.unwrap(), 1);
    assert_eq!(store.membership_count(2).await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_removes_membership_only() {
    let store = seeded_store(PAIRS).await;
    store.register_user(1).await.unwrap();
    store.register_user(2).await.unwrap();

    let removed = store.delete_word_for_user(1, "собака", "dog").await.unwrap();

    assert_eq!(removed, 1);
    assert_eq!(store.membership_count(1).await.unwrap(), 4);
    assert_eq!(store.membership_count(2).await.unwrap(), 5);
    assert_eq!(store.word_count().await.unwrap(), 5);
    let others = store
        .other_translations_for_user(1, "cat", 10)
        .await
        .unwrap();
    assert!(!others.contains(&"dog".to_string()));
}

#[tokio::test]
async fn test_delete_keeps_other_words_sharing_the_translation() {
    let store = seeded_store(&[("кот", "cat"), ("кошка", "cat"), ("дом", "house")]).await;
    store.register_user(1).await.unwrap();

    let removed = store.delete_word_for_user(1, "кот", "cat").await.unwrap();

    assert_eq!(removed, 1);
    let pool: Vec<String> = store
        .words_for_user(1)
        .await
        .unwrap()
        .into_iter()
        .map(|w| w.source_text)
        .collect();
    assert!(pool.contains(&"кошка".to_string()));
    assert!(!pool.contains(&"кот".to_string()));
    assert_eq!(store.membership_count(1).await.unwrap(), 2);
}

#[tokio::test]
async fn test_delete_mismatched_pair_is_not_found() {
    let store = seeded_store(PAIRS).await;
    store.register_user(1).await.unwrap();

    let result = store.delete_word_for_user(1, "кот", "dog").await;

    assert!(matches!(result, Err(StoreError::NotFound(_))));
    assert_eq!(store.membership_count(1).await.unwrap(), 5);
}

#[tokio::test]
async fn test_delete_missing_membership_is_not_found() {
    let store = seeded_store(PAIRS).await;
    store.register_user(1).await.unwrap();
    store.delete_word_for_user(1, "собака", "dog").await.unwrap();

    let again = store.delete_word_for_user(1, "собака", "dog").await;
    let unknown = store.delete_word_for_user(1, "корабль", "spaceship").await;

    assert!(matches!(again, Err(StoreError::NotFound(_))));
    assert!(matches!(unknown, Err(StoreError::NotFound(_))));
    assert_eq!(store.membership_count(1).await.unwrap(), 4);
}

#[tokio::test]
async fn test_import_skips_known_and_untranslatable_words() {
    let store = seeded_store(&PAIRS[..2]).await;
    let words = parse_word_list("собака дом дом абракадабра");

    let report = store
        .import_words(&words, &DictTranslator::new(PAIRS))
        .await
        .unwrap();

    assert_eq!(report.imported, 1);
    let reasons: Vec<_> = report
        .skipped
        .iter()
        .map(|s| (s.word.as_str(), s.reason.clone()))
        .collect();
    assert_eq!(
        reasons,
        vec![
            ("собака", SkipReason::AlreadyExists),
            ("дом", SkipReason::AlreadyExists),
            ("абракадабра", SkipReason::TranslationUnavailable),
        ]
    );
    assert_eq!(store.word_count().await.unwrap(), 3);
}

struct BlankTranslator;

#[async_trait]
impl Translator for BlankTranslator {
    async fn translate(&self, source_text: &str) -> anyhow::Result<String> {
        Ok(if source_text == "дом" {
            "house".to_string()
        } else {
            "  ".to_string()
        })
    }
}

#[tokio::test]
async fn test_import_skips_blank_translations() {
    let store = memory_store().await;
    let words = parse_word_list("дом окно");

    let report = store.import_words(&words, &BlankTranslator).await.unwrap();

    assert_eq!(report.imported, 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].word, "окно");
    assert_eq!(report.skipped[0].reason, SkipReason::TranslationUnavailable);
    assert_eq!(store.word_count().await.unwrap(), 1);
}
