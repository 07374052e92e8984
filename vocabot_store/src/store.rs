use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection,
    DbErr, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QuerySelect, RelationTrait, Set,
    SqlErr, TransactionTrait,
};
use std::collections::BTreeSet;
use tracing::{debug, info};
use vocabot_core::{
    AddWordOutcome, ChatId, ImportReport, RegisterOutcome, StoreError, StoreResult, Translator,
    VocabularyStore, WordPair,
};
use vocabot_entities::{user_words, users, words};

use crate::{import, sampling, schema};

/// Rows per `INSERT` when seeding a new user's memberships.
const SEED_CHUNK: usize = 500;

/// Turn a sea-orm error into the store taxonomy.
///
/// Unique-constraint violations become `Conflict`; everything else is a
/// connectivity-class failure.
pub(crate) fn map_db_err(err: DbErr) -> StoreError {
    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        StoreError::Conflict(err.to_string())
    } else {
        StoreError::Connectivity(err.into())
    }
}

async fn find_user<C>(conn: &C, chat_id: ChatId) -> Result<Option<users::Model>, DbErr>
where
    C: ConnectionTrait,
{
    users::Entity::find()
        .filter(users::Column::ChatId.eq(chat_id))
        .one(conn)
        .await
}

/// Vocabulary store over any sea-orm backend (`PostgreSQL` in production,
/// `SQLite` for tests and local runs).
pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    /// Connect and make sure the schema exists.
    ///
    /// # Arguments
    /// * `options` - Database URL or prepared `ConnectOptions`
    pub async fn connect<C>(options: C) -> anyhow::Result<Self>
    where
        C: Into<ConnectOptions>,
    {
        info!("Connecting to vocabulary database");
        let db = Database::connect(options).await?;
        schema::create_tables(&db).await?;
        info!("Vocabulary store initialized");
        Ok(Self { db })
    }

    /// Get a reference to the database connection.
    #[must_use]
    pub const fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Number of distinct words in the shared dictionary.
    pub async fn word_count(&self) -> StoreResult<u64> {
        words::Entity::find()
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }

    /// Number of words in the given user's pool.
    pub async fn membership_count(&self, chat_id: ChatId) -> StoreResult<u64> {
        user_words::Entity::find()
            .inner_join(users::Entity)
            .filter(users::Column::ChatId.eq(chat_id))
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }

    /// Every word in the given user's pool.
    pub async fn words_for_user(&self, chat_id: ChatId) -> StoreResult<Vec<WordPair>> {
        Ok(self
            .pool(chat_id)
            .await?
            .into_iter()
            .map(|w| WordPair::new(w.source_text, w.translated_text))
            .collect())
    }

    /// All words joined to the user through `user_words`, in one query.
    async fn pool(&self, chat_id: ChatId) -> StoreResult<Vec<words::Model>> {
        words::Entity::find()
            .inner_join(user_words::Entity)
            .join(JoinType::InnerJoin, user_words::Relation::User.def())
            .filter(users::Column::ChatId.eq(chat_id))
            .all(&self.db)
            .await
            .map_err(map_db_err)
    }
}

#[async_trait]
impl VocabularyStore for SeaOrmStore {
    async fn list_users(&self) -> StoreResult<BTreeSet<ChatId>> {
        let models = users::Entity::find()
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(models.into_iter().map(|u| u.chat_id).collect())
    }

    async fn register_user(&self, chat_id: ChatId) -> StoreResult<RegisterOutcome> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        if find_user(&txn, chat_id)
            .await
            .map_err(map_db_err)?
            .is_some()
        {
            txn.rollback().await.map_err(map_db_err)?;
            return Ok(RegisterOutcome::AlreadyRegistered);
        }

        let inserted = users::ActiveModel {
            chat_id: Set(chat_id),
            ..Default::default()
        }
        .insert(&txn)
        .await;

        let user = match inserted.map_err(map_db_err) {
            Ok(user) => user,
            Err(StoreError::Conflict(_)) => {
                // Lost a registration race for the same chat id.
                txn.rollback().await.map_err(map_db_err)?;
                return Ok(RegisterOutcome::AlreadyRegistered);
            }
            Err(e) => return Err(e),
        };

        let memberships: Vec<user_words::ActiveModel> = words::Entity::find()
            .all(&txn)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(|word| user_words::ActiveModel {
                user_id: Set(user.id),
                word_id: Set(word.id),
                ..Default::default()
            })
            .collect();

        for chunk in memberships.chunks(SEED_CHUNK) {
            user_words::Entity::insert_many(chunk.to_vec())
                .exec(&txn)
                .await
                .map_err(map_db_err)?;
        }

        txn.commit().await.map_err(map_db_err)?;

        info!(
            "Registered chat {chat_id} with {} seeded words",
            memberships.len()
        );
        Ok(RegisterOutcome::Registered {
            seeded: memberships.len(),
        })
    }

    async fn random_word_for_user(&self, chat_id: ChatId) -> StoreResult<Option<WordPair>> {
        let pool = self.pool(chat_id).await?;

        Ok(sampling::pick_one(&pool).map(|w| WordPair::new(w.source_text, w.translated_text)))
    }

    async fn other_translations_for_user(
        &self,
        chat_id: ChatId,
        excluding: &str,
        limit: usize,
    ) -> StoreResult<Vec<String>> {
        let candidates = self
            .pool(chat_id)
            .await?
            .into_iter()
            .map(|w| w.translated_text)
            .filter(|t| t != excluding);

        Ok(sampling::pick_distinct(candidates, limit))
    }

    async fn other_source_words_for_user(
        &self,
        chat_id: ChatId,
        excluding_translation: &str,
        limit: usize,
    ) -> StoreResult<Vec<String>> {
        let candidates = self
            .pool(chat_id)
            .await?
            .into_iter()
            .filter(|w| w.translated_text != excluding_translation)
            .map(|w| w.source_text);

        Ok(sampling::pick_distinct(candidates, limit))
    }

    async fn delete_word_for_user(
        &self,
        chat_id: ChatId,
        source_text: &str,
        translated_text: &str,
    ) -> StoreResult<usize> {
        let ids: Vec<i32> = user_words::Entity::find()
            .inner_join(users::Entity)
            .inner_join(words::Entity)
            .filter(users::Column::ChatId.eq(chat_id))
            .filter(words::Column::SourceText.eq(source_text))
            .filter(words::Column::TranslatedText.eq(translated_text))
            .all(&self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(|m| m.id)
            .collect();

        if ids.is_empty() {
            return Err(StoreError::NotFound(format!(
                "\"{source_text}\" -> \"{translated_text}\" is not in the dictionary of chat {chat_id}"
            )));
        }

        let result = user_words::Entity::delete_many()
            .filter(user_words::Column::Id.is_in(ids))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        info!(
            "Removed \"{source_text}\" -> \"{translated_text}\" from chat {chat_id} ({} rows)",
            result.rows_affected
        );
        Ok(usize::try_from(result.rows_affected).unwrap_or(usize::MAX))
    }

    async fn add_word_for_user(
        &self,
        chat_id: ChatId,
        source_text: &str,
        translated_text: &str,
    ) -> StoreResult<AddWordOutcome> {
        let existing = words::Entity::find()
            .filter(words::Column::SourceText.eq(source_text))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;
        if existing.is_some() {
            debug!("Word \"{source_text}\" already exists");
            return Ok(AddWordOutcome::AlreadyExists);
        }

        let txn = self.db.begin().await.map_err(map_db_err)?;

        let Some(user) = find_user(&txn, chat_id).await.map_err(map_db_err)? else {
            txn.rollback().await.map_err(map_db_err)?;
            return Err(StoreError::NotFound(format!(
                "chat {chat_id} is not registered"
            )));
        };

        let inserted = words::ActiveModel {
            source_text: Set(source_text.to_string()),
            translated_text: Set(translated_text.to_string()),
            ..Default::default()
        }
        .insert(&txn)
        .await;

        let word = match inserted.map_err(map_db_err) {
            Ok(word) => word,
            Err(StoreError::Conflict(_)) => {
                txn.rollback().await.map_err(map_db_err)?;
                return Ok(AddWordOutcome::AlreadyExists);
            }
            Err(e) => return Err(e),
        };

        user_words::ActiveModel {
            user_id: Set(user.id),
            word_id: Set(word.id),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(map_db_err)?;

        txn.commit().await.map_err(map_db_err)?;

        info!("Chat {chat_id} added \"{source_text}\" -> \"{translated_text}\"");
        Ok(AddWordOutcome::Created)
    }

    async fn import_words(
        &self,
        source_texts: &[String],
        translator: &dyn Translator,
    ) -> StoreResult<ImportReport> {
        import::import_words(&self.db, source_texts, translator).await
    }
}
