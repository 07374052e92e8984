use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, Schema};
use tracing::info;
use vocabot_entities::{user_words, users, words};

async fn create_table<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> anyhow::Result<()>
where
    E: EntityTrait,
{
    let backend = db.get_database_backend();
    let mut stmt = schema.create_table_from_entity(entity);
    stmt.if_not_exists();
    db.execute_unprepared(&backend.build(&stmt).to_string())
        .await?;
    info!("Ensured table: {}", entity.table_name());
    Ok(())
}

/// Create the `users`, `words` and `user_words` tables if they are missing.
///
/// `user_words` is created last because it references the other two.
pub async fn create_tables(db: &DatabaseConnection) -> anyhow::Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, users::Entity).await?;
    create_table(db, &schema, words::Entity).await?;
    create_table(db, &schema, user_words::Entity).await?;

    Ok(())
}
