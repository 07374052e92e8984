use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Telegram chat id
    #[sea_orm(unique)]
    pub chat_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_words::Entity")]
    UserWords,
}

impl Related<super::user_words::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserWords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
