use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A word shared by every user that has it in their pool.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "words")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub source_text: String,
    pub translated_text: String,
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
