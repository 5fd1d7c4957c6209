use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One factoid row. `subject_key` holds the lowercased subject and is what
/// lookups filter on; `deleted_at` marks a tombstone.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "factoids")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub chat_id: i64,
    pub subject: String,
    pub subject_key: String,
    pub verb: String,
    #[sea_orm(column_type = "Text")]
    pub predicate: String,
    pub user_id: i64,
    pub username: Option<String>,
    pub created_at: DateTimeUtc,
    pub modified_at: DateTimeUtc,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
