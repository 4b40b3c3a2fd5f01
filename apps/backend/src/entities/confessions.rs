use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "confessions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub category_id: Option<i32>,
    pub is_anonymous: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub edited_at: Option<OffsetDateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::confession_hashtags::Entity")]
    ConfessionHashtags,
}

impl Related<super::confession_hashtags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ConfessionHashtags.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
