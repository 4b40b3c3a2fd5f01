use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "hashtags")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Lowercase, without the leading `#`
    #[sea_orm(unique)]
    pub tag: String,
    pub usage_count: i32,
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
