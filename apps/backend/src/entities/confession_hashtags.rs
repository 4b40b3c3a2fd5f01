use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "confession_hashtags")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub confession_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub hashtag_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::confessions::Entity",
        from = "Column::ConfessionId",
        to = "super::confessions::Column::Id",
        on_delete = "Cascade"
    )]
    Confession,
    #[sea_orm(
        belongs_to = "super::hashtags::Entity",
        from = "Column::HashtagId",
        to = "super::hashtags::Column::Id",
        on_delete = "Cascade"
    )]
    Hashtag,
}

impl Related<super::confessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Confession.def()
    }
}

impl Related<super::hashtags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hashtag.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
