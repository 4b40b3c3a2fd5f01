use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "mentions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub confession_id: Uuid,
    pub mentioned_user_id: Uuid,
    pub mentioned_by: Uuid,
    pub is_read: bool,
    pub created_at: OffsetDateTime,
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
}

impl Related<super::confessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Confession.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
