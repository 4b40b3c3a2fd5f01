//! Row builders for SeaORM `MockDatabase` results.

use std::collections::BTreeMap;

use backend::entities::{categories, confessions, interest_groups, mentions, profiles};
use sea_orm::Value;
use time::OffsetDateTime;
use uuid::Uuid;

pub fn at() -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap()
}

pub fn profile(id: Uuid, is_admin: bool, email: &str) -> profiles::Model {
    profiles::Model {
        id,
        username: format!("user-{}", &id.simple().to_string()[..8]),
        display_name: None,
        avatar_url: None,
        bio: None,
        email: Some(email.to_string()),
        is_admin,
        role: None,
        status: "offline".to_string(),
        last_seen: None,
        is_banned: false,
        created_at: at(),
    }
}

pub fn confession(id: Uuid, owner: Uuid) -> confessions::Model {
    confessions::Model {
        id,
        user_id: owner,
        content: "original".to_string(),
        category_id: Some(1),
        is_anonymous: false,
        created_at: at(),
        updated_at: at(),
        edited_at: None,
    }
}

pub fn mention(
    confession_id: Uuid,
    mentioned_user_id: Uuid,
    mentioned_by: Uuid,
) -> mentions::Model {
    mentions::Model {
        id: Uuid::new_v4(),
        confession_id,
        mentioned_user_id,
        mentioned_by,
        is_read: false,
        created_at: at(),
    }
}

pub fn category(id: i32, name: &str) -> categories::Model {
    categories::Model {
        id,
        name: name.to_string(),
        slug: name.to_lowercase(),
        description: None,
        sort_order: id,
    }
}

pub fn group(id: Uuid, name: &str) -> interest_groups::Model {
    interest_groups::Model {
        id,
        name: name.to_string(),
        description: None,
        created_by: Uuid::nil(),
        is_private: false,
        created_at: at(),
    }
}

/// Result row for `PaginatorTrait::count`.
pub fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
}
