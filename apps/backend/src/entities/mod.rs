pub mod achievements;
pub mod admin_logs;
pub mod app_settings;
pub mod categories;
pub mod confession_hashtags;
pub mod confessions;
pub mod hashtags;
pub mod interest_group_members;
pub mod interest_groups;
pub mod mentions;
pub mod permissions;
pub mod profiles;
pub mod role_permissions;
pub mod roles;
pub mod user_achievements;
pub mod user_levels;

pub use achievements::Entity as Achievements;
pub use confessions::Entity as Confessions;
pub use interest_groups::Entity as InterestGroups;
pub use profiles::Entity as Profiles;
pub use profiles::Model as Profile;
