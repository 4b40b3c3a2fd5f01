pub mod admin_user;
pub mod pagination;
pub mod session;
pub mod validated_json;

pub use admin_user::AdminUser;
pub use pagination::Page;
pub use session::{CurrentUser, OptionalUser};
pub use validated_json::ValidatedJson;
