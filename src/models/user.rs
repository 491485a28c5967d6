use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Role assigned to newly registered accounts.
///
/// The label (with its historical spelling) is what existing clients display
/// and persist, so it is kept verbatim.
pub const DEFAULT_ROLE: &str = "Developper";

/// A user record as held by the store.
///
/// Deliberately not `Serialize`: the password hash must never reach the wire.
/// Handlers respond with [`UserSummary`] instead.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

/// The wire shape of a user: what login returns and what the client caches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct UserSummary {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: String,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
        }
    }
}

/// Payload for `PUT /api/users/{id}`.
///
/// Email and password are immutable through the exposed API; only the
/// username and role may be overwritten.
#[derive(Debug, Deserialize, Validate)]
pub struct ProfileUpdate {
    #[validate(length(min = 1, max = 50))]
    pub username: String,
    #[validate(length(min = 1, max = 50))]
    pub role: String,
}
