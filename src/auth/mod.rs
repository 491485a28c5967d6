pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use crate::models::UserSummary;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use extractors::AuthenticatedUserId;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{generate_token, verify_token, Claims};

lazy_static! {
    // Regex for username validation: alphanumeric, underscores, hyphens
    static ref USERNAME_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
}

/// Represents the payload for a user login request.
///
/// No minimum password length is enforced here: the store only ever sees a
/// hash, and legacy accounts may carry arbitrarily short passwords.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// User's email address.
    #[validate(email)]
    pub email: String,
    /// User's password.
    #[validate(length(min = 1))]
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username: alphanumeric plus underscores or hyphens.
    #[validate(
        length(min = 1, max = 50),
        regex(
            path = "USERNAME_REGEX",
            message = "Username must be alphanumeric, underscores, or hyphens"
        )
    )]
    pub username: String,
    /// Email address for the new account. Unique across all users.
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Response body for a successful login: the bearer token plus a user
/// summary the client caches locally.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserSummary,
}
