//! Storage abstraction for the two document collections (users, tasks).
//!
//! The API surface only speaks to the [`Store`] trait; the production backend
//! is Postgres via sqlx ([`postgres::PgStore`]) and an in-memory backend
//! ([`memory::MemoryStore`]) backs the integration tests and local
//! development.

pub mod memory;
pub mod postgres;

use crate::error::AppError;
use crate::models::{Task, User, UserSummary};
use async_trait::async_trait;
use uuid::Uuid;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Persistent operations over the users and tasks collections.
///
/// All methods surface failures as [`AppError`]; a duplicate email on
/// `create_user` is reported as `AppError::Conflict`.
#[async_trait]
pub trait Store: Send + Sync {
    /// Persists a new user. The email is unique across the collection.
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<User, AppError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Overwrites username and role on the identified user.
    /// Returns `None` when the id is unknown.
    async fn update_profile(
        &self,
        id: i32,
        username: &str,
        role: &str,
    ) -> Result<Option<UserSummary>, AppError>;

    /// All tasks, ordered by creation time descending.
    async fn list_tasks(&self) -> Result<Vec<Task>, AppError>;

    async fn create_task(&self, task: Task) -> Result<Task, AppError>;

    /// Overwrites the status field only. Returns `None` when the id is unknown.
    async fn update_task_status(&self, id: Uuid, status: &str) -> Result<Option<Task>, AppError>;

    /// Removes the task. Returns `false` when the id is unknown.
    async fn delete_task(&self, id: Uuid) -> Result<bool, AppError>;
}
