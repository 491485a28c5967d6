use crate::config::RetryPolicy;
use crate::error::AppError;
use crate::models::{Task, User, UserSummary};
use crate::store::Store;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// Postgres-backed [`Store`].
///
/// Uses runtime-checked queries only, so no live database is needed at build
/// time. Email uniqueness is enforced by the `users` table constraint.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to the store, retrying with the policy's fixed delay.
    ///
    /// With `max_attempts: None` this loops until the store comes up, which
    /// is the long-standing deployment behavior (the server starts before
    /// the database container is ready).
    pub async fn connect_with_retry(
        database_url: &str,
        policy: &RetryPolicy,
    ) -> Result<Self, sqlx::Error> {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match PgPool::connect(database_url).await {
                Ok(pool) => {
                    log::info!("Connected to store after {} attempt(s)", attempt);
                    return Ok(Self { pool });
                }
                Err(e) => {
                    if let Some(max) = policy.max_attempts {
                        if attempt >= max {
                            log::error!("Store connection failed after {} attempts: {}", attempt, e);
                            return Err(e);
                        }
                    }
                    log::warn!(
                        "Store connection failed (attempt {}): {}; retrying in {:?}",
                        attempt,
                        e,
                        policy.delay
                    );
                    tokio::time::sleep(policy.delay).await;
                }
            }
        }
    }

    /// Creates the two collections if they do not exist yet.
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS users (
                id SERIAL PRIMARY KEY,
                username TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                role TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS tasks (
                id UUID PRIMARY KEY,
                title TEXT NOT NULL,
                status TEXT NOT NULL,
                priority TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING id, username, email, password_hash, role",
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, role FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update_profile(
        &self,
        id: i32,
        username: &str,
        role: &str,
    ) -> Result<Option<UserSummary>, AppError> {
        let summary = sqlx::query_as::<_, UserSummary>(
            "UPDATE users SET username = $1, role = $2 WHERE id = $3
             RETURNING id, username, email, role",
        )
        .bind(username)
        .bind(role)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(summary)
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, AppError> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT id, title, status, priority, created_at FROM tasks
             ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    async fn create_task(&self, task: Task) -> Result<Task, AppError> {
        let created = sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (id, title, status, priority, created_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, title, status, priority, created_at",
        )
        .bind(task.id)
        .bind(&task.title)
        .bind(&task.status)
        .bind(&task.priority)
        .bind(task.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update_task_status(&self, id: Uuid, status: &str) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(
            "UPDATE tasks SET status = $1 WHERE id = $2
             RETURNING id, title, status, priority, created_at",
        )
        .bind(status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn delete_task(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
