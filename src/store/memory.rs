use crate::error::AppError;
use crate::models::{Task, User, UserSummary};
use crate::store::Store;
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory [`Store`] with the same semantics as the Postgres backend:
/// unique emails, serial user ids, tasks ordered newest-first.
///
/// Backs the integration tests and is handy for running the server without a
/// database.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    tasks: Vec<StoredTask>,
    next_user_id: i32,
    next_seq: u64,
}

struct StoredTask {
    /// Insertion counter, used to break ties between equal timestamps so
    /// listing order stays deterministic.
    seq: u64,
    task: Task,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<User, AppError> {
        let mut inner = self.inner.write().await;

        if inner.users.iter().any(|u| u.email == email) {
            return Err(AppError::Conflict("Duplicate value".into()));
        }

        inner.next_user_id += 1;
        let user = User {
            id: inner.next_user_id,
            username: username.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            role: role.to_string(),
        };
        inner.users.push(user.clone());

        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn update_profile(
        &self,
        id: i32,
        username: &str,
        role: &str,
    ) -> Result<Option<UserSummary>, AppError> {
        let mut inner = self.inner.write().await;

        match inner.users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.username = username.to_string();
                user.role = role.to_string();
                Ok(Some(UserSummary::from(user.clone())))
            }
            None => Ok(None),
        }
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, AppError> {
        let inner = self.inner.read().await;

        let mut entries: Vec<&StoredTask> = inner.tasks.iter().collect();
        entries.sort_by(|a, b| {
            b.task
                .created_at
                .cmp(&a.task.created_at)
                .then(b.seq.cmp(&a.seq))
        });

        Ok(entries.into_iter().map(|t| t.task.clone()).collect())
    }

    async fn create_task(&self, task: Task) -> Result<Task, AppError> {
        let mut inner = self.inner.write().await;
        inner.next_seq += 1;
        let seq = inner.next_seq;
        inner.tasks.push(StoredTask {
            seq,
            task: task.clone(),
        });
        Ok(task)
    }

    async fn update_task_status(&self, id: Uuid, status: &str) -> Result<Option<Task>, AppError> {
        let mut inner = self.inner.write().await;

        match inner.tasks.iter_mut().find(|t| t.task.id == id) {
            Some(stored) => {
                stored.task.status = status.to_string();
                Ok(Some(stored.task.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_task(&self, id: Uuid) -> Result<bool, AppError> {
        let mut inner = self.inner.write().await;
        let before = inner.tasks.len();
        inner.tasks.retain(|t| t.task.id != id);
        Ok(inner.tasks.len() < before)
    }
}
