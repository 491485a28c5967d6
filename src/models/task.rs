use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Status assigned to tasks created without one.
pub const DEFAULT_STATUS: &str = "TODO";

/// Sentinel priority for tasks created without one.
pub const DEFAULT_PRIORITY: &str = "NO_PRIORITY";

/// The four statuses the board understands.
///
/// Stored statuses are plain strings: the status-update route accepts
/// arbitrary values by default, and this enumeration is only consulted when
/// strict checking is enabled (see `Config::strict_status`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Backlog,
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Backlog,
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Backlog => "BACKLOG",
            TaskStatus::Todo => "TODO",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Done => "DONE",
        }
    }

    /// Whether `value` is one of the four known status strings.
    pub fn is_known(value: &str) -> bool {
        Self::ALL.iter().any(|s| s.as_str() == value)
    }
}

/// Input structure for creating a task.
///
/// Status and priority are optional; creation falls back to the
/// `TODO`/`NO_PRIORITY` defaults.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(max = 50))]
    pub status: Option<String>,

    #[validate(length(max = 50))]
    pub priority: Option<String>,
}

/// Payload for `PUT /api/tasks/{id}/status`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

/// A task as stored and as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub status: String,
    pub priority: String,
    /// Set once at creation; the sole sort key for listings (descending).
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new `Task` from `TaskInput`, applying the status/priority
    /// defaults and stamping `created_at` with the current time.
    pub fn new(input: TaskInput) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            status: input.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            priority: input
                .priority
                .unwrap_or_else(|| DEFAULT_PRIORITY.to_string()),
            created_at: Utc::now(),
        }
    }
}
