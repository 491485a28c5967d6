use crate::{
    config::Config,
    error::AppError,
    models::{StatusUpdate, Task, TaskInput, TaskStatus},
    store::Store,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

/// Retrieves every task, ordered by creation time descending.
///
/// Tasks are not scoped to a user; the board is shared.
#[get("")]
pub async fn list_tasks(store: web::Data<dyn Store>) -> Result<impl Responder, AppError> {
    let tasks = store.list_tasks().await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task.
///
/// Status defaults to `TODO` and priority to `NO_PRIORITY`; the creation
/// timestamp is set once here and never changes.
#[post("")]
pub async fn create_task(
    store: web::Data<dyn Store>,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = store.create_task(Task::new(task_data.into_inner())).await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Overwrites a task's status field.
///
/// By default any string is accepted, matching the board's historical
/// behavior. With `STRICT_STATUS` enabled, values outside the four known
/// statuses are rejected with 400. An unknown id is 404.
#[put("/{id}/status")]
pub async fn update_status(
    store: web::Data<dyn Store>,
    config: web::Data<Config>,
    task_id: web::Path<Uuid>,
    update: web::Json<StatusUpdate>,
) -> Result<impl Responder, AppError> {
    if config.strict_status && !TaskStatus::is_known(&update.status) {
        return Err(AppError::BadRequest(format!(
            "Unknown status: {}",
            update.status
        )));
    }

    match store
        .update_task_status(task_id.into_inner(), &update.status)
        .await?
    {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => Err(AppError::NotFound("Task not found".into())),
    }
}

/// Deletes a task by its ID.
#[delete("/{id}")]
pub async fn delete_task(
    store: web::Data<dyn Store>,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    if store.delete_task(task_id.into_inner()).await? {
        Ok(HttpResponse::Ok().json(json!({ "success": true })))
    } else {
        Err(AppError::NotFound("Task not found".into()))
    }
}
