use axum::{extract::{Path, State}, routing::{post, put}, Router, Json};
use axum::http::StatusCode;

use crate::{
    application::task_service::TaskService,
    domain::task::{CreateTask, DeleteConfirmation, Task, TaskId, UpdateTask},
    http::types::ApiError,
};

#[derive(Clone)]
pub struct AppState<S: TaskService> { pub service: S }

pub fn router<S: TaskService + Clone + Send + Sync + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/tasks", post(create_task::<S>).get(list_tasks::<S>))
        .route("/tasks/:id", put(update_task::<S>).delete(delete_task::<S>))
        .with_state(state)
}

async fn list_tasks<S: TaskService>(State(state): State<AppState<S>>) -> Result<Json<Vec<Task>>, ApiError> {
    Ok(Json(state.service.list().await?))
}

async fn create_task<S: TaskService>(State(state): State<AppState<S>>, Json(payload): Json<CreateTask>) -> Result<(StatusCode, Json<Task>), ApiError> {
    let task = state.service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

// No existence check: a missing id answers 200 with a `null` body.
async fn update_task<S: TaskService>(State(state): State<AppState<S>>, Path(id): Path<i64>, Json(payload): Json<UpdateTask>) -> Result<Json<Option<Task>>, ApiError> {
    Ok(Json(state.service.update(TaskId(id), payload).await?))
}

async fn delete_task<S: TaskService>(State(state): State<AppState<S>>, Path(id): Path<i64>) -> Result<Json<DeleteConfirmation>, ApiError> {
    state.service.delete(TaskId(id)).await?;
    Ok(Json(DeleteConfirmation::deleted()))
}
