use crate::task::{Task, TaskService, TaskServiceError, TaskState, TaskWithOwner};
use crate::user::User;
use crate::web::api::v1::ErrorResponse;
use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// JSON representation of a Task with its owner as a bare identifier.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskJson {
    /// Unique identifier for the task
    id: u32,
    /// Free-form text content of the task
    text: String,
    /// Whether the task is completed
    completed: bool,
    /// Whether the task was created administratively
    add_by_admin: bool,
    /// Identifier of the owning user
    owner: u32,
}

impl From<Task> for TaskJson {
    fn from(task: Task) -> Self {
        Self {
            id: task.id(),
            text: task.text().to_string(),
            completed: task.completed(),
            add_by_admin: task.add_by_admin(),
            owner: task.owner_id(),
        }
    }
}

/// JSON representation of a User embedded in an expanded task.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserJson {
    /// Unique identifier for the user
    id: u32,
    /// Display name of the user
    name: String,
}

impl From<User> for UserJson {
    fn from(user: User) -> Self {
        Self {
            id: user.id(),
            name: user.name().to_string(),
        }
    }
}

/// JSON representation of a Task with its owner expanded to the full user record.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskWithOwnerJson {
    /// Unique identifier for the task
    id: u32,
    /// Free-form text content of the task
    text: String,
    /// Whether the task is completed
    completed: bool,
    /// Whether the task was created administratively
    add_by_admin: bool,
    /// The owning user record
    owner: UserJson,
}

impl From<TaskWithOwner> for TaskWithOwnerJson {
    fn from(task_with_owner: TaskWithOwner) -> Self {
        Self {
            id: task_with_owner.task().id(),
            text: task_with_owner.task().text().to_string(),
            completed: task_with_owner.task().completed(),
            add_by_admin: task_with_owner.task().add_by_admin(),
            owner: UserJson::from(task_with_owner.owner().clone()),
        }
    }
}

/// Request body for creating a task. Omitted flags default to `false`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Free-form text content of the task
    text: String,
    /// Whether the task starts out completed
    #[serde(default)]
    completed: bool,
    /// Whether the task was created administratively
    #[serde(default)]
    add_by_admin: bool,
    /// Identifier of the owning user; must exist
    owner_id: u32,
}

/// Request body for updating a task. Every mutable field is required: an
/// update replaces them wholesale, it never merges. The owner cannot be
/// changed through this operation.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    /// New text content of the task
    text: String,
    /// New completion flag
    completed: bool,
    /// New administrative flag
    add_by_admin: bool,
}

/// Acknowledgment returned after deleting a task.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteTaskResponse {
    /// Human-readable confirmation message
    message: String,
}

/// Maps a service error to an HTTP response. Not-found outcomes carry the
/// service's own message; anything else is logged and surfaced as an opaque
/// 500 so persistence faults never leak into response bodies.
fn error_response(err: TaskServiceError, context: &str) -> (StatusCode, Json<ErrorResponse>) {
    match err {
        TaskServiceError::OwnerNotFound(_) | TaskServiceError::TaskNotFound(_) => {
            (StatusCode::NOT_FOUND, Json(ErrorResponse::new(err.to_string())))
        }
        err => {
            tracing::error!("{}: {}", context, err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(context.to_string())),
            )
        }
    }
}

/// Handler for POST /api/v1/tasks - Creates a task for an existing owner.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    post,
    path = "/api/v1/tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = TaskJson),
        (status = 404, description = "Owner does not exist", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn create_task_handler(
    State(state): State<Arc<TaskState>>,
    Json(request): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskJson>), (StatusCode, Json<ErrorResponse>)> {
    let service = TaskService::new(&state.db);

    match service
        .create_task(
            request.text,
            request.completed,
            request.add_by_admin,
            request.owner_id,
        )
        .await
    {
        Ok(task) => Ok((StatusCode::CREATED, Json(TaskJson::from(task)))),
        Err(err) => Err(error_response(err, "Failed to create task")),
    }
}

/// Handler for GET /api/v1/tasks - Returns every task with its owner expanded.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/v1/tasks",
    responses(
        (status = 200, description = "Successfully retrieved tasks", body = [TaskWithOwnerJson]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn list_tasks_handler(
    State(state): State<Arc<TaskState>>,
) -> Result<Json<Vec<TaskWithOwnerJson>>, (StatusCode, Json<ErrorResponse>)> {
    let service = TaskService::new(&state.db);

    match service.get_all_tasks().await {
        Ok(tasks) => Ok(Json(
            tasks.into_iter().map(TaskWithOwnerJson::from).collect(),
        )),
        Err(err) => Err(error_response(err, "Failed to retrieve tasks")),
    }
}

/// Handler for GET /api/v1/tasks/{id} - Returns a single task with its owner expanded.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/v1/tasks/{id}",
    params(("id" = u32, Path, description = "Task identifier")),
    responses(
        (status = 200, description = "Successfully retrieved task", body = TaskWithOwnerJson),
        (status = 404, description = "Task does not exist", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn get_task_handler(
    State(state): State<Arc<TaskState>>,
    Path(id): Path<u32>,
) -> Result<Json<TaskWithOwnerJson>, (StatusCode, Json<ErrorResponse>)> {
    let service = TaskService::new(&state.db);

    match service.get_task_by_id(id).await {
        Ok(task) => Ok(Json(TaskWithOwnerJson::from(task))),
        Err(err) => Err(error_response(err, "Failed to retrieve task")),
    }
}

/// Handler for PUT /api/v1/tasks/{id} - Replaces the mutable fields of a task.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    put,
    path = "/api/v1/tasks/{id}",
    params(("id" = u32, Path, description = "Task identifier")),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Task updated", body = TaskJson),
        (status = 404, description = "Task does not exist", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn update_task_handler(
    State(state): State<Arc<TaskState>>,
    Path(id): Path<u32>,
    Json(request): Json<UpdateTaskRequest>,
) -> Result<Json<TaskJson>, (StatusCode, Json<ErrorResponse>)> {
    let service = TaskService::new(&state.db);

    match service
        .update_task(id, request.text, request.completed, request.add_by_admin)
        .await
    {
        Ok(task) => Ok(Json(TaskJson::from(task))),
        Err(err) => Err(error_response(err, "Failed to update task")),
    }
}

/// Handler for DELETE /api/v1/tasks/{id} - Removes a task.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    delete,
    path = "/api/v1/tasks/{id}",
    params(("id" = u32, Path, description = "Task identifier")),
    responses(
        (status = 200, description = "Task deleted", body = DeleteTaskResponse),
        (status = 404, description = "Task does not exist", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn delete_task_handler(
    State(state): State<Arc<TaskState>>,
    Path(id): Path<u32>,
) -> Result<Json<DeleteTaskResponse>, (StatusCode, Json<ErrorResponse>)> {
    let service = TaskService::new(&state.db);

    match service.delete_task_by_id(id).await {
        Ok(_) => Ok(Json(DeleteTaskResponse {
            message: "Task deleted successfully".to_string(),
        })),
        Err(err) => Err(error_response(err, "Failed to delete task")),
    }
}

/// Creates and returns the tasks API router.
pub fn create_task_router(state: Arc<TaskState>) -> Router {
    Router::new()
        .route("/tasks", get(list_tasks_handler).post(create_task_handler))
        .route(
            "/tasks/{id}",
            get(get_task_handler)
                .put(update_task_handler)
                .delete(delete_task_handler),
        )
        .with_state(state)
}
