use std::sync::Arc;

use crate::task::TaskState;

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod v1;

/// OpenAPI documentation for the JSON API.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::task::api::v1::create_task_handler,
        crate::task::api::v1::list_tasks_handler,
        crate::task::api::v1::get_task_handler,
        crate::task::api::v1::update_task_handler,
        crate::task::api::v1::delete_task_handler,
    ),
    tags(
        (name = "Tasks", description = "Task management endpoints")
    )
)]
struct ApiDoc;

/// Creates the API routes for JSON API endpoints.
pub fn create_api_router(task_state: Arc<TaskState>) -> axum::Router {
    let tasks_router = crate::task::api::v1::create_task_router(task_state);
    Router::new()
        .nest("/api/v1", tasks_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
