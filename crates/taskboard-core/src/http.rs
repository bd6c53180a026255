use std::sync::Arc;

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use taskboard_shared::{TaskDto, TaskStatus};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, instrument, warn};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use crate::datastore::DataStore;
use crate::service::{
    CreateTaskRequest, ListQuery, ServiceError, TaskService, UpdateTaskRequest,
};

/// Body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub message: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, list_items, create_item, get_item, update_item, delete_item),
    components(schemas(
        TaskDto,
        TaskStatus,
        CreateTaskRequest,
        UpdateTaskRequest,
        ErrorBody,
        HealthResponse
    )),
    info(
        title = "Task Manager API",
        description = "CRUD over the task list behind the task board"
    )
)]
pub struct ApiDoc;

pub type SharedService = Arc<TaskService>;

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::InvalidStatus(_) => StatusCode::BAD_REQUEST,
            ServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::Storage(err) => {
                error!(error = %format!("{err:#}"), "storage failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let detail = match &self {
            ServiceError::Storage(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}

impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(status = %rejection.status(), "rejected request body");
        ServiceError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ServiceError {
    fn from(rejection: QueryRejection) -> Self {
        warn!(status = %rejection.status(), "rejected query string");
        ServiceError::Validation(rejection.body_text())
    }
}

pub fn router(service: SharedService) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/items", get(list_items).post(create_item))
        .route(
            "/items/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

pub async fn serve(store: DataStore, bind: &str) -> anyhow::Result<()> {
    let service = Arc::new(TaskService::new(store));
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    let local_addr = listener
        .local_addr()
        .context("failed to read listener address")?;
    info!(addr = %local_addr, "task API listening");

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("task API server failed")
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for ctrl-c; shutting down");
        return;
    }
    info!("received ctrl-c, shutting down");
}

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "API is up", body = HealthResponse))
)]
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "Task Manager API is running".to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/items",
    params(ListQuery),
    responses(
        (status = 200, description = "Tasks in insertion order", body = Vec<TaskDto>),
        (status = 400, description = "Unknown status value", body = ErrorBody),
        (status = 422, description = "Malformed or out-of-range query", body = ErrorBody)
    )
)]
#[instrument(skip_all)]
async fn list_items(
    State(service): State<SharedService>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<TaskDto>>, ServiceError> {
    let Query(query) = query?;
    info!(status = ?query.status, priority = ?query.priority, skip = ?query.skip, limit = ?query.limit, "list items invoked");
    let result = service.list(query);
    if let Err(err) = result.as_ref() {
        error!(error = %err, "list items failed");
    }
    result.map(Json)
}

#[utoipa::path(
    post,
    path = "/items",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = TaskDto),
        (status = 400, description = "Unknown status value", body = ErrorBody),
        (status = 422, description = "Invalid task fields", body = ErrorBody)
    )
)]
#[instrument(skip_all)]
async fn create_item(
    State(service): State<SharedService>,
    request: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskDto>), ServiceError> {
    let Json(request) = request?;
    info!(title_len = request.title.len(), has_due = request.due_date.is_some(), "create item invoked");
    let result = service.create(request);
    if let Err(err) = result.as_ref() {
        error!(error = %err, "create item failed");
    }
    result.map(|task| (StatusCode::CREATED, Json(task)))
}

#[utoipa::path(
    get,
    path = "/items/{id}",
    params(("id" = String, Path, description = "Task id")),
    responses(
        (status = 200, description = "The task", body = TaskDto),
        (status = 404, description = "No such task", body = ErrorBody)
    )
)]
#[instrument(skip(service))]
async fn get_item(
    State(service): State<SharedService>,
    Path(id): Path<String>,
) -> Result<Json<TaskDto>, ServiceError> {
    service.get(&id).map(Json)
}

#[utoipa::path(
    put,
    path = "/items/{id}",
    params(("id" = String, Path, description = "Task id")),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Updated task", body = TaskDto),
        (status = 400, description = "Unknown status value", body = ErrorBody),
        (status = 404, description = "No such task", body = ErrorBody),
        (status = 422, description = "Invalid task fields", body = ErrorBody)
    )
)]
#[instrument(skip(service, request))]
async fn update_item(
    State(service): State<SharedService>,
    Path(id): Path<String>,
    request: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Json<TaskDto>, ServiceError> {
    let Json(request) = request?;
    info!("update item invoked");
    let result = service.update(&id, request);
    if let Err(err) = result.as_ref() {
        error!(error = %err, "update item failed");
    }
    result.map(Json)
}

#[utoipa::path(
    delete,
    path = "/items/{id}",
    params(("id" = String, Path, description = "Task id")),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 404, description = "No such task", body = ErrorBody)
    )
)]
#[instrument(skip(service))]
async fn delete_item(
    State(service): State<SharedService>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    info!("delete item invoked");
    let result = service.delete(&id);
    if let Err(err) = result.as_ref() {
        error!(error = %err, "delete item failed");
    }
    result.map(|()| StatusCode::NO_CONTENT)
}
