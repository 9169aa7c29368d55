use crate::todo::{Todo, TodoService, TodoServiceError};
use crate::web::api::ServerErrorResponse;
use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// Shared state for the todo routes.
#[derive(Clone)]
pub struct TodoState {
    pub db: Arc<DatabaseConnection>,
}

/// JSON representation of a Todo for API responses.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TodoJson {
    /// Unique identifier for the todo
    id: i32,
    /// The todo's title
    title: String,
    /// The todo's status; null until set by an update
    status: Option<String>,
}

impl From<Todo> for TodoJson {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id(),
            title: todo.title().to_string(),
            status: todo.status().map(str::to_string),
        }
    }
}

/// Request body for creating a todo.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTodoRequest {
    /// Title of the new todo
    title: String,
}

/// Request body for updating a todo. Both fields are overwritten.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTodoRequest {
    /// New title for the todo
    title: String,
    /// New status for the todo
    status: String,
}

/// API response for update and delete operations.
#[derive(Debug, Serialize, ToSchema)]
pub struct MutationResponse {
    /// Number of rows the mutation matched; 0 means the id did not exist
    affected: u64,
}

/// Error type for todo handler operations.
#[derive(Debug, thiserror::Error)]
pub enum TodoApiError {
    /// The path segment could not be parsed as an integer identifier.
    #[error("invalid ID")]
    InvalidId,
    /// Represents a todo service error.
    #[error("Todo service error")]
    Service(#[from] TodoServiceError),
}

impl axum::response::IntoResponse for TodoApiError {
    fn into_response(self) -> axum::response::Response {
        let (status_code, user_facing_error_message) = match self {
            TodoApiError::InvalidId => (StatusCode::BAD_REQUEST, "invalid ID".to_string()),
            TodoApiError::Service(err) => {
                tracing::error!("Todo service error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred while processing your request. Please try again later."
                        .to_string(),
                )
            }
        };
        (
            status_code,
            Json(ServerErrorResponse::new(user_facing_error_message)),
        )
            .into_response()
    }
}

/// Parses a path segment as a base-10 integer identifier.
///
/// Mirrors `parseInt` semantics: surrounding whitespace is ignored, an
/// optional sign is accepted, and trailing non-digit characters are discarded
/// (`"12abc"` parses to 12). A segment with no leading digit, or one whose
/// digits overflow `i32`, yields `None`.
fn parse_todo_id(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digit_count = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digit_count == 0 {
        return None;
    }
    let value = rest[..digit_count].parse::<i32>().ok()?;
    Some(if negative { -value } else { value })
}

/// Handler for GET /todos - Returns all todos in JSON format.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/todos",
    responses(
        (status = 200, description = "Successfully retrieved todos", body = [TodoJson]),
        (status = 500, description = "Internal server error", body = ServerErrorResponse)
    ),
    tag = "Todos"
)]
pub async fn get_todos_handler(
    State(state): State<Arc<TodoState>>,
) -> Result<Json<Vec<TodoJson>>, TodoApiError> {
    let service = TodoService::new(&state.db);
    let todos = service.get_all_todos().await?;
    Ok(Json(todos.into_iter().map(TodoJson::from).collect()))
}

/// Handler for POST /todos - Creates a todo and returns it.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    post,
    path = "/todos",
    request_body = CreateTodoRequest,
    responses(
        (status = 200, description = "Successfully created todo", body = TodoJson),
        (status = 500, description = "Internal server error", body = ServerErrorResponse)
    ),
    tag = "Todos"
)]
pub async fn create_todo_handler(
    State(state): State<Arc<TodoState>>,
    Json(request): Json<CreateTodoRequest>,
) -> Result<Json<TodoJson>, TodoApiError> {
    let service = TodoService::new(&state.db);
    let created = service.create_todo(request.title).await?;
    Ok(Json(TodoJson::from(created)))
}

/// Handler for PUT /todos/{id} - Overwrites a todo's title and status.
///
/// A nonexistent id is not an error; the response reports zero affected rows.
/// The body is deserialized before the identifier is parsed, so a malformed
/// body wins over an invalid id and yields axum's `Json` rejection.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    put,
    path = "/todos/{id}",
    params(
        ("id" = String, Path, description = "Identifier of the todo to update")
    ),
    request_body = UpdateTodoRequest,
    responses(
        (status = 200, description = "Update applied", body = MutationResponse),
        (status = 400, description = "Invalid identifier", body = ServerErrorResponse),
        (status = 500, description = "Internal server error", body = ServerErrorResponse)
    ),
    tag = "Todos"
)]
pub async fn update_todo_handler(
    State(state): State<Arc<TodoState>>,
    Path(id): Path<String>,
    Json(request): Json<UpdateTodoRequest>,
) -> Result<Json<MutationResponse>, TodoApiError> {
    let id = parse_todo_id(&id).ok_or(TodoApiError::InvalidId)?;
    let service = TodoService::new(&state.db);
    let affected = service
        .update_todo_by_id(id, request.title, request.status)
        .await?;
    Ok(Json(MutationResponse { affected }))
}

/// Handler for DELETE /todos/{id} - Removes a todo.
///
/// Same no-op semantics as update when the id does not exist.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    delete,
    path = "/todos/{id}",
    params(
        ("id" = String, Path, description = "Identifier of the todo to delete")
    ),
    responses(
        (status = 200, description = "Delete applied", body = MutationResponse),
        (status = 400, description = "Invalid identifier", body = ServerErrorResponse),
        (status = 500, description = "Internal server error", body = ServerErrorResponse)
    ),
    tag = "Todos"
)]
pub async fn delete_todo_handler(
    State(state): State<Arc<TodoState>>,
    Path(id): Path<String>,
) -> Result<Json<MutationResponse>, TodoApiError> {
    let id = parse_todo_id(&id).ok_or(TodoApiError::InvalidId)?;
    let service = TodoService::new(&state.db);
    let affected = service.delete_todo_by_id(id).await?;
    Ok(Json(MutationResponse { affected }))
}

/// Creates and returns the todos router.
pub fn create_todo_router(state: TodoState) -> Router {
    Router::new()
        .route("/todos", get(get_todos_handler).post(create_todo_handler))
        .route(
            "/todos/{id}",
            put(update_todo_handler).delete(delete_todo_handler),
        )
        .with_state(Arc::new(state))
}
