use axum::{Router, response::Json, routing::get};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::graphql::create_graphql_router;
use crate::todo::api::{
    CreateTodoRequest, MutationResponse, TodoJson, UpdateTodoRequest,
};
use crate::todo::{TodoState, create_todo_router};

/// JSON body returned for error responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct ServerErrorResponse {
    /// Human-readable description of the failure
    error: String,
}

impl ServerErrorResponse {
    pub fn new(error: String) -> Self {
        Self { error }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::todo::api::get_todos_handler,
        crate::todo::api::create_todo_handler,
        crate::todo::api::update_todo_handler,
        crate::todo::api::delete_todo_handler,
    ),
    components(schemas(
        TodoJson,
        CreateTodoRequest,
        UpdateTodoRequest,
        MutationResponse,
        ServerErrorResponse
    )),
    tags((name = "Todos", description = "CRUD operations over the todo entity"))
)]
struct ApiDoc;

/// Handler for GET /api-docs/openapi.json - Serves the OpenAPI document.
#[tracing::instrument]
pub async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Creates the API routes for JSON API endpoints.
pub fn create_api_router(todo_state: TodoState) -> Router {
    let todos_router = create_todo_router(todo_state);
    let graphql_router = create_graphql_router();
    Router::new()
        .merge(todos_router)
        .merge(graphql_router)
        .route("/api-docs/openapi.json", get(openapi_handler))
}
