//! Placeholder GraphQL endpoint.
//!
//! The schema exposes a single constant `hello` query; real fields arrive
//! once the client contract is settled.

use async_graphql::{EmptyMutation, EmptySubscription, Object, Schema};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{Router, extract::State, routing::post};

/// GraphQL schema type for the todo server.
pub type TodoSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// A static greeting.
    async fn hello(&self) -> &'static str {
        "Hello Hono!"
    }
}

/// Builds the GraphQL schema.
pub fn build_schema() -> TodoSchema {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription).finish()
}

/// GraphQL query handler.
#[tracing::instrument(skip(schema, req))]
pub async fn graphql_handler(
    State(schema): State<TodoSchema>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

/// Creates and returns the GraphQL router.
pub fn create_graphql_router() -> Router {
    Router::new()
        .route("/graphql", post(graphql_handler))
        .with_state(build_schema())
}
