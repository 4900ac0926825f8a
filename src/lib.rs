pub mod client;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod procedures;

use axum::{
    routing::{get, post},
    Router,
};
use db::DbPool;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/rpc/listTodos", get(handlers::rpc::list_todos))
        .route("/rpc/addTodo", post(handlers::rpc::add_todo))
        .route("/rpc/updateTodo", post(handlers::rpc::update_todo))
        .route("/rpc/markTodoAsDone", post(handlers::rpc::mark_todo_as_done))
        .route("/rpc/deleteTodo", post(handlers::rpc::delete_todo))
        .layer(
            tower::ServiceBuilder::new()
                .layer(tower_http::trace::TraceLayer::new_for_http())
                .layer(tower_http::compression::CompressionLayer::new()),
        )
        .with_state(state)
}
