use axum::extract::State;
use axum::{http::StatusCode, Json};
use tracing::info;

use crate::error::ProcedureError;
use crate::models::{
    AddTodoRequest, DeleteTodoRequest, DeletedTodo, MarkTodoAsDoneRequest, Todo, UpdateTodoRequest,
};
use crate::procedures;
use crate::AppState;

pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, ProcedureError> {
    let todos = procedures::list_todos(&state.db)?;
    info!(count = todos.len(), "Listed todos");
    Ok(Json(todos))
}

pub async fn add_todo(
    State(state): State<AppState>,
    Json(req): Json<AddTodoRequest>,
) -> Result<(StatusCode, Json<Todo>), ProcedureError> {
    let todo = procedures::add_todo(&state.db, &req)?;
    info!(id = %todo.id, task = %todo.task, "Added todo");
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn update_todo(
    State(state): State<AppState>,
    Json(req): Json<UpdateTodoRequest>,
) -> Result<Json<Todo>, ProcedureError> {
    let todo = procedures::update_todo(&state.db, &req)?;
    info!(id = %todo.id, "Updated todo");
    Ok(Json(todo))
}

pub async fn mark_todo_as_done(
    State(state): State<AppState>,
    Json(req): Json<MarkTodoAsDoneRequest>,
) -> Result<Json<Todo>, ProcedureError> {
    let todo = procedures::mark_todo_as_done(&state.db, &req)?;
    info!(id = %todo.id, is_done = todo.is_done, "Toggled todo");
    Ok(Json(todo))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    Json(req): Json<DeleteTodoRequest>,
) -> Result<Json<DeletedTodo>, ProcedureError> {
    let deleted = procedures::delete_todo(&state.db, &req)?;
    info!(id = %deleted.id, "Deleted todo");
    Ok(Json(deleted))
}
