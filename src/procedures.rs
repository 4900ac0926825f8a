//! The typed procedure layer: one query plus four mutations, each validating
//! its input before touching storage. Every operation is a single-record
//! read/replace; there is no batching and no partial-field diffing.

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::db::{self, DbPool};
use crate::error::ProcedureError;
use crate::models::{
    AddTodoRequest, DeleteTodoRequest, DeletedTodo, MarkTodoAsDoneRequest, Todo, UpdateTodoRequest,
};

pub fn list_todos(pool: &DbPool) -> Result<Vec<Todo>, ProcedureError> {
    db::list_todos(pool)
}

pub fn add_todo(pool: &DbPool, req: &AddTodoRequest) -> Result<Todo, ProcedureError> {
    let due_date = validate(&req.task, &req.due_date)?;
    db::create_todo(pool, req.task.trim(), due_date)
}

pub fn update_todo(pool: &DbPool, req: &UpdateTodoRequest) -> Result<Todo, ProcedureError> {
    let due_date = validate(&req.task, &req.due_date)?;
    db::update_todo(pool, &req.id, req.task.trim(), due_date)?.ok_or(ProcedureError::NotFound)
}

pub fn mark_todo_as_done(
    pool: &DbPool,
    req: &MarkTodoAsDoneRequest,
) -> Result<Todo, ProcedureError> {
    db::set_todo_done(pool, &req.id, req.is_done)?.ok_or(ProcedureError::NotFound)
}

/// Hard delete. A repeated delete of an already-gone id fails with `NotFound`
/// rather than silently succeeding.
pub fn delete_todo(pool: &DbPool, req: &DeleteTodoRequest) -> Result<DeletedTodo, ProcedureError> {
    if db::delete_todo(pool, &req.id)? {
        Ok(DeletedTodo { id: req.id.clone() })
    } else {
        Err(ProcedureError::NotFound)
    }
}

fn validate(task: &str, due_date: &str) -> Result<OffsetDateTime, ProcedureError> {
    if task.trim().is_empty() {
        return Err(ProcedureError::Validation("Task cannot be empty"));
    }

    OffsetDateTime::parse(due_date, &Rfc3339)
        .map_err(|_| ProcedureError::Validation("Due date is not a valid timestamp"))
}
