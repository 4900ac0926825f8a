//! Client-side data synchronization: a single-entry query cache over
//! `listTodos`, refetch orchestration after mutations, and the per-dialog
//! visibility state machine that guards duplicate submissions.

use crate::db::DbPool;
use crate::error::ProcedureError;
use crate::models::{
    AddTodoRequest, DeleteTodoRequest, DeletedTodo, MarkTodoAsDoneRequest, Todo, UpdateTodoRequest,
};
use crate::procedures;

/// The five remote operations as seen from the client. Calls suspend at the
/// await boundary only; the caller keeps rendering while a call is in flight.
pub trait Procedures {
    async fn list_todos(&self) -> Result<Vec<Todo>, ProcedureError>;
    async fn add_todo(&self, req: &AddTodoRequest) -> Result<Todo, ProcedureError>;
    async fn update_todo(&self, req: &UpdateTodoRequest) -> Result<Todo, ProcedureError>;
    async fn mark_todo_as_done(&self, req: &MarkTodoAsDoneRequest)
        -> Result<Todo, ProcedureError>;
    async fn delete_todo(&self, req: &DeleteTodoRequest) -> Result<DeletedTodo, ProcedureError>;
}

/// In-process implementation dispatching straight to the procedure layer.
#[derive(Clone)]
pub struct LocalProcedures {
    pub db: DbPool,
}

impl Procedures for LocalProcedures {
    async fn list_todos(&self) -> Result<Vec<Todo>, ProcedureError> {
        procedures::list_todos(&self.db)
    }

    async fn add_todo(&self, req: &AddTodoRequest) -> Result<Todo, ProcedureError> {
        procedures::add_todo(&self.db, req)
    }

    async fn update_todo(&self, req: &UpdateTodoRequest) -> Result<Todo, ProcedureError> {
        procedures::update_todo(&self.db, req)
    }

    async fn mark_todo_as_done(
        &self,
        req: &MarkTodoAsDoneRequest,
    ) -> Result<Todo, ProcedureError> {
        procedures::mark_todo_as_done(&self.db, req)
    }

    async fn delete_todo(&self, req: &DeleteTodoRequest) -> Result<DeletedTodo, ProcedureError> {
        procedures::delete_todo(&self.db, req)
    }
}

/// Cached result of the `listTodos` query. The query takes no arguments, so
/// there is exactly one cache entry. A failed fetch shows no partial list.
#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
    Loading,
    Ready(Vec<Todo>),
    Failed(ProcedureError),
}

/// Visibility state machine for one dialog instance. Every rendered row owns
/// its own `Dialog` values, one per dialog type; the flag is never shared
/// across sibling rows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Dialog {
    #[default]
    Closed,
    Open {
        error: Option<ProcedureError>,
    },
    Submitting,
}

impl Dialog {
    /// Local action with no side effect.
    pub fn open(&mut self) {
        if matches!(self, Dialog::Closed) {
            *self = Dialog::Open { error: None };
        }
    }

    /// Cancel from `Open` discards unsaved input and any inline error.
    /// Ignored while a submission is in flight.
    pub fn close(&mut self) {
        if matches!(self, Dialog::Open { .. }) {
            *self = Dialog::Closed;
        }
    }

    /// Busy flag: a mutation may only be issued from `Open`, and a second
    /// submission is refused while one is in flight.
    fn begin_submit(&mut self) -> bool {
        if matches!(self, Dialog::Open { .. }) {
            *self = Dialog::Submitting;
            true
        } else {
            false
        }
    }

    fn finish(&mut self) {
        *self = Dialog::Closed;
    }

    fn reject(&mut self, error: ProcedureError) {
        *self = Dialog::Open { error: Some(error) };
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, Dialog::Submitting)
    }

    pub fn error(&self) -> Option<&ProcedureError> {
        match self {
            Dialog::Open { error } => error.as_ref(),
            _ => None,
        }
    }
}

/// Owns the list cache and drives the mutate-then-refetch cycle: a successful
/// mutation closes its dialog and replaces the cached list wholesale; a failed
/// one leaves the cache untouched and surfaces the error in the open dialog.
pub struct SyncClient<P: Procedures> {
    procedures: P,
    list: ListState,
}

impl<P: Procedures> SyncClient<P> {
    pub fn new(procedures: P) -> Self {
        SyncClient {
            procedures,
            list: ListState::Loading,
        }
    }

    pub fn todos(&self) -> &ListState {
        &self.list
    }

    /// Fetches `listTodos` and replaces the cached value. No merge, no
    /// optimistic patch; a failure puts the whole view into `Failed`.
    pub async fn refresh(&mut self) {
        self.list = match self.procedures.list_todos().await {
            Ok(todos) => ListState::Ready(todos),
            Err(err) => ListState::Failed(err),
        };
    }

    pub async fn submit_add(&mut self, dialog: &mut Dialog, req: AddTodoRequest) -> bool {
        if !dialog.begin_submit() {
            return false;
        }
        let result = self.procedures.add_todo(&req).await.map(|_| ());
        self.settle(dialog, result).await
    }

    pub async fn submit_update(&mut self, dialog: &mut Dialog, req: UpdateTodoRequest) -> bool {
        if !dialog.begin_submit() {
            return false;
        }
        let result = self.procedures.update_todo(&req).await.map(|_| ());
        self.settle(dialog, result).await
    }

    pub async fn submit_mark_done(
        &mut self,
        dialog: &mut Dialog,
        req: MarkTodoAsDoneRequest,
    ) -> bool {
        if !dialog.begin_submit() {
            return false;
        }
        let result = self.procedures.mark_todo_as_done(&req).await.map(|_| ());
        self.settle(dialog, result).await
    }

    pub async fn submit_delete(&mut self, dialog: &mut Dialog, req: DeleteTodoRequest) -> bool {
        if !dialog.begin_submit() {
            return false;
        }
        let result = self.procedures.delete_todo(&req).await.map(|_| ());
        self.settle(dialog, result).await
    }

    async fn settle(&mut self, dialog: &mut Dialog, result: Result<(), ProcedureError>) -> bool {
        match result {
            Ok(()) => {
                dialog.finish();
                self.refresh().await;
                true
            }
            Err(err) => {
                dialog.reject(err);
                false
            }
        }
    }
}
