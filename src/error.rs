use axum::response::{IntoResponse, Response};
use axum::{http::StatusCode, Json};
use serde_json::json;

#[derive(Debug, Clone, PartialEq)]
pub enum ProcedureError {
    Validation(&'static str),
    NotFound,
    Storage(String),
}

impl std::fmt::Display for ProcedureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcedureError::Validation(msg) => f.write_str(msg),
            ProcedureError::NotFound => f.write_str("Not found"),
            ProcedureError::Storage(msg) => f.write_str(msg),
        }
    }
}

impl IntoResponse for ProcedureError {
    fn into_response(self) -> Response {
        let status = match self {
            ProcedureError::Validation(_) => StatusCode::BAD_REQUEST,
            ProcedureError::NotFound => StatusCode::NOT_FOUND,
            ProcedureError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<rusqlite::Error> for ProcedureError {
    fn from(err: rusqlite::Error) -> Self {
        ProcedureError::Storage(err.to_string())
    }
}
