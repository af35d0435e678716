use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures from registration, login and session handling.
/// Every variant renders as `{ "success": false, "message": ... }`.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Valid email is required")]
    InvalidEmail,

    #[error("Password must be at least 6 characters")]
    WeakPassword,

    #[error("User with this email already exists")]
    DuplicateUser,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid request body")]
    MalformedBody(#[from] JsonRejection),

    #[error("Session error")]
    Session(#[from] tower_sessions::session::Error),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::InvalidEmail
            | AuthError::WeakPassword
            | AuthError::DuplicateUser
            | AuthError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        if let AuthError::Session(e) = &self {
            tracing::error!(error = %e, "session store failure");
        }
        let body = Json(json!({
            "success": false,
            "message": self.to_string(),
        }));
        (self.status(), body).into_response()
    }
}

pub const ANALYSIS_SUGGESTION: &str = "Please check if the file is a valid CSV format";

/// Failures while reading an uploaded analysis request.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("missing multipart field `{0}`")]
    MissingField(&'static str),

    #[error("{0}")]
    Rejected(#[from] MultipartRejection),

    #[error("{0}")]
    Multipart(#[from] MultipartError),
}

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "analysis request rejected");
        let body = Json(json!({
            "error": true,
            "message": format!("Failed to analyze file: {self}"),
            "suggestion": ANALYSIS_SUGGESTION,
        }));
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}
