use actix_web::{error, http::StatusCode, HttpRequest, HttpResponse};

use crate::error::MatchError;
use crate::models::ErrorResponse;
use crate::services::AuthError;

/// JSON error body usable as an actix error
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(
            self.error.clone(),
            self.message.clone(),
            self.status_code,
        ))
    }
}

impl From<AuthError> for JsonError {
    fn from(err: AuthError) -> Self {
        let status = auth_status(&err);
        let message = match &err {
            AuthError::MissingToken => "Missing or malformed JWT",
            AuthError::InvalidToken(_) => "Invalid or expired JWT",
            AuthError::InvalidCredentials => "Invalid credentials",
            AuthError::Issue(_) => "unable to issue token",
            AuthError::Store(_) => "temporarily unavailable, retry later",
        };

        JsonError {
            error: "unauthorized".to_string(),
            message: message.to_string(),
            status_code: status.as_u16(),
        }
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Query error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

pub fn match_status(err: &MatchError) -> StatusCode {
    match err {
        MatchError::Invalid(_) => StatusCode::BAD_REQUEST,
        MatchError::NotFound { .. } => StatusCode::NOT_FOUND,
        MatchError::Conflict(_) => StatusCode::CONFLICT,
        MatchError::Transient(_) | MatchError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
        MatchError::Inconsistent(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn auth_status(err: &AuthError) -> StatusCode {
    match err {
        AuthError::MissingToken => StatusCode::BAD_REQUEST,
        AuthError::InvalidToken(_) | AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AuthError::Issue(_) => StatusCode::INTERNAL_SERVER_ERROR,
        AuthError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Opaque error response: `operation` names what failed, the reason carries no store detail
pub fn match_error_response(operation: &str, err: &MatchError) -> HttpResponse {
    let status = match_status(err);
    HttpResponse::build(status).json(ErrorResponse::new(
        operation,
        err.public_reason(),
        status.as_u16(),
    ))
}
