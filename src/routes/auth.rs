use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use std::future::{ready, Ready};

use crate::models::MemberId;
use crate::routes::errors::JsonError;
use crate::routes::state::AppState;
use crate::services::AuthError;

/// Member id taken from a valid `Authorization: Bearer <jwt>` header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedMember(pub MemberId);

impl AuthenticatedMember {
    pub fn id(&self) -> MemberId {
        self.0
    }
}

fn bearer_token(req: &HttpRequest) -> Result<&str, AuthError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    match value.split_once(' ') {
        Some(("Bearer", token)) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(AuthError::MissingToken),
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedMember, JsonError> {
    let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| JsonError {
        error: "internal_error".to_string(),
        message: "application state not configured".to_string(),
        status_code: 500,
    })?;

    let token = bearer_token(req)?;
    let member_id = state.tokens.verify(token).inspect_err(|e| {
        tracing::info!(path = %req.path(), "Rejected bearer token: {}", e);
    })?;

    Ok(AuthenticatedMember(member_id))
}

impl FromRequest for AuthenticatedMember {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map_err(actix_web::Error::from))
    }
}
