use actix_web::{web, HttpResponse, Responder, ResponseError};
use validator::Validate;

use crate::error::MatchError;
use crate::models::{
    Credential, ErrorResponse, LoginRequest, LoginResponse, Member, RandomMemberResponse, SignupRequest,
};
use crate::routes::errors::{match_error_response, JsonError};
use crate::routes::state::AppState;
use crate::services::verify_credentials;

/// Configure signup and login routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/members", web::post().to(signup))
        .route("/members/random", web::post().to(create_random))
        .route("/login", web::post().to(login));
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new("Validation failed", errors.to_string(), 400))
}

/// Signup endpoint
///
/// POST /api/v1/members
async fn signup(state: web::Data<AppState>, req: web::Json<SignupRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for signup request: {:?}", errors);
        return validation_failed(errors);
    }

    let req = req.into_inner();
    let member = Member::new(
        req.email,
        Credential::new(req.password),
        req.name,
        req.gender,
        req.age,
        req.latitude,
        req.longitude,
    );

    match state.store.put_member(&member).await {
        Ok(()) => {
            tracing::info!(member_id = %member.id, "Member created");
            HttpResponse::Created().json(member)
        }
        Err(e) => {
            let err = MatchError::from(e);
            tracing::warn!("Failed to create member: {}", err);
            match_error_response("unable to create member", &err)
        }
    }
}

/// Random member endpoint, for seeding development environments
///
/// POST /api/v1/members/random
async fn create_random(state: web::Data<AppState>) -> impl Responder {
    let (member, password) = Member::random();

    match state.store.put_member(&member).await {
        Ok(()) => {
            tracing::info!(member_id = %member.id, "Random member created");
            HttpResponse::Created().json(RandomMemberResponse {
                result: member,
                password,
            })
        }
        Err(e) => {
            let err = MatchError::from(e);
            tracing::error!(member_id = %member.id, "Failed to store random member: {}", err);
            match_error_response("unable to create member", &err)
        }
    }
}

/// Login endpoint
///
/// POST /api/v1/login
async fn login(state: web::Data<AppState>, req: web::Json<LoginRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let issued = verify_credentials(state.store.as_ref(), &req.email, &req.password)
        .await
        .and_then(|member| state.tokens.issue(member.id));

    match issued {
        Ok(token) => HttpResponse::Ok().json(LoginResponse { token }),
        Err(e) => {
            tracing::info!("Login failed: {}", e);
            JsonError::from(e).error_response()
        }
    }
}
