// Route exports
pub mod auth;
pub mod errors;
pub mod matches;
pub mod members;
pub mod state;

pub use auth::AuthenticatedMember;
pub use errors::{handle_json_payload_error, handle_query_payload_error, JsonError};
pub use state::AppState;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(members::configure)
            .configure(matches::configure),
    );
}
