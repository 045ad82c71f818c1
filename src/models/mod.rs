// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{CandidateQuery, CandidateView, Credential, Member, MemberId, SwipeOutcome, SwipePreference, SwipeRecord};
pub use requests::{DiscoverParams, LoginRequest, SignupRequest, SwipeRequest};
pub use responses::{DiscoverResponse, ErrorResponse, HealthResponse, LoginResponse, RandomMemberResponse, SwipeResponse};
