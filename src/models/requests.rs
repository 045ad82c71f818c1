use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::SortBy;
use crate::models::domain::{MemberId, SwipePreference};

/// Query parameters for discovery
///
/// `minAge`/`maxAge` of 0 and an empty `gender` mean "no filter".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoverParams {
    #[serde(default)]
    pub min_age: u32,
    #[serde(default)]
    pub max_age: u32,
    #[serde(default)]
    pub gender: String,
    pub limit: Option<usize>,
    #[serde(default)]
    pub sort_by: SortBy,
}

/// Request to record a swipe
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeRequest {
    pub swiped_id: MemberId,
    pub preference: SwipePreference,
}

/// Login request
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Signup request
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub gender: String,
    #[validate(range(max = 150))]
    pub age: u32,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}
