//! Swipe Match - discovery and match detection for a swipe-based dating app
//!
//! Members are shown unseen candidates ranked by proximity. Each swipe updates the
//! target's attractiveness counters and reports a match once both members said YES.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{haversine_distance, Discovery, DiscoveryFilter, MatchDetector, SortBy};
pub use crate::error::{MatchError, Result};
pub use crate::models::{CandidateView, Member, MemberId, SwipeOutcome, SwipePreference, SwipeRecord};
pub use crate::services::{MatchStore, MemoryStore, PostgresStore, StoreError};
