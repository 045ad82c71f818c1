use chrono::{DateTime, Utc};
use rand::distributions::{Alphanumeric, DistString};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::core::attractiveness::{self, NEUTRAL_SCORE};

/// Member identifier (UUIDv7, time-sortable)
pub type MemberId = Uuid;

/// Opaque credential secret, compared verbatim and never printed
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }

    /// Raw secret, for storage adapters only
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

const RANDOM_NAMES: &[&str] = &[
    "Alex", "Jordan", "Taylor", "Morgan", "Casey", "Riley", "Quinn", "Avery",
    "Blake", "Carter", "Dakota", "Emerson", "Finley", "Hayden", "Kai", "Luna",
    "Milo", "Nova", "Phoenix", "River", "Sage", "Skyler", "Willow", "Zion",
];

const RANDOM_GENDERS: &[&str] = &["Male", "Female"];

/// Member record with location data and the received-swipe counters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: MemberId,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: Credential,
    pub name: String,
    pub gender: String,
    pub age: u32,
    pub latitude: f64,
    pub longitude: f64,
    pub yes_swipes_received: u64,
    pub total_swipes_received: u64,
    pub attractiveness_score: f64,
    /// Bumped on every counter write, used for optimistic concurrency
    #[serde(skip)]
    pub version: i64,
    pub created_at: DateTime<Utc>,
}

impl Member {
    pub fn new(
        email: impl Into<String>,
        password: Credential,
        name: impl Into<String>,
        gender: impl Into<String>,
        age: u32,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            email: email.into(),
            password,
            name: name.into(),
            gender: gender.into(),
            age,
            latitude,
            longitude,
            yes_swipes_received: 0,
            total_swipes_received: 0,
            attractiveness_score: NEUTRAL_SCORE,
            version: 0,
            created_at: Utc::now(),
        }
    }

    /// Member with a random identity, an age between 18 and 79 and a uniformly
    /// random position. Returns the generated password alongside.
    pub fn random() -> (Self, String) {
        let mut rng = rand::thread_rng();

        let name = RANDOM_NAMES[rng.gen_range(0..RANDOM_NAMES.len())];
        let gender = RANDOM_GENDERS[rng.gen_range(0..RANDOM_GENDERS.len())];
        let suffix = Alphanumeric.sample_string(&mut rng, 10).to_lowercase();
        let password = Alphanumeric.sample_string(&mut rng, 16);

        let member = Self::new(
            format!("{}.{}@example.com", name.to_lowercase(), suffix),
            Credential::new(password.clone()),
            name,
            gender,
            rng.gen_range(18..=79),
            rng.gen_range(-90.0..=90.0),
            rng.gen_range(-180.0..=180.0),
        );

        (member, password)
    }

    /// Copy of this member with one more received swipe folded into the counters
    pub fn with_received_swipe(&self, preference: SwipePreference) -> Self {
        let (yes, total, score) = attractiveness::record_swipe(
            self.yes_swipes_received,
            self.total_swipes_received,
            preference,
        );

        Self {
            yes_swipes_received: yes,
            total_swipes_received: total,
            attractiveness_score: score,
            ..self.clone()
        }
    }
}

/// Direction of a swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwipePreference {
    #[serde(rename = "YES")]
    Positive,
    #[serde(rename = "NO")]
    Negative,
}

impl SwipePreference {
    pub fn is_positive(self) -> bool {
        matches!(self, SwipePreference::Positive)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SwipePreference::Positive => "YES",
            SwipePreference::Negative => "NO",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "YES" => Some(SwipePreference::Positive),
            "NO" => Some(SwipePreference::Negative),
            _ => None,
        }
    }
}

impl fmt::Display for SwipePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One directional swipe, keyed by (swiper_id, swiped_id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeRecord {
    pub swiper_id: MemberId,
    pub swiped_id: MemberId,
    pub preference: SwipePreference,
    pub created_at: DateTime<Utc>,
}

impl SwipeRecord {
    pub fn new(swiper_id: MemberId, swiped_id: MemberId, preference: SwipePreference) -> Self {
        Self {
            swiper_id,
            swiped_id,
            preference,
            created_at: Utc::now(),
        }
    }
}

/// Public projection of a member shown during discovery
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateView {
    pub id: MemberId,
    pub name: String,
    pub gender: String,
    pub age: u32,
    pub latitude: f64,
    pub longitude: f64,
    pub attractiveness_score: f64,
    /// Kilometers from the requester
    pub distance_from_requester: f64,
}

impl CandidateView {
    pub fn from_member(member: Member, distance_km: f64) -> Self {
        Self {
            id: member.id,
            name: member.name,
            gender: member.gender,
            age: member.age,
            latitude: member.latitude,
            longitude: member.longitude,
            attractiveness_score: member.attractiveness_score,
            distance_from_requester: distance_km,
        }
    }
}

/// Query handed to the identity store when scanning for candidates
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateQuery {
    pub exclude_ids: Vec<MemberId>,
    pub min_age: Option<u32>,
    pub max_age: Option<u32>,
    pub gender: Option<String>,
    pub limit: usize,
}

/// Outcome of a swipe call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeOutcome {
    pub matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_id: Option<MemberId>,
}

impl SwipeOutcome {
    pub fn no_match() -> Self {
        Self {
            matched: false,
            match_id: None,
        }
    }

    pub fn matched(counterpart: MemberId) -> Self {
        Self {
            matched: true,
            match_id: Some(counterpart),
        }
    }
}
