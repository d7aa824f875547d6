use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::challenge::{Challenge, FinalDetails};
use crate::models::user::UserSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Upcoming,
    Completed,
    Cancelled,
}

/// A scheduled match produced by challenge finalization. Unlike the open
/// [`Game`](crate::models::game::Game), the roster is fixed at creation and
/// carries a back-reference to the originating challenge.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Match {
    pub id: String,
    pub players: Vec<String>,
    #[serde(rename = "type")]
    pub match_type: String,
    pub location: String,
    pub date: DateTime<Utc>,
    pub duration: i64, // minutes
    pub challenge: Option<String>,
    pub status: MatchStatus,
    pub created_at: DateTime<Utc>,
}

impl Match {
    /// Builds the match a finalized challenge produces: both participants,
    /// the supplied final details, and the challenge back-reference.
    pub fn from_finalized(challenge: &Challenge, details: &FinalDetails) -> Self {
        Match {
            id: Uuid::new_v4().to_string(),
            players: vec![challenge.challenger.clone(), challenge.challenged.clone()],
            match_type: challenge.challenge_type.clone(),
            location: details.location.clone(),
            date: details.date,
            duration: details.duration,
            challenge: Some(challenge.id.clone()),
            status: MatchStatus::Upcoming,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PopulatedMatch {
    pub id: String,
    pub players: Vec<UserSummary>,
    #[serde(rename = "type")]
    pub match_type: String,
    pub location: String,
    pub date: DateTime<Utc>,
    pub duration: i64,
    pub challenge: Option<Challenge>,
    pub status: MatchStatus,
    pub created_at: DateTime<Utc>,
}

impl PopulatedMatch {
    pub fn new(m: Match, players: Vec<UserSummary>, challenge: Option<Challenge>) -> Self {
        PopulatedMatch {
            id: m.id,
            players,
            match_type: m.match_type,
            location: m.location,
            date: m.date,
            duration: m.duration,
            challenge,
            status: m.status,
            created_at: m.created_at,
        }
    }
}
