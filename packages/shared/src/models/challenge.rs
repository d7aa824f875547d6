use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::UserSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeStatus {
    Pending,
    Accepted,
    Rejected,
    Finalized,
}

impl std::fmt::Display for ChallengeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChallengeStatus::Pending => write!(f, "pending"),
            ChallengeStatus::Accepted => write!(f, "accepted"),
            ChallengeStatus::Rejected => write!(f, "rejected"),
            ChallengeStatus::Finalized => write!(f, "finalized"),
        }
    }
}

/// Which party supplies the final match details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationPicker {
    Challenger,
    Challenged,
}

/// The only statuses a respond call may set. Keeping this separate from
/// ChallengeStatus makes "respond with finalized" unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeResponse {
    Accepted,
    Rejected,
}

impl From<ChallengeResponse> for ChallengeStatus {
    fn from(response: ChallengeResponse) -> Self {
        match response {
            ChallengeResponse::Accepted => ChallengeStatus::Accepted,
            ChallengeResponse::Rejected => ChallengeStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TimingWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FinalDetails {
    pub location: String,
    pub date: DateTime<Utc>,
    pub duration: i64, // minutes
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Challenge {
    pub id: String,
    pub challenger: String,
    pub challenged: String,
    #[serde(rename = "type")]
    pub challenge_type: String,
    pub location_picker: LocationPicker,
    pub notes: Option<String>,
    pub timing_window: Option<TimingWindow>,
    pub status: ChallengeStatus,
    pub final_details: Option<FinalDetails>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Challenge {
    pub fn new(
        challenger_id: &str,
        challenged_id: &str,
        challenge_type: Option<String>,
        location_picker: LocationPicker,
        notes: Option<String>,
        timing_window: Option<TimingWindow>,
    ) -> Self {
        let now = Utc::now();
        Challenge {
            id: Uuid::new_v4().to_string(),
            challenger: challenger_id.to_string(),
            challenged: challenged_id.to_string(),
            challenge_type: challenge_type.unwrap_or_else(|| "1v1".to_string()),
            location_picker,
            notes,
            timing_window,
            status: ChallengeStatus::Pending,
            final_details: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// The user allowed to finalize, per the location picker designation.
    pub fn designated_picker(&self) -> &str {
        match self.location_picker {
            LocationPicker::Challenger => &self.challenger,
            LocationPicker::Challenged => &self.challenged,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateChallengeRequest {
    pub challenged_id: String,
    #[serde(rename = "type")]
    pub challenge_type: Option<String>,
    pub location_picker: LocationPicker,
    pub notes: Option<String>,
    pub timing_window: Option<TimingWindow>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RespondToChallengeRequest {
    pub status: ChallengeResponse,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FinalizeChallengeRequest {
    pub location: String,
    pub date: DateTime<Utc>,
    pub duration: i64, // minutes
}

/// Finalization outcome: the settled challenge and the match it produced.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FinalizedChallenge {
    pub challenge: Challenge,
    pub game: crate::models::matches::Match,
}

/// A challenge with both parties resolved to their display fields.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PopulatedChallenge {
    pub id: String,
    pub challenger: UserSummary,
    pub challenged: UserSummary,
    #[serde(rename = "type")]
    pub challenge_type: String,
    pub location_picker: LocationPicker,
    pub notes: Option<String>,
    pub timing_window: Option<TimingWindow>,
    pub status: ChallengeStatus,
    pub final_details: Option<FinalDetails>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PopulatedChallenge {
    pub fn new(challenge: Challenge, challenger: UserSummary, challenged: UserSummary) -> Self {
        PopulatedChallenge {
            id: challenge.id,
            challenger,
            challenged,
            challenge_type: challenge.challenge_type,
            location_picker: challenge.location_picker,
            notes: challenge.notes,
            timing_window: challenge.timing_window,
            status: challenge.status,
            final_details: challenge.final_details,
            created_at: challenge.created_at,
            updated_at: challenge.updated_at,
        }
    }
}
