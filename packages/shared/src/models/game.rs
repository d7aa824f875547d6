use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GameStatus {
    Open,
    Full,
    Started,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub long: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuickSetup {
    pub is_private: bool,
    pub enable_chat: bool,
    pub enable_payment: bool,
    pub copy_previous_game: bool,
    pub background_image: Option<String>,
}

impl Default for QuickSetup {
    fn default() -> Self {
        QuickSetup {
            is_private: false,
            enable_chat: true,
            enable_payment: true,
            copy_previous_game: false,
            background_image: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GameDetails {
    pub title: String,
    pub description: Option<String>,
    pub location: String,
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GameSchedule {
    pub date: DateTime<Utc>,
    pub time: Option<String>,
    pub duration: Option<String>, // e.g. "90 mins"
    pub players_needed: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AgeRange {
    pub from: u32,
    pub to: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Gender {
    Male,
    Female,
    Mix,
}

impl Default for Gender {
    fn default() -> Self {
        Gender::Mix
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GameRules {
    pub ground_type: Option<String>, // Turf, Natural Grass
    pub match_format: Option<String>, // 5v5, 6v6, ...
    pub age_range: Option<AgeRange>,
    #[serde(default)]
    pub gender: Gender,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaymentInfo {
    pub level: Option<String>,  // Amateur, Intermediate, Pro
    pub option: Option<String>, // Online, Cash
    pub price: f64,
    pub currency: String,
}

impl Default for PaymentInfo {
    fn default() -> Self {
        PaymentInfo {
            level: None,
            option: None,
            price: 0.0,
            currency: "USD".to_string(),
        }
    }
}

/// Host-managed open game with a pending-request admission workflow.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Game {
    pub id: String,
    pub host: String,
    pub players: Vec<String>,
    pub pending_players: Vec<String>,
    pub quick_setup: QuickSetup,
    pub details: GameDetails,
    pub schedule: GameSchedule,
    pub rules: GameRules,
    pub payment: PaymentInfo,
    pub status: GameStatus,
    /// Bumped on every write; conditional updates key on it so concurrent
    /// mutations of the same game cannot race past the capacity check.
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Game {
    pub fn new(
        host_id: &str,
        quick_setup: QuickSetup,
        details: GameDetails,
        schedule: GameSchedule,
        rules: GameRules,
        payment: PaymentInfo,
    ) -> Self {
        let now = Utc::now();
        Game {
            id: Uuid::new_v4().to_string(),
            host: host_id.to_string(),
            players: vec![host_id.to_string()],
            pending_players: vec![],
            quick_setup,
            details,
            schedule,
            rules,
            payment,
            status: GameStatus::Open,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// True when a target player count is set and the roster has reached it.
    /// Games without players_needed never fill.
    pub fn at_capacity(&self) -> bool {
        self.schedule
            .players_needed
            .map_or(false, |needed| self.players.len() >= needed as usize)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateGameRequest {
    pub quick_setup: Option<QuickSetup>,
    pub details: GameDetails,
    pub schedule: GameSchedule,
    pub rules: Option<GameRules>,
    pub payment: Option<PaymentInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinRequestAction {
    Accept,
    Reject,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RespondToJoinRequest {
    pub action: JoinRequestAction,
}
