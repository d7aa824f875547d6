pub mod auth;
pub mod challenge;
pub mod connection;
pub mod game;
pub mod matches;
pub mod player_profile;
pub mod user;

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
