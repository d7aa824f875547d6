use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum PreferredFoot {
    Left,
    Right,
    Both,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MediaImage {
    pub url: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MediaVideo {
    pub url: String,
    pub thumbnail: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

/// 1:1 extension of a User holding athletic attributes, activity counters
/// and media. Created lazily on first profile read.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerProfile {
    pub user: String,
    pub primary_position: Option<String>,
    pub secondary_position: Option<String>,
    pub preferred_foot: Option<PreferredFoot>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub connections_count: i64,
    #[serde(default)]
    pub hosted_games_count: i64,
    #[serde(default)]
    pub completed_games_count: i64,
    #[serde(default)]
    pub upcoming_games_this_week: i64,
    #[serde(default)]
    pub images: Vec<MediaImage>,
    #[serde(default)]
    pub videos: Vec<MediaVideo>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PlayerProfile {
    pub fn new(user_id: &str) -> Self {
        let now = Utc::now();
        PlayerProfile {
            user: user_id.to_string(),
            primary_position: None,
            secondary_position: None,
            preferred_foot: None,
            height_cm: None,
            weight_kg: None,
            connections_count: 0,
            hosted_games_count: 0,
            completed_games_count: 0,
            upcoming_games_this_week: 0,
            images: vec![],
            videos: vec![],
            created_at: now,
            updated_at: now,
        }
    }
}

/// Athletic attributes accepted by the profile upsert.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SaveProfileRequest {
    pub primary_position: Option<String>,
    pub secondary_position: Option<String>,
    pub preferred_foot: Option<PreferredFoot>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddImageRequest {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddVideoRequest {
    pub url: String,
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoveMediaRequest {
    pub url: String,
}

// Composed "my profile" view, shaped for the profile screen.

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProfileHeader {
    pub profile: Option<String>,
    pub full_name: Option<String>,
    pub position: Option<String>,
    pub age: Option<i64>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProfileAttributes {
    pub age: Option<i64>,
    pub weight: Option<String>,
    pub height: Option<String>,
    pub primary_position: Option<String>,
    pub secondary_position: Option<String>,
    pub preferred_foot: Option<PreferredFoot>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProfileStats {
    pub connections: i64,
    pub hosted: i64,
    pub completed: i64,
    pub upcoming_this_week: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProfileMedia {
    pub images: Vec<MediaImage>,
    pub videos: Vec<MediaVideo>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProfileView {
    pub header: ProfileHeader,
    pub attributes: ProfileAttributes,
    pub stats: ProfileStats,
    pub media: ProfileMedia,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_profile_zeroed_counters() {
        let profile = PlayerProfile::new("user-1");
        assert_eq!(profile.user, "user-1");
        assert_eq!(profile.connections_count, 0);
        assert_eq!(profile.hosted_games_count, 0);
        assert!(profile.images.is_empty());
        assert!(profile.videos.is_empty());
    }

    #[test]
    fn test_sparse_item_deserializes() {
        // Items written before a field existed come back without it; counters
        // and media lists must default rather than fail.
        let raw = format!(
            "{{\"user\":\"u1\",\"primary_position\":null,\"secondary_position\":null,\
             \"preferred_foot\":null,\"height_cm\":null,\"weight_kg\":null,\
             \"created_at\":\"{}\",\"updated_at\":\"{}\"}}",
            Utc::now().to_rfc3339(),
            Utc::now().to_rfc3339()
        );
        let profile: PlayerProfile = serde_json::from_str(&raw).unwrap();
        assert_eq!(profile.connections_count, 0);
        assert!(profile.videos.is_empty());
    }
}
