use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub id: String,
    pub username: String,
    /// Lowercased copy of the username, key of GSI_UserByUsername. Uniqueness
    /// checks are case-insensitive while the display form keeps its casing.
    pub username_lower: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub password: String,
    pub profile: Option<String>,
    pub gender: Option<String>,
    pub full_name: Option<String>,
    pub dob: Option<DateTime<Utc>>,
    pub nationality: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, email: String, hashed_password: String) -> Self {
        let now = Utc::now();
        let username_lower = username.to_lowercase();
        User {
            id: Uuid::new_v4().to_string(),
            username,
            username_lower,
            email: email.to_lowercase(),
            phone_number: None,
            password: hashed_password,
            profile: None,
            gender: None,
            full_name: None,
            dob: None,
            nationality: None,
            country: None,
            city: None,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// API-facing projection of a User. The persisted model carries the password
/// hash; responses must never include it, so handlers convert to this.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PublicUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub profile: Option<String>,
    pub gender: Option<String>,
    pub full_name: Option<String>,
    pub dob: Option<DateTime<Utc>>,
    pub nationality: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        PublicUser {
            id: user.id,
            username: user.username,
            email: user.email,
            phone_number: user.phone_number,
            profile: user.profile,
            gender: user.gender,
            full_name: user.full_name,
            dob: user.dob,
            nationality: user.nationality,
            country: user.country,
            city: user.city,
            created_at: user.created_at,
        }
    }
}

/// Display fields used when another entity references a user.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserSummary {
    pub id: String,
    pub username: String,
    pub full_name: Option<String>,
    pub city: Option<String>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        UserSummary {
            id: user.id.clone(),
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            city: user.city.clone(),
        }
    }
}

/// Query parameters for the player discovery listing.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PlayerQuery {
    pub search: Option<String>,
    pub city: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerListing {
    #[serde(flatten)]
    pub user: PublicUser,
    pub player_profile: Option<crate::models::player_profile::PlayerProfile>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_players: u32,
    pub players_per_page: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayersPage {
    pub players: Vec<PlayerListing>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let user = User::new(
            "PlayerOne".to_string(),
            "Player@Example.com".to_string(),
            "hashed".to_string(),
        );

        assert!(!user.id.is_empty());
        assert_eq!(user.username, "PlayerOne");
        assert_eq!(user.username_lower, "playerone");
        assert_eq!(user.email, "player@example.com");
        assert!(!user.is_deleted);
        assert!(user.phone_number.is_none());
    }

    #[test]
    fn test_user_ids_are_unique() {
        let a = User::new("a".into(), "a@x.com".into(), "h".into());
        let b = User::new("b".into(), "b@x.com".into(), "h".into());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_public_user_has_no_password() {
        let user = User::new("p".into(), "p@x.com".into(), "secret-hash".into());
        let public: PublicUser = user.into();

        let serialized = serde_json::to_string(&public).unwrap();
        assert!(!serialized.contains("secret-hash"));
        assert!(!serialized.contains("password"));
    }

    #[test]
    fn test_user_summary_display_fields() {
        let mut user = User::new("striker9".into(), "s@x.com".into(), "h".into());
        user.full_name = Some("Sam Cole".to_string());
        user.city = Some("Lisbon".to_string());

        let summary = UserSummary::from(&user);
        assert_eq!(summary.username, "striker9");
        assert_eq!(summary.full_name.as_deref(), Some("Sam Cole"));
        assert_eq!(summary.city.as_deref(), Some("Lisbon"));
    }
}
