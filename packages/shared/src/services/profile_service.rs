use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::models::player_profile::{
    MediaImage, MediaVideo, PlayerProfile, ProfileAttributes, ProfileHeader, ProfileMedia,
    ProfileStats, ProfileView, SaveProfileRequest,
};
use crate::models::user::User;
use crate::repositories::errors::profile_repository_errors::ProfileRepositoryError;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use crate::repositories::profile_repository::ProfileRepository;
use crate::repositories::user_repository::UserRepository;
use crate::services::errors::profile_service_errors::ProfileServiceError;

// Average Gregorian year in seconds, matching the 365.25-day convention.
const SECONDS_PER_YEAR: i64 = 31_557_600;

pub struct ProfileService {
    profile_repository: Arc<dyn ProfileRepository + Send + Sync>,
    user_repository: Arc<dyn UserRepository + Send + Sync>,
}

impl ProfileService {
    pub fn new(
        profile_repository: Arc<dyn ProfileRepository + Send + Sync>,
        user_repository: Arc<dyn UserRepository + Send + Sync>,
    ) -> Self {
        ProfileService {
            profile_repository,
            user_repository,
        }
    }

    pub async fn get_my_profile(&self, user_id: &str) -> Result<ProfileView, ProfileServiceError> {
        let user = self
            .user_repository
            .get_user_by_id(user_id)
            .await
            .map_err(|e| match e {
                UserRepositoryError::NotFound => ProfileServiceError::UserNotFound,
                _ => ProfileServiceError::RepositoryError(e.to_string()),
            })?;

        let profile = self.get_or_create_profile(user_id).await?;
        Ok(compose_view(&user, &profile))
    }

    pub async fn save_profile(
        &self,
        user_id: &str,
        request: SaveProfileRequest,
    ) -> Result<PlayerProfile, ProfileServiceError> {
        let mut profile = self.get_or_create_profile(user_id).await?;
        profile.primary_position = request.primary_position;
        profile.secondary_position = request.secondary_position;
        profile.preferred_foot = request.preferred_foot;
        profile.height_cm = request.height_cm;
        profile.weight_kg = request.weight_kg;
        profile.updated_at = Utc::now();

        self.profile_repository
            .put_profile(&profile)
            .await
            .map_err(|e| ProfileServiceError::RepositoryError(e.to_string()))?;
        Ok(profile)
    }

    pub async fn add_image(
        &self,
        user_id: &str,
        url: String,
    ) -> Result<PlayerProfile, ProfileServiceError> {
        if url.is_empty() {
            return Err(ProfileServiceError::ValidationError(
                "Image URL cannot be empty".to_string(),
            ));
        }
        self.get_or_create_profile(user_id).await?;
        let image = MediaImage {
            url,
            uploaded_at: Utc::now(),
        };
        self.profile_repository
            .push_image(user_id, &image)
            .await
            .map_err(|e| ProfileServiceError::RepositoryError(e.to_string()))?;
        self.get_or_create_profile(user_id).await
    }

    pub async fn add_video(
        &self,
        user_id: &str,
        url: String,
        thumbnail: Option<String>,
    ) -> Result<PlayerProfile, ProfileServiceError> {
        if url.is_empty() {
            return Err(ProfileServiceError::ValidationError(
                "Video URL cannot be empty".to_string(),
            ));
        }
        self.get_or_create_profile(user_id).await?;
        let video = MediaVideo {
            url,
            thumbnail,
            uploaded_at: Utc::now(),
        };
        self.profile_repository
            .push_video(user_id, &video)
            .await
            .map_err(|e| ProfileServiceError::RepositoryError(e.to_string()))?;
        self.get_or_create_profile(user_id).await
    }

    pub async fn delete_image(
        &self,
        user_id: &str,
        url: &str,
    ) -> Result<PlayerProfile, ProfileServiceError> {
        let mut profile = self.get_or_create_profile(user_id).await?;
        profile.images.retain(|image| image.url != url);
        profile.updated_at = Utc::now();
        self.profile_repository
            .put_profile(&profile)
            .await
            .map_err(|e| ProfileServiceError::RepositoryError(e.to_string()))?;
        Ok(profile)
    }

    pub async fn delete_video(
        &self,
        user_id: &str,
        url: &str,
    ) -> Result<PlayerProfile, ProfileServiceError> {
        let mut profile = self.get_or_create_profile(user_id).await?;
        profile.videos.retain(|video| video.url != url);
        profile.updated_at = Utc::now();
        self.profile_repository
            .put_profile(&profile)
            .await
            .map_err(|e| ProfileServiceError::RepositoryError(e.to_string()))?;
        Ok(profile)
    }

    async fn get_or_create_profile(
        &self,
        user_id: &str,
    ) -> Result<PlayerProfile, ProfileServiceError> {
        match self.profile_repository.get_profile(user_id).await {
            Ok(profile) => Ok(profile),
            Err(ProfileRepositoryError::NotFound) => {
                let profile = PlayerProfile::new(user_id);
                self.profile_repository
                    .put_profile(&profile)
                    .await
                    .map_err(|e| ProfileServiceError::RepositoryError(e.to_string()))?;
                Ok(profile)
            }
            Err(e) => Err(ProfileServiceError::RepositoryError(e.to_string())),
        }
    }
}

fn age_from_dob(dob: Option<DateTime<Utc>>) -> Option<i64> {
    dob.map(|dob| (Utc::now() - dob).num_seconds() / SECONDS_PER_YEAR)
}

fn compose_view(user: &User, profile: &PlayerProfile) -> ProfileView {
    let age = age_from_dob(user.dob);
    let location = match (&user.city, &user.country) {
        (Some(city), Some(country)) => Some(format!("{}, {}", city, country)),
        (Some(city), None) => Some(city.clone()),
        (None, Some(country)) => Some(country.clone()),
        (None, None) => None,
    };

    ProfileView {
        header: ProfileHeader {
            profile: user.profile.clone(),
            full_name: user.full_name.clone(),
            position: profile.primary_position.clone(),
            age,
            location,
        },
        attributes: ProfileAttributes {
            age,
            weight: profile.weight_kg.map(|kg| format!("{} kg", kg)),
            height: profile.height_cm.map(|cm| format!("{} cm", cm)),
            primary_position: profile.primary_position.clone(),
            secondary_position: profile.secondary_position.clone(),
            preferred_foot: profile.preferred_foot,
        },
        stats: ProfileStats {
            connections: profile.connections_count,
            hosted: profile.hosted_games_count,
            completed: profile.completed_games_count,
            upcoming_this_week: profile.upcoming_games_this_week,
        },
        media: ProfileMedia {
            images: profile.images.clone(),
            videos: profile.videos.clone(),
        },
    }
}
