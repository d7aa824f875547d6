use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::error;

use crate::models::challenge::{
    Challenge, ChallengeResponse, ChallengeStatus, CreateChallengeRequest, FinalDetails,
    FinalizeChallengeRequest, PopulatedChallenge,
};
use crate::models::matches::Match;
use crate::models::user::UserSummary;
use crate::repositories::challenge_repository::ChallengeRepository;
use crate::repositories::errors::challenge_repository_errors::ChallengeRepositoryError;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use crate::repositories::match_repository::MatchRepository;
use crate::repositories::user_repository::UserRepository;
use crate::services::errors::challenge_service_errors::ChallengeServiceError;

pub struct ChallengeService {
    challenge_repository: Arc<dyn ChallengeRepository + Send + Sync>,
    match_repository: Arc<dyn MatchRepository + Send + Sync>,
    user_repository: Arc<dyn UserRepository + Send + Sync>,
}

impl ChallengeService {
    pub fn new(
        challenge_repository: Arc<dyn ChallengeRepository + Send + Sync>,
        match_repository: Arc<dyn MatchRepository + Send + Sync>,
        user_repository: Arc<dyn UserRepository + Send + Sync>,
    ) -> Self {
        ChallengeService {
            challenge_repository,
            match_repository,
            user_repository,
        }
    }

    pub async fn create_challenge(
        &self,
        challenger_id: &str,
        request: CreateChallengeRequest,
    ) -> Result<Challenge, ChallengeServiceError> {
        if challenger_id == request.challenged_id {
            return Err(ChallengeServiceError::SelfChallenge);
        }

        self.user_repository
            .get_user_by_id(&request.challenged_id)
            .await
            .map_err(|e| match e {
                UserRepositoryError::NotFound => ChallengeServiceError::ChallengedUserNotFound,
                _ => ChallengeServiceError::RepositoryError(e.to_string()),
            })?;

        let challenge = Challenge::new(
            challenger_id,
            &request.challenged_id,
            request.challenge_type,
            request.location_picker,
            request.notes,
            request.timing_window,
        );

        self.challenge_repository
            .create_challenge(&challenge)
            .await
            .map_err(|e| ChallengeServiceError::RepositoryError(e.to_string()))?;

        Ok(challenge)
    }

    pub async fn respond_to_challenge(
        &self,
        user_id: &str,
        challenge_id: &str,
        response: ChallengeResponse,
    ) -> Result<Challenge, ChallengeServiceError> {
        let mut challenge = self.get_challenge(challenge_id).await?;

        if challenge.challenged != user_id {
            return Err(ChallengeServiceError::NotChallengedUser);
        }

        if challenge.status != ChallengeStatus::Pending {
            return Err(ChallengeServiceError::AlreadyResolved(
                challenge.status.to_string(),
            ));
        }

        challenge.status = response.into();
        challenge.updated_at = Utc::now();

        self.challenge_repository
            .update_challenge(&challenge)
            .await
            .map_err(|e| ChallengeServiceError::RepositoryError(e.to_string()))?;

        Ok(challenge)
    }

    /// Finalizes an accepted challenge and creates the resulting match.
    /// The two writes are sequential: if the match write fails the challenge
    /// stays finalized and the error propagates to the caller.
    pub async fn finalize_challenge(
        &self,
        user_id: &str,
        challenge_id: &str,
        request: FinalizeChallengeRequest,
    ) -> Result<(Challenge, Match), ChallengeServiceError> {
        let mut challenge = self.get_challenge(challenge_id).await?;

        if challenge.status != ChallengeStatus::Accepted {
            return Err(ChallengeServiceError::NotAccepted(
                challenge.status.to_string(),
            ));
        }

        if challenge.designated_picker() != user_id {
            return Err(ChallengeServiceError::NotDesignatedPicker);
        }

        let details = FinalDetails {
            location: request.location,
            date: request.date,
            duration: request.duration,
        };
        challenge.final_details = Some(details.clone());
        challenge.status = ChallengeStatus::Finalized;
        challenge.updated_at = Utc::now();

        self.challenge_repository
            .update_challenge(&challenge)
            .await
            .map_err(|e| ChallengeServiceError::RepositoryError(e.to_string()))?;

        let game = Match::from_finalized(&challenge, &details);
        self.match_repository
            .create_match(&game)
            .await
            .map_err(|e| {
                error!(
                    "Challenge {} finalized but match creation failed: {}",
                    challenge.id, e
                );
                ChallengeServiceError::RepositoryError(e.to_string())
            })?;

        Ok((challenge, game))
    }

    pub async fn get_user_challenges(
        &self,
        user_id: &str,
    ) -> Result<Vec<PopulatedChallenge>, ChallengeServiceError> {
        let mut challenges = self
            .challenge_repository
            .list_by_challenger(user_id)
            .await
            .map_err(|e| ChallengeServiceError::RepositoryError(e.to_string()))?;
        let challenged = self
            .challenge_repository
            .list_by_challenged(user_id)
            .await
            .map_err(|e| ChallengeServiceError::RepositoryError(e.to_string()))?;
        challenges.extend(challenged);

        challenges.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let mut summaries: HashMap<String, UserSummary> = HashMap::new();
        let mut populated = Vec::with_capacity(challenges.len());
        for challenge in challenges {
            let challenger = self
                .participant_summary(&mut summaries, &challenge.challenger)
                .await?;
            let challenged = self
                .participant_summary(&mut summaries, &challenge.challenged)
                .await?;
            populated.push(PopulatedChallenge::new(challenge, challenger, challenged));
        }
        Ok(populated)
    }

    async fn get_challenge(
        &self,
        challenge_id: &str,
    ) -> Result<Challenge, ChallengeServiceError> {
        self.challenge_repository
            .get_challenge_by_id(challenge_id)
            .await
            .map_err(|e| match e {
                ChallengeRepositoryError::NotFound => ChallengeServiceError::ChallengeNotFound,
                _ => ChallengeServiceError::RepositoryError(e.to_string()),
            })
    }

    async fn participant_summary(
        &self,
        cache: &mut HashMap<String, UserSummary>,
        user_id: &str,
    ) -> Result<UserSummary, ChallengeServiceError> {
        if let Some(summary) = cache.get(user_id) {
            return Ok(summary.clone());
        }
        let summary = match self.user_repository.get_user_by_id(user_id).await {
            Ok(user) => UserSummary::from(&user),
            // Participants can disappear under soft-delete; keep the listing
            // usable with a bare id.
            Err(UserRepositoryError::NotFound) => UserSummary {
                id: user_id.to_string(),
                username: String::new(),
                full_name: None,
                city: None,
            },
            Err(e) => return Err(ChallengeServiceError::RepositoryError(e.to_string())),
        };
        cache.insert(user_id.to_string(), summary.clone());
        Ok(summary)
    }
}
