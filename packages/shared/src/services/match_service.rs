use std::collections::HashMap;
use std::sync::Arc;

use crate::models::matches::{Match, PopulatedMatch};
use crate::models::user::UserSummary;
use crate::repositories::challenge_repository::ChallengeRepository;
use crate::repositories::errors::match_repository_errors::MatchRepositoryError;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use crate::repositories::match_repository::MatchRepository;
use crate::repositories::user_repository::UserRepository;
use crate::services::errors::match_service_errors::MatchServiceError;

pub struct MatchService {
    match_repository: Arc<dyn MatchRepository + Send + Sync>,
    challenge_repository: Arc<dyn ChallengeRepository + Send + Sync>,
    user_repository: Arc<dyn UserRepository + Send + Sync>,
}

impl MatchService {
    pub fn new(
        match_repository: Arc<dyn MatchRepository + Send + Sync>,
        challenge_repository: Arc<dyn ChallengeRepository + Send + Sync>,
        user_repository: Arc<dyn UserRepository + Send + Sync>,
    ) -> Self {
        MatchService {
            match_repository,
            challenge_repository,
            user_repository,
        }
    }

    pub async fn get_upcoming_matches(
        &self,
        user_id: &str,
    ) -> Result<Vec<PopulatedMatch>, MatchServiceError> {
        let mut matches = self
            .match_repository
            .list_upcoming_for_player(user_id)
            .await
            .map_err(|e| MatchServiceError::RepositoryError(e.to_string()))?;

        matches.sort_by(|a, b| a.date.cmp(&b.date));

        let mut cache: HashMap<String, UserSummary> = HashMap::new();
        let mut populated = Vec::with_capacity(matches.len());
        for m in matches {
            populated.push(self.populate(m, &mut cache).await?);
        }
        Ok(populated)
    }

    /// Participant-only read; a missing match and a match the caller is not
    /// part of produce the same error.
    pub async fn get_match(
        &self,
        user_id: &str,
        match_id: &str,
    ) -> Result<PopulatedMatch, MatchServiceError> {
        let m = self
            .match_repository
            .get_match_by_id(match_id)
            .await
            .map_err(|e| match e {
                MatchRepositoryError::NotFound => MatchServiceError::MatchNotFound,
                _ => MatchServiceError::RepositoryError(e.to_string()),
            })?;

        if !m.players.iter().any(|p| p == user_id) {
            return Err(MatchServiceError::MatchNotFound);
        }

        let mut cache = HashMap::new();
        self.populate(m, &mut cache).await
    }

    async fn populate(
        &self,
        m: Match,
        cache: &mut HashMap<String, UserSummary>,
    ) -> Result<PopulatedMatch, MatchServiceError> {
        let mut players = Vec::with_capacity(m.players.len());
        for user_id in &m.players {
            if let Some(summary) = cache.get(user_id) {
                players.push(summary.clone());
                continue;
            }
            let summary = match self.user_repository.get_user_by_id(user_id).await {
                Ok(user) => UserSummary::from(&user),
                Err(UserRepositoryError::NotFound) => UserSummary {
                    id: user_id.clone(),
                    username: String::new(),
                    full_name: None,
                    city: None,
                },
                Err(e) => return Err(MatchServiceError::RepositoryError(e.to_string())),
            };
            cache.insert(user_id.clone(), summary.clone());
            players.push(summary);
        }

        let challenge = match &m.challenge {
            Some(challenge_id) => self
                .challenge_repository
                .get_challenge_by_id(challenge_id)
                .await
                .ok(),
            None => None,
        };

        Ok(PopulatedMatch::new(m, players, challenge))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::challenge::{Challenge, FinalDetails, LocationPicker};
    use crate::models::matches::MatchStatus;
    use crate::models::user::User;
    use crate::repositories::challenge_repository::MockChallengeRepository;
    use crate::repositories::errors::challenge_repository_errors::ChallengeRepositoryError;
    use crate::repositories::match_repository::MockMatchRepository;
    use crate::repositories::user_repository::MockUserRepository;
    use chrono::{Duration, Utc};

    fn service(
        matches: MockMatchRepository,
        challenges: MockChallengeRepository,
        users: MockUserRepository,
    ) -> MatchService {
        MatchService::new(Arc::new(matches), Arc::new(challenges), Arc::new(users))
    }

    fn users_by_id() -> MockUserRepository {
        let mut users = MockUserRepository::new();
        users.expect_get_user_by_id().returning(|id| {
            let mut user = User::new(format!("user-{}", id), format!("{}@x.com", id), "h".into());
            user.id = id.to_string();
            Ok(user)
        });
        users
    }

    fn sample_match(players: Vec<&str>, days_ahead: i64) -> Match {
        let challenge = Challenge::new(
            players[0],
            players[1],
            None,
            LocationPicker::Challenger,
            None,
            None,
        );
        let details = FinalDetails {
            location: "Arena".to_string(),
            date: Utc::now() + Duration::days(days_ahead),
            duration: 60,
        };
        Match::from_finalized(&challenge, &details)
    }

    #[tokio::test]
    async fn test_upcoming_sorted_by_date() {
        let later = sample_match(vec!["me", "a"], 5);
        let sooner = sample_match(vec!["me", "b"], 1);

        let mut matches = MockMatchRepository::new();
        let listed = vec![later.clone(), sooner.clone()];
        matches
            .expect_list_upcoming_for_player()
            .returning(move |_| Ok(listed.clone()));

        let mut challenges = MockChallengeRepository::new();
        challenges
            .expect_get_challenge_by_id()
            .returning(|_| Err(ChallengeRepositoryError::NotFound));

        let svc = service(matches, challenges, users_by_id());

        let upcoming = svc.get_upcoming_matches("me").await.unwrap();
        assert_eq!(upcoming.len(), 2);
        assert_eq!(upcoming[0].id, sooner.id);
        assert_eq!(upcoming[1].id, later.id);
        assert_eq!(upcoming[0].status, MatchStatus::Upcoming);
    }

    #[tokio::test]
    async fn test_get_match_denies_non_participant() {
        let m = sample_match(vec!["a", "b"], 1);
        let mut matches = MockMatchRepository::new();
        let stored = m.clone();
        matches
            .expect_get_match_by_id()
            .returning(move |_| Ok(stored.clone()));

        let svc = service(matches, MockChallengeRepository::new(), users_by_id());

        let result = svc.get_match("outsider", &m.id).await;
        assert!(matches!(result, Err(MatchServiceError::MatchNotFound)));
    }

    #[tokio::test]
    async fn test_get_match_populates_challenge() {
        let m = sample_match(vec!["a", "b"], 1);
        let challenge_id = m.challenge.clone().unwrap();

        let mut matches = MockMatchRepository::new();
        let stored = m.clone();
        matches
            .expect_get_match_by_id()
            .returning(move |_| Ok(stored.clone()));

        let mut challenges = MockChallengeRepository::new();
        let backing = Challenge::new("a", "b", None, LocationPicker::Challenger, None, None);
        let mut backing_with_id = backing.clone();
        backing_with_id.id = challenge_id.clone();
        challenges
            .expect_get_challenge_by_id()
            .returning(move |_| Ok(backing_with_id.clone()));

        let svc = service(matches, challenges, users_by_id());

        let populated = svc.get_match("a", &m.id).await.unwrap();
        assert_eq!(populated.players.len(), 2);
        assert_eq!(populated.challenge.unwrap().id, challenge_id);
    }
}
