use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::models::ErrorResponse;
use shared::services::errors::{
    auth_service_errors::AuthServiceError, challenge_service_errors::ChallengeServiceError,
    connection_service_errors::ConnectionServiceError, game_service_errors::GameServiceError,
    match_service_errors::MatchServiceError, player_service_errors::PlayerServiceError,
    profile_service_errors::ProfileServiceError, user_service_errors::UserServiceError,
};

#[derive(Debug)]
pub enum ApiError {
    UserService(UserServiceError),
    AuthService(AuthServiceError),
    ChallengeService(ChallengeServiceError),
    GameService(GameServiceError),
    MatchService(MatchServiceError),
    ConnectionService(ConnectionServiceError),
    PlayerService(PlayerServiceError),
    ProfileService(ProfileServiceError),
    Unauthorized,
}

impl From<UserServiceError> for ApiError {
    fn from(error: UserServiceError) -> Self {
        ApiError::UserService(error)
    }
}

impl From<AuthServiceError> for ApiError {
    fn from(error: AuthServiceError) -> Self {
        ApiError::AuthService(error)
    }
}

impl From<ChallengeServiceError> for ApiError {
    fn from(error: ChallengeServiceError) -> Self {
        ApiError::ChallengeService(error)
    }
}

impl From<GameServiceError> for ApiError {
    fn from(error: GameServiceError) -> Self {
        ApiError::GameService(error)
    }
}

impl From<MatchServiceError> for ApiError {
    fn from(error: MatchServiceError) -> Self {
        ApiError::MatchService(error)
    }
}

impl From<ConnectionServiceError> for ApiError {
    fn from(error: ConnectionServiceError) -> Self {
        ApiError::ConnectionService(error)
    }
}

impl From<PlayerServiceError> for ApiError {
    fn from(error: PlayerServiceError) -> Self {
        ApiError::PlayerService(error)
    }
}

impl From<ProfileServiceError> for ApiError {
    fn from(error: ProfileServiceError) -> Self {
        ApiError::ProfileService(error)
    }
}

fn user_service_status(error: &UserServiceError) -> StatusCode {
    match error {
        UserServiceError::UserNotFound => StatusCode::NOT_FOUND,
        UserServiceError::UsernameAlreadyExists(_)
        | UserServiceError::EmailAlreadyExists(_)
        | UserServiceError::PhoneAlreadyExists => StatusCode::CONFLICT,
        UserServiceError::ValidationError(_) => StatusCode::BAD_REQUEST,
        UserServiceError::RepositoryError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::UserService(e) => (user_service_status(e), e.to_string()),

            // Registration conflicts travel wrapped inside the auth error.
            ApiError::AuthService(AuthServiceError::UserServiceError(e)) => {
                (user_service_status(e), e.to_string())
            }
            ApiError::AuthService(e @ AuthServiceError::InvalidCredentials)
            | ApiError::AuthService(e @ AuthServiceError::InvalidToken)
            | ApiError::AuthService(e @ AuthServiceError::ExpiredToken) => {
                (StatusCode::UNAUTHORIZED, e.to_string())
            }
            ApiError::AuthService(e @ AuthServiceError::ValidationError(_)) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            ApiError::AuthService(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),

            ApiError::ChallengeService(e) => {
                let status = match e {
                    ChallengeServiceError::ChallengeNotFound
                    | ChallengeServiceError::ChallengedUserNotFound => StatusCode::NOT_FOUND,
                    ChallengeServiceError::NotChallengedUser
                    | ChallengeServiceError::NotDesignatedPicker => StatusCode::FORBIDDEN,
                    ChallengeServiceError::AlreadyResolved(_)
                    | ChallengeServiceError::NotAccepted(_) => StatusCode::CONFLICT,
                    ChallengeServiceError::SelfChallenge
                    | ChallengeServiceError::ValidationError(_) => StatusCode::BAD_REQUEST,
                    ChallengeServiceError::RepositoryError(_) => {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                (status, e.to_string())
            }

            ApiError::GameService(e) => {
                let status = match e {
                    GameServiceError::GameNotFound => StatusCode::NOT_FOUND,
                    GameServiceError::NotGameHost => StatusCode::FORBIDDEN,
                    GameServiceError::Conflict => StatusCode::CONFLICT,
                    GameServiceError::HostCannotJoin
                    | GameServiceError::AlreadyJoined
                    | GameServiceError::AlreadyRequested
                    | GameServiceError::GameFull
                    | GameServiceError::NoPendingRequest
                    | GameServiceError::ValidationError(_) => StatusCode::BAD_REQUEST,
                    GameServiceError::RepositoryError(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, e.to_string())
            }

            ApiError::MatchService(e) => {
                let status = match e {
                    MatchServiceError::MatchNotFound => StatusCode::NOT_FOUND,
                    MatchServiceError::RepositoryError(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, e.to_string())
            }

            ApiError::ConnectionService(e) => {
                let status = match e {
                    ConnectionServiceError::UserNotFound
                    | ConnectionServiceError::ConnectionNotFound => StatusCode::NOT_FOUND,
                    ConnectionServiceError::AlreadyExists
                    | ConnectionServiceError::AlreadyAccepted => StatusCode::CONFLICT,
                    ConnectionServiceError::SelfConnection => StatusCode::BAD_REQUEST,
                    ConnectionServiceError::RepositoryError(_) => {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                (status, e.to_string())
            }

            ApiError::PlayerService(e) => {
                let status = match e {
                    PlayerServiceError::CurrentUserNotFound
                    | PlayerServiceError::PlayerNotFound => StatusCode::NOT_FOUND,
                    PlayerServiceError::OwnProfile => StatusCode::BAD_REQUEST,
                    PlayerServiceError::RepositoryError(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, e.to_string())
            }

            ApiError::ProfileService(e) => {
                let status = match e {
                    ProfileServiceError::UserNotFound => StatusCode::NOT_FOUND,
                    ProfileServiceError::ValidationError(_) => StatusCode::BAD_REQUEST,
                    ProfileServiceError::RepositoryError(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, e.to_string())
            }

            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
