use std::fmt;

#[derive(Debug)]
pub enum GameServiceError {
    GameNotFound,
    /// The host is always a player; a host join request is meaningless.
    HostCannotJoin,
    AlreadyJoined,
    AlreadyRequested,
    GameFull,
    /// Caller is not the host of the game.
    NotGameHost,
    /// The target user has no pending join request on this game.
    NoPendingRequest,
    /// Lost an optimistic-concurrency race against another write.
    Conflict,
    ValidationError(String),
    RepositoryError(String),
}

impl fmt::Display for GameServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameServiceError::GameNotFound => write!(f, "Game not found"),
            GameServiceError::HostCannotJoin => {
                write!(f, "Host cannot request to join their own game")
            }
            GameServiceError::AlreadyJoined => {
                write!(f, "You are already a player in this game")
            }
            GameServiceError::AlreadyRequested => {
                write!(f, "Join request already pending")
            }
            GameServiceError::GameFull => write!(f, "Game is already full"),
            GameServiceError::NotGameHost => {
                write!(f, "Only the host can manage join requests")
            }
            GameServiceError::NoPendingRequest => {
                write!(f, "No pending join request from this user")
            }
            GameServiceError::Conflict => {
                write!(f, "Game was modified concurrently, please retry")
            }
            GameServiceError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            GameServiceError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for GameServiceError {}
