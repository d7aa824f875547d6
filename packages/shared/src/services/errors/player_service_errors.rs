use std::fmt;

#[derive(Debug)]
pub enum PlayerServiceError {
    CurrentUserNotFound,
    PlayerNotFound,
    /// The discovery endpoints are for browsing other players.
    OwnProfile,
    RepositoryError(String),
}

impl fmt::Display for PlayerServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PlayerServiceError::CurrentUserNotFound => write!(f, "Current user not found"),
            PlayerServiceError::PlayerNotFound => write!(f, "Player not found"),
            PlayerServiceError::OwnProfile => {
                write!(f, "Cannot view your own profile from this endpoint")
            }
            PlayerServiceError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for PlayerServiceError {}
