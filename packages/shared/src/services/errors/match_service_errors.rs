use std::fmt;

#[derive(Debug)]
pub enum MatchServiceError {
    /// Covers both a missing match and a caller who is not on the roster;
    /// the two are deliberately indistinguishable.
    MatchNotFound,
    RepositoryError(String),
}

impl fmt::Display for MatchServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MatchServiceError::MatchNotFound => write!(f, "Match not found or access denied"),
            MatchServiceError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for MatchServiceError {}
