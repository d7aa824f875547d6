use std::fmt;

#[derive(Debug)]
pub enum ChallengeServiceError {
    /// Challenger and challenged are the same user.
    SelfChallenge,
    ChallengedUserNotFound,
    ChallengeNotFound,
    /// Responder is not the challenged party.
    NotChallengedUser,
    /// Finalizer is not the party designated by the location picker.
    NotDesignatedPicker,
    /// Respond called on a challenge that is no longer pending; carries the
    /// current status.
    AlreadyResolved(String),
    /// Finalize called on a challenge that is not accepted; carries the
    /// current status.
    NotAccepted(String),
    ValidationError(String),
    RepositoryError(String),
}

impl fmt::Display for ChallengeServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ChallengeServiceError::SelfChallenge => write!(f, "You cannot challenge yourself"),
            ChallengeServiceError::ChallengedUserNotFound => {
                write!(f, "Challenged user not found")
            }
            ChallengeServiceError::ChallengeNotFound => write!(f, "Challenge not found"),
            ChallengeServiceError::NotChallengedUser => {
                write!(f, "Only the challenged player can respond")
            }
            ChallengeServiceError::NotDesignatedPicker => {
                write!(f, "You are not authorized to finalize this challenge")
            }
            ChallengeServiceError::AlreadyResolved(status) => {
                write!(f, "Challenge is already {}", status)
            }
            ChallengeServiceError::NotAccepted(status) => {
                write!(
                    f,
                    "Challenge must be accepted before finalization (currently {})",
                    status
                )
            }
            ChallengeServiceError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ChallengeServiceError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for ChallengeServiceError {}
