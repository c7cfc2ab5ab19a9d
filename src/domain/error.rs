use std::io;

use thiserror::Error;

use crate::domain::validation::ValidationError;

/// Library-wide error type for automate operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Client-side validation failure. Never reaches the network.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Email/password rejected by the backend.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Operation requires a logged-in applicant.
    #[error("Not logged in")]
    NotAuthenticated,

    /// A submission for this wizard is already in flight.
    #[error("A submission is already in progress")]
    SubmissionInFlight,

    /// The wizard was asked for a step its current state does not allow.
    #[error("That step is not available right now")]
    InvalidTransition,

    /// No outstanding ticket matches the given number.
    #[error("Ticket '{0}' not found")]
    TicketNotFound(String),

    /// Normalized gateway failure. Transport errors and structured server
    /// errors collapse into one message, with the HTTP status when one was
    /// observed.
    #[error("{message}")]
    Gateway { message: String, status: Option<u16> },
}

impl AppError {
    pub(crate) fn configuration<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub(crate) fn gateway<S: Into<String>>(message: S, status: Option<u16>) -> Self {
        AppError::Gateway { message: message.into(), status }
    }
}
