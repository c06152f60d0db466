use std::fmt;

use thiserror::Error;

/// Errors that can occur while talking to the backend or a third-party API
#[derive(Error, Debug)]
pub enum ClientError {
    /// Local input was rejected before any request was made
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Transport failure (DNS, connect, timeout, read)
    #[error("Failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),

    /// The server answered with anything other than HTTP 200
    #[error("Unexpected HTTP status: {0}")]
    HttpStatus(u16),

    /// A configured base URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Response body did not have the expected shape
    #[error("Failed to decode response: {0}")]
    DecodeError(String),

    /// The backend reported a business-rule failure
    #[error("{0}")]
    Rejected(String),

    /// No API key configured for a third-party service
    #[error("No API key configured for {0}")]
    MissingApiKey(&'static str),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl ClientError {
    /// True for failures of the request itself rather than of its content.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ClientError::FetchError(_) | ClientError::HttpStatus(_) | ClientError::InvalidUrl(_)
        )
    }

    /// Text safe to show a user. Transport and decode causes stay in the log.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Validation(e) => e.to_string(),
            ClientError::Rejected(message) => message.clone(),
            ClientError::MissingApiKey(_) | ClientError::ConfigError(_) => self.to_string(),
            ClientError::DecodeError(_) => {
                "Received an unexpected response. Please try again.".to_string()
            }
            _ => "Request failed. Please check your connection and try again.".to_string(),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::DecodeError(err.to_string())
    }
}

/// Form fields that can fail local validation or be blamed by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FirstName,
    LastName,
    Username,
    Password,
    ConfirmPassword,
    Email,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::FirstName => "first name",
            Field::LastName => "last name",
            Field::Username => "username",
            Field::Password => "password",
            Field::ConfirmPassword => "confirm password",
            Field::Email => "email",
        };
        f.write_str(name)
    }
}

/// Local validation failures, reported inline without touching the network
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all fields ({0} is empty)")]
    MissingField(Field),

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Search query cannot be empty")]
    EmptyQuery,
}

impl ValidationError {
    /// The field an inline error should be attached to.
    pub fn field(&self) -> Option<Field> {
        match self {
            ValidationError::MissingField(field) => Some(*field),
            ValidationError::PasswordMismatch => Some(Field::ConfirmPassword),
            ValidationError::EmptyQuery => None,
        }
    }
}
