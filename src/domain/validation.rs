use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    EmptyNumbers,
    EmptyMessage,
    SingleCharacterMessage,
    MissingCredentials,
    InvalidBaseUrl { input: String },
    InvalidNumberPlan { reason: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::EmptyNumbers => f.write_str("Numbers list cannot be null or empty"),
            Self::EmptyMessage => f.write_str("Message cannot be null or empty"),
            Self::SingleCharacterMessage => f.write_str("Message cannot be a single character"),
            Self::MissingCredentials => {
                f.write_str("Either API Key or Username and Password must be provided")
            }
            Self::InvalidBaseUrl { input } => write!(f, "invalid base URL: {input}"),
            Self::InvalidNumberPlan { reason } => write!(f, "invalid number plan: {reason}"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty { field: "username" };
        assert_eq!(err.to_string(), "username must not be empty");

        assert_eq!(
            ValidationError::EmptyNumbers.to_string(),
            "Numbers list cannot be null or empty"
        );
        assert_eq!(
            ValidationError::EmptyMessage.to_string(),
            "Message cannot be null or empty"
        );
        assert_eq!(
            ValidationError::SingleCharacterMessage.to_string(),
            "Message cannot be a single character"
        );
        assert_eq!(
            ValidationError::MissingCredentials.to_string(),
            "Either API Key or Username and Password must be provided"
        );

        let err = ValidationError::InvalidBaseUrl {
            input: "nope".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid base URL: nope");

        let err = ValidationError::InvalidNumberPlan {
            reason: "trunk prefix must be a digit",
        };
        assert_eq!(
            err.to_string(),
            "invalid number plan: trunk prefix must be a digit"
        );
    }
}
