use thiserror::Error;

pub type ConsoleResult<T> = std::result::Result<T, ConsoleError>;

/// Everything that can go wrong between a key press and the backend.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// The request never completed or came back with a non-2xx status.
    #[error("network error: {0}")]
    Network(String),

    /// The response was not JSON or did not carry a usable envelope.
    #[error("unexpected response: {0}")]
    Protocol(String),

    /// The backend answered with `status: "error"`.
    #[error("{0}")]
    Application(String),

    /// A client-side rule was violated before anything was sent.
    #[error("{0}")]
    Validation(String),

    #[error("team member {team_member_id} is already assigned to the project")]
    DuplicateMembership { team_member_id: i32 },

    #[error("could not match {kind} \"{name}\", pick it manually")]
    Unresolved { kind: &'static str, name: String },
}

impl ConsoleError {
    pub fn validation(message: impl Into<String>) -> Self {
        ConsoleError::Validation(message.into())
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        ConsoleError::Protocol(message.into())
    }

    /// Warnings are shown to the user but never abort a screen.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            ConsoleError::DuplicateMembership { .. } | ConsoleError::Unresolved { .. }
        )
    }

    pub fn title(&self) -> &'static str {
        match self {
            ConsoleError::Network(_) => "Network Error",
            ConsoleError::Protocol(_) => "Protocol Error",
            ConsoleError::Application(_) => "Error",
            ConsoleError::Validation(_) => "Validation Error",
            ConsoleError::DuplicateMembership { .. } | ConsoleError::Unresolved { .. } => "Warning",
        }
    }
}

impl From<reqwest::Error> for ConsoleError {
    fn from(err: reqwest::Error) -> Self {
        ConsoleError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ConsoleError {
    fn from(err: serde_json::Error) -> Self {
        ConsoleError::Protocol(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_are_told_apart_from_failures() {
        assert!(ConsoleError::DuplicateMembership { team_member_id: 3 }.is_warning());
        assert!(
            ConsoleError::Unresolved {
                kind: "client",
                name: "Acme".into()
            }
            .is_warning()
        );
        assert!(!ConsoleError::validation("Please fill in all required fields").is_warning());
        assert!(!ConsoleError::Application("Client not found".into()).is_warning());
    }

    #[test]
    fn application_errors_show_the_backend_message() {
        let err = ConsoleError::Application("Team member not found".into());
        assert_eq!(err.to_string(), "Team member not found");
        assert_eq!(err.title(), "Error");
    }

    #[test]
    fn json_failures_are_protocol_errors() {
        let err: ConsoleError = serde_json::from_str::<serde_json::Value>("<html>")
            .unwrap_err()
            .into();
        assert!(matches!(err, ConsoleError::Protocol(_)));
    }
}
