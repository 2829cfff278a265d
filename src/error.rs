/// Errors raised while talking to the recommendation backend
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Server error (status {status}): {}", .message.as_deref().unwrap_or("no message"))]
    Server { status: u16, message: Option<String> },

    #[error("Fetch interrupted: {0}")]
    Interrupted(String),
}

impl AppError {
    /// Message shown to the user when a fetch fails
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidInput(_) => "Please describe your mood before searching.".to_string(),
            AppError::Network(_) => {
                "Could not reach the recommendation service. Check your connection and try again."
                    .to_string()
            }
            AppError::Schema(_) => {
                "The recommendation service sent a response that could not be read.".to_string()
            }
            AppError::Server {
                status,
                message: Some(msg),
            } => format!("The recommendation service reported an error ({}): {}", status, msg),
            AppError::Server {
                status,
                message: None,
            } => format!("The recommendation service reported an error ({}).", status),
            AppError::Interrupted(_) => {
                "The request stopped before a response arrived. Please try again.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Schema(err.to_string())
        } else {
            AppError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Schema(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Reasons the store refuses a user action
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("prompt cannot be empty")]
    EmptyPrompt,

    #[error("a recommendation request is already in flight")]
    FetchInFlight,

    #[error("no tokio runtime is available to run the fetch")]
    NoRuntime,

    #[error("item is not part of the current results")]
    UnknownItem,
}
