//! Error taxonomy shared by the provider, the place store and the repository.

use thiserror::Error;

/// Outcome of every repository operation: `Ok` is a success, `Err` a failure value.
pub type Result<T, E = WeatherError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{endpoint} request failed with status {status}: {body}")]
    Http {
        endpoint: &'static str,
        status: u16,
        body: String,
    },

    #[error("Response body is empty")]
    EmptyBody,

    /// The HTTP exchange worked but the payload reported a status other than "ok".
    #[error("{0}")]
    Status(String),

    #[error("No place has been saved")]
    NotFound,

    #[error("Failed to parse {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Background task failed: {0}")]
    Task(String),
}

impl WeatherError {
    pub(crate) fn parse(what: &'static str, source: serde_json::Error) -> Self {
        Self::Parse { what, source }
    }

    /// Network unreachable, timeouts, non-2xx answers and empty bodies.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Http { .. } | Self::EmptyBody)
    }

    /// Short text suitable for a transient notice.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) | Self::Http { .. } | Self::EmptyBody => {
                "Network error. Check your connection.".to_string()
            }
            Self::Status(status) => format!("Weather service refused the request ({status})"),
            Self::NotFound => "No place selected yet".to_string(),
            Self::Parse { what, .. } => format!("Unreadable {what}"),
            Self::Storage(_) => "Local storage error".to_string(),
            Self::Task(_) => "Request was interrupted".to_string(),
        }
    }
}

impl From<tokio::task::JoinError> for WeatherError {
    fn from(err: tokio::task::JoinError) -> Self {
        if err.is_cancelled() {
            Self::Task("task was cancelled".to_string())
        } else {
            Self::Task(format!("task panicked: {err}"))
        }
    }
}
