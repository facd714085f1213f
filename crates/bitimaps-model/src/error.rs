//! Error types shared across the workspace.

use thiserror::Error;

/// Errors from the remote data store, the auth gate, and the transitions
/// built on top of them.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// Network request failed before a response arrived.
    #[error("network error: {0}")]
    Network(String),

    /// The remote store answered with a non-success status.
    #[error("remote store error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body or status text.
        message: String,
    },

    /// Failed to parse a JSON response.
    #[error("JSON parse error: {0}")]
    Json(String),

    /// I/O error (cache files, settings).
    #[error("I/O error: {0}")]
    Io(String),

    /// The password check rejected the supplied password.
    #[error("wrong password: {0}")]
    WrongPassword(String),

    /// The password check endpoint is missing its server-side secret.
    #[error("server configuration error: {0}")]
    ServerConfig(String),

    /// Offline and the response cache has no entry for the request.
    #[error("offline and no data in cache")]
    Offline,

    /// An open assignment already exists for the territory.
    #[error("territory {0} already has an open assignment")]
    Conflict(i64),

    /// No open assignment row was found to complete.
    #[error("no open assignment for territory {0}")]
    NoOpenAssignment(i64),

    /// A referenced row does not exist.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Table name.
        entity: &'static str,
        /// Row id.
        id: i64,
    },

    /// The assignment write succeeded but the territory status write did not;
    /// the stored status has drifted until the next reconcile.
    #[error("assignment written but status update failed for territory {0}")]
    PartialTransition(i64),
}

impl StoreError {
    /// A user-facing message, matching the tone the login form and modals use.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::WrongPassword(_) => "Password yang Anda masukkan salah. Coba lagi.",
            Self::ServerConfig(_) => "Terjadi kesalahan. Silakan coba lagi nanti.",
            Self::Offline => "Sedang offline dan data belum pernah dimuat.",
            Self::Conflict(_) => "Daerah ini sudah sedang dikerjakan.",
            Self::NoOpenAssignment(_) => "Tidak ada pengerjaan yang sedang berlangsung.",
            Self::PartialTransition(_) => {
                "Pengerjaan tersimpan, tetapi status daerah belum diperbarui."
            }
            Self::Network(_) | Self::Api { .. } | Self::Json(_) | Self::Io(_)
            | Self::NotFound { .. } => "Terjadi kesalahan. Silakan coba lagi nanti.",
        }
    }

    /// Whether a retry could plausibly succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Io(_) | Self::Offline | Self::PartialTransition(_)
        )
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for store and transition operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_distinguish_auth_failures() {
        let wrong = StoreError::WrongPassword("Password salah.".to_string());
        let config = StoreError::ServerConfig("APP_PASSWORD not set".to_string());
        assert!(wrong.user_message().contains("salah"));
        assert!(config.user_message().contains("coba lagi nanti"));
        assert_ne!(wrong.user_message(), config.user_message());
    }

    #[test]
    fn retryable_classification() {
        assert!(StoreError::Network("timeout".to_string()).is_retryable());
        assert!(StoreError::PartialTransition(101).is_retryable());
        assert!(!StoreError::Conflict(101).is_retryable());
    }
}
