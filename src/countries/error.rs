//! Dataset loading errors.

/// Failure to obtain the country dataset.
///
/// Non-fatal for the game: callers log it and continue with an empty pool.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum FetchError {
    /// The request could not be sent or the connection failed.
    #[display("Request to {url} failed: {message}")]
    Request {
        /// Requested URL.
        url: String,
        /// Underlying client error.
        message: String,
    },

    /// The request did not complete within the configured timeout.
    #[display("Request to {url} timed out")]
    Timeout {
        /// Requested URL.
        url: String,
    },

    /// The server answered with a non-success status.
    #[display("Request to {url} returned HTTP {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The payload was not the expected country JSON.
    #[display("Could not decode country data: {message}")]
    Decode {
        /// Parser error.
        message: String,
    },

    /// A local dataset file could not be read.
    #[display("Could not read dataset {path}: {message}")]
    Io {
        /// File path.
        path: String,
        /// I/O error.
        message: String,
    },
}

impl FetchError {
    /// Maps a reqwest error onto the matching variant.
    pub(crate) fn from_reqwest(url: &str, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::Timeout {
                url: url.to_string(),
            };
        }
        if let Some(status) = err.status() {
            return Self::Status {
                url: url.to_string(),
                status: status.as_u16(),
            };
        }
        if err.is_decode() {
            return Self::Decode {
                message: err.to_string(),
            };
        }
        Self::Request {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode {
            message: err.to_string(),
        }
    }
}
