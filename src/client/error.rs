use std::time::Duration;

pub const CONNECTION_MESSAGE: &str =
    "Unable to connect to the server. Please make sure the backend is running.";
pub const SERVICE_FALLBACK_MESSAGE: &str = "Failed to analyze text";

/// Everything that can end an analysis call. `Display` is the text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalyzeError {
    /// The service could not be reached at all.
    #[error("Unable to connect to the server. Please make sure the backend is running.")]
    Connection { detail: String },

    /// The service answered with a non-success status.
    #[error("{message}")]
    Service { status: u16, message: String },

    /// 2xx response whose body is not a valid analysis result.
    #[error("Unexpected response from the analysis service: {0}")]
    Protocol(String),

    #[error("The analysis service did not respond within {} seconds.", .0.as_secs_f64())]
    Timeout(Duration),
}

impl AnalyzeError {
    pub fn kind(&self) -> &'static str {
        match self {
            AnalyzeError::Connection { .. } => "connection",
            AnalyzeError::Service { .. } => "service",
            AnalyzeError::Protocol(_) => "protocol",
            AnalyzeError::Timeout(_) => "timeout",
        }
    }

    pub(crate) fn transport(err: reqwest::Error) -> Self {
        AnalyzeError::Connection {
            detail: err.to_string(),
        }
    }

    /// Builds a `Service` error from a rejected response body. The body's
    /// `message` field is used verbatim when present and non-empty.
    pub fn from_rejection(status: u16, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_owned))
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| SERVICE_FALLBACK_MESSAGE.to_string());
        AnalyzeError::Service { status, message }
    }
}
