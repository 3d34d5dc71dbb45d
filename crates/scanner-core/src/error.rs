//! Error types for the signal scanner.

use thiserror::Error;

/// Top-level scanner error.
#[derive(Error, Debug)]
pub enum ScannerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Market-data and instrument-universe errors.
///
/// Every variant is transient from the point of view of a run: the affected
/// instrument is skipped, or the universe falls back to the static list.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    #[error("API error: {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid bar limit {limit}: must be between 1 and {max}")]
    InvalidLimit { limit: usize, max: usize },

    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),
}

impl DataError {
    /// Whether the error came from the transport rather than the payload.
    pub fn is_transport(&self) -> bool {
        matches!(self, DataError::Connection(_) | DataError::Timeout { .. })
    }
}

/// Notification relay errors.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Relay configuration error: {0}")]
    Configuration(String),

    #[error("Relay transport error: {0}")]
    Transport(String),

    #[error("Relay rejected message: {0}")]
    Rejected(String),
}

/// Result type alias for scanner operations.
pub type ScannerResult<T> = Result<T, ScannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        assert!(DataError::Timeout { timeout_ms: 5000 }.is_transport());
        assert!(DataError::Connection("reset".into()).is_transport());
        assert!(!DataError::Decode("bad row".into()).is_transport());
        assert!(!DataError::Api {
            status: 429,
            body: "slow down".into()
        }
        .is_transport());
    }

    #[test]
    fn test_error_conversion() {
        let err: ScannerError = DataError::SymbolNotFound("FOOUSDT".into()).into();
        assert_eq!(err.to_string(), "Data error: Symbol not found: FOOUSDT");
    }
}
