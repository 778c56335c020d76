use thiserror::Error;

pub type Result<T, E = LedgerError> = std::result::Result<T, E>;

// Every failure the ledger can surface to the user. None of them is retried.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Access Denied: Token required.")]
    MissingCredential, // No token stored and the user refused to supply one.

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error), // Transport failures talking to the repository host.

    #[error("Repository host answered {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Stale version {0}: the roster changed since it was read")]
    StaleVersion(String), // Conditional write rejected by the host.

    #[error("Content is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Content is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LedgerError {
    pub fn is_stale_version(&self) -> bool {
        matches!(self, LedgerError::StaleVersion(_))
    }
}
