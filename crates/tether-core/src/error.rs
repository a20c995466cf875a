use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Signature not found in scanned range")]
    NotFound,

    #[error("Cannot resolve a displacement from a null anchor")]
    InvalidAnchor,

    #[error("Registry is not initialized")]
    NotInitialized,

    #[error("Memory access fault at address {address:#x}: {message}")]
    AccessFault { address: u64, message: String },

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Failed to open process: {0}")]
    ProcessOpenFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error permanently disables the registry that produced it.
    ///
    /// A failed signature scan cannot be retried against the same process
    /// image; per-tick faults can simply be skipped for that frame.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::NotFound | Error::InvalidAnchor)
    }
}
