use thiserror::Error;

pub type Result<T> = std::result::Result<T, ViewerError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewerError {
    #[error("invalid address: {0:?}")]
    InvalidAddress(String),
    #[error("page geometry needs non-zero rows and a multiple of 8 columns")]
    InvalidGeometry,
    #[error("transport failure: {0}")]
    TransportFailure(String),
    #[error("short read: expected {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },
}

impl ViewerError {
    /// True for every failure that came back from the agent side of a fetch.
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            ViewerError::TransportFailure(_) | ViewerError::ShortRead { .. }
        )
    }
}
