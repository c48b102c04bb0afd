use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashTableError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Failed to allocate bucket array of {buckets} buckets")]
    AllocationFailure { buckets: usize },
    #[error("Hash table integrity violated: {0}")]
    Corrupted(String),
}

impl HashTableError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        HashTableError::InvalidArgument(msg.into())
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, HashTableError::InvalidArgument(_))
    }
}

pub type HashTableResult<T> = Result<T, HashTableError>;
