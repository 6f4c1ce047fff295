use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BucketError {
    #[error("bucket size mismatch: {lhs} vs {rhs}")]
    SizeMismatch { lhs: usize, rhs: usize },
    #[error("bucket index {index} out of range for size {size}")]
    OutOfRange { index: usize, size: usize },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RateTableError {
    #[error("key `{0}` not stored in rate table")]
    KeyNotFound(u64),
}

pub type BucketResult<T> = std::result::Result<T, BucketError>;
pub type RateTableResult<T> = std::result::Result<T, RateTableError>;
