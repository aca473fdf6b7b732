use thiserror::Error;

#[derive(Error, Debug)]
pub enum BitPermError {
    #[error("Invalid permutation: {0}")]
    InvalidPermutation(String),

    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    #[error("Too long: effective length {0} exceeds the maximum of 1023")]
    TooLong(usize),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BitPermError>;
