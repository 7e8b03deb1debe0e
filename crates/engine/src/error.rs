use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Vector length mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Zero-magnitude vector: cosine similarity is undefined")]
    ZeroMagnitude,

    #[error("'{0}' has not been guessed in this session")]
    UnknownWord(String),
}
