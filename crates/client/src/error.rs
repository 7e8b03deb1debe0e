use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    /// The similarity service does not know this word. Reported back to the
    /// player; the session is left untouched.
    #[error("'{0}' is not a recognized word")]
    InvalidWord(String),

    /// Transport-level failure, timeouts included. Transient; the command
    /// can simply be reissued.
    #[error("Similarity service request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered, but not in the shape we expect for a word we
    /// chose ourselves.
    #[error("Malformed service response: {0}")]
    Malformed(#[from] serde_json::Error),
}
