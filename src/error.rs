use thiserror::Error;

#[derive(Error, Debug)]
pub enum ActivityError {
    #[error("Unknown period token: {0}")]
    UnknownPeriod(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ActivityError>;
