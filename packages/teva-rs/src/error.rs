use thiserror::Error;

#[derive(Error, Debug)]
pub enum TevaError {
    #[error("Input file not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Failed to decode capture '{path}': {reason}")]
    DecodeError { path: String, reason: String },

    #[error("Channel '{channel}' is not present in the recording (available: {available:?})")]
    ChannelUnavailable {
        channel: String,
        available: Vec<String>,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, TevaError>;
