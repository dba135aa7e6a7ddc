use thiserror::Error;

#[derive(Debug, Error)]
pub enum CreatorError {
    #[error("Please enter a prompt")]
    MissingPrompt,
    #[error("Please enter a prompt and generate an image")]
    MissingPromptOrPhoto,
    #[error("A post is already being shared")]
    SubmissionInProgress,
    #[error("Unknown form field: {0}")]
    UnknownField(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("Response error: {0}")]
    ResponseError(String),
    #[error("Decode error: {0}")]
    DecodeError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CreatorError {
    /// Input problems the user can fix without anything having gone over the wire.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            CreatorError::MissingPrompt
                | CreatorError::MissingPromptOrPhoto
                | CreatorError::SubmissionInProgress
                | CreatorError::UnknownField(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CreatorError>;
