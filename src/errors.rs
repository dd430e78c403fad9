use thiserror::Error;

/// Errors that can occur while talking to Teambox or materializing its
/// responses.
#[derive(Error, Debug)]
pub enum TeamboxError {
    #[error("malformed reference at position {position}: {message}")]
    MalformedReference { position: usize, message: String },

    #[error("unresolved reference: no {target_type} with id {target_id} in response references")]
    ReferenceResolution {
        target_type: String,
        target_id: String,
    },

    #[error("malformed response: {message}")]
    MalformedResponse { message: String },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("http error: {0}")]
    Http(#[from] ureq::Error),
}

/// Convenience alias for results using `TeamboxError`.
pub type Result<T> = std::result::Result<T, TeamboxError>;
