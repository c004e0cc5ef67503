use thiserror::Error;

#[derive(Error, Debug)]
pub enum LanguageSaverError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Resource '{name}' could not be read: {reason}")]
    ResourceUnreadable { name: String, reason: String },

    #[error("Malformed line {line}: expected at least 5 tab-separated fields, found {fields}")]
    MalformedLine { line: usize, fields: usize },

    #[error("No entries loaded")]
    EmptyCollection,

    #[error("Invalid level {0}: levels start at 1")]
    InvalidLevel(u32),

    #[error("Session is no longer running")]
    SessionClosed,
}

impl From<std::io::Error> for LanguageSaverError {
    fn from(error: std::io::Error) -> Self {
        LanguageSaverError::Io(Box::new(error))
    }
}

impl<T> From<tokio::sync::mpsc::error::SendError<T>> for LanguageSaverError {
    fn from(_: tokio::sync::mpsc::error::SendError<T>) -> Self {
        LanguageSaverError::SessionClosed
    }
}
