use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortalError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Malformed account directory at '{path}': {reason}")]
    MalformedDirectory { path: String, reason: String },
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid role: {0}. Allowed: admin, user")]
    InvalidRole(String),
}

impl From<serde_json::Error> for PortalError {
    fn from(err: serde_json::Error) -> Self {
        PortalError::Serialization(err.to_string())
    }
}
