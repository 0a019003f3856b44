use thiserror::Error;

use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid command script: {0}")]
    Script(#[from] serde_json::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl AppError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Config(_) => 78,
            AppError::Script(_) => 65,
            AppError::Domain(DomainError::Internal(_)) | AppError::Io(_) => 74,
            AppError::Domain(_) => 65,
        }
    }
}
