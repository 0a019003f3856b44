use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Terms and conditions must be accepted before submitting the order")]
    TermsNotAccepted,
    #[error("Line item index {index} is out of range (draft has {len} items)")]
    ItemIndexOutOfRange { index: usize, len: usize },
    #[error("Order has already been submitted")]
    AlreadySubmitted,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Internal error: {0}")]
    Internal(String),
}
