use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Order not found")]
    NotFound,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Order number already exists: {0}")]
    DuplicateOrderNumber(String),
    #[error("Referenced row does not exist: {0}")]
    MissingReference(String),
    #[error("Constraint violated: {0}")]
    ConstraintViolation(String),
    #[error("Internal error: {0}")]
    Internal(String),
}
