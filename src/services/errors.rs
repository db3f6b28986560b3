use thiserror::Error;

use crate::domain::types::TypeConstraintError;
use crate::forms::{FieldErrors, FormError};
use crate::repository::errors::RepositoryError;

/// Errors surfaced by the service layer to the routes.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("validation failed")]
    Validation(FieldErrors),

    #[error("{0}")]
    Form(String),

    #[error("type constraint violation: {0}")]
    TypeConstraint(String),

    #[error("repository error: {0}")]
    Repository(RepositoryError),

    #[error("internal error")]
    Internal,
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// First message per field, joined for a flash message.
    pub fn summary(&self) -> String {
        match self {
            ServiceError::Validation(errors) => errors
                .iter()
                .filter_map(|(field, messages)| {
                    messages.first().map(|message| format!("{field}: {message}"))
                })
                .collect::<Vec<_>>()
                .join("; "),
            other => other.to_string(),
        }
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::Repository(other),
        }
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(err.to_string())
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Validation(err.field_errors())
    }
}
