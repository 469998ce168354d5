//! Service layer coordinating repositories, configuration and validation.

use thiserror::Error;

use crate::domain::query::InvalidClauseOperator;
use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;

pub mod catalog;
pub mod submissions;

/// Errors surfaced by service functions to the route layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    InvalidClauseOperator(#[from] InvalidClauseOperator),

    #[error("configuration unavailable: {0}")]
    ConfigurationUnavailable(#[from] config::ConfigError),

    #[error("query failed: {0}")]
    QueryExecution(#[from] RepositoryError),

    #[error("invalid value: {0}")]
    TypeConstraint(#[from] TypeConstraintError),

    #[error("not found")]
    NotFound,
}

pub type ServiceResult<T> = Result<T, ServiceError>;
