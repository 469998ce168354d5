use crate::db::DbPool;
use crate::domain::query::QueryDescriptor;
use crate::domain::service::{NewService, Service};
use crate::domain::submission::{NewSubmission, Submission};
use crate::domain::types::ServiceGuid;
use crate::pagination::PageRequest;
use crate::repository::errors::RepositoryResult;

pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod service;
pub mod submission;

/// Diesel-backed store for a single environment database.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Executes submission lookups described by a [`QueryDescriptor`].
pub trait SubmissionReader {
    /// Returns the total number of matches and the records of the requested page.
    fn query_submissions(
        &self,
        descriptor: &QueryDescriptor,
        page: PageRequest,
    ) -> RepositoryResult<(usize, Vec<Submission>)>;
}

pub trait SubmissionWriter {
    fn create_submission(&self, new_submission: &NewSubmission) -> RepositoryResult<Submission>;
}

pub trait ServiceReader {
    fn list_services(&self) -> RepositoryResult<Vec<Service>>;
    fn get_service(&self, guid: &ServiceGuid) -> RepositoryResult<Option<Service>>;
}

pub trait ServiceWriter {
    fn create_service(&self, new_service: &NewService) -> RepositoryResult<Service>;
    /// Returns `false` when no service with `guid` existed.
    fn delete_service(&self, guid: &ServiceGuid) -> RepositoryResult<bool>;
    /// Stamps the deploy time; `None` when no service with `guid` exists.
    fn mark_service_deployed(&self, guid: &ServiceGuid) -> RepositoryResult<Option<Service>>;
}
