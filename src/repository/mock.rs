//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::query::QueryDescriptor;
use crate::domain::service::{NewService, Service};
use crate::domain::submission::{NewSubmission, Submission};
use crate::domain::types::ServiceGuid;
use crate::pagination::PageRequest;
use crate::repository::errors::RepositoryResult;
use crate::repository::{ServiceReader, ServiceWriter, SubmissionReader, SubmissionWriter};

mock! {
    pub Repository {}

    impl SubmissionReader for Repository {
        fn query_submissions(
            &self,
            descriptor: &QueryDescriptor,
            page: PageRequest,
        ) -> RepositoryResult<(usize, Vec<Submission>)>;
    }

    impl SubmissionWriter for Repository {
        fn create_submission(&self, new_submission: &NewSubmission) -> RepositoryResult<Submission>;
    }

    impl ServiceReader for Repository {
        fn list_services(&self) -> RepositoryResult<Vec<Service>>;
        fn get_service(&self, guid: &ServiceGuid) -> RepositoryResult<Option<Service>>;
    }

    impl ServiceWriter for Repository {
        fn create_service(&self, new_service: &NewService) -> RepositoryResult<Service>;
        fn delete_service(&self, guid: &ServiceGuid) -> RepositoryResult<bool>;
        fn mark_service_deployed(&self, guid: &ServiceGuid) -> RepositoryResult<Option<Service>>;
    }
}
