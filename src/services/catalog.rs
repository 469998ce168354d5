//! Services backing the environment's service catalog routes.

use crate::domain::service::Service;
use crate::domain::types::ServiceGuid;
use crate::repository::{ServiceReader, ServiceWriter};
use crate::services::{ServiceError, ServiceResult};

/// Lists every service registered in the environment.
pub fn list_services<R>(repo: &R) -> ServiceResult<Vec<Service>>
where
    R: ServiceReader + ?Sized,
{
    Ok(repo.list_services()?)
}

/// Loads a single service by its guid.
pub fn get_service<R>(repo: &R, guid: &str) -> ServiceResult<Service>
where
    R: ServiceReader + ?Sized,
{
    let guid = ServiceGuid::new(guid)?;

    repo.get_service(&guid)?.ok_or(ServiceError::NotFound)
}

/// Removes a service from the environment.
pub fn delete_service<R>(repo: &R, guid: &str) -> ServiceResult<()>
where
    R: ServiceWriter + ?Sized,
{
    let guid = ServiceGuid::new(guid)?;

    if repo.delete_service(&guid)? {
        log::info!("Deleted service {guid}");
        Ok(())
    } else {
        Err(ServiceError::NotFound)
    }
}

/// Records a deploy request for the service and returns its updated state.
pub fn deploy_service<R>(repo: &R, guid: &str) -> ServiceResult<Service>
where
    R: ServiceWriter + ?Sized,
{
    let guid = ServiceGuid::new(guid)?;

    let service = repo
        .mark_service_deployed(&guid)?
        .ok_or(ServiceError::NotFound)?;

    log::info!("Deploy requested for service {}", service.guid);

    Ok(service)
}
