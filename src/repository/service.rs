use chrono::Utc;
use diesel::prelude::*;

use crate::domain::service::{NewService, Service};
use crate::domain::types::ServiceGuid;
use crate::models::service::{NewService as DbNewService, Service as DbService};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, ServiceReader, ServiceWriter};
use crate::schema::services;

impl ServiceReader for DieselRepository {
    fn list_services(&self) -> RepositoryResult<Vec<Service>> {
        let mut conn = self.pool.get()?;

        services::table
            .order((services::name.asc(), services::guid.asc()))
            .load::<DbService>(&mut conn)?
            .into_iter()
            .map(|service| Service::try_from(service).map_err(RepositoryError::from))
            .collect()
    }

    fn get_service(&self, guid: &ServiceGuid) -> RepositoryResult<Option<Service>> {
        let mut conn = self.pool.get()?;

        let service = services::table
            .find(guid.as_str())
            .first::<DbService>(&mut conn)
            .optional()?;

        Ok(service.map(Service::try_from).transpose()?)
    }
}

impl ServiceWriter for DieselRepository {
    fn create_service(&self, new_service: &NewService) -> RepositoryResult<Service> {
        let mut conn = self.pool.get()?;

        let created = diesel::insert_into(services::table)
            .values(DbNewService::from(new_service))
            .get_result::<DbService>(&mut conn)?;

        Ok(Service::try_from(created)?)
    }

    fn delete_service(&self, guid: &ServiceGuid) -> RepositoryResult<bool> {
        let mut conn = self.pool.get()?;

        let deleted = diesel::delete(services::table.find(guid.as_str())).execute(&mut conn)?;

        Ok(deleted > 0)
    }

    fn mark_service_deployed(&self, guid: &ServiceGuid) -> RepositoryResult<Option<Service>> {
        let mut conn = self.pool.get()?;

        let updated = diesel::update(services::table.find(guid.as_str()))
            .set(services::deployed_at.eq(Some(Utc::now().naive_utc())))
            .get_result::<DbService>(&mut conn)
            .optional()?;

        Ok(updated.map(Service::try_from).transpose()?)
    }
}
