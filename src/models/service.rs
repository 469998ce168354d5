//! Diesel models for registered services.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::service::{NewService as DomainNewService, Service as DomainService};
use crate::domain::types::{ServiceGuid, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::services)]
#[diesel(primary_key(guid))]
pub struct Service {
    pub guid: String,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub deployed_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::services)]
pub struct NewService<'a> {
    pub guid: &'a str,
    pub name: &'a str,
}

impl TryFrom<Service> for DomainService {
    type Error = TypeConstraintError;

    fn try_from(service: Service) -> Result<Self, Self::Error> {
        Ok(Self {
            guid: ServiceGuid::new(service.guid)?,
            name: service.name,
            created_at: service.created_at,
            deployed_at: service.deployed_at,
        })
    }
}

impl<'a> From<&'a DomainNewService> for NewService<'a> {
    fn from(service: &'a DomainNewService) -> Self {
        Self {
            guid: service.guid.as_str(),
            name: service.name.as_str(),
        }
    }
}
