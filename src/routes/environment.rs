//! Resolves the environment database addressed by the request path.

use std::future::Future;
use std::ops::Deref;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{Error, FromRequest, HttpRequest, web};

use crate::db::EnvironmentDatabases;
use crate::domain::types::EnvironmentKey;
use crate::repository::DieselRepository;
use crate::routes::json_error;

/// Repository for the `{domain}/{environment}` named in the request path.
///
/// The environment database is created and migrated on first use.
pub struct EnvironmentRepository(DieselRepository);

impl Deref for EnvironmentRepository {
    type Target = DieselRepository;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for EnvironmentRepository {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let databases = req.app_data::<web::Data<EnvironmentDatabases>>().cloned();
        let key = EnvironmentKey::new(
            req.match_info().get("domain").unwrap_or_default(),
            req.match_info().get("environment").unwrap_or_default(),
        );

        Box::pin(async move {
            let key = key.map_err(|err| {
                let response = json_error(StatusCode::BAD_REQUEST, err.to_string());
                InternalError::from_response(err, response)
            })?;

            let Some(databases) = databases else {
                log::error!("Environment databases are not registered as app data");
                return Err(InternalError::from_response(
                    "missing environment databases",
                    json_error(StatusCode::INTERNAL_SERVER_ERROR, "Environment unavailable"),
                )
                .into());
            };

            let pool = web::block(move || databases.get_or_create(&key))
                .await?
                .map_err(|err| {
                    log::error!("Failed to provision environment database: {err}");
                    InternalError::from_response(
                        err,
                        json_error(StatusCode::INTERNAL_SERVER_ERROR, "Environment unavailable"),
                    )
                })?;

            Ok(Self(DieselRepository::new(pool)))
        })
    }
}
