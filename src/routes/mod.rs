//! HTTP routes and the helpers they share.

use actix_web::error::{BlockingError, InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;

use crate::dto::api::ErrorResponse;
use crate::services::{ServiceError, ServiceResult};

pub mod catalog;
pub mod environment;
pub mod submissions;

/// Registers every route under its `/{domain}/{environment}` prefix.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(
            web::scope("/{domain}/{environment}/appforms/submissions")
                .service(
                    web::resource(["", "/"]).route(web::get().to(submissions::list_submissions)),
                )
                .service(submissions::filter_submissions)
                .service(submissions::search_submissions),
        )
        .service(
            web::scope("/{domain}/{environment}/services")
                .service(web::resource(["", "/"]).route(web::get().to(catalog::list_services)))
                .service(catalog::get_service)
                .service(catalog::delete_service)
                .service(catalog::deploy_service),
        );
}

/// Malformed JSON bodies are answered with a 400 and a JSON error.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        let response = json_error(StatusCode::BAD_REQUEST, err.to_string());
        InternalError::from_response(err, response).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        let response = json_error(StatusCode::BAD_REQUEST, err.to_string());
        InternalError::from_response(err, response).into()
    })
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse::new(message))
}

/// Maps a service failure to its HTTP status. Server-side failures are logged
/// with `context` and answered with a generic message.
pub fn service_error_response(err: ServiceError, context: &str) -> HttpResponse {
    match err {
        ServiceError::InvalidClauseOperator(_) | ServiceError::TypeConstraint(_) => {
            json_error(StatusCode::BAD_REQUEST, err.to_string())
        }
        ServiceError::NotFound => json_error(StatusCode::NOT_FOUND, err.to_string()),
        ServiceError::ConfigurationUnavailable(_) | ServiceError::QueryExecution(_) => {
            log::error!("{context}: {err}");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, context)
        }
    }
}

/// Turns the outcome of a blocking service call into a JSON response.
pub fn respond<T: Serialize>(
    result: Result<ServiceResult<T>, BlockingError>,
    context: &str,
) -> HttpResponse {
    match result {
        Ok(Ok(value)) => HttpResponse::Ok().json(value),
        Ok(Err(err)) => service_error_response(err, context),
        Err(err) => {
            log::error!("{context}: blocking task failed: {err}");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, context)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::query::InvalidClauseOperator;
    use crate::repository::errors::RepositoryError;

    #[test]
    fn maps_service_errors_to_statuses() {
        let cases = [
            (
                ServiceError::InvalidClauseOperator(InvalidClauseOperator("x".to_string())),
                StatusCode::BAD_REQUEST,
            ),
            (ServiceError::NotFound, StatusCode::NOT_FOUND),
            (
                ServiceError::QueryExecution(RepositoryError::NotFound),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ServiceError::ConfigurationUnavailable(config::ConfigError::Frozen),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(service_error_response(err, "test").status(), status);
        }
    }
}
