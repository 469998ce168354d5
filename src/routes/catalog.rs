use actix_web::http::StatusCode;
use actix_web::{HttpResponse, delete, get, post, web};
use serde::Deserialize;

use crate::routes::environment::EnvironmentRepository;
use crate::routes::{json_error, respond, service_error_response};
use crate::services::catalog as catalog_service;

const CONTEXT: &str = "Error in service request";

#[derive(Deserialize)]
pub struct ServicePath {
    guid: String,
}

pub async fn list_services(repo: EnvironmentRepository) -> HttpResponse {
    let result = web::block(move || catalog_service::list_services(&*repo)).await;
    respond(result, CONTEXT)
}

#[get("/{guid}")]
pub async fn get_service(repo: EnvironmentRepository, path: web::Path<ServicePath>) -> HttpResponse {
    let guid = path.into_inner().guid;
    let result = web::block(move || catalog_service::get_service(&*repo, &guid)).await;
    respond(result, CONTEXT)
}

#[delete("/{guid}")]
pub async fn delete_service(
    repo: EnvironmentRepository,
    path: web::Path<ServicePath>,
) -> HttpResponse {
    let guid = path.into_inner().guid;
    match web::block(move || catalog_service::delete_service(&*repo, &guid)).await {
        Ok(Ok(())) => HttpResponse::NoContent().finish(),
        Ok(Err(err)) => service_error_response(err, CONTEXT),
        Err(err) => {
            log::error!("{CONTEXT}: blocking task failed: {err}");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, CONTEXT)
        }
    }
}

#[post("/{guid}/deploy")]
pub async fn deploy_service(
    repo: EnvironmentRepository,
    path: web::Path<ServicePath>,
) -> HttpResponse {
    let guid = path.into_inner().guid;
    let result = web::block(move || catalog_service::deploy_service(&*repo, &guid)).await;
    respond(result, CONTEXT)
}
