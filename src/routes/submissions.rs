use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, post, web};

use crate::domain::query::QueryMode;
use crate::dto::submissions::{FilterBody, PageParams, SearchBody};
use crate::routes::environment::EnvironmentRepository;
use crate::routes::{json_error, respond};
use crate::services::submissions as submissions_service;
use crate::settings::SettingsProvider;

/// Log context naming the listing mode and the raw pagination input.
fn request_context(mode: QueryMode, params: &PageParams) -> String {
    format!(
        "Error in {mode} submissions request (page={:?}, limit={:?})",
        params.page, params.limit
    )
}

/// Query pairs are taken as-is so repeated or malformed keys never fail the
/// request.
type RawQuery = web::Query<Vec<(String, String)>>;

fn has_json_content_type(req: &HttpRequest) -> bool {
    let content_type = req.content_type();
    content_type.eq_ignore_ascii_case("application/json")
        || content_type.to_ascii_lowercase().ends_with("+json")
}

/// Scope of `POST /filter`. An empty or non-JSON body carries no scope; a JSON
/// body that does not deserialize is rejected.
fn filter_scope(req: &HttpRequest, body: &[u8]) -> Result<FilterBody, HttpResponse> {
    if body.is_empty() || !has_json_content_type(req) {
        return Ok(FilterBody::default());
    }

    serde_json::from_slice(body).map_err(|err| {
        json_error(
            StatusCode::BAD_REQUEST,
            JsonPayloadError::Deserialize(err).to_string(),
        )
    })
}

pub async fn list_submissions(
    repo: EnvironmentRepository,
    settings: web::Data<SettingsProvider>,
    query: RawQuery,
) -> HttpResponse {
    let params = PageParams::from_pairs(query.into_inner());
    let context = request_context(QueryMode::List, &params);

    let result = web::block(move || {
        submissions_service::list_submissions(&*repo, settings.get_ref(), params)
    })
    .await;

    respond(result, &context)
}

#[post("/filter")]
pub async fn filter_submissions(
    req: HttpRequest,
    repo: EnvironmentRepository,
    settings: web::Data<SettingsProvider>,
    query: RawQuery,
    body: web::Bytes,
) -> HttpResponse {
    let params = PageParams::from_pairs(query.into_inner());
    let body = match filter_scope(&req, &body) {
        Ok(body) => body,
        Err(response) => return response,
    };
    let context = request_context(QueryMode::Filter, &params);

    let result = web::block(move || {
        submissions_service::filter_submissions(&*repo, settings.get_ref(), params, body)
    })
    .await;

    respond(result, &context)
}

#[post("/search")]
pub async fn search_submissions(
    repo: EnvironmentRepository,
    settings: web::Data<SettingsProvider>,
    query: RawQuery,
    web::Json(body): web::Json<SearchBody>,
) -> HttpResponse {
    let params = PageParams::from_pairs(query.into_inner());
    let context = request_context(QueryMode::Search, &params);

    let result = web::block(move || {
        submissions_service::search_submissions(&*repo, settings.get_ref(), params, body)
    })
    .await;

    respond(result, &context)
}
