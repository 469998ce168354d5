//! Submission listing, filtering and structured search.
//!
//! Every entry point follows the same steps: read the page-size bounds,
//! resolve page/limit, build the descriptor for the endpoint's mode, run it
//! through the [`SubmissionReader`] and shape the result into a
//! [`SubmissionPage`].

use config::ConfigError;

use crate::domain::query::QueryDescriptor;
use crate::dto::submissions::{FilterBody, PageParams, SearchBody, SubmissionPage};
use crate::pagination::{LimitBounds, PageRequest, resolve_page_request, total_pages};
use crate::repository::SubmissionReader;
use crate::services::{ServiceError, ServiceResult};
use crate::settings::{ConfigKey, ConfigProvider};

fn positive_value<C>(config: &C, key: ConfigKey) -> ServiceResult<usize>
where
    C: ConfigProvider + ?Sized,
{
    match config.get_value(key)? {
        0 => Err(ServiceError::ConfigurationUnavailable(ConfigError::Message(
            format!("{} must be greater than zero", key.as_str()),
        ))),
        value => Ok(value),
    }
}

/// Reads the page-size bounds for the current request.
pub fn load_bounds<C>(config: &C) -> ServiceResult<LimitBounds>
where
    C: ConfigProvider + ?Sized,
{
    Ok(LimitBounds {
        max_limit: positive_value(config, ConfigKey::PaginationMaxLimit)?,
        default_limit: positive_value(config, ConfigKey::PaginationDefaultLimit)?,
    })
}

fn resolve_page<C>(config: &C, params: &PageParams) -> ServiceResult<PageRequest>
where
    C: ConfigProvider + ?Sized,
{
    let bounds = load_bounds(config)?;
    Ok(resolve_page_request(
        params.page.as_deref(),
        params.limit.as_deref(),
        bounds,
    ))
}

/// Runs `descriptor` for one page and shapes the paginated envelope.
pub fn execute<R>(
    repo: &R,
    descriptor: &QueryDescriptor,
    page: PageRequest,
) -> ServiceResult<SubmissionPage>
where
    R: SubmissionReader + ?Sized,
{
    let (total, mut submissions) = repo.query_submissions(descriptor, page)?;

    if submissions.len() > page.limit {
        log::warn!(
            "Store returned {} submissions for limit {}, truncating",
            submissions.len(),
            page.limit
        );
        submissions.truncate(page.limit);
    }

    Ok(SubmissionPage {
        submissions,
        total,
        pages: total_pages(total, page.limit),
    })
}

/// `GET /`: lists submissions, optionally narrowed by a free-text filter.
pub fn list_submissions<R, C>(
    repo: &R,
    config: &C,
    params: PageParams,
) -> ServiceResult<SubmissionPage>
where
    R: SubmissionReader + ?Sized,
    C: ConfigProvider + ?Sized,
{
    let page = resolve_page(config, &params)?;
    let descriptor = QueryDescriptor::list(params.filter);
    execute(repo, &descriptor, page)
}

/// `POST /filter`: lists submissions scoped to a form and/or app.
///
/// Scopes in the body win over the ones in the query string.
pub fn filter_submissions<R, C>(
    repo: &R,
    config: &C,
    params: PageParams,
    body: FilterBody,
) -> ServiceResult<SubmissionPage>
where
    R: SubmissionReader + ?Sized,
    C: ConfigProvider + ?Sized,
{
    let page = resolve_page(config, &params)?;
    let descriptor = QueryDescriptor::field_filter(
        body.form_id.or(params.form_id),
        body.app_id.or(params.app_id),
        params.filter,
    );
    execute(repo, &descriptor, page)
}

/// `POST /search`: structured search over submission field values.
pub fn search_submissions<R, C>(
    repo: &R,
    config: &C,
    params: PageParams,
    body: SearchBody,
) -> ServiceResult<SubmissionPage>
where
    R: SubmissionReader + ?Sized,
    C: ConfigProvider + ?Sized,
{
    let descriptor =
        QueryDescriptor::structured_search(body.query_fields, body.clause_operator.as_deref())?;
    let page = resolve_page(config, &params)?;
    execute(repo, &descriptor, page)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::Utc;
    use serde_json::{Map, json};

    use super::*;
    use crate::domain::query::{ClauseOperator, InvalidClauseOperator};
    use crate::domain::submission::Submission;
    use crate::domain::types::SubmissionId;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use crate::settings::mock::MockSettings;

    /// Config returning `max_limit = 50` and `default_limit = 20`.
    fn settings() -> MockSettings {
        let mut settings = MockSettings::new();
        settings.expect_get_value().returning(|key| match key {
            ConfigKey::PaginationMaxLimit => Ok(50),
            ConfigKey::PaginationDefaultLimit => Ok(20),
        });
        settings
    }

    fn submission(id: i32) -> Submission {
        Submission {
            id: SubmissionId::new(id).expect("valid id"),
            form_id: "someformid".to_string(),
            app_id: "someprojectid".to_string(),
            form_name: "Inspection".to_string(),
            status: "complete".to_string(),
            submitted_at: Utc::now().naive_utc(),
            fields: BTreeMap::new(),
        }
    }

    fn params(query: &[(&str, &str)]) -> PageParams {
        PageParams::from_pairs(
            query
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        )
    }

    /// Scenario: list with page, limit and filter reaches the store unchanged.
    #[test]
    fn list_passes_page_limit_and_filter() {
        let mut repo = MockRepository::new();
        repo.expect_query_submissions()
            .withf(|descriptor, page| {
                descriptor == &QueryDescriptor::list(Some("testfiltervalue".to_string()))
                    && *page == PageRequest { page: 3, limit: 20 }
            })
            .times(1)
            .returning(|_, _| Ok((45, vec![submission(1), submission(2)])));

        let result = list_submissions(
            &repo,
            &settings(),
            params(&[("page", "3"), ("limit", "20"), ("filter", "testfiltervalue")]),
        )
        .expect("should list");

        assert_eq!(result.total, 45);
        assert_eq!(result.pages, 3);
        assert_eq!(result.submissions.len(), 2);
    }

    /// Scenario: filter forwards both scopes and the free-text filter.
    #[test]
    fn filter_passes_scopes_and_filter() {
        let mut repo = MockRepository::new();
        repo.expect_query_submissions()
            .withf(|descriptor, page| {
                descriptor
                    == &QueryDescriptor::field_filter(
                        Some("someformid".to_string()),
                        Some("someprojectid".to_string()),
                        Some("testfiltervalue".to_string()),
                    )
                    && *page == PageRequest { page: 3, limit: 20 }
            })
            .times(1)
            .returning(|_, _| Ok((0, vec![])));

        let body = FilterBody {
            form_id: Some("someformid".to_string()),
            app_id: Some("someprojectid".to_string()),
        };
        let result = filter_submissions(
            &repo,
            &settings(),
            params(&[("page", "3"), ("limit", "20"), ("filter", "testfiltervalue")]),
            body,
        )
        .expect("should filter");

        assert_eq!(result.total, 0);
        assert_eq!(result.pages, 0);
    }

    #[test]
    fn filter_body_scopes_override_query_scopes() {
        let mut repo = MockRepository::new();
        repo.expect_query_submissions()
            .withf(|descriptor, _| {
                descriptor
                    == &QueryDescriptor::field_filter(
                        Some("body-form".to_string()),
                        Some("query-app".to_string()),
                        None,
                    )
            })
            .times(1)
            .returning(|_, _| Ok((0, vec![])));

        let body = FilterBody {
            form_id: Some("body-form".to_string()),
            app_id: None,
        };
        filter_submissions(
            &repo,
            &settings(),
            params(&[("formId", "query-form"), ("appId", "query-app")]),
            body,
        )
        .expect("should filter");
    }

    #[test]
    fn filter_without_scopes_passes_none() {
        let mut repo = MockRepository::new();
        repo.expect_query_submissions()
            .withf(|descriptor, page| {
                descriptor == &QueryDescriptor::field_filter(None, None, None)
                    && *page == PageRequest { page: 1, limit: 20 }
            })
            .times(1)
            .returning(|_, _| Ok((0, vec![])));

        filter_submissions(&repo, &settings(), PageParams::default(), FilterBody::default())
            .expect("should filter");
    }

    /// Scenario: search with an empty field map and `and`.
    #[test]
    fn search_passes_empty_fields_and_operator() {
        let mut repo = MockRepository::new();
        repo.expect_query_submissions()
            .withf(|descriptor, page| {
                descriptor
                    == &QueryDescriptor::StructuredSearch {
                        query_fields: Map::new(),
                        clause_operator: ClauseOperator::And,
                    }
                    && *page == PageRequest { page: 3, limit: 20 }
            })
            .times(1)
            .returning(|_, _| Ok((1, vec![submission(9)])));

        let body = SearchBody {
            query_fields: Some(Map::new()),
            clause_operator: Some("and".to_string()),
        };
        let result = search_submissions(
            &repo,
            &settings(),
            params(&[("page", "3"), ("limit", "20")]),
            body,
        )
        .expect("should search");

        assert_eq!(result.pages, 1);
    }

    #[test]
    fn search_rejects_unknown_operator_before_store() {
        let mut repo = MockRepository::new();
        repo.expect_query_submissions().times(0);
        let mut config = MockSettings::new();
        config.expect_get_value().times(0);

        let body = SearchBody {
            query_fields: json!({"colour": "red"}).as_object().cloned(),
            clause_operator: Some("xor".to_string()),
        };
        let result = search_submissions(&repo, &config, PageParams::default(), body);

        assert!(matches!(
            result,
            Err(ServiceError::InvalidClauseOperator(InvalidClauseOperator(op))) if op == "xor"
        ));
    }

    /// Scenario: a limit above the configured maximum is clamped.
    #[test]
    fn limit_is_clamped_to_max() {
        let mut repo = MockRepository::new();
        repo.expect_query_submissions()
            .withf(|_, page| *page == PageRequest { page: 1, limit: 50 })
            .times(1)
            .returning(|_, _| Ok((120, vec![])));

        let result = list_submissions(&repo, &settings(), params(&[("limit", "500")]))
            .expect("should list");

        assert_eq!(result.pages, 3);
    }

    #[test]
    fn malformed_pagination_uses_defaults() {
        let mut repo = MockRepository::new();
        repo.expect_query_submissions()
            .withf(|_, page| *page == PageRequest { page: 1, limit: 20 })
            .times(1)
            .returning(|_, _| Ok((0, vec![])));

        list_submissions(&repo, &settings(), params(&[("page", "-2"), ("limit", "lots")]))
            .expect("should list");
    }

    #[test]
    fn configuration_failure_is_surfaced() {
        let mut repo = MockRepository::new();
        repo.expect_query_submissions().times(0);
        let mut config = MockSettings::new();
        config
            .expect_get_value()
            .returning(|key| Err(ConfigError::NotFound(key.as_str().to_string())));

        let result = list_submissions(&repo, &config, PageParams::default());

        assert!(matches!(
            result,
            Err(ServiceError::ConfigurationUnavailable(ConfigError::NotFound(_)))
        ));
    }

    #[test]
    fn zero_limit_configuration_is_rejected() {
        let mut config = MockSettings::new();
        config.expect_get_value().returning(|_| Ok(0));

        let result = load_bounds(&config);
        assert!(matches!(result, Err(ServiceError::ConfigurationUnavailable(_))));
    }

    #[test]
    fn store_failure_is_surfaced() {
        let mut repo = MockRepository::new();
        repo.expect_query_submissions()
            .times(1)
            .returning(|_, _| Err(RepositoryError::ConnectionError("down".to_string())));

        let result = list_submissions(&repo, &settings(), PageParams::default());

        assert!(matches!(
            result,
            Err(ServiceError::QueryExecution(RepositoryError::ConnectionError(_)))
        ));
    }

    #[test]
    fn execute_preserves_order_and_truncates_overflow() {
        let mut repo = MockRepository::new();
        repo.expect_query_submissions()
            .returning(|_, _| Ok((3, vec![submission(3), submission(1), submission(2)])));

        let page = PageRequest { page: 1, limit: 2 };
        let result = execute(&repo, &QueryDescriptor::list(None), page).expect("should run");

        let ids: Vec<i32> = result.submissions.iter().map(|s| s.id.get()).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(result.pages, 2);
    }

    #[test]
    fn repeated_requests_are_identical() {
        let fixed = submission(4);
        let mut repo = MockRepository::new();
        repo.expect_query_submissions()
            .times(2)
            .returning(move |_, _| Ok((1, vec![fixed.clone()])));

        let first = list_submissions(&repo, &settings(), params(&[("page", "1")]))
            .expect("first");
        let second = list_submissions(&repo, &settings(), params(&[("page", "1")]))
            .expect("second");

        assert_eq!(first, second);
    }
}
