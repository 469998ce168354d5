//! Request and response shapes of the submission listing endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::submission::Submission;

/// Query string accepted by all three listing modes.
///
/// Values are kept raw so malformed numbers fall back to defaults instead of
/// failing extraction.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PageParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub filter: Option<String>,
    pub form_id: Option<String>,
    pub app_id: Option<String>,
}

impl PageParams {
    /// Collects the known keys from decoded query pairs.
    ///
    /// The first occurrence of a repeated key wins; unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut params.page,
                "limit" => &mut params.limit,
                "filter" => &mut params.filter,
                "formId" => &mut params.form_id,
                "appId" => &mut params.app_id,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

/// Body of `POST /filter`.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterBody {
    pub form_id: Option<String>,
    pub app_id: Option<String>,
}

/// Body of `POST /search`.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBody {
    pub query_fields: Option<Map<String, Value>>,
    pub clause_operator: Option<String>,
}

/// Paginated listing response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionPage {
    pub submissions: Vec<Submission>,
    pub total: usize,
    pub pages: usize,
}
