use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::SubmissionId;

/// Completed form submission as stored for one environment.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: SubmissionId,
    pub form_id: String,
    pub app_id: String,
    pub form_name: String,
    pub status: String,
    pub submitted_at: NaiveDateTime,
    /// Field name to submitted value.
    pub fields: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewSubmission {
    pub form_id: String,
    pub app_id: String,
    pub form_name: String,
    pub status: String,
    pub submitted_at: NaiveDateTime,
    pub fields: BTreeMap<String, String>,
}

impl NewSubmission {
    #[must_use]
    pub fn new(
        form_id: String,
        app_id: String,
        form_name: String,
        submitted_at: NaiveDateTime,
        fields: BTreeMap<String, String>,
    ) -> Self {
        Self {
            form_id: form_id.trim().to_string(),
            app_id: app_id.trim().to_string(),
            form_name: form_name.trim().to_string(),
            status: "complete".to_string(),
            submitted_at,
            fields: fields
                .into_iter()
                .map(|(name, value)| (name.trim().to_string(), value))
                .filter(|(name, _)| !name.is_empty())
                .collect(),
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }
}
