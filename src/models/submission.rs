//! Diesel models for stored form submissions.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::submission::{
    NewSubmission as DomainNewSubmission, Submission as DomainSubmission,
};
use crate::domain::types::{SubmissionId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::submissions)]
/// Diesel model for [`crate::domain::submission::Submission`].
pub struct Submission {
    pub id: i32,
    pub form_id: String,
    pub app_id: String,
    pub form_name: String,
    pub status: String,
    pub submitted_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::submissions)]
pub struct NewSubmission<'a> {
    pub form_id: &'a str,
    pub app_id: &'a str,
    pub form_name: &'a str,
    pub status: &'a str,
    pub submitted_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Associations, Insertable)]
#[diesel(table_name = crate::schema::submission_fields)]
#[diesel(belongs_to(Submission, foreign_key = submission_id))]
#[diesel(primary_key(submission_id, name))]
pub struct SubmissionField {
    pub submission_id: i32,
    pub name: String,
    pub value: String,
}

impl Submission {
    /// Combines the row with its loaded field values.
    pub fn into_domain(
        self,
        fields: BTreeMap<String, String>,
    ) -> Result<DomainSubmission, TypeConstraintError> {
        Ok(DomainSubmission {
            id: SubmissionId::new(self.id)?,
            form_id: self.form_id,
            app_id: self.app_id,
            form_name: self.form_name,
            status: self.status,
            submitted_at: self.submitted_at,
            fields,
        })
    }
}

impl<'a> From<&'a DomainNewSubmission> for NewSubmission<'a> {
    fn from(submission: &'a DomainNewSubmission) -> Self {
        Self {
            form_id: submission.form_id.as_str(),
            app_id: submission.app_id.as_str(),
            form_name: submission.form_name.as_str(),
            status: submission.status.as_str(),
            submitted_at: submission.submitted_at,
        }
    }
}
