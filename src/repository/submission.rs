use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::query::{ClauseOperator, QueryDescriptor, predicate_text};
use crate::domain::submission::{NewSubmission, Submission};
use crate::models::submission::{
    NewSubmission as DbNewSubmission, Submission as DbSubmission, SubmissionField,
};
use crate::pagination::PageRequest;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, SubmissionReader, SubmissionWriter};
use crate::schema::{submission_fields, submissions};

type BoxedSubmissions<'a> = submissions::BoxedQuery<'a, Sqlite>;

const LIKE_ESCAPE: char = '\\';

/// `%filter%`, with `%`, `_` and the escape character itself matched literally.
fn like_pattern(filter: &str) -> String {
    let mut pattern = String::with_capacity(filter.len() + 2);
    pattern.push('%');
    for c in filter.chars() {
        if matches!(c, '%' | '_') || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Case-insensitive substring match on the submission columns and field values.
fn with_text_filter<'a>(query: BoxedSubmissions<'a>, filter: &str) -> BoxedSubmissions<'a> {
    let pattern = like_pattern(filter);

    let matching_fields = submission_fields::table
        .filter(
            submission_fields::value
                .like(pattern.clone())
                .escape(LIKE_ESCAPE),
        )
        .select(submission_fields::submission_id);

    query.filter(
        submissions::form_name
            .like(pattern.clone())
            .escape(LIKE_ESCAPE)
            .or(submissions::form_id.like(pattern.clone()).escape(LIKE_ESCAPE))
            .or(submissions::app_id.like(pattern.clone()).escape(LIKE_ESCAPE))
            .or(submissions::status.like(pattern).escape(LIKE_ESCAPE))
            .or(submissions::id.eq_any(matching_fields)),
    )
}

/// Builds the filtered (unordered, unpaginated) query for `descriptor`.
fn matching<'a>(descriptor: &'a QueryDescriptor) -> BoxedSubmissions<'a> {
    let mut query = submissions::table.into_boxed();

    match descriptor {
        QueryDescriptor::List { filter } => {
            if let Some(filter) = filter {
                query = with_text_filter(query, filter);
            }
        }
        QueryDescriptor::FieldFilter {
            form_id,
            app_id,
            filter,
        } => {
            if let Some(form_id) = form_id {
                query = query.filter(submissions::form_id.eq(form_id.as_str()));
            }
            if let Some(app_id) = app_id {
                query = query.filter(submissions::app_id.eq(app_id.as_str()));
            }
            if let Some(filter) = filter {
                query = with_text_filter(query, filter);
            }
        }
        QueryDescriptor::StructuredSearch {
            query_fields,
            clause_operator,
        } => {
            for (name, value) in query_fields {
                let matching_fields = submission_fields::table
                    .filter(submission_fields::name.eq(name.as_str()))
                    .filter(submission_fields::value.eq(predicate_text(value)))
                    .select(submission_fields::submission_id);

                query = match clause_operator {
                    ClauseOperator::And => query.filter(submissions::id.eq_any(matching_fields)),
                    ClauseOperator::Or => query.or_filter(submissions::id.eq_any(matching_fields)),
                };
            }
        }
    }

    query
}

impl SubmissionReader for DieselRepository {
    fn query_submissions(
        &self,
        descriptor: &QueryDescriptor,
        page: PageRequest,
    ) -> RepositoryResult<(usize, Vec<Submission>)> {
        let mut conn = self.pool.get()?;

        let limit = i64::try_from(page.limit).unwrap_or(i64::MAX);
        let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);

        let total: i64 = matching(descriptor).count().get_result(&mut conn)?;

        let rows = matching(descriptor)
            .order((submissions::submitted_at.desc(), submissions::id.desc()))
            .limit(limit)
            .offset(offset)
            .load::<DbSubmission>(&mut conn)?;

        let fields = SubmissionField::belonging_to(&rows)
            .load::<SubmissionField>(&mut conn)?
            .grouped_by(&rows);

        let items = rows
            .into_iter()
            .zip(fields)
            .map(|(row, fields)| {
                let fields = fields
                    .into_iter()
                    .map(|field| (field.name, field.value))
                    .collect();
                row.into_domain(fields).map_err(RepositoryError::from)
            })
            .collect::<RepositoryResult<Vec<Submission>>>()?;

        let total = usize::try_from(total)
            .map_err(|e| RepositoryError::Unexpected(format!("Invalid count: {e}")))?;

        Ok((total, items))
    }
}

impl SubmissionWriter for DieselRepository {
    fn create_submission(&self, new_submission: &NewSubmission) -> RepositoryResult<Submission> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let row = diesel::insert_into(submissions::table)
                .values(DbNewSubmission::from(new_submission))
                .get_result::<DbSubmission>(conn)?;

            let fields: Vec<SubmissionField> = new_submission
                .fields
                .iter()
                .map(|(name, value)| SubmissionField {
                    submission_id: row.id,
                    name: name.clone(),
                    value: value.clone(),
                })
                .collect();

            if !fields.is_empty() {
                diesel::insert_into(submission_fields::table)
                    .values(&fields)
                    .execute(conn)?;
            }

            Ok(row.into_domain(new_submission.fields.clone())?)
        })
    }
}
