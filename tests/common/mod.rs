#![allow(dead_code)]

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDateTime, Utc};
use mbaas_api::db::{DbPool, establish_connection_pool, run_migrations};
use mbaas_api::domain::submission::{NewSubmission, Submission};
use mbaas_api::repository::{DieselRepository, SubmissionWriter};
use tempfile::TempDir;

/// Migrated SQLite database living in a temporary directory.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(name);
        let pool = establish_connection_pool(path.to_str().expect("utf-8 path"))
            .expect("connection pool");
        run_migrations(&pool).expect("migrations");
        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool.clone())
    }
}

pub fn base_time() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Inserts a submission submitted `minutes_ago` minutes before `base`.
pub fn seed_submission(
    repo: &DieselRepository,
    base: NaiveDateTime,
    minutes_ago: i64,
    form_id: &str,
    app_id: &str,
    form_name: &str,
    fields: &[(&str, &str)],
) -> Submission {
    let fields: BTreeMap<String, String> = fields
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();
    let new_submission = NewSubmission::new(
        form_id.to_string(),
        app_id.to_string(),
        form_name.to_string(),
        base - Duration::minutes(minutes_ago),
        fields,
    );
    repo.create_submission(&new_submission)
        .expect("submission created")
}
