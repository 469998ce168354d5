use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::ServiceGuid;

/// MBaaS service registered in an environment.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub guid: ServiceGuid,
    pub name: String,
    pub created_at: NaiveDateTime,
    /// Time of the most recent deploy request, if any.
    pub deployed_at: Option<NaiveDateTime>,
}

#[derive(Clone, Debug)]
pub struct NewService {
    pub guid: ServiceGuid,
    pub name: String,
}

impl NewService {
    #[must_use]
    pub fn new(guid: ServiceGuid, name: String) -> Self {
        Self {
            guid,
            name: name.trim().to_string(),
        }
    }
}
