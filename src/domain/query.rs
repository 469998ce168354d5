//! Query descriptors describing which submission lookup to run.
//!
//! Each HTTP endpoint picks exactly one variant through its constructor; the
//! variant is never inferred from the shape of the request body.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Raised when a structured search names an operator other than `and`/`or`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid clause operator: {0:?}")]
pub struct InvalidClauseOperator(pub String);

/// How the predicates of a structured search are combined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClauseOperator {
    #[default]
    And,
    Or,
}

impl ClauseOperator {
    pub const fn as_str(self) -> &'static str {
        match self {
            ClauseOperator::And => "and",
            ClauseOperator::Or => "or",
        }
    }
}

impl FromStr for ClauseOperator {
    type Err = InvalidClauseOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "and" => Ok(ClauseOperator::And),
            "or" => Ok(ClauseOperator::Or),
            other => Err(InvalidClauseOperator(other.to_string())),
        }
    }
}

impl Display for ClauseOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Listing mode fixed by the endpoint that received the request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryMode {
    List,
    Filter,
    Search,
}

impl Display for QueryMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            QueryMode::List => "list",
            QueryMode::Filter => "filter",
            QueryMode::Search => "search",
        })
    }
}

/// In-memory description of a submission lookup, independent of transport.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryDescriptor {
    List {
        filter: Option<String>,
    },
    FieldFilter {
        form_id: Option<String>,
        app_id: Option<String>,
        filter: Option<String>,
    },
    StructuredSearch {
        query_fields: Map<String, Value>,
        clause_operator: ClauseOperator,
    },
}

impl QueryDescriptor {
    /// Plain listing with an optional free-text filter, used as given.
    pub fn list(filter: Option<String>) -> Self {
        QueryDescriptor::List { filter }
    }

    /// Form/app scoped listing. Absent scopes are passed through and match all.
    pub fn field_filter(
        form_id: Option<String>,
        app_id: Option<String>,
        filter: Option<String>,
    ) -> Self {
        QueryDescriptor::FieldFilter {
            form_id,
            app_id,
            filter,
        }
    }

    /// Structured search. Missing fields mean "match all"; a missing operator
    /// defaults to `and`, an unknown one is rejected.
    pub fn structured_search(
        query_fields: Option<Map<String, Value>>,
        clause_operator: Option<&str>,
    ) -> Result<Self, InvalidClauseOperator> {
        let clause_operator = match clause_operator {
            Some(raw) => raw.parse()?,
            None => ClauseOperator::default(),
        };
        Ok(QueryDescriptor::StructuredSearch {
            query_fields: query_fields.unwrap_or_default(),
            clause_operator,
        })
    }

    pub fn mode(&self) -> QueryMode {
        match self {
            QueryDescriptor::List { .. } => QueryMode::List,
            QueryDescriptor::FieldFilter { .. } => QueryMode::Filter,
            QueryDescriptor::StructuredSearch { .. } => QueryMode::Search,
        }
    }
}

/// Text a search predicate value is compared against: strings unquoted,
/// everything else in its JSON form.
pub fn predicate_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
