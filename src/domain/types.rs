//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (positive identifiers, safe
//! environment names, non-empty service guids) so that once a value reaches
//! the domain layer it can be treated as trusted.
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest accepted domain or environment name.
pub const MAX_ENVIRONMENT_NAME_LEN: usize = 64;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided environment or domain name is not a safe path segment.
    #[error("invalid environment name: {0}")]
    InvalidEnvironmentName(String),
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(SubmissionId, "Unique identifier for a form submission.");

/// Domain or environment segment taken from the request path.
///
/// Used to build database file names, so only ASCII alphanumerics, `-` and
/// `_` are accepted.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct EnvironmentName(String);

impl EnvironmentName {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = value.into();
        if value.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        let valid = value.len() <= MAX_ENVIRONMENT_NAME_LEN
            && value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::InvalidEnvironmentName(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for EnvironmentName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies one `{domain}/{environment}` database.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EnvironmentKey {
    pub domain: EnvironmentName,
    pub environment: EnvironmentName,
}

impl EnvironmentKey {
    pub fn new(domain: &str, environment: &str) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            domain: EnvironmentName::new(domain)?,
            environment: EnvironmentName::new(environment)?,
        })
    }

    /// Location of the SQLite database backing this environment:
    /// `{database_dir}/{domain}/{environment}.db`.
    ///
    /// Segments never contain a path separator, so distinct keys never share
    /// a file.
    pub fn database_path(&self, database_dir: &Path) -> PathBuf {
        database_dir
            .join(self.domain.as_str())
            .join(format!("{}.db", self.environment))
    }
}

impl Display for EnvironmentKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.domain, self.environment)
    }
}

/// Trimmed, non-empty service identifier.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ServiceGuid(String);

impl ServiceGuid {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            Err(TypeConstraintError::EmptyString)
        } else {
            Ok(Self(trimmed))
        }
    }

    /// Borrow the guid as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ServiceGuid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ServiceGuid {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ServiceGuid> for String {
    fn from(value: ServiceGuid) -> Self {
        value.0
    }
}
