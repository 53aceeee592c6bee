//! Closed error union and the standard error payload.

use crate::association::{ports::AssociationRepositoryError, services::AssociationLifecycleError};
use crate::task::{ports::TaskRepositoryError, services::TaskLifecycleError};
use crate::user::{ports::UserRepositoryError, services::UserLifecycleError};
use chrono::SecondsFormat;
use mockable::Clock;
use serde::Serialize;

/// Closed union of client-visible error categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed, missing, or out-of-range input; one message per
    /// violated constraint.
    Validation(Vec<String>),
    /// A lookup yielded no row.
    NotFound(String),
    /// A uniqueness or reference-holding constraint was violated.
    Conflict(String),
    /// The caller is not authenticated.
    Unauthorized(String),
    /// A relation field names a nonexistent entity.
    InvalidReference(String),
    /// Anything unanticipated. Carries no detail to the client.
    Internal,
}

impl ErrorKind {
    /// Creates a validation error from constraint messages.
    #[must_use]
    pub fn validation(messages: impl IntoIterator<Item = String>) -> Self {
        Self::Validation(messages.into_iter().collect())
    }

    /// Creates the standard unauthenticated error.
    #[must_use]
    pub fn unauthorized() -> Self {
        Self::Unauthorized("Not authenticated".to_owned())
    }

    /// Returns the HTTP-equivalent status code.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Unauthorized(_) => 401,
            Self::NotFound(_) => 404,
            Self::Conflict(_) => 409,
            Self::InvalidReference(_) => 422,
            Self::Internal => 500,
        }
    }

    /// Returns the standardized machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::InvalidReference(_) => "INVALID_REFERENCE",
            Self::Internal => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(_) => "Validation failed",
            Self::NotFound(message)
            | Self::Conflict(message)
            | Self::Unauthorized(message)
            | Self::InvalidReference(message) => message,
            Self::Internal => "Internal server error",
        }
    }

    /// Returns the per-constraint messages for validation errors.
    #[must_use]
    pub fn details(&self) -> Option<&[String]> {
        match self {
            Self::Validation(messages) => Some(messages),
            _ => None,
        }
    }
}

/// Standard error payload served by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    status_code: u16,
    code: &'static str,
    message: String,
    path: String,
    timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<String>>,
}

impl ErrorBody {
    /// Maps an error kind onto the wire shape for the given request path.
    ///
    /// The timestamp comes from the injected clock, formatted as ISO-8601
    /// with millisecond precision.
    #[must_use]
    pub fn new(kind: &ErrorKind, path: impl Into<String>, clock: &impl Clock) -> Self {
        Self {
            status_code: kind.status_code(),
            code: kind.code(),
            message: kind.message().to_owned(),
            path: path.into(),
            timestamp: clock.utc().to_rfc3339_opts(SecondsFormat::Millis, true),
            details: kind.details().map(<[String]>::to_vec),
        }
    }

    /// Returns the HTTP-equivalent status code.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Returns the standardized machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.code
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the request path the error occurred on.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the ISO-8601 timestamp.
    #[must_use]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Returns the per-constraint messages, present only for validation
    /// failures.
    #[must_use]
    pub fn details(&self) -> Option<&[String]> {
        self.details.as_deref()
    }
}

impl From<AssociationLifecycleError> for ErrorKind {
    fn from(err: AssociationLifecycleError) -> Self {
        match err {
            AssociationLifecycleError::Domain(domain) => {
                Self::Validation(vec![domain.to_string()])
            }
            AssociationLifecycleError::NotFound(_) | AssociationLifecycleError::CnpjNotFound(_) => {
                Self::NotFound("Association not found".to_owned())
            }
            AssociationLifecycleError::Repository(repository) => match repository {
                AssociationRepositoryError::DuplicateAssociation(_) => {
                    Self::Conflict(repository.to_string())
                }
                AssociationRepositoryError::NotFound(_) => {
                    Self::NotFound("Association not found".to_owned())
                }
                AssociationRepositoryError::Persistence(_) => Self::Internal,
            },
        }
    }
}

impl From<UserLifecycleError> for ErrorKind {
    fn from(err: UserLifecycleError) -> Self {
        match err {
            UserLifecycleError::Domain(domain) => Self::Validation(vec![domain.to_string()]),
            UserLifecycleError::NotFound(_) | UserLifecycleError::EmailNotFound(_) => {
                Self::NotFound("User not found".to_owned())
            }
            UserLifecycleError::Repository(repository) => match repository {
                UserRepositoryError::DuplicateUser(_) => Self::Conflict(repository.to_string()),
                UserRepositoryError::DuplicateEmail(_) => {
                    Self::Conflict("E-mail already in use".to_owned())
                }
                UserRepositoryError::StillReferenced(_) => Self::Conflict(repository.to_string()),
                UserRepositoryError::NotFound(_) => Self::NotFound("User not found".to_owned()),
                UserRepositoryError::Persistence(_) => Self::Internal,
            },
        }
    }
}

impl From<TaskLifecycleError> for ErrorKind {
    fn from(err: TaskLifecycleError) -> Self {
        match err {
            TaskLifecycleError::Domain(domain) => Self::Validation(vec![domain.to_string()]),
            TaskLifecycleError::NotFound(_) => Self::NotFound("Task not found".to_owned()),
            TaskLifecycleError::Repository(repository) => match repository {
                TaskRepositoryError::DuplicateTask(_) => Self::Conflict(repository.to_string()),
                TaskRepositoryError::NotFound(_) => Self::NotFound("Task not found".to_owned()),
                TaskRepositoryError::UnknownCreator(_)
                | TaskRepositoryError::UnknownAssociation(_)
                | TaskRepositoryError::UnknownTeamMember(_) => {
                    Self::InvalidReference(repository.to_string())
                }
                TaskRepositoryError::Persistence(_) => Self::Internal,
            },
        }
    }
}
