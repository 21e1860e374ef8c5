//! Workflow error taxonomy.
//!
//! Every variant carries the message shown to clients. Underlying store or
//! filesystem causes are logged where the translation happens and are not
//! exposed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Malformed or missing input, or a violated business rule.
    Validation(String),
    /// The requested name is already taken.
    Conflict(String),
    /// The named font or group does not exist.
    NotFound(String),
    /// Delete blocked by an active group membership.
    ReferentialGuard(String),
    /// Database failure outside a unit of work.
    Store(String),
    /// Blob storage failure.
    Io(String),
    /// A multi-statement unit of work was rolled back.
    Transaction(String),
}

impl ServiceError {
    /// User-facing message.
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(message)
            | Self::Conflict(message)
            | Self::NotFound(message)
            | Self::ReferentialGuard(message)
            | Self::Store(message)
            | Self::Io(message)
            | Self::Transaction(message) => message,
        }
    }

    /// HTTP status code the outer layer answers with.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Conflict(_) | Self::ReferentialGuard(_) => 409,
            Self::Store(_) | Self::Io(_) | Self::Transaction(_) => 500,
        }
    }

    /// Stable machine-readable code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Conflict(_) => "conflict",
            Self::NotFound(_) => "not_found",
            Self::ReferentialGuard(_) => "referential_guard",
            Self::Store(_) => "store",
            Self::Io(_) => "io",
            Self::Transaction(_) => "transaction",
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl Error for ServiceError {}
