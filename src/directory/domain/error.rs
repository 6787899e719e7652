//! Error types for directory value validation and parsing.

use thiserror::Error;

/// Errors returned while constructing directory values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryDomainError {
    /// The profile display name is empty after trimming.
    #[error("profile name must not be empty")]
    EmptyProfileName,

    /// The sector name is empty after trimming.
    #[error("sector name must not be empty")]
    EmptySectorName,

    /// The e-mail address is not plausibly an address.
    #[error("invalid e-mail address '{0}'")]
    InvalidEmail(String),

    /// The password is empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Error returned while parsing roles from persistence or requests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
