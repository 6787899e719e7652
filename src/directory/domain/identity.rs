//! Values handed to the external identity provider.

use super::DirectoryDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimally validated e-mail address, trimmed and lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated e-mail address.
    ///
    /// Only the shape `local@domain` is checked; the identity provider is
    /// the authority on deliverability.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::InvalidEmail`] when the value has no
    /// local part, no domain, or contains whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, DirectoryDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();
        let is_valid = normalized
            .split_once('@')
            .is_some_and(|(local, domain)| {
                !local.is_empty() && !domain.is_empty() && !domain.contains('@')
            })
            && !normalized.chars().any(char::is_whitespace);
        if !is_valid {
            return Err(DirectoryDomainError::InvalidEmail(raw));
        }
        Ok(Self(normalized))
    }

    /// Returns the address as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Request to create an identity at the identity provider.
#[derive(Clone, PartialEq, Eq)]
pub struct NewIdentity {
    email: EmailAddress,
    password: String,
    display_name: String,
}

impl NewIdentity {
    /// Creates a validated identity request.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::EmptyPassword`] when the password is
    /// empty.
    pub fn new(
        email: EmailAddress,
        password: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Result<Self, DirectoryDomainError> {
        let password_value = password.into();
        if password_value.is_empty() {
            return Err(DirectoryDomainError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: password_value,
            display_name: display_name.into(),
        })
    }

    /// Returns the e-mail address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the plain-text password destined for the identity provider.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Returns the display name stored as identity metadata.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

impl fmt::Debug for NewIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewIdentity")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("display_name", &self.display_name)
            .finish()
    }
}
