//! Client contact details attached to a task.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};

/// Contact details of the client a task is performed for.
///
/// Only the name is mandatory. Optional fields are trimmed and blank values
/// collapse to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    name: String,
    phone: Option<String>,
    address: Option<String>,
    cep: Option<String>,
    time_limit: Option<String>,
}

impl ClientInfo {
    /// Creates client details with a validated name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyClientName`] when the name is blank.
    pub fn new(name: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyClientName);
        }
        Ok(Self {
            name: trimmed.to_owned(),
            phone: None,
            address: None,
            cep: None,
            time_limit: None,
        })
    }

    /// Sets the phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = non_blank(phone.into());
        self
    }

    /// Sets the street address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = non_blank(address.into());
        self
    }

    /// Sets the postal code.
    #[must_use]
    pub fn with_cep(mut self, cep: impl Into<String>) -> Self {
        self.cep = non_blank(cep.into());
        self
    }

    /// Sets the client's availability window, free text such as "até 17h".
    #[must_use]
    pub fn with_time_limit(mut self, time_limit: impl Into<String>) -> Self {
        self.time_limit = non_blank(time_limit.into());
        self
    }

    /// Returns the client name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the phone number, if any.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Returns the street address, if any.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Returns the postal code, if any.
    #[must_use]
    pub fn cep(&self) -> Option<&str> {
        self.cep.as_deref()
    }

    /// Returns the availability window, if any.
    #[must_use]
    pub fn time_limit(&self) -> Option<&str> {
        self.time_limit.as_deref()
    }
}

/// Trims a value and maps blank strings to `None`.
pub(crate) fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
