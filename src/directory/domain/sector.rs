//! Organisational sectors.

use super::{DirectoryDomainError, SectorId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated, trimmed sector name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectorName(String);

impl SectorName {
    /// Creates a validated sector name.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::EmptySectorName`] when the value is
    /// blank.
    pub fn new(value: impl Into<String>) -> Result<Self, DirectoryDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DirectoryDomainError::EmptySectorName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Organisational grouping of profiles and tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sector {
    id: SectorId,
    name: SectorName,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Sector {
    /// Creates a new sector.
    #[must_use]
    pub fn new(name: SectorName, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: SectorId::new(),
            name,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a sector from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        id: SectorId,
        name: SectorName,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            created_at,
            updated_at,
        }
    }

    /// Returns the sector identifier.
    #[must_use]
    pub const fn id(&self) -> SectorId {
        self.id
    }

    /// Returns the sector name.
    #[must_use]
    pub const fn name(&self) -> &SectorName {
        &self.name
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Renames the sector.
    pub fn rename(&mut self, name: SectorName, clock: &impl Clock) {
        self.name = name;
        self.updated_at = clock.utc();
    }
}
