//! Profiles attached to authenticated identities.

use super::{DirectoryDomainError, SectorId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated, trimmed profile display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileName(String);

impl ProfileName {
    /// Creates a validated profile name.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::EmptyProfileName`] when the value is
    /// blank.
    pub fn new(value: impl Into<String>) -> Result<Self, DirectoryDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DirectoryDomainError::EmptyProfileName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Profile of one authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    user_id: UserId,
    name: ProfileName,
    avatar_url: Option<String>,
    sector_id: Option<SectorId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProfileData {
    /// Owning identity.
    pub user_id: UserId,
    /// Display name.
    pub name: ProfileName,
    /// Optional avatar URL.
    pub avatar_url: Option<String>,
    /// Optional sector membership.
    pub sector_id: Option<SectorId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Creates a profile for a freshly created identity.
    #[must_use]
    pub fn new(user_id: UserId, name: ProfileName, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            user_id,
            name,
            avatar_url: None,
            sector_id: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a profile from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProfileData) -> Self {
        Self {
            user_id: data.user_id,
            name: data.name,
            avatar_url: data.avatar_url,
            sector_id: data.sector_id,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the owning identity.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &ProfileName {
        &self.name
    }

    /// Returns the avatar URL, if any.
    #[must_use]
    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }

    /// Returns the sector membership, if any.
    #[must_use]
    pub const fn sector_id(&self) -> Option<SectorId> {
        self.sector_id
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

    /// Renames the profile.
    pub fn rename(&mut self, name: ProfileName, clock: &impl Clock) {
        self.name = name;
        self.updated_at = clock.utc();
    }

    /// Moves the profile into a sector, or out of any sector with `None`.
    pub fn assign_sector(&mut self, sector_id: Option<SectorId>, clock: &impl Clock) {
        self.sector_id = sector_id;
        self.updated_at = clock.utc();
    }

    /// Drops the sector membership after the sector itself was deleted.
    /// `updated_at` is left unchanged.
    pub const fn clear_sector(&mut self) {
        self.sector_id = None;
    }

    /// Replaces the avatar URL.
    pub fn set_avatar_url(&mut self, avatar_url: Option<String>, clock: &impl Clock) {
        self.avatar_url = avatar_url.filter(|url| !url.trim().is_empty());
        self.updated_at = clock.utc();
    }
}
