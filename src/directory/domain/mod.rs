//! Domain model for people and organisation: profiles, sectors, and roles.

mod error;
mod identity;
mod ids;
mod profile;
mod role;
mod sector;

pub use error::{DirectoryDomainError, ParseRoleError};
pub use identity::{EmailAddress, NewIdentity};
pub use ids::{SectorId, UserId};
pub use profile::{PersistedProfileData, Profile, ProfileName};
pub use role::Role;
pub use sector::{Sector, SectorName};
