//! Port contracts for the directory module.

pub mod identity;
pub mod repository;

pub use identity::{IdentityError, IdentityProvider, IdentityResult};
pub use repository::{DirectoryRepository, DirectoryRepositoryError, DirectoryRepositoryResult};
