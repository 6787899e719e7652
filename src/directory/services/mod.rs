//! Application services for the directory module.

mod sectors;
mod user_admin;

pub use sectors::{SectorService, SectorServiceError, SectorServiceResult};
pub use user_admin::{
    CreateUserRequest, UserAdminError, UserAdminResult, UserAdminService, UserSummary,
};
