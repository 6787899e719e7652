//! Explicit caller context passed to every service operation.
//!
//! There is no process-wide "current user". Callers build a
//! [`SessionContext`] through a [`SessionLoader`] and hand it to services.

mod context;
mod loader;

pub use context::SessionContext;
pub use loader::{AuthEvent, SessionError, SessionLoader, SessionResult};
