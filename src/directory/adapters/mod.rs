//! Adapters for the directory module.
//!
//! - [`memory`]: thread-safe in-memory directory and identity provider
//! - [`postgres::PostgresDirectoryRepository`]: `PostgreSQL` persistence using
//!   Diesel ORM
//! - [`gotrue::GoTrueIdentityProvider`]: HTTP client for a GoTrue-compatible
//!   authentication service

pub mod gotrue;
pub mod memory;
pub mod postgres;
