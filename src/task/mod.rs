//! Field-service task lifecycle.
//!
//! Tasks are created by managers, assigned to field employees, and moved
//! through pending, in-progress, postponed, done, and cancelled. Every status
//! change is persisted together with its audit entry. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
