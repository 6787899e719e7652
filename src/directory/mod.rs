//! People and organisation: profiles, sectors, roles, and privileged user
//! management.
//!
//! Credentials live in an external identity provider reached through the
//! [`ports::IdentityProvider`] port. The directory only stores display
//! profiles, sector membership, and one role per identity.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
