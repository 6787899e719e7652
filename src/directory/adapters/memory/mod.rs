//! In-memory directory adapters.

mod directory;
mod identity;

pub use directory::InMemoryDirectoryRepository;
pub use identity::InMemoryIdentityProvider;
