//! Notification orchestration services.

pub mod gate;

pub use gate::NotificationGate;
