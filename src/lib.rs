//! Itinerary: field-service task tracking for technicians and their managers.
//!
//! This crate provides the task lifecycle, proactive notifications, report
//! views, and the privileged user-management functions behind the itinerary
//! application.
//!
//! # Architecture
//!
//! Itinerary follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, APIs, etc.)
//!
//! # Modules
//!
//! - [`task`]: Task creation, status lifecycle, assignees, comments, history
//! - [`directory`]: Profiles, sectors, roles, and privileged user management
//! - [`session`]: Explicit caller context passed to every service
//! - [`notification`]: Business-hours gated reminders
//! - [`report`]: Dashboard, productivity, and weekly calendar views
//! - [`http`]: HTTP surface for the privileged functions
//! - [`config`]: Environment configuration
//! - [`telemetry`]: Logging bootstrap
//! - [`shutdown`]: Ctrl+C forwarding for the binaries

pub mod config;
pub mod directory;
pub mod http;
pub mod notification;
pub mod report;
pub mod session;
pub mod shutdown;
pub mod task;
pub mod telemetry;

#[cfg(test)]
mod test_support;
