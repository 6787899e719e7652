//! Step definitions for task status action scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
