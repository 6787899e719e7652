//! Unit tests for the directory module.
