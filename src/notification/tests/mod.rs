//! Unit tests for the notification module.

mod adapter_tests;
