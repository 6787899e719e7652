//! Proactive notifications for field employees.
//!
//! A [`services::NotificationGate`] reminds the signed-in identity of its
//! pending and in-progress tasks once per hour during business hours, and
//! announces new assignments as they happen. Delivery, throttling state, and
//! the task source are reached through the ports in [`ports`].

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
