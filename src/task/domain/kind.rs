//! Task classification: type of field work and priority.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of field work a task represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskKind {
    /// Delivering goods to a client.
    #[serde(rename = "entrega")]
    Delivery,
    /// Collecting goods from a client.
    #[serde(rename = "retirada")]
    Pickup,
    /// Sales visit.
    #[serde(rename = "venda")]
    Sale,
    /// Maintenance or repair.
    #[serde(rename = "manutencao")]
    Maintenance,
    /// Warranty service.
    #[serde(rename = "garantia")]
    Warranty,
    /// Back-office work.
    #[serde(rename = "administrativo")]
    Administrative,
    /// Customer support.
    #[serde(rename = "suporte")]
    Support,
}

impl TaskKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Delivery => "entrega",
            Self::Pickup => "retirada",
            Self::Sale => "venda",
            Self::Maintenance => "manutencao",
            Self::Warranty => "garantia",
            Self::Administrative => "administrativo",
            Self::Support => "suporte",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskKind {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "entrega" => Ok(Self::Delivery),
            "retirada" => Ok(Self::Pickup),
            "venda" => Ok(Self::Sale),
            "manutencao" => Ok(Self::Maintenance),
            "garantia" => Ok(Self::Warranty),
            "administrativo" => Ok(Self::Administrative),
            "suporte" => Ok(Self::Support),
            _ => Err(TaskDomainError::InvalidTaskKind(value.to_owned())),
        }
    }
}

/// Urgency of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskPriority {
    /// Urgent.
    #[serde(rename = "alta")]
    High,
    /// Normal urgency.
    #[default]
    #[serde(rename = "media")]
    Medium,
    /// Can wait.
    #[serde(rename = "baixa")]
    Low,
}

impl TaskPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "alta",
            Self::Medium => "media",
            Self::Low => "baixa",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "alta" => Ok(Self::High),
            "media" => Ok(Self::Medium),
            "baixa" => Ok(Self::Low),
            _ => Err(TaskDomainError::InvalidPriority(value.to_owned())),
        }
    }
}
