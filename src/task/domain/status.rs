//! Task status lifecycle.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a task.
///
/// Storage uses the Portuguese spellings of the field teams. The legacy
/// four-state spellings `concluido` and `cancelado` are accepted when
/// reading and are always written back in canonical form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Created and waiting to be worked on.
    #[serde(rename = "pendente")]
    Pending,
    /// Someone is working on the task.
    #[serde(rename = "em_andamento")]
    InProgress,
    /// Rescheduled to a later date with a justification.
    #[serde(rename = "adiada")]
    Postponed,
    /// Finished.
    #[serde(rename = "concluida", alias = "concluido")]
    Done,
    /// Abandoned with a justification.
    #[serde(rename = "cancelada", alias = "cancelado")]
    Cancelled,
}

impl TaskStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::InProgress,
        Self::Postponed,
        Self::Done,
        Self::Cancelled,
    ];

    /// Statuses that trigger the hourly reminder.
    pub const AWAITING_WORK: [Self; 2] = [Self::Pending, Self::InProgress];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pendente",
            Self::InProgress => "em_andamento",
            Self::Postponed => "adiada",
            Self::Done => "concluida",
            Self::Cancelled => "cancelada",
        }
    }

    /// Returns `true` when no further status change is permitted.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Cancelled)
    }

    /// Returns `true` when the status may move to `target`.
    ///
    /// Terminal statuses accept nothing. A postponed task may be postponed
    /// again; every other self-transition is rejected.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        if self.is_terminal() {
            return false;
        }
        match target {
            Self::Pending => !matches!(self, Self::Pending),
            Self::InProgress => !matches!(self, Self::InProgress),
            Self::Postponed | Self::Done | Self::Cancelled => true,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pendente" => Ok(Self::Pending),
            "em_andamento" => Ok(Self::InProgress),
            "adiada" => Ok(Self::Postponed),
            "concluida" | "concluido" => Ok(Self::Done),
            "cancelada" | "cancelado" => Ok(Self::Cancelled),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}
