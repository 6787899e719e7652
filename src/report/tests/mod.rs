//! Unit tests for the report views.


use crate::directory::domain::UserId;
use crate::task::domain::{
    ClientInfo, PersistedTaskData, Task, TaskId, TaskKind, TaskPriority, TaskStatus,
};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn instant(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .expect("valid instant")
}

/// Builder for persisted task snapshots.
pub(super) struct TaskSnapshot(PersistedTaskData);

impl TaskSnapshot {
    pub(super) fn new(client: &str, status: TaskStatus) -> Self {
        let created_at = instant(2025, 3, 10, 12);
        Self(PersistedTaskData {
            id: TaskId::new(),
            kind: TaskKind::Maintenance,
            priority: TaskPriority::default(),
            status,
            status_justification: None,
            client: ClientInfo::new(client).expect("valid client"),
            machine: None,
            scheduled_date: None,
            scheduled_time: None,
            deadline: None,
            value_cents: None,
            observations: None,
            creator_id: UserId::new(),
            sector_id: None,
            created_at,
            updated_at: created_at,
        })
    }

    pub(super) fn created(mut self, at: DateTime<Utc>) -> Self {
        self.0.created_at = at;
        self.0.updated_at = at;
        self
    }

    pub(super) fn deadline(mut self, at: DateTime<Utc>) -> Self {
        self.0.deadline = Some(at);
        self
    }

    pub(super) fn scheduled(mut self, on: NaiveDate, at: Option<(u32, u32)>) -> Self {
        self.0.scheduled_date = Some(on);
        self.0.scheduled_time =
            at.and_then(|(hour, minute)| NaiveTime::from_hms_opt(hour, minute, 0));
        self
    }

    pub(super) fn build(self) -> Task {
        Task::from_persisted(self.0)
    }
}
