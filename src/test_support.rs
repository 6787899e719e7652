//! Shared fixtures for unit tests.

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use std::sync::{Arc, Mutex};

use crate::directory::domain::{Role, UserId};
use crate::session::SessionContext;
use crate::task::domain::{ClientInfo, NewTaskData, Task, TaskKind, TaskPriority};

/// Clock frozen at a settable instant.
#[derive(Debug, Clone)]
pub(crate) struct FixedClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl FixedClock {
    pub(crate) fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub(crate) fn ymd_hms(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Self {
        let now = Utc
            .with_ymd_and_hms(year, month, day, hour, minute, 0)
            .single()
            .expect("valid fixed timestamp");
        Self::at(now)
    }

    pub(crate) fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().expect("clock lock") = now;
    }

    pub(crate) fn advance(&self, delta: TimeDelta) {
        let mut guard = self.now.lock().expect("clock lock");
        *guard += delta;
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock")
    }
}

pub(crate) fn session(role: Option<Role>) -> SessionContext {
    SessionContext::new(UserId::new(), None, role)
}

/// Builds a pending maintenance task for `client` with no optional fields.
pub(crate) fn task_for(client: &str) -> Task {
    let data = NewTaskData {
        kind: TaskKind::Maintenance,
        priority: TaskPriority::default(),
        client: ClientInfo::new(client).expect("valid client"),
        machine: None,
        scheduled_date: None,
        scheduled_time: None,
        deadline: None,
        value_cents: None,
        observations: None,
        creator_id: UserId::new(),
        sector_id: None,
    };
    Task::create(data, &FixedClock::ymd_hms(2025, 3, 10, 12, 0)).expect("valid task")
}
