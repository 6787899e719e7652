//! Result of one reminder check.

/// What a single reminder check did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// The check ran outside business hours; nothing was queried.
    OutsideBusinessHours,
    /// A reminder already fired during the current local hour.
    AlreadyNotifiedThisHour,
    /// The notifier has no delivery permission.
    PermissionNotGranted,
    /// The caller has no pending or in-progress tasks.
    NothingPending,
    /// A reminder was delivered.
    Notified {
        /// Number of open tasks reported.
        pending: usize,
    },
    /// A dependency failed; the error was logged and swallowed.
    Failed,
}
