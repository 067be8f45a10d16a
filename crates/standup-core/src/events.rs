use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::RestoreOutcome;

/// Every state change in the tracker or scheduler produces an Event.
/// Hosts log them or print them; nothing in the core depends on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// The previous-session record was looked at during activation.
    SessionRestored {
        outcome: RestoreOutcome,
        start_time_ms: i64,
        at: DateTime<Utc>,
    },
    SchedulerStarted {
        interval_ms: u64,
        at: DateTime<Utc>,
    },
    Ticked {
        tick_count: u64,
        at: DateTime<Utc>,
    },
    /// A break notification was shown.
    BreakReminder {
        hour_count: u32,
        at: DateTime<Utc>,
    },
    ElapsedRendered {
        text: String,
        warning: bool,
        at: DateTime<Utc>,
    },
    /// Both features were switched off; the timer is cancelled for the run.
    SchedulerStopped {
        tick_count: u64,
        at: DateTime<Utc>,
    },
}

/// Converts a host clock reading into an event timestamp.
pub(crate) fn at(now_ms: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(now_ms).unwrap_or_default()
}
