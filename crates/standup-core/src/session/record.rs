use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A record older than this (measured from `session_end_date`) is not
/// offered for resumption.
pub const STALE_AFTER_MS: i64 = 90 * 60 * 1000;

/// Snapshot of the running session, persisted on every tick so that a
/// restart can offer to pick it up again.
///
/// Stored as `{"sessionStartTime": <ms>, "sessionEndDate": <ms>}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrevSessionRecord {
    pub session_start_time: i64,
    /// Last time the session was seen alive.
    pub session_end_date: i64,
}

impl PrevSessionRecord {
    /// Builds a record, clamping the end so it never precedes the start.
    pub fn new(session_start_time: i64, session_end_date: i64) -> Self {
        Self {
            session_start_time,
            session_end_date: session_end_date.max(session_start_time),
        }
    }

    /// Parses a stored value. Anything that is not a JSON object with both
    /// fields, holds a timestamp before the epoch or past chrono's range, or
    /// whose end precedes its start, is malformed and yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let value: serde_json::Value = serde_json::from_str(raw).ok()?;
        if !value.is_object() {
            return None;
        }
        let record: Self = serde_json::from_value(value).ok()?;
        let in_range = is_valid_timestamp(record.session_start_time)
            && is_valid_timestamp(record.session_end_date);
        (in_range && record.session_end_date >= record.session_start_time).then_some(record)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Milliseconds between the end of the record and `now_ms`.
    pub fn gap_ms(&self, now_ms: i64) -> i64 {
        now_ms.saturating_sub(self.session_end_date)
    }

    pub fn is_stale(&self, now_ms: i64) -> bool {
        self.gap_ms(now_ms) >= STALE_AFTER_MS
    }

    /// Local time of day the session was last seen, e.g. `14:02:11`.
    pub fn ended_at_local(&self) -> String {
        DateTime::<Utc>::from_timestamp_millis(self.session_end_date)
            .map(|dt| dt.with_timezone(&Local).format("%H:%M:%S").to_string())
            .unwrap_or_else(|| self.session_end_date.to_string())
    }
}

fn is_valid_timestamp(ms: i64) -> bool {
    ms >= 0 && DateTime::<Utc>::from_timestamp_millis(ms).is_some()
}
