//! Session tracker.
//!
//! Owns the session start time. Elapsed time is always derived from it and
//! the host clock; nothing is accumulated between ticks.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::record::PrevSessionRecord;
use crate::error::Result;
use crate::host::{Clock, Presenter, ResumeChoice, SessionStore};

const MS_PER_MINUTE: i64 = 60_000;

/// What happened to the stored previous-session record during activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestoreOutcome {
    NoRecord,
    Malformed,
    Stale,
    Resumed,
    Discarded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTracker {
    start_time_ms: i64,
}

impl SessionTracker {
    /// Starts a fresh session at the clock's current time.
    pub fn initialize<C: Clock + ?Sized>(clock: &C) -> Self {
        Self {
            start_time_ms: clock.now_ms(),
        }
    }

    /// Tracker for a session that began at `start_time_ms`.
    pub fn from_start(start_time_ms: i64) -> Self {
        Self { start_time_ms }
    }

    pub fn start_time_ms(&self) -> i64 {
        self.start_time_ms
    }

    /// Consumes the stored previous-session record.
    ///
    /// A recent record is offered to the user; stale or malformed ones are
    /// dropped silently. The stored record is cleared in every branch.
    pub fn restore_if_recent<H>(&mut self, host: &mut H) -> Result<RestoreOutcome>
    where
        H: Clock + SessionStore + Presenter + ?Sized,
    {
        let outcome = match host.load_prev_session()? {
            None => RestoreOutcome::NoRecord,
            Some(raw) => match PrevSessionRecord::parse(&raw) {
                None => {
                    warn!(%raw, "discarding malformed previous-session record");
                    RestoreOutcome::Malformed
                }
                Some(record) => self.offer(host, record)?,
            },
        };
        host.clear_prev_session()?;
        Ok(outcome)
    }

    fn offer<H>(&mut self, host: &mut H, record: PrevSessionRecord) -> Result<RestoreOutcome>
    where
        H: Clock + Presenter + ?Sized,
    {
        let now_ms = host.now_ms();
        let gap_ms = record.gap_ms(now_ms);
        if record.is_stale(now_ms) {
            debug!(gap_ms, "previous session is stale");
            return Ok(RestoreOutcome::Stale);
        }

        let message = format!(
            "Would you like to resume your previous session? ({})",
            record.ended_at_local()
        );
        match host.prompt_resume(&message)? {
            ResumeChoice::Resume => {
                self.start_time_ms = record.session_start_time;
                info!(start_time_ms = self.start_time_ms, "resumed previous session");
                Ok(RestoreOutcome::Resumed)
            }
            ResumeChoice::Discard => Ok(RestoreOutcome::Discarded),
        }
    }

    /// Current snapshot of the session, ending now.
    pub fn snapshot(&self, now_ms: i64) -> PrevSessionRecord {
        PrevSessionRecord::new(self.start_time_ms, now_ms)
    }

    /// Writes the snapshot to the store, replacing any earlier one.
    pub fn snapshot_and_persist<H>(&self, host: &mut H) -> Result<()>
    where
        H: Clock + SessionStore + ?Sized,
    {
        let record = self.snapshot(host.now_ms());
        host.save_prev_session(&record)
    }

    /// Whole minutes since the session started, rounded half up.
    pub fn elapsed_minutes(&self, now_ms: i64) -> i64 {
        let elapsed_ms = now_ms.saturating_sub(self.start_time_ms).max(0);
        elapsed_ms.saturating_add(MS_PER_MINUTE / 2) / MS_PER_MINUTE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::STALE_AFTER_MS;
    use crate::testing::FakeHost;
    use proptest::prelude::*;

    const NOW: i64 = 1_700_000_000_000;

    fn host_with_record(start: i64, end: i64) -> FakeHost {
        let mut host = FakeHost::at(NOW);
        host.stored = Some(PrevSessionRecord::new(start, end).to_json().unwrap());
        host
    }

    #[test]
    fn initialize_uses_clock() {
        let host = FakeHost::at(NOW);
        assert_eq!(SessionTracker::initialize(&host).start_time_ms(), NOW);
    }

    #[test]
    fn no_record_is_cleared_without_prompt() {
        let mut host = FakeHost::at(NOW);
        let mut tracker = SessionTracker::initialize(&host);
        let outcome = tracker.restore_if_recent(&mut host).unwrap();
        assert_eq!(outcome, RestoreOutcome::NoRecord);
        assert!(host.prompts.is_empty());
        assert_eq!(host.clears, 1);
    }

    #[test]
    fn malformed_record_is_treated_as_absent() {
        let mut host = FakeHost::at(NOW);
        host.stored = Some("\"yesterday\"".into());
        let mut tracker = SessionTracker::initialize(&host);
        let outcome = tracker.restore_if_recent(&mut host).unwrap();
        assert_eq!(outcome, RestoreOutcome::Malformed);
        assert!(host.prompts.is_empty());
        assert!(host.stored.is_none());
        assert_eq!(tracker.start_time_ms(), NOW);
    }

    #[test]
    fn resume_adopts_stored_start() {
        let mut host = host_with_record(NOW - 3_600_000, NOW - 60_000);
        host.answer = ResumeChoice::Resume;
        let mut tracker = SessionTracker::initialize(&host);
        let outcome = tracker.restore_if_recent(&mut host).unwrap();
        assert_eq!(outcome, RestoreOutcome::Resumed);
        assert_eq!(tracker.start_time_ms(), NOW - 3_600_000);
        assert_eq!(host.prompts.len(), 1);
        assert!(host.prompts[0].starts_with("Would you like to resume your previous session? ("));
        assert!(host.stored.is_none());
    }

    #[test]
    fn discard_keeps_fresh_start() {
        let mut host = host_with_record(NOW - 3_600_000, NOW - 60_000);
        host.answer = ResumeChoice::Discard;
        let mut tracker = SessionTracker::initialize(&host);
        let outcome = tracker.restore_if_recent(&mut host).unwrap();
        assert_eq!(outcome, RestoreOutcome::Discarded);
        assert_eq!(tracker.start_time_ms(), NOW);
        assert!(host.stored.is_none());
    }

    #[test]
    fn snapshot_overwrites_store() {
        let mut host = host_with_record(1, 2);
        let tracker = SessionTracker::initialize(&host);
        host.now_ms += 5_000;
        tracker.snapshot_and_persist(&mut host).unwrap();
        let stored = PrevSessionRecord::parse(host.stored.as_deref().unwrap()).unwrap();
        assert_eq!(stored, PrevSessionRecord::new(NOW, NOW + 5_000));
    }

    #[test]
    fn elapsed_minutes_rounds_half_up() {
        let tracker = SessionTracker::initialize(&FakeHost::at(NOW));
        assert_eq!(tracker.elapsed_minutes(NOW), 0);
        assert_eq!(tracker.elapsed_minutes(NOW + 29_999), 0);
        assert_eq!(tracker.elapsed_minutes(NOW + 30_000), 1);
        assert_eq!(tracker.elapsed_minutes(NOW + 300 * 60_000), 300);
    }

    #[test]
    fn elapsed_minutes_never_negative() {
        let tracker = SessionTracker::initialize(&FakeHost::at(NOW));
        assert_eq!(tracker.elapsed_minutes(NOW - 10 * 60_000), 0);
    }

    #[test]
    fn extreme_stored_timestamps_are_malformed() {
        let extremes = [
            (i64::MIN, i64::MIN),
            (i64::MAX, i64::MAX),
            (i64::MIN, NOW - 60_000),
        ];
        for (start, end) in extremes {
            let mut host = FakeHost::at(NOW);
            host.stored = Some(format!(r#"{{"sessionStartTime":{start},"sessionEndDate":{end}}}"#));
            host.answer = ResumeChoice::Resume;
            let mut tracker = SessionTracker::initialize(&host);
            let outcome = tracker.restore_if_recent(&mut host).unwrap();
            assert_eq!(outcome, RestoreOutcome::Malformed);
            assert!(host.prompts.is_empty());
            assert!(host.stored.is_none());
            assert_eq!(tracker.start_time_ms(), NOW);
            assert_eq!(tracker.elapsed_minutes(NOW + 60_000), 1);
        }
    }

    #[test]
    fn elapsed_minutes_saturates_at_extremes() {
        let tracker = SessionTracker::from_start(i64::MIN);
        assert_eq!(tracker.elapsed_minutes(i64::MAX), i64::MAX / MS_PER_MINUTE);
        assert_eq!(SessionTracker::from_start(i64::MAX).elapsed_minutes(i64::MIN), 0);
    }

    proptest! {
        #[test]
        fn stale_records_are_dropped_without_prompting(
            gap in STALE_AFTER_MS..STALE_AFTER_MS * 200,
        ) {
            let end = NOW - gap;
            let mut host = host_with_record(end - 3_600_000, end);
            let mut tracker = SessionTracker::initialize(&host);
            let outcome = tracker.restore_if_recent(&mut host).unwrap();
            prop_assert_eq!(outcome, RestoreOutcome::Stale);
            prop_assert!(host.prompts.is_empty());
            prop_assert!(host.stored.is_none());
            prop_assert_eq!(tracker.start_time_ms(), NOW);
        }

        #[test]
        fn recent_records_always_prompt(gap in 0..STALE_AFTER_MS, resume in any::<bool>()) {
            let end = NOW - gap;
            let start = end - 600_000;
            let mut host = host_with_record(start, end);
            host.answer = if resume { ResumeChoice::Resume } else { ResumeChoice::Discard };
            let mut tracker = SessionTracker::initialize(&host);
            tracker.restore_if_recent(&mut host).unwrap();
            prop_assert_eq!(host.prompts.len(), 1);
            prop_assert!(host.stored.is_none());
            let expected = if resume { start } else { NOW };
            prop_assert_eq!(tracker.start_time_ms(), expected);
        }
    }
}
