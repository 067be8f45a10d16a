//! Tick scheduler.
//!
//! Like the session tracker, the scheduler owns no thread or timer. The
//! host fires `tick()` every `interval_ms()` and routes the manual refresh
//! action to `refresh()`.
//!
//! ## State Transitions
//!
//! ```text
//! Stopped -> Running -> Stopped (terminal for the run)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let (mut scheduler, _events) = TickScheduler::activate(&mut host)?;
//! while scheduler.state() == SchedulerState::Running {
//!     sleep(scheduler.interval_ms());
//!     scheduler.tick(&mut host)?;
//! }
//! ```

use tracing::{debug, info};

use super::indicator::render_elapsed;
use crate::error::Result;
use crate::events::{at, Event};
use crate::host::{Clock, Host, Presenter, SessionStore};
use crate::session::SessionTracker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Stopped,
    Running,
}

/// Per-run context: the session, the counters and the timer state.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    tracker: SessionTracker,
    state: SchedulerState,
    /// Period the host timer was armed with. Fixed for the run.
    interval_ms: u64,
    tick_count: u64,
    /// Break notifications issued this run.
    hour_count: u32,
    /// Set once the timer has been cancelled; it is never re-armed.
    cancelled: bool,
}

impl TickScheduler {
    pub fn new(tracker: SessionTracker) -> Self {
        Self {
            tracker,
            state: SchedulerState::Stopped,
            interval_ms: 0,
            tick_count: 0,
            hour_count: 0,
            cancelled: false,
        }
    }

    /// Full activation: start a session, offer to resume the previous one,
    /// arm the timer if any feature is on and draw the indicator once.
    pub fn activate<H: Host + ?Sized>(host: &mut H) -> Result<(Self, Vec<Event>)> {
        let settings = host.read_settings()?;
        let mut tracker = SessionTracker::initialize(&*host);
        let outcome = tracker.restore_if_recent(host)?;

        let mut events = vec![Event::SessionRestored {
            outcome,
            start_time_ms: tracker.start_time_ms(),
            at: at(host.now_ms()),
        }];

        let mut scheduler = Self::new(tracker);
        if settings.any_enabled() {
            events.extend(scheduler.start(host, settings.refresh_time)?);
        } else {
            info!("hourly notification and elapsed time are both disabled; not starting");
        }
        if settings.enable_elapsed_time {
            events.push(scheduler.refresh(host)?);
        }
        Ok((scheduler, events))
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn tracker(&self) -> &SessionTracker {
        &self.tracker
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn hour_count(&self) -> u32 {
        self.hour_count
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Arms the timer. Persists one snapshot right away so a crash before
    /// the first tick is still recoverable.
    ///
    /// Returns `None` if already running or if the run has been cancelled.
    pub fn start<H>(&mut self, host: &mut H, interval_ms: u64) -> Result<Option<Event>>
    where
        H: Clock + SessionStore + ?Sized,
    {
        if self.state == SchedulerState::Running || self.cancelled {
            return Ok(None);
        }
        self.tracker.snapshot_and_persist(host)?;
        self.state = SchedulerState::Running;
        self.interval_ms = interval_ms.max(1);
        info!(interval_ms = self.interval_ms, "scheduler started");
        Ok(Some(Event::SchedulerStarted {
            interval_ms: self.interval_ms,
            at: at(host.now_ms()),
        }))
    }

    /// One timer firing. Ignored unless running.
    pub fn tick<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<Vec<Event>> {
        if self.state != SchedulerState::Running {
            return Ok(Vec::new());
        }

        self.tick_count += 1;
        let mut events = vec![Event::Ticked {
            tick_count: self.tick_count,
            at: at(host.now_ms()),
        }];
        self.tracker.snapshot_and_persist(host)?;

        let settings = host.read_settings()?;
        if !settings.any_enabled() {
            events.push(self.stop(host)?);
            return Ok(events);
        }

        if settings.enable_hourly_notification && self.tick_count % settings.ticks_per_hour() == 0 {
            events.push(self.remind(host)?);
        }
        if settings.enable_elapsed_time {
            events.push(self.refresh(host)?);
        }
        debug!(tick_count = self.tick_count, "tick");
        Ok(events)
    }

    /// Re-renders the elapsed-time indicator from the current clock.
    pub fn refresh<H>(&self, host: &mut H) -> Result<Event>
    where
        H: Clock + Presenter + ?Sized,
    {
        let now_ms = host.now_ms();
        let indicator = render_elapsed(self.tracker.elapsed_minutes(now_ms));
        host.show_status(&indicator)?;
        Ok(Event::ElapsedRendered {
            warning: indicator.is_warning(),
            text: indicator.text,
            at: at(now_ms),
        })
    }

    /// Hides the indicator and cancels the timer for the rest of the run.
    pub fn stop<H>(&mut self, host: &mut H) -> Result<Event>
    where
        H: Clock + Presenter + ?Sized,
    {
        host.hide_status()?;
        self.state = SchedulerState::Stopped;
        self.cancelled = true;
        info!(tick_count = self.tick_count, "scheduler stopped");
        Ok(Event::SchedulerStopped {
            tick_count: self.tick_count,
            at: at(host.now_ms()),
        })
    }

    fn remind<H>(&mut self, host: &mut H) -> Result<Event>
    where
        H: Clock + Presenter + ?Sized,
    {
        self.hour_count += 1;
        host.notify(&break_message(self.hour_count))?;
        Ok(Event::BreakReminder {
            hour_count: self.hour_count,
            at: at(host.now_ms()),
        })
    }
}

fn break_message(hour_count: u32) -> String {
    let unit = if hour_count == 1 { "hour" } else { "hours" };
    format!("⏰⏰ Take a Break! 🧍 StandUp! It's been {hour_count} {unit}")
}
