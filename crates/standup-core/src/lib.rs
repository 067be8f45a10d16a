//! # standup Core Library
//!
//! Session tracking and break reminders. The library holds the state
//! machine only; the clock, the persisted store, the settings and the
//! screen belong to the host and are reached through the traits in
//! [`host`]. The `standup` CLI is one such host.
//!
//! ## Architecture
//!
//! - **Session Tracker**: owns the session start time and persists a
//!   "previous session" snapshot so a restart can offer to resume it
//! - **Tick Scheduler**: a caller-driven periodic tick that re-reads the
//!   settings, issues hourly break reminders and refreshes the elapsed-time
//!   indicator
//! - **Storage**: SQLite key-value store and TOML configuration
//!
//! ## Key Components
//!
//! - [`TickScheduler`]: activation and per-tick state machine
//! - [`SessionTracker`]: session start time and the previous-session record
//! - [`Database`]: [`SessionStore`] implementation
//! - [`ConfigFile`]: [`SettingsSource`] implementation

pub mod error;
pub mod events;
pub mod host;
pub mod session;
pub mod storage;
pub mod timer;

#[cfg(test)]
mod testing;

pub use error::{ConfigError, CoreError, DatabaseError, Result};
pub use events::Event;
pub use host::{Clock, Host, Presenter, ResumeChoice, SessionStore, SettingsSource, SystemClock};
pub use session::{PrevSessionRecord, RestoreOutcome, SessionTracker};
pub use storage::{Config, ConfigFile, Database, Settings};
pub use timer::{render_elapsed, SchedulerState, StatusBackground, StatusIndicator, TickScheduler};
