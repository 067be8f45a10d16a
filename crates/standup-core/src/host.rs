//! Collaborators provided by the host environment.
//!
//! The tracker and scheduler never touch the clock, the persisted store,
//! the configuration or the screen directly. A host (the terminal host in
//! `standup-cli`, or a fake in tests) implements these traits and hands
//! itself to each operation.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::session::PrevSessionRecord;
use crate::storage::Settings;
use crate::timer::StatusIndicator;

/// Source of "now", in milliseconds since the Unix epoch.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

/// Wall clock backed by `chrono::Utc::now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Holds the single previous-session record.
pub trait SessionStore {
    /// Raw stored value, if any. Validation happens in the tracker so that
    /// malformed values can be cleared instead of failing.
    fn load_prev_session(&mut self) -> Result<Option<String>>;

    /// Overwrites any stored record.
    fn save_prev_session(&mut self, record: &PrevSessionRecord) -> Result<()>;

    fn clear_prev_session(&mut self) -> Result<()>;
}

/// Provides a fresh settings snapshot on every call.
pub trait SettingsSource {
    fn read_settings(&mut self) -> Result<Settings>;
}

/// Answer to the resume prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResumeChoice {
    Resume,
    /// Also returned when the prompt is dismissed without an answer.
    Discard,
}

/// The user-facing surface: one persistent status indicator and transient
/// dialogs.
pub trait Presenter {
    /// Sets the indicator's content and makes it visible.
    fn show_status(&mut self, indicator: &StatusIndicator) -> Result<()>;

    fn hide_status(&mut self) -> Result<()>;

    /// Informational notification.
    fn notify(&mut self, message: &str) -> Result<()>;

    /// Binary-choice warning. Blocks until the user answers.
    fn prompt_resume(&mut self, message: &str) -> Result<ResumeChoice>;
}

/// Everything the scheduler needs from its environment.
pub trait Host: Clock + SessionStore + SettingsSource + Presenter {}

impl<T> Host for T where T: Clock + SessionStore + SettingsSource + Presenter {}
