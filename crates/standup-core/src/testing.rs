//! In-memory host used by unit tests.

use crate::error::Result;
use crate::host::{Clock, Presenter, ResumeChoice, SessionStore, SettingsSource};
use crate::session::PrevSessionRecord;
use crate::storage::Settings;
use crate::timer::StatusIndicator;

pub(crate) struct FakeHost {
    pub now_ms: i64,
    pub stored: Option<String>,
    pub settings: Settings,
    pub answer: ResumeChoice,
    pub prompts: Vec<String>,
    pub notifications: Vec<String>,
    /// Visible indicator, `None` when hidden.
    pub status: Option<StatusIndicator>,
    pub saves: usize,
    pub clears: usize,
}

impl FakeHost {
    pub fn at(now_ms: i64) -> Self {
        Self {
            now_ms,
            stored: None,
            settings: Settings::default(),
            answer: ResumeChoice::Discard,
            prompts: Vec::new(),
            notifications: Vec::new(),
            status: None,
            saves: 0,
            clears: 0,
        }
    }
}

impl Clock for FakeHost {
    fn now_ms(&self) -> i64 {
        self.now_ms
    }
}

impl SessionStore for FakeHost {
    fn load_prev_session(&mut self) -> Result<Option<String>> {
        Ok(self.stored.clone())
    }

    fn save_prev_session(&mut self, record: &PrevSessionRecord) -> Result<()> {
        self.saves += 1;
        self.stored = Some(record.to_json()?);
        Ok(())
    }

    fn clear_prev_session(&mut self) -> Result<()> {
        self.clears += 1;
        self.stored = None;
        Ok(())
    }
}

impl SettingsSource for FakeHost {
    fn read_settings(&mut self) -> Result<Settings> {
        Ok(self.settings.validated())
    }
}

impl Presenter for FakeHost {
    fn show_status(&mut self, indicator: &StatusIndicator) -> Result<()> {
        self.status = Some(indicator.clone());
        Ok(())
    }

    fn hide_status(&mut self) -> Result<()> {
        self.status = None;
        Ok(())
    }

    fn notify(&mut self, message: &str) -> Result<()> {
        self.notifications.push(message.to_string());
        Ok(())
    }

    fn prompt_resume(&mut self, message: &str) -> Result<ResumeChoice> {
        self.prompts.push(message.to_string());
        Ok(self.answer)
    }
}
