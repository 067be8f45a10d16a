//! Terminal implementation of the host collaborators.

use std::io::{self, BufRead, IsTerminal, Write};

use clap::ValueEnum;
use standup_core::{
    Clock, ConfigFile, CoreError, Database, Presenter, PrevSessionRecord, Result, ResumeChoice,
    SessionStore, Settings, SettingsSource, StatusIndicator, SystemClock,
};
use tracing::info;

/// How to answer the resume prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResumePolicy {
    /// Ask on stdin
    Ask,
    /// Resume without asking
    Always,
    /// Discard without asking
    Never,
}

pub struct TerminalHost {
    clock: SystemClock,
    db: Database,
    config: ConfigFile,
    resume: ResumePolicy,
    color: bool,
}

impl TerminalHost {
    pub fn open(resume: ResumePolicy) -> Result<Self> {
        Ok(Self {
            clock: SystemClock,
            db: Database::open()?,
            config: ConfigFile::open_default()?,
            resume,
            color: std::io::stdout().is_terminal(),
        })
    }

    fn styled(&self, indicator: &StatusIndicator) -> String {
        if !self.color {
            return indicator.text.clone();
        }
        if indicator.is_warning() {
            // black on yellow
            format!("\x1b[30;43m {} \x1b[0m", indicator.text)
        } else {
            format!("\x1b[97m{}\x1b[0m", indicator.text)
        }
    }
}

impl Clock for TerminalHost {
    fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }
}

impl SessionStore for TerminalHost {
    fn load_prev_session(&mut self) -> Result<Option<String>> {
        self.db.load_prev_session()
    }

    fn save_prev_session(&mut self, record: &PrevSessionRecord) -> Result<()> {
        self.db.save_prev_session(record)
    }

    fn clear_prev_session(&mut self) -> Result<()> {
        self.db.clear_prev_session()
    }
}

impl SettingsSource for TerminalHost {
    fn read_settings(&mut self) -> Result<Settings> {
        self.config.read_settings()
    }
}

impl Presenter for TerminalHost {
    fn show_status(&mut self, indicator: &StatusIndicator) -> Result<()> {
        write_line(&mut io::stdout().lock(), &self.styled(indicator))
    }

    fn hide_status(&mut self) -> Result<()> {
        write_line(&mut io::stdout().lock(), "Elapsed time hidden.")
    }

    fn notify(&mut self, message: &str) -> Result<()> {
        write_line(&mut io::stdout().lock(), message)
    }

    fn prompt_resume(&mut self, message: &str) -> Result<ResumeChoice> {
        let choice = match self.resume {
            ResumePolicy::Always => ResumeChoice::Resume,
            ResumePolicy::Never => ResumeChoice::Discard,
            ResumePolicy::Ask => {
                let mut stdout = io::stdout().lock();
                write!(stdout, "{message} [✅ Yes / ❌ No] (y/N): ")
                    .and_then(|()| stdout.flush())
                    .map_err(presentation_error)?;
                let mut answer = String::new();
                io::stdin()
                    .lock()
                    .read_line(&mut answer)
                    .map_err(presentation_error)?;
                parse_answer(&answer)
            }
        };
        info!(?choice, policy = ?self.resume, "resume prompt answered");
        Ok(choice)
    }
}

/// Writes one line of presenter output and flushes it.
fn write_line<W: Write>(out: &mut W, text: &str) -> Result<()> {
    writeln!(out, "{text}")
        .and_then(|()| out.flush())
        .map_err(presentation_error)
}

fn presentation_error(err: io::Error) -> CoreError {
    CoreError::Presentation(err.to_string())
}

/// Anything but an explicit yes, including end of input, discards.
fn parse_answer(answer: &str) -> ResumeChoice {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => ResumeChoice::Resume,
        _ => ResumeChoice::Discard,
    }
}
