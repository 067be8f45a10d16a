//! Elapsed-time status indicator.

use serde::{Deserialize, Serialize};

pub const HOURGLASS_GLYPH: &str = "⌛";
pub const WARNING_GLYPH: &str = "⚠";
pub const FOREGROUND_COLOR: &str = "#ffffff";

/// From this many hours on, the indicator switches to the warning style.
pub const WARNING_AFTER_HOURS: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusBackground {
    Warning,
}

/// Content of the persistent status indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusIndicator {
    pub text: String,
    pub color: String,
    pub background: Option<StatusBackground>,
}

impl StatusIndicator {
    pub fn is_warning(&self) -> bool {
        self.background == Some(StatusBackground::Warning)
    }
}

/// Renders e.g. `⌛ 1 hour 5 min Elapsed` or `⚠ 5 hours 0 min Elapsed`.
pub fn render_elapsed(elapsed_minutes: i64) -> StatusIndicator {
    let elapsed_minutes = elapsed_minutes.max(0);
    let hours = elapsed_minutes / 60;
    let minutes = elapsed_minutes % 60;
    let warning = hours >= WARNING_AFTER_HOURS;

    let glyph = if warning { WARNING_GLYPH } else { HOURGLASS_GLYPH };
    let hours_text = match hours {
        0 => String::new(),
        1 => " 1 hour".to_string(),
        n => format!(" {n} hours"),
    };

    StatusIndicator {
        text: format!("{glyph}{hours_text} {minutes} min Elapsed"),
        color: FOREGROUND_COLOR.to_string(),
        background: warning.then_some(StatusBackground::Warning),
    }
}
