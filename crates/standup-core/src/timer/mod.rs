mod indicator;
mod scheduler;

pub use indicator::{
    render_elapsed, StatusBackground, StatusIndicator, FOREGROUND_COLOR, HOURGLASS_GLYPH,
    WARNING_AFTER_HOURS, WARNING_GLYPH,
};
pub use scheduler::{SchedulerState, TickScheduler};
