mod record;
mod tracker;

pub use record::{PrevSessionRecord, STALE_AFTER_MS};
pub use tracker::{RestoreOutcome, SessionTracker};
