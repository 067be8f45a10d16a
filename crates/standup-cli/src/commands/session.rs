use clap::Subcommand;
use serde_json::json;
use standup_core::{
    render_elapsed, Clock, Database, PrevSessionRecord, SessionStore, SessionTracker, SystemClock,
};

#[derive(Subcommand)]
pub enum SessionAction {
    /// Print the stored previous-session record as JSON without consuming it
    Show,
    /// Drop the stored previous-session record
    Clear,
}

fn describe(raw: Option<&str>, now_ms: i64) -> serde_json::Value {
    let Some(raw) = raw else {
        return json!({ "prevSession": null });
    };
    let Some(record) = PrevSessionRecord::parse(raw) else {
        return json!({ "prevSession": null, "malformed": true });
    };

    let tracker = SessionTracker::from_start(record.session_start_time);
    let length = render_elapsed(tracker.elapsed_minutes(record.session_end_date));
    json!({
        "prevSession": record,
        "endedAt": record.ended_at_local(),
        "gapMinutes": record.gap_ms(now_ms) / 60_000,
        "stale": record.is_stale(now_ms),
        "elapsed": length.text,
    })
}

pub fn run(action: SessionAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut db = Database::open()?;
    match action {
        SessionAction::Show => {
            let raw = db.load_prev_session()?;
            let output = describe(raw.as_deref(), SystemClock.now_ms());
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        SessionAction::Clear => {
            db.clear_prev_session()?;
            println!("previous session cleared");
        }
    }
    Ok(())
}
