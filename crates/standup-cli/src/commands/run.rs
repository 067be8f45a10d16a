use std::time::Duration;

use standup_core::{Event, SchedulerState, TickScheduler};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, warn};

use crate::terminal::{ResumePolicy, TerminalHost};

/// Commands accepted on stdin while running.
#[derive(Debug, PartialEq, Eq)]
enum LineCommand {
    Refresh,
    Quit,
    Empty,
    Unknown,
}

impl LineCommand {
    fn parse(line: &str) -> Self {
        match line.trim() {
            "r" | "refresh" => LineCommand::Refresh,
            "q" | "quit" => LineCommand::Quit,
            "" => LineCommand::Empty,
            _ => LineCommand::Unknown,
        }
    }
}

fn log_events(events: &[Event]) {
    for event in events {
        debug!(event = %serde_json::to_string(event).unwrap_or_default(), "event");
    }
}

pub fn run(resume: ResumePolicy) -> Result<(), Box<dyn std::error::Error>> {
    let host = TerminalHost::open(resume)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(run_loop(host));
    // The stdin reader sits on a blocking thread; don't wait for it on quit.
    runtime.shutdown_background();
    result
}

async fn run_loop(mut host: TerminalHost) -> Result<(), Box<dyn std::error::Error>> {
    let (mut scheduler, events) = TickScheduler::activate(&mut host)?;
    log_events(&events);

    if scheduler.state() != SchedulerState::Running {
        println!("Hourly notification and elapsed time are both disabled.");
        return Ok(());
    }

    let period = Duration::from_millis(scheduler.interval_ms());
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    while scheduler.state() == SchedulerState::Running {
        tokio::select! {
            _ = interval.tick() => {
                log_events(&scheduler.tick(&mut host)?);
            }
            line = lines.next_line(), if stdin_open => {
                let Some(line) = line? else {
                    // Keep ticking without commands.
                    stdin_open = false;
                    continue;
                };
                match LineCommand::parse(&line) {
                    LineCommand::Refresh => log_events(&[scheduler.refresh(&mut host)?]),
                    LineCommand::Quit => break,
                    LineCommand::Empty => {}
                    LineCommand::Unknown => {
                        warn!(%line, "unknown command; use 'r' to refresh or 'q' to quit");
                    }
                }
            }
        }
    }
    Ok(())
}
