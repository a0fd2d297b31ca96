use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use quitgambling_core::{
    now_ms, Config, DisplayView, ElapsedTicker, Event, RecoveryTracker,
};
use tokio::sync::Mutex;

use crate::store::CliStore;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

async fn load_tracker(config: &Config) -> RecoveryTracker<CliStore> {
    let mut tracker = RecoveryTracker::new(CliStore::open(config));
    tracker.initialize().await;
    tracker
}

fn print_view(view: &DisplayView) {
    println!("{}", view.headline);
    println!("{}", view.body);
}

pub async fn status(config: &Config, json: bool) -> CmdResult {
    let mut tracker = load_tracker(config).await;
    let now = now_ms();

    if json {
        println!("{}", serde_json::to_string_pretty(&tracker.snapshot(now))?);
    } else {
        tracker.tick(now);
        print_view(&tracker.view());
    }
    Ok(())
}

pub async fn toggle(config: &Config, json: bool) -> CmdResult {
    let mut tracker = load_tracker(config).await;
    let state = tracker.toggle()?;
    tracker.persist(&state).await;

    let event = Event::for_toggle(&state);
    if json {
        println!("{}", serde_json::to_string_pretty(&event)?);
    } else {
        match event {
            Event::RecoveryStarted { at, .. } => {
                println!("Recovery started at {}", at.format("%Y-%m-%d %H:%M:%S UTC"));
            }
            _ => println!("Recovery reset"),
        }
        print_view(&tracker.view());
    }
    Ok(())
}

pub async fn watch(config: &Config, ticks: Option<u64>) -> CmdResult {
    let tracker = Arc::new(Mutex::new(load_tracker(config).await));
    let period = Duration::from_millis(config.tracker.tick_interval_ms);
    let (ticker, mut rx) = ElapsedTicker::mount(tracker, period);

    let mut seen = 0u64;
    let mut last_headline = String::new();
    let mut last_body = String::new();
    let mut stdout = std::io::stdout();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = rx.borrow_and_update().clone();
                // One notification per period; only changed lines are printed.
                seen += 1;
                if view.headline != last_headline {
                    writeln!(stdout, "{}", view.headline)?;
                    last_headline = view.headline;
                    last_body.clear();
                }
                if view.body != last_body {
                    writeln!(stdout, "{}", view.body)?;
                    last_body = view.body;
                }
                stdout.flush()?;

                if ticks.is_some_and(|limit| seen >= limit) {
                    break;
                }
            }
        }
    }

    ticker.unmount();
    Ok(())
}
