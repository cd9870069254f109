//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a blocking reader
//! that forwards them over a channel so the main loop stays non-blocking.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Spawns the reader on the blocking pool; crossterm's `poll` would
/// otherwise park a runtime worker for the whole tick.
pub fn spawn_event_reader(tick_rate: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || loop {
        let app_event = match event::poll(tick_rate) {
            Ok(true) => match event::read() {
                Ok(CtEvent::Key(k)) => AppEvent::Key(k),
                Ok(CtEvent::Resize(..)) => AppEvent::Resize,
                Ok(_) => continue,
                Err(_) => break,
            },
            Ok(false) => AppEvent::Tick,
            Err(_) => break,
        };
        if tx.send(app_event).is_err() {
            break; // receiver dropped
        }
    });

    rx
}
