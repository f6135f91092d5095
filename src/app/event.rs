//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background task
//! that forwards them over a channel so the main loop stays non-blocking.
//! The task also emits a `Tick` once per frame interval — the animation's
//! per-frame callback — on a deadline, so ticks keep their cadence even
//! while input events stream in continuously.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// One animation frame elapsed.  The interval is nominal — the
    /// consumer must not assume it is exact.
    Tick,
}

/// Spawns a background task that polls the terminal for events and sends
/// them through the returned channel, interleaved with frame ticks.
pub fn spawn_event_reader(frame_interval: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let mut next_tick = Instant::now() + frame_interval;
        loop {
            // Wait for input at most until the next frame deadline, so a
            // stream of scroll events can never starve the frame loop.
            let timeout = next_tick.saturating_duration_since(Instant::now());
            if event::poll(timeout).unwrap_or(false) {
                if let Ok(ev) = event::read() {
                    let app_event = match ev {
                        CtEvent::Key(k) => AppEvent::Key(k),
                        CtEvent::Mouse(m) => AppEvent::Mouse(m),
                        CtEvent::Resize(w, h) => AppEvent::Resize(w, h),
                        _ => continue,
                    };
                    if tx.send(app_event).is_err() {
                        break; // receiver dropped
                    }
                }
            }
            if Instant::now() >= next_tick {
                if tx.send(AppEvent::Tick).is_err() {
                    break;
                }
                next_tick = Instant::now() + frame_interval;
            }
        }
    });

    rx
}
