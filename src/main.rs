//! Scroll-driven card animation for the terminal.
//!
//! Scroll with the mouse wheel or arrow keys and cards rain onto the stage
//! as you advance through the page.  Narrow terminals get a one-shot
//! staggered entrance instead; `--reduced-motion` skips animation entirely.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stdout};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::Paragraph, Terminal};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::{detect_viewport, AppState},
};
use crate::config::AppConfig;
use crate::core::visual::FallMode;
use crate::ui::{layout::AppLayout, stage::StageWidget, theme::Theme};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Scroll-driven card animation for the terminal")]
struct Cli {
    /// Number of cards on the stage.
    #[arg(long)]
    cards: Option<usize>,

    /// Card entrance: "drop" or "zoom".
    #[arg(long)]
    mode: Option<FallMode>,

    /// Scrollable height of the region in viewport-heights × 100 (300 = three screens).
    #[arg(long = "height-multiplier")]
    height_multiplier: Option<f64>,

    /// Viewport width (px) at or below which the mobile layout is used.
    #[arg(long)]
    breakpoint: Option<f64>,

    /// Skip all animation; show everything at rest.
    #[arg(long)]
    reduced_motion: bool,

    /// Frame interval in milliseconds.
    #[arg(long, default_value_t = 33)]
    tick_ms: u64,
}

/// Merge CLI overrides into the persisted options; flags win for the session.
fn merge_cli(mut config: AppConfig, cli: &Cli) -> AppConfig {
    if let Some(n) = cli.cards {
        config.card_count = n.min(64);
    }
    if let Some(m) = cli.mode {
        config.fall_mode = m;
    }
    if let Some(h) = cli.height_multiplier {
        config.scroll_height_multiplier = h.max(100.0);
    }
    if let Some(b) = cli.breakpoint {
        config.mobile_breakpoint_px = b.max(0.0);
    }
    if cli.reduced_motion {
        config.reduced_motion = true;
    }
    config
}

fn status_line(state: &AppState) -> String {
    let mode = state.timeline.mode().map_or("-", |m| m.label());
    format!(
        " {mode} · {} · page {:>3.0}% · anim {:>3.0}% · ↑↓/wheel scroll · m mode · r motion · s save · q quit",
        state.timeline.fall_mode(),
        state.page_fraction() * 100.0,
        state.timeline.progress_current() * 100.0,
    )
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute the UI
        .init();

    let cli = Cli::parse();
    let config = merge_cli(AppConfig::load(), &cli);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let (cols, rows) = crossterm::terminal::size()?;
    let mut state = AppState::new(config, detect_viewport(cols, rows));

    let frame_interval = Duration::from_millis(cli.tick_ms.clamp(8, 200));
    let mut events = spawn_event_reader(frame_interval);

    // ── event loop ────────────────────────────────────────────
    loop {
        // Draw first so the stage reflects the latest state before any new
        // input is handled.
        terminal.draw(|frame| {
            let layout = AppLayout::from_area(frame.area());

            let snapshot = state.timeline.snapshot();
            frame.render_widget(
                StageWidget {
                    state: &state,
                    snapshot: &snapshot,
                },
                layout.stage_area,
            );

            let hint = status_line(&state);
            let status_text = state.status_message.as_deref().unwrap_or(&hint);
            let status = Paragraph::new(status_text).style(Theme::status_bar_style());
            frame.render_widget(status, layout.status_area);
        })?;

        match events.recv().await {
            Some(AppEvent::Key(k)) => handler::handle_key(&mut state, k),
            Some(AppEvent::Mouse(m)) => handler::handle_mouse(&mut state, m),
            Some(AppEvent::Resize(w, h)) => state.set_viewport(detect_viewport(w, h)),
            Some(AppEvent::Tick) => {
                // The per-frame callback: a no-op in any mode without a
                // running frame loop.
                state.timeline.on_frame();
            }
            None => break, // event reader gone
        }

        if state.should_quit {
            break;
        }
    }

    state.timeline.unmount();

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
