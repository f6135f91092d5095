//! Colour palette and text styles used across the UI.
//!
//! Terminal cells have no alpha channel, so every opacity the engine emits
//! is applied here by blending the foreground colour toward the backdrop.

use ratatui::style::{Color, Modifier, Style};

/// Stage backdrop that faded elements sink into.
const BACKDROP: (u8, u8, u8) = (16, 16, 28);

/// Card face colours, cycled by card index.
const CARD_COLORS: [(u8, u8, u8); 5] = [
    (235, 160, 60),  // amber
    (96, 180, 255),  // sky
    (130, 220, 130), // mint
    (235, 120, 140), // rose
    (190, 150, 250), // violet
];

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── cards ──────────────────────────────────────────────────
    pub fn card_style(index: usize, opacity: f64) -> Style {
        Style::default()
            .fg(blend(CARD_COLORS[index % CARD_COLORS.len()], opacity))
            .add_modifier(Modifier::BOLD)
    }

    /// Shadow silhouette: a dark gray whose strength is the shadow alpha.
    pub fn shadow_style(alpha: f64) -> Style {
        Style::default().fg(blend((90, 90, 110), alpha.clamp(0.0, 1.0)))
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn title_style(opacity: f64) -> Style {
        Style::default()
            .fg(blend((240, 240, 245), opacity))
            .add_modifier(Modifier::BOLD)
    }

    pub fn actions_style(opacity: f64) -> Style {
        Style::default()
            .fg(blend((120, 220, 180), opacity))
            .add_modifier(Modifier::BOLD)
    }

    pub fn hint_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}

/// Blend `fg` toward the backdrop by `opacity` (1 = full colour, 0 = gone).
fn blend(fg: (u8, u8, u8), opacity: f64) -> Color {
    let t = opacity.clamp(0.0, 1.0);
    let ch = |f: u8, b: u8| (f64::from(b) + (f64::from(f) - f64::from(b)) * t).round() as u8;
    Color::Rgb(ch(fg.0, BACKDROP.0), ch(fg.1, BACKDROP.1), ch(fg.2, BACKDROP.2))
}
