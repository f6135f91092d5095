//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event
//! handling).  The host models a virtual page — one intro screen followed
//! by the animated region — and feeds the timeline one `ScrollMetrics`
//! sample per scroll change.

use std::time::Instant;

use crate::config::AppConfig;
use crate::core::mode::Viewport;
use crate::core::progress::ScrollMetrics;
use crate::core::timeline::{Timeline, TimelineConfig};

/// Approximate cell metrics for terminals that don't report pixel sizes.
const FALLBACK_CELL_WIDTH_PX: f64 = 9.0;
const FALLBACK_CELL_HEIGHT_PX: f64 = 18.0;

/// Derive the pixel viewport from the terminal size, preferring real pixel
/// metrics when the terminal reports them.
pub fn detect_viewport(cols: u16, rows: u16) -> Viewport {
    if let Ok(ws) = crossterm::terminal::window_size() {
        if ws.width > 0 && ws.height > 0 {
            return Viewport {
                width_px: f64::from(ws.width),
                height_px: f64::from(ws.height),
            };
        }
    }
    Viewport {
        width_px: f64::from(cols) * FALLBACK_CELL_WIDTH_PX,
        height_px: f64::from(rows) * FALLBACK_CELL_HEIGHT_PX,
    }
}

/// Top-level application state.
pub struct AppState {
    /// User options (also mirrored into the timeline at construction).
    pub config: AppConfig,
    /// The animation engine.
    pub timeline: Timeline,
    /// Current viewport in pixels.
    pub viewport: Viewport,
    /// Virtual page offset in px; 0 is the top of the intro screen.
    pub scroll_px: f64,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Wall-clock origin of the mobile entrance, stamped when the cue
    /// appears and cleared when a mode switch discards it.
    pub entrance_started: Option<Instant>,
}

impl AppState {
    pub fn new(config: AppConfig, viewport: Viewport) -> Self {
        let mut timeline = Timeline::new(
            TimelineConfig {
                fall_mode: config.fall_mode,
                mobile_breakpoint_px: config.mobile_breakpoint_px,
                reduced_motion: config.reduced_motion,
                lerp_factor: config.lerp_factor,
            },
            config.card_count,
        );
        timeline.mount(viewport);

        let mut state = Self {
            config,
            timeline,
            viewport,
            scroll_px: 0.0,
            should_quit: false,
            status_message: None,
            entrance_started: None,
        };
        // Prime the engine with the starting geometry.
        state.timeline.notify_scroll(state.scroll_metrics());
        state
    }

    /// Height of the animated region (`scroll_height_multiplier` vh).
    pub fn region_height_px(&self) -> f64 {
        self.config.scroll_height_multiplier / 100.0 * self.viewport.height_px
    }

    /// One intro screen sits above the region.
    pub fn intro_height_px(&self) -> f64 {
        self.viewport.height_px
    }

    pub fn page_height_px(&self) -> f64 {
        self.intro_height_px() + self.region_height_px()
    }

    pub fn max_scroll_px(&self) -> f64 {
        (self.page_height_px() - self.viewport.height_px).max(0.0)
    }

    /// Region geometry at the current scroll offset.  O(1) — three numbers,
    /// no layout walk.
    pub fn scroll_metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            region_height_px: self.region_height_px(),
            region_top_px: self.intro_height_px() - self.scroll_px,
            viewport_height_px: self.viewport.height_px,
        }
    }

    pub fn scroll_to(&mut self, px: f64) {
        self.scroll_px = px.clamp(0.0, self.max_scroll_px());
        self.timeline.notify_scroll(self.scroll_metrics());
        self.sync_entrance_clock();
    }

    pub fn scroll_by(&mut self, delta_px: f64) {
        self.scroll_to(self.scroll_px + delta_px);
    }

    /// One wheel notch / arrow key worth of scrolling.
    pub fn scroll_step_px(&self) -> f64 {
        self.viewport.height_px * 0.05
    }

    /// One PageUp/PageDown worth of scrolling.
    pub fn page_step_px(&self) -> f64 {
        self.viewport.height_px * 0.9
    }

    /// Apply a resize: new geometry, re-clamped offset, mode re-selection.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.timeline.viewport_changed(viewport);
        self.scroll_to(self.scroll_px);
    }

    pub fn toggle_fall_mode(&mut self) {
        self.config.fall_mode = self.config.fall_mode.toggled();
        self.timeline.set_fall_mode(self.config.fall_mode);
    }

    pub fn toggle_reduced_motion(&mut self) {
        self.config.reduced_motion = !self.config.reduced_motion;
        self.timeline
            .set_reduced_motion(self.config.reduced_motion, self.viewport);
        self.sync_entrance_clock();
    }

    /// Fraction of the whole page scrolled, for the status bar.
    pub fn page_fraction(&self) -> f64 {
        let max = self.max_scroll_px();
        if max <= 0.0 {
            0.0
        } else {
            self.scroll_px / max
        }
    }

    /// Keep the presentation clock in step with the engine's cue: stamp it
    /// when the cue first appears, drop it when a mode switch discards it.
    fn sync_entrance_clock(&mut self) {
        match (self.timeline.entrance_cue().is_some(), self.entrance_started) {
            (true, None) => self.entrance_started = Some(Instant::now()),
            (false, Some(_)) => self.entrance_started = None,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mode::OperatingMode;

    fn desktop_state() -> AppState {
        AppState::new(
            AppConfig::default(),
            Viewport {
                width_px: 1200.0,
                height_px: 1000.0,
            },
        )
    }

    #[test]
    fn page_geometry_follows_multiplier() {
        let state = desktop_state();
        // 300vh region + 100vh intro, minus one viewport of slack.
        assert_eq!(state.region_height_px(), 3000.0);
        assert_eq!(state.page_height_px(), 4000.0);
        assert_eq!(state.max_scroll_px(), 3000.0);
    }

    #[test]
    fn scroll_clamps_to_page() {
        let mut state = desktop_state();
        state.scroll_by(-500.0);
        assert_eq!(state.scroll_px, 0.0);
        state.scroll_to(1e9);
        assert_eq!(state.scroll_px, state.max_scroll_px());
    }

    #[test]
    fn progress_reaches_one_at_page_bottom() {
        let mut state = desktop_state();
        assert_eq!(state.timeline.mode(), Some(OperatingMode::DesktopScroll));

        state.scroll_to(state.max_scroll_px());
        assert!((state.timeline.progress_target() - 1.0).abs() < 1e-12);

        // Intro not yet scrolled past: still zero.
        state.scroll_to(state.intro_height_px() * 0.5);
        assert_eq!(state.timeline.progress_target(), 0.0);
    }

    #[test]
    fn resize_across_breakpoint_switches_mode() {
        let mut state = desktop_state();
        state.set_viewport(Viewport {
            width_px: 500.0,
            height_px: 1000.0,
        });
        assert_eq!(state.timeline.mode(), Some(OperatingMode::MobileTrigger));

        // Scroll into view: the cue appears and the clock is stamped.
        state.scroll_to(state.intro_height_px() * 0.5);
        assert!(state.timeline.entrance_cue().is_some());
        assert!(state.entrance_started.is_some());

        // Growing back discards cue and clock together.
        state.set_viewport(Viewport {
            width_px: 1400.0,
            height_px: 1000.0,
        });
        assert!(state.timeline.entrance_cue().is_none());
        assert!(state.entrance_started.is_none());
    }
}
