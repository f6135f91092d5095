//! The animation timeline — owns the progress state, the pose assignments,
//! the frame loop, and the per-mode listener wiring.
//!
//! Exactly one mode driver is armed at a time.  Every mode change tears the
//! previous driver down completely (frame loop cancelled, scroll
//! subscription released, transient state cleared) before arming the next,
//! so a stale loop or listener can never run alongside the new mode.

use crate::core::mode::{
    select_mode, EntranceCue, OperatingMode, Viewport, TRIGGER_VIEWPORT_FRACTION,
};
use crate::core::pose::{pose_for, Pose};
use crate::core::progress::{ProgressState, ScrollMetrics};
use crate::core::segment::eased_sub_progress;
use crate::core::subscribe::{SubscriberSet, Subscription};
use crate::core::visual::{
    actions_opacity, card_visual, title_opacity, CardVisual, FallMode,
};

/// Options the host hands the engine at setup.
#[derive(Debug, Clone, Copy)]
pub struct TimelineConfig {
    pub fall_mode: FallMode,
    pub mobile_breakpoint_px: f64,
    pub reduced_motion: bool,
    pub lerp_factor: f64,
}

/// The continuously re-armed per-frame callback, modeled as an explicit
/// state machine: scheduling is a `running` flag the host's tick checks,
/// and cancellation is a flag flip.  No real scheduler needed in tests.
#[derive(Debug, Default)]
struct FrameLoop {
    running: bool,
}

impl FrameLoop {
    fn start(&mut self) {
        self.running = true;
    }

    fn cancel(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

/// Per-mode driver state.  Exactly one lives at a time.
#[derive(Debug)]
enum ModeDriver {
    Desktop {
        scroll: Subscription,
        frames: FrameLoop,
    },
    Mobile {
        /// Released the moment the trigger fires — the listener is one-shot.
        scroll: Option<Subscription>,
        cue: Option<EntranceCue>,
    },
    Static,
}

impl ModeDriver {
    fn mode(&self) -> OperatingMode {
        match self {
            ModeDriver::Desktop { .. } => OperatingMode::DesktopScroll,
            ModeDriver::Mobile { .. } => OperatingMode::MobileTrigger,
            ModeDriver::Static => OperatingMode::ReducedMotionStatic,
        }
    }
}

/// Complete per-frame output: one visual per card plus the two auxiliary
/// opacities.  An immutable value the renderer applies and discards.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub cards: Vec<CardVisual>,
    pub title_opacity: f64,
    pub actions_opacity: f64,
}

/// The scroll-to-animation engine for one card stage.
#[derive(Debug)]
pub struct Timeline {
    config: TimelineConfig,
    poses: Vec<Pose>,
    progress: ProgressState,
    scroll_subs: SubscriberSet,
    /// `None` while unmounted.
    driver: Option<ModeDriver>,
}

impl Timeline {
    pub fn new(config: TimelineConfig, card_count: usize) -> Self {
        Self {
            config,
            poses: (0..card_count).map(pose_for).collect(),
            progress: ProgressState::new(config.lerp_factor),
            scroll_subs: SubscriberSet::new(),
            driver: None,
        }
    }

    pub fn fall_mode(&self) -> FallMode {
        self.config.fall_mode
    }

    /// Switch drop/zoom at runtime.  Purely a calculator selection — no
    /// driver state is affected, the next snapshot just uses the new math.
    pub fn set_fall_mode(&mut self, mode: FallMode) {
        self.config.fall_mode = mode;
    }

    /// The currently armed mode, or `None` while unmounted.
    pub fn mode(&self) -> Option<OperatingMode> {
        self.driver.as_ref().map(ModeDriver::mode)
    }

    /// Select and arm the initial mode.  Mounting an already mounted
    /// timeline re-mounts it from scratch.
    pub fn mount(&mut self, viewport: Viewport) {
        self.teardown();
        self.arm(self.select(viewport));
    }

    /// Total teardown.  Safe to call twice or while unmounted.
    pub fn unmount(&mut self) {
        self.teardown();
    }

    /// Re-evaluate the selection rule after a resize.  A changed outcome
    /// tears the old driver down before arming the new one; an unchanged
    /// outcome leaves the driver untouched.
    pub fn viewport_changed(&mut self, viewport: Viewport) {
        let Some(active) = self.mode() else {
            return; // resize before mount
        };
        let wanted = self.select(viewport);
        if wanted != active {
            self.teardown();
            self.arm(wanted);
        }
    }

    /// Update the reduced-motion preference and re-evaluate the mode.
    pub fn set_reduced_motion(&mut self, on: bool, viewport: Viewport) {
        self.config.reduced_motion = on;
        self.viewport_changed(viewport);
    }

    /// A scroll notification.  O(1): store the new target (desktop), test
    /// the one-shot trigger (mobile), or do nothing (static/unmounted).
    pub fn notify_scroll(&mut self, metrics: ScrollMetrics) {
        match &mut self.driver {
            Some(ModeDriver::Desktop { scroll, .. }) => {
                if self.scroll_subs.contains(scroll) {
                    self.progress.retarget(metrics.target());
                }
            }
            Some(ModeDriver::Mobile { scroll, cue }) => {
                let armed = scroll
                    .as_ref()
                    .is_some_and(|s| self.scroll_subs.contains(s));
                let in_view = metrics.region_top_px
                    < metrics.viewport_height_px * TRIGGER_VIEWPORT_FRACTION;
                if cue.is_none() && armed && in_view {
                    *cue = Some(EntranceCue::for_cards(self.poses.len()));
                    if let Some(sub) = scroll.take() {
                        self.scroll_subs.release(sub);
                    }
                    tracing::debug!("mobile entrance triggered");
                }
            }
            Some(ModeDriver::Static) | None => {}
        }
    }

    /// One frame tick.  A no-op returning `None` unless the frame loop is
    /// running; otherwise one smoother step and a fresh snapshot.
    pub fn on_frame(&mut self) -> Option<FrameSnapshot> {
        let running = matches!(
            &self.driver,
            Some(ModeDriver::Desktop { frames, .. }) if frames.is_running()
        );
        if !running {
            return None;
        }
        self.progress.step();
        Some(self.snapshot())
    }

    /// The stagger assignment, present only after the mobile trigger fired.
    pub fn entrance_cue(&self) -> Option<&EntranceCue> {
        match &self.driver {
            Some(ModeDriver::Mobile { cue, .. }) => cue.as_ref(),
            _ => None,
        }
    }

    /// The complete current visual state, valid in any mode.
    pub fn snapshot(&self) -> FrameSnapshot {
        match &self.driver {
            Some(ModeDriver::Desktop { .. }) => {
                let current = self.progress.current();
                FrameSnapshot {
                    cards: self.cards_at(current),
                    title_opacity: title_opacity(current),
                    actions_opacity: actions_opacity(current),
                }
            }
            Some(ModeDriver::Mobile { cue, .. }) => {
                // Cards wait hidden until the cue; afterwards they are at
                // rest and the presentation layer runs the stagger.
                let sub = if cue.is_some() { 1.0 } else { 0.0 };
                FrameSnapshot {
                    cards: self.cards_at_sub(sub),
                    title_opacity: 1.0,
                    actions_opacity: if cue.is_some() { 1.0 } else { 0.0 },
                }
            }
            Some(ModeDriver::Static) => FrameSnapshot {
                cards: self.cards_at_sub(1.0),
                title_opacity: 1.0,
                actions_opacity: 1.0,
            },
            None => FrameSnapshot {
                cards: self.cards_at_sub(0.0),
                title_opacity: 0.0,
                actions_opacity: 0.0,
            },
        }
    }

    pub fn progress_current(&self) -> f64 {
        self.progress.current()
    }

    pub fn progress_target(&self) -> f64 {
        self.progress.target()
    }

    /// Live scroll registrations — at most one by construction.
    pub fn live_scroll_listeners(&self) -> usize {
        self.scroll_subs.live_count()
    }

    pub fn frame_loop_running(&self) -> bool {
        matches!(
            &self.driver,
            Some(ModeDriver::Desktop { frames, .. }) if frames.is_running()
        )
    }

    fn select(&self, viewport: Viewport) -> OperatingMode {
        select_mode(
            self.config.reduced_motion,
            viewport.width_px,
            self.config.mobile_breakpoint_px,
        )
    }

    fn arm(&mut self, mode: OperatingMode) {
        debug_assert!(self.driver.is_none(), "arming over a live driver");
        let driver = match mode {
            OperatingMode::DesktopScroll => {
                let mut frames = FrameLoop::default();
                frames.start();
                ModeDriver::Desktop {
                    scroll: self.scroll_subs.subscribe(),
                    frames,
                }
            }
            OperatingMode::MobileTrigger => ModeDriver::Mobile {
                scroll: Some(self.scroll_subs.subscribe()),
                cue: None,
            },
            OperatingMode::ReducedMotionStatic => ModeDriver::Static,
        };
        tracing::debug!(mode = mode.label(), "timeline armed");
        self.driver = Some(driver);
    }

    /// Cancel the frame loop, release the scroll listener, and clear all
    /// transient state.  Teardown order is the mode-race invariant: nothing
    /// from the old mode survives past this point.
    fn teardown(&mut self) {
        let Some(driver) = self.driver.take() else {
            return;
        };
        match driver {
            ModeDriver::Desktop { scroll, mut frames } => {
                frames.cancel();
                self.scroll_subs.release(scroll);
            }
            ModeDriver::Mobile { scroll, cue: _ } => {
                if let Some(sub) = scroll {
                    self.scroll_subs.release(sub);
                }
            }
            ModeDriver::Static => {}
        }
        self.progress.reset();
        tracing::debug!("timeline torn down");
    }

    fn cards_at(&self, current: f64) -> Vec<CardVisual> {
        let count = self.poses.len();
        self.poses
            .iter()
            .enumerate()
            .map(|(i, &pose)| {
                card_visual(
                    self.config.fall_mode,
                    eased_sub_progress(current, i, count),
                    pose,
                )
            })
            .collect()
    }

    fn cards_at_sub(&self, sub: f64) -> Vec<CardVisual> {
        self.poses
            .iter()
            .map(|&pose| card_visual(self.config.fall_mode, sub, pose))
            .collect()
    }
}
