//! Operating-mode selection and the mobile entrance stagger.
//!
//! Mode selection is a pure function of the reduced-motion preference and
//! the viewport width; the timeline re-evaluates it at mount and on every
//! resize and owns the teardown/setup between modes.

use std::time::Duration;

/// Viewport dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width_px: f64,
    pub height_px: f64,
}

/// The three mutually exclusive animation drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatingMode {
    /// Continuous scroll-driven animation with a per-frame smoother.
    DesktopScroll,
    /// One-shot entrance stagger fired when the region scrolls into view.
    MobileTrigger,
    /// No animation driver at all; everything rendered at rest.
    ReducedMotionStatic,
}

impl OperatingMode {
    pub fn label(self) -> &'static str {
        match self {
            OperatingMode::DesktopScroll => "scroll",
            OperatingMode::MobileTrigger => "trigger",
            OperatingMode::ReducedMotionStatic => "static",
        }
    }
}

/// The region's top edge must rise above this fraction of the viewport
/// height before the mobile entrance fires.
pub const TRIGGER_VIEWPORT_FRACTION: f64 = 0.85;

/// Delay between consecutive cards in the mobile entrance.
pub const STAGGER_STEP: Duration = Duration::from_millis(200);

/// Extra delay on the action area after the last card.
const ACTIONS_TAIL: Duration = Duration::from_millis(100);

/// Selection rule: reduced motion overrides everything, then width decides.
pub fn select_mode(reduced_motion: bool, viewport_width_px: f64, breakpoint_px: f64) -> OperatingMode {
    if reduced_motion {
        OperatingMode::ReducedMotionStatic
    } else if viewport_width_px <= breakpoint_px {
        OperatingMode::MobileTrigger
    } else {
        OperatingMode::DesktopScroll
    }
}

/// Stagger assignment computed when the mobile trigger fires.  The engine
/// only decides the delays; the presentation layer runs the animation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntranceCue {
    /// Entrance delay per card: `index × 0.2 s`.
    pub delays: Vec<Duration>,
    /// Action-area delay: after the last card plus a small tail.
    pub actions_delay: Duration,
}

impl EntranceCue {
    pub fn for_cards(count: usize) -> Self {
        Self {
            delays: (0..count as u32).map(|i| STAGGER_STEP * i).collect(),
            actions_delay: STAGGER_STEP * count as u32 + ACTIONS_TAIL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduced_motion_overrides_width() {
        assert_eq!(
            select_mode(true, 1200.0, 768.0),
            OperatingMode::ReducedMotionStatic
        );
        assert_eq!(
            select_mode(true, 500.0, 768.0),
            OperatingMode::ReducedMotionStatic
        );
    }

    #[test]
    fn width_decides_without_reduced_motion() {
        assert_eq!(select_mode(false, 500.0, 768.0), OperatingMode::MobileTrigger);
        assert_eq!(select_mode(false, 1200.0, 768.0), OperatingMode::DesktopScroll);
        // The breakpoint itself counts as mobile.
        assert_eq!(select_mode(false, 768.0, 768.0), OperatingMode::MobileTrigger);
    }

    #[test]
    fn entrance_delays_step_by_200ms() {
        let cue = EntranceCue::for_cards(4);
        assert_eq!(cue.delays.len(), 4);
        for (i, d) in cue.delays.iter().enumerate() {
            assert_eq!(*d, Duration::from_millis(200 * i as u64));
        }
        assert_eq!(cue.actions_delay, Duration::from_millis(4 * 200 + 100));
    }

    #[test]
    fn empty_cue_still_delays_actions() {
        let cue = EntranceCue::for_cards(0);
        assert!(cue.delays.is_empty());
        assert_eq!(cue.actions_delay, Duration::from_millis(100));
    }
}
