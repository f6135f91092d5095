//! Visual state calculators — pure functions from a card's eased local
//! progress and its pose to a complete, immutable visual snapshot.  The
//! rendering layer applies these values; nothing here touches a widget.

use std::fmt;
use std::str::FromStr;

use super::pose::Pose;
use super::segment::sub_progress;

/// How cards arrive on the stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallMode {
    /// Cards fall from far above the stage and settle into their pose.
    #[default]
    Drop,
    /// Cards start zoomed-in and out of focus, then settle to scale 1.
    Zoom,
}

/// Unrecognized fall-mode name in the CLI or config file.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown fall mode `{0}` (expected `drop` or `zoom`)")]
pub struct ParseFallModeError(String);

impl FromStr for FallMode {
    type Err = ParseFallModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "drop" => Ok(FallMode::Drop),
            "zoom" => Ok(FallMode::Zoom),
            other => Err(ParseFallModeError(other.to_string())),
        }
    }
}

impl FallMode {
    pub fn as_str(self) -> &'static str {
        match self {
            FallMode::Drop => "drop",
            FallMode::Zoom => "zoom",
        }
    }

    /// The other mode (runtime toggle).
    pub fn toggled(self) -> Self {
        match self {
            FallMode::Drop => FallMode::Zoom,
            FallMode::Zoom => FallMode::Drop,
        }
    }
}

impl fmt::Display for FallMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Box-shadow parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub blur_px: f64,
    pub offset_y_px: f64,
    pub alpha: f64,
}

/// Complete visual state of one card at one instant.  Recomputed every
/// frame; never stored across frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardVisual {
    pub opacity: f64,
    pub translate_x_vw: f64,
    pub translate_y_vh: f64,
    pub rotation_deg: f64,
    pub scale: f64,
    pub shadow: Shadow,
    /// Defocus blur; `None` once below the negligible threshold so the
    /// renderer never pays for an invisible filter.
    pub blur_px: Option<f64>,
}

/// Cards start this many vh above their resting position in drop mode.
const DROP_START_VH: f64 = 120.0;

/// Blur below this is dropped entirely.
const BLUR_NEGLIGIBLE_PX: f64 = 0.01;

/// Both modes share the same shadow ramp: the shadow deepens as the card
/// settles.
fn shadow_at(t: f64) -> Shadow {
    Shadow {
        blur_px: 15.0 + 35.0 * t,
        offset_y_px: 4.0 + 16.0 * t,
        alpha: 0.1 + 0.3 * t,
    }
}

/// Visual state for one card under the selected mode.
pub fn card_visual(mode: FallMode, eased_sub: f64, pose: Pose) -> CardVisual {
    match mode {
        FallMode::Drop => drop_visual(eased_sub, pose),
        FallMode::Zoom => zoom_visual(eased_sub, pose),
    }
}

fn drop_visual(t: f64, pose: Pose) -> CardVisual {
    CardVisual {
        // Fully opaque within the first 30% of this card's local progress.
        opacity: (sub_progress(t, 0.0, 0.3) / 0.3).clamp(0.0, 1.0),
        translate_x_vw: pose.lateral_vw * t,
        translate_y_vh: -DROP_START_VH * (1.0 - t) + pose.vertical_vh * t,
        rotation_deg: pose.rotation_deg * t,
        scale: 0.8 + 0.2 * t,
        shadow: shadow_at(t),
        blur_px: None,
    }
}

fn zoom_visual(t: f64, pose: Pose) -> CardVisual {
    // Defocus-to-focus across the first 40% of local progress.
    let blur = 4.0 * (1.0 - (sub_progress(t, 0.0, 0.4) / 0.4).clamp(0.0, 1.0));
    CardVisual {
        opacity: (sub_progress(t, 0.0, 0.2) / 0.2).clamp(0.0, 1.0),
        translate_x_vw: pose.lateral_vw * t,
        translate_y_vh: pose.vertical_vh * t,
        rotation_deg: pose.rotation_deg * t,
        scale: 3.5 - 2.5 * t,
        shadow: shadow_at(t),
        blur_px: (blur >= BLUR_NEGLIGIBLE_PX).then_some(blur),
    }
}

/// Title banner fade: dims as the timeline advances, driven by the whole
/// timeline's progress rather than any single card.
pub fn title_opacity(current: f64) -> f64 {
    1.0 - 0.7 * current
}

/// Trailing action-area fade-in over the final 10% of the timeline.
pub fn actions_opacity(current: f64) -> f64 {
    sub_progress(current, 0.9, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pose::pose_for;

    const EPS: f64 = 1e-9;

    #[test]
    fn fall_mode_parses_and_rejects() {
        assert_eq!("drop".parse::<FallMode>().unwrap(), FallMode::Drop);
        assert_eq!(" Zoom ".parse::<FallMode>().unwrap(), FallMode::Zoom);
        assert!("hover".parse::<FallMode>().is_err());
    }

    #[test]
    fn fall_mode_display_round_trips() {
        for mode in [FallMode::Drop, FallMode::Zoom] {
            assert_eq!(mode.as_str().parse::<FallMode>().unwrap(), mode);
        }
        assert_eq!(FallMode::Drop.toggled(), FallMode::Zoom);
        assert_eq!(FallMode::Zoom.toggled(), FallMode::Drop);
    }

    #[test]
    fn drop_opacity_ramp() {
        let pose = pose_for(0);
        assert_eq!(drop_visual(0.0, pose).opacity, 0.0);
        // Fully visible at and beyond 30% of local progress.
        for t in [0.3, 0.5, 0.8, 1.0] {
            assert_eq!(drop_visual(t, pose).opacity, 1.0, "t={t}");
        }
    }

    #[test]
    fn drop_starts_high_and_lands_on_pose() {
        let pose = pose_for(1);
        let start = drop_visual(0.0, pose);
        assert!((start.translate_y_vh + 120.0).abs() < EPS);
        assert_eq!(start.translate_x_vw, 0.0);
        assert_eq!(start.rotation_deg, 0.0);
        assert!((start.scale - 0.8).abs() < EPS);

        let end = drop_visual(1.0, pose);
        assert!((end.translate_y_vh - pose.vertical_vh).abs() < EPS);
        assert!((end.translate_x_vw - pose.lateral_vw).abs() < EPS);
        assert!((end.rotation_deg - pose.rotation_deg).abs() < EPS);
        assert!((end.scale - 1.0).abs() < EPS);
    }

    #[test]
    fn zoom_scale_settles_from_3_5_to_1() {
        let pose = pose_for(2);
        assert!((zoom_visual(0.0, pose).scale - 3.5).abs() < EPS);
        assert!((zoom_visual(1.0, pose).scale - 1.0).abs() < EPS);
    }

    #[test]
    fn zoom_blur_omitted_once_focused() {
        let pose = pose_for(0);
        assert!(zoom_visual(0.0, pose).blur_px.is_some());
        for t in [0.4, 0.6, 1.0] {
            assert_eq!(zoom_visual(t, pose).blur_px, None, "t={t}");
        }
    }

    #[test]
    fn drop_mode_never_blurs() {
        let pose = pose_for(3);
        for i in 0..=10 {
            assert_eq!(drop_visual(i as f64 / 10.0, pose).blur_px, None);
        }
    }

    #[test]
    fn shadow_ramp_is_shared_between_modes() {
        let pose = pose_for(4);
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            assert_eq!(drop_visual(t, pose).shadow, zoom_visual(t, pose).shadow);
        }
        let s = shadow_at(1.0);
        assert!((s.blur_px - 50.0).abs() < EPS);
        assert!((s.offset_y_px - 20.0).abs() < EPS);
        assert!((s.alpha - 0.4).abs() < EPS);
    }

    #[test]
    fn title_dims_with_the_timeline() {
        assert!((title_opacity(0.0) - 1.0).abs() < EPS);
        assert!((title_opacity(1.0) - 0.3).abs() < EPS);
        assert!((title_opacity(0.5) - 0.65).abs() < EPS);
    }

    #[test]
    fn actions_appear_in_the_last_tenth() {
        assert_eq!(actions_opacity(0.0), 0.0);
        assert_eq!(actions_opacity(0.9), 0.0);
        assert!((actions_opacity(0.95) - 0.5).abs() < EPS);
        assert_eq!(actions_opacity(1.0), 1.0);
    }

    #[test]
    fn settled_cards_are_identical_across_modes_in_scale_and_opacity() {
        for mode in [FallMode::Drop, FallMode::Zoom] {
            let v = card_visual(mode, 1.0, pose_for(0));
            assert_eq!(v.opacity, 1.0);
            assert!((v.scale - 1.0).abs() < EPS);
            assert_eq!(v.blur_px, None);
        }
    }
}
