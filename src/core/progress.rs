//! Scroll sampling and per-frame progress smoothing.
//!
//! A scroll notification is reduced to a normalized target in [0,1]; every
//! animation frame the displayed value takes one exponential step toward
//! that target and snaps once the residual is imperceptible.

/// Geometry of the scrollable region, read once per scroll notification.
///
/// `region_top_px` is the region's top edge relative to the viewport top:
/// positive while the region is still below the fold, negative once the
/// viewport has scrolled into it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    /// Total height of the scrollable region.
    pub region_height_px: f64,
    /// Region top edge relative to the viewport top.
    pub region_top_px: f64,
    /// Visible viewport height.
    pub viewport_height_px: f64,
}

impl ScrollMetrics {
    /// How far the viewport has advanced into the region.
    pub fn scrolled_px(&self) -> f64 {
        -self.region_top_px
    }

    /// The distance available to scroll through.  Non-positive when the
    /// region is shorter than the viewport.
    pub fn scrollable_px(&self) -> f64 {
        self.region_height_px - self.viewport_height_px
    }

    /// Normalized target progress in [0,1].
    ///
    /// A region shorter than the viewport has nothing to scroll through, so
    /// the target is forced to 0 — never a division by zero.  Scrolling
    /// above the region start yields a negative ratio and clamps to 0.
    pub fn target(&self) -> f64 {
        let scrollable = self.scrollable_px();
        if scrollable <= 0.0 {
            return 0.0;
        }
        (self.scrolled_px() / scrollable).clamp(0.0, 1.0)
    }
}

/// Default exponential approach factor.  Must stay in (0,1) for stability.
pub const DEFAULT_LERP_FACTOR: f64 = 0.08;

/// Residual below which `current` snaps onto `target`, terminating the
/// floating convergence instead of recomputing sub-pixel deltas forever.
const SNAP_EPSILON: f64 = 1e-4;

/// Smoothed progress: `current` chases `target` one lerp step per frame.
///
/// Both values are always clamped to [0,1].
#[derive(Debug, Clone, Copy)]
pub struct ProgressState {
    target: f64,
    current: f64,
    lerp_factor: f64,
}

impl ProgressState {
    /// Out-of-range factors are pulled back into a stable band rather than
    /// rejected; 0 or 1 would stall or disable the smoothing entirely.
    pub fn new(lerp_factor: f64) -> Self {
        Self {
            target: 0.0,
            current: 0.0,
            lerp_factor: lerp_factor.clamp(0.01, 0.99),
        }
    }

    /// Store a freshly sampled target.  Only the most recent value matters;
    /// intermediate samples that were never stepped toward are simply lost.
    pub fn retarget(&mut self, target: f64) {
        self.target = target.clamp(0.0, 1.0);
    }

    /// One smoother step.  Returns `true` while visible motion remains.
    pub fn step(&mut self) -> bool {
        let residual = self.target - self.current;
        if residual.abs() < SNAP_EPSILON {
            self.current = self.target;
            return false;
        }
        self.current += residual * self.lerp_factor;
        true
    }

    /// Drop any in-flight convergence and return to the initial state.
    pub fn reset(&mut self) {
        self.target = 0.0;
        self.current = 0.0;
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn current(&self) -> f64 {
        self.current
    }
}
