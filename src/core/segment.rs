//! Segment allocation — slicing the overall timeline into equal per-card
//! ranges and deriving each card's eased local progress.

/// Linear sub-progress of `p` across `[start, end]`: exactly 0 at or below
/// `start`, exactly 1 at or beyond `end`, linear in between.
pub fn sub_progress(p: f64, start: f64, end: f64) -> f64 {
    if p <= start {
        0.0
    } else if p >= end {
        1.0
    } else {
        (p - start) / (end - start)
    }
}

/// Cubic ease-out: fast start, gentle landing.
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// The `index`-th of `count` equal slices of [0,1].
///
/// Caller guarantees `count > 0`; slices tile the range exactly, so
/// `segment_range(i, n).1 == segment_range(i + 1, n).0`.
pub fn segment_range(index: usize, count: usize) -> (f64, f64) {
    let start = index as f64 / count as f64;
    let end = (index + 1) as f64 / count as f64;
    (start, end)
}

/// Eased local progress for card `index` of `count` at overall `progress`.
///
/// `count == 0` means there is nothing to animate; the answer is 0 rather
/// than a division by zero.
pub fn eased_sub_progress(progress: f64, index: usize, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let (start, end) = segment_range(index, count);
    ease_out_cubic(sub_progress(progress, start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_tile_unit_range_exactly() {
        for count in 1..=12 {
            assert_eq!(segment_range(0, count).0, 0.0);
            assert_eq!(segment_range(count - 1, count).1, 1.0);
            for i in 0..count - 1 {
                assert_eq!(
                    segment_range(i, count).1,
                    segment_range(i + 1, count).0,
                    "gap or overlap between segments {i} and {} of {count}",
                    i + 1
                );
            }
        }
    }

    #[test]
    fn sub_progress_hits_endpoints_exactly() {
        assert_eq!(sub_progress(0.2, 0.2, 0.6), 0.0);
        assert_eq!(sub_progress(0.6, 0.2, 0.6), 1.0);
        assert_eq!(sub_progress(0.0, 0.2, 0.6), 0.0);
        assert_eq!(sub_progress(0.9, 0.2, 0.6), 1.0);
        assert!((sub_progress(0.4, 0.2, 0.6) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn sub_progress_is_monotonic() {
        let mut prev = sub_progress(0.0, 0.3, 0.7);
        for i in 1..=1000 {
            let p = i as f64 / 1000.0;
            let v = sub_progress(p, 0.3, 0.7);
            assert!(v >= prev, "sub_progress decreased at p={p}");
            prev = v;
        }
    }

    #[test]
    fn ease_out_cubic_boundaries_and_shape() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        // Ease-out: front-loaded, so above the diagonal mid-way.
        assert!(ease_out_cubic(0.5) > 0.5);
    }

    #[test]
    fn zero_cards_never_divides() {
        assert_eq!(eased_sub_progress(0.5, 0, 0), 0.0);
        assert_eq!(eased_sub_progress(1.0, 3, 0), 0.0);
    }

    #[test]
    fn cards_sweep_in_index_order_without_overlap() {
        // Sweep the overall progress 0→1; each card's local progress must
        // rise 0→1 exactly once, and no two cards may be mid-flight at the
        // same instant (their ranges don't overlap by construction).
        const COUNT: usize = 5;
        let mut prev = [0.0_f64; COUNT];
        let mut completed = 0;

        for step in 0..=100 {
            let p = f64::from(step) / 100.0;
            let subs: Vec<f64> = (0..COUNT)
                .map(|i| eased_sub_progress(p, i, COUNT))
                .collect();

            let mid_flight: Vec<usize> = (0..COUNT)
                .filter(|&i| subs[i] > 0.0 && subs[i] < 1.0)
                .collect();
            assert!(
                mid_flight.len() <= 1,
                "cards {mid_flight:?} animating simultaneously at p={p}"
            );

            for i in 0..COUNT {
                assert!(subs[i] >= prev[i], "card {i} regressed at p={p}");
                // A later card may never be ahead of an earlier one.
                if i > 0 {
                    assert!(subs[i] <= subs[i - 1] + 1e-12);
                }
            }

            while completed < COUNT && subs[completed] >= 1.0 {
                completed += 1;
            }
            prev.copy_from_slice(&subs);
        }
        assert_eq!(completed, COUNT, "not every card finished its sweep");
    }
}
