//! Sliding time-window averages of speed, climb, glide and progress.
//!
//! Every fix gets statistics over the window `[t - dt/2, t + dt/2]`. Window
//! edges that fall between two fixes are linearly interpolated; edges that
//! fall outside the track clamp to its first or last fix. Both edges only
//! ever move forward, so a whole track is scanned in a single pass.

use crate::{
    coord::{Coord, interpolate_alt},
    errors::{AnalysisError, Result},
    filter::validate_fixes,
    models::{Average, Fix},
};

/// Where one edge of the window landed.
#[derive(Debug, Clone)]
struct Boundary<C> {
    position: C,
    alt: f64,
    /// Along-track distance from the first fix, in meters.
    s: f64,
}

/// Loop-carried state of the dual-pointer scan.
struct WindowScan<'a, C> {
    fixes: &'a [Fix<C>],
    /// Cumulative along-track distance at each fix.
    s: Vec<f64>,
    dt: f64,
    /// First fix at or after the window start.
    i0: usize,
    /// First fix at or after the window end, or `len` once past the end.
    i1: usize,
}

impl<'a, C: Coord> WindowScan<'a, C> {
    fn new(fixes: &'a [Fix<C>], dt: f64) -> Self {
        Self {
            fixes,
            s: cumulative_distances(fixes),
            dt,
            i0: 0,
            i1: 0,
        }
    }

    fn clamped(&self, i: usize) -> Boundary<C> {
        let fix = &self.fixes[i];
        Boundary {
            position: fix.position.clone(),
            alt: f64::from(fix.alt),
            s: self.s[i],
        }
    }

    /// Boundary at time `t` between fixes `i - 1` and `i`.
    fn interpolated(&self, i: usize, t: f64) -> Boundary<C> {
        let a = &self.fixes[i - 1];
        let b = &self.fixes[i];
        let k = (t - a.time as f64) / (b.time - a.time) as f64;
        Boundary {
            position: a.position.interpolate(&b.position, k),
            alt: interpolate_alt(f64::from(a.alt), f64::from(b.alt), k),
            s: (1.0 - k) * self.s[i - 1] + k * self.s[i],
        }
    }

    fn average_at(&mut self, t: i64) -> Average {
        let n = self.fixes.len();

        let t0 = t as f64 - 0.5 * self.dt;
        while self.i0 < n - 1 && (self.fixes[self.i0].time as f64) < t0 {
            self.i0 += 1;
        }
        let start = if self.i0 == 0 || (self.fixes[self.i0].time as f64) < t0 {
            self.clamped(self.i0)
        } else {
            self.interpolated(self.i0, t0)
        };

        let t1 = t0 + self.dt;
        while self.i1 < n && (self.fixes[self.i1].time as f64) < t1 {
            self.i1 += 1;
        }
        let end = if self.i1 == n {
            self.clamped(n - 1)
        } else if self.i1 == 0 {
            self.clamped(0)
        } else {
            self.interpolated(self.i1, t1)
        };

        let ds = end.s - start.s;
        let dz = end.alt - start.alt;
        let dp = start.position.distance(&end.position);
        Average::new(ds, dz, self.dt, dp)
    }
}

/// Length of the piecewise-linear track up to each fix.
pub fn cumulative_distances<C: Coord>(fixes: &[Fix<C>]) -> Vec<f64> {
    let mut accumulator = 0.0;
    let mut previous: Option<&Fix<C>> = None;
    fixes
        .iter()
        .map(|fix| {
            if let Some(prev) = previous {
                accumulator += prev.distance_to(fix);
            }
            previous = Some(fix);
            accumulator
        })
        .collect()
}

/// Computes one [`Average`] per fix over a centred window of `dt` seconds.
///
/// The result is index-aligned with `fixes`. An empty track yields an empty
/// vector; a single fix yields one all-zero average.
pub fn compute_averages<C: Coord>(fixes: &[Fix<C>], dt: f64) -> Result<Vec<Average>> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(AnalysisError::InvalidArgument(format!(
            "averaging window must be positive, got {dt}"
        )));
    }
    validate_fixes(fixes)?;
    if fixes.is_empty() {
        return Ok(Vec::new());
    }

    let mut scan = WindowScan::new(fixes, dt);
    let averages: Vec<Average> = fixes.iter().map(|fix| scan.average_at(fix.time)).collect();

    tracing::debug!(
        "Computed {} averages over a {dt}s window ({:.0}m along track)",
        averages.len(),
        scan.s.last().copied().unwrap_or_default()
    );
    Ok(averages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::PlanarCoord;

    fn fix(time: i64, x: f64, alt: i32) -> Fix<PlanarCoord> {
        Fix::new(time, PlanarCoord::new(x, 0.0), alt)
    }

    #[test]
    fn test_cumulative_distances_follow_the_path() {
        let fixes = vec![
            Fix::new(0, PlanarCoord::new(0.0, 0.0), 0),
            Fix::new(1, PlanarCoord::new(30.0, 40.0), 0),
            Fix::new(2, PlanarCoord::new(0.0, 0.0), 0),
        ];
        let s = cumulative_distances(&fixes);
        assert_eq!(s.len(), 3);
        assert!((s[1] - 50.0).abs() < 1e-9);
        // Back to the start: path length keeps growing
        assert!((s[2] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_two_fix_window() {
        // 1000m forward and 100m up over 10 seconds
        let fixes = vec![fix(0, 0.0, 1000), fix(10, 1000.0, 1100)];
        let averages = compute_averages(&fixes, 10.0).unwrap();
        assert_eq!(averages.len(), 2);

        // First window [-5, 5] clamps at the start, interpolates halfway in
        let first = averages[0];
        assert!((first.speed - 50.0).abs() < 1e-9);
        assert!((first.climb - 5.0).abs() < 1e-9);
        assert!((first.glide - 100.0_f64.atan2(1000.0)).abs() < 1e-12);
        assert!((first.progress - 1.0).abs() < 1e-9);

        // Last window [5, 15] interpolates halfway, clamps at the end
        let last = averages[1];
        assert!((last.speed - 50.0).abs() < 1e-9);
        assert!((last.climb - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_window_covering_whole_segment() {
        // Centre fix at t=5 sees the full 0..10 segment
        let fixes = vec![fix(0, 0.0, 1000), fix(5, 500.0, 1050), fix(10, 1000.0, 1100)];
        let averages = compute_averages(&fixes, 10.0).unwrap();
        let mid = averages[1];
        assert!((mid.speed - 100.0).abs() < 1e-9);
        assert!((mid.climb - 10.0).abs() < 1e-9);
        assert!((mid.glide - 100.0_f64.atan2(1000.0)).abs() < 1e-12);
    }

    #[test]
    fn test_window_start_before_first_fix_clamps() {
        let fixes = vec![fix(100, 0.0, 500), fix(101, 10.0, 510), fix(102, 20.0, 520)];
        let averages = compute_averages(&fixes, 60.0).unwrap();
        // Whole track is inside every window; distance is the full 20m
        for avg in &averages {
            assert!((avg.speed - 20.0 / 60.0).abs() < 1e-9);
            assert!((avg.climb - 20.0 / 60.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_single_fix_is_degenerate() {
        let averages = compute_averages(&[fix(0, 0.0, 1000)], 15.0).unwrap();
        assert_eq!(averages, vec![Average::default()]);
    }

    #[test]
    fn test_empty_track() {
        let averages = compute_averages::<PlanarCoord>(&[], 15.0).unwrap();
        assert!(averages.is_empty());
    }

    #[test]
    fn test_rejects_non_positive_window() {
        let fixes = vec![fix(0, 0.0, 1000)];
        assert!(matches!(
            compute_averages(&fixes, 0.0),
            Err(AnalysisError::InvalidArgument(_))
        ));
        assert!(matches!(
            compute_averages(&fixes, f64::NAN),
            Err(AnalysisError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_rejects_unsorted_track() {
        let fixes = vec![fix(10, 0.0, 1000), fix(5, 1.0, 1000)];
        assert!(matches!(
            compute_averages(&fixes, 15.0),
            Err(AnalysisError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_equal_times_give_equal_averages() {
        let fixes = vec![
            fix(0, 0.0, 1000),
            fix(4, 40.0, 1010),
            fix(4, 45.0, 1012),
            fix(8, 90.0, 1000),
            fix(12, 120.0, 990),
        ];
        let averages = compute_averages(&fixes, 6.0).unwrap();
        assert_eq!(averages[1], averages[2]);
    }

    #[test]
    fn test_meandering_path_has_low_progress() {
        // Out and back inside one window
        let fixes = vec![fix(0, 0.0, 1000), fix(5, 100.0, 1000), fix(10, 0.0, 1000)];
        let averages = compute_averages(&fixes, 20.0).unwrap();
        let mid = averages[1];
        assert!((mid.speed - 10.0).abs() < 1e-9);
        assert!(mid.progress.abs() < 1e-9);
    }

    #[test]
    fn test_stationary_track_has_zero_progress() {
        let fixes = vec![fix(0, 0.0, 1000), fix(1, 0.0, 1001), fix(2, 0.0, 1002)];
        for avg in compute_averages(&fixes, 2.0).unwrap() {
            assert_eq!(avg.speed, 0.0);
            assert_eq!(avg.progress, 0.0);
        }
    }

    #[test]
    fn test_geo_edge_early_in_long_segment_keeps_progress_bounded() {
        use crate::coord::GeoCoord;

        // Window edges land a few percent into segments hundreds of meters long
        for step in [0.00003, 0.0004, 0.002, 0.01] {
            let fixes = vec![
                Fix::new(0, GeoCoord::new(45.8167, 11.7833), 1500),
                Fix::new(120, GeoCoord::new(45.8167 + step, 11.7833 + step), 1480),
                Fix::new(121, GeoCoord::new(45.8167 + 2.0 * step, 11.7833 + step), 1479),
            ];
            for avg in compute_averages(&fixes, 15.0).unwrap() {
                assert!((0.0..=1.0).contains(&avg.progress), "step {step}: {}", avg.progress);
            }
            let first = compute_averages(&fixes, 15.0).unwrap()[0];
            assert!(first.progress > 0.999);
        }
    }
}
