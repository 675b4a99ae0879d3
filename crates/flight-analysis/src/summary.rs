use serde::{Deserialize, Serialize};

use crate::{
    bounds::{Bounds, Dimension},
    models::Fix,
};

/// Single-pass accumulator over the fixes of a track.
pub trait TrackMetric {
    type Score;
    fn next_fix<C>(&mut self, fix: &Fix<C>);
    fn finish(&mut self) -> Self::Score;
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlightSummary {
    pub take_off_time: i64,
    pub landing_time: i64,
    pub duration: i64,
    pub take_off_alt: i32,
    pub min_alt: i32,
    pub max_alt: i32,
    pub max_alt_above_take_off: i32,
    /// Largest rise from a running low point to a later high point.
    pub max_alt_gain: i32,
    pub accumulated_alt_gain: i32,
    pub max_climb: f64,
    pub max_sink: f64,
}

pub fn summarize<C>(fixes: &[Fix<C>], bounds: &Bounds) -> FlightSummary {
    let mut acc = Metrics::default();
    for fix in fixes {
        acc.next_fix(fix);
    }
    let mut summary = acc.finish();
    if let Some(climb) = bounds.get(Dimension::Climb) {
        summary.max_climb = climb.max;
        summary.max_sink = climb.min;
    }
    summary
}

#[derive(Debug, Clone, Default)]
struct Metrics {
    time: TimeMetric,
    altitude: AltitudeMetric,
    gain: AltitudeGainMetric,
}

impl TrackMetric for Metrics {
    type Score = FlightSummary;
    fn next_fix<C>(&mut self, fix: &Fix<C>) {
        self.time.next_fix(fix);
        self.altitude.next_fix(fix);
        self.gain.next_fix(fix);
    }

    fn finish(&mut self) -> FlightSummary {
        let (take_off_time, landing_time) = self.time.finish();
        let (take_off_alt, min_alt, max_alt) = self.altitude.finish();
        let (max_alt_gain, accumulated_alt_gain) = self.gain.finish();
        FlightSummary {
            take_off_time,
            landing_time,
            duration: landing_time - take_off_time,
            take_off_alt,
            min_alt,
            max_alt,
            max_alt_above_take_off: max_alt.saturating_sub(take_off_alt),
            max_alt_gain,
            accumulated_alt_gain,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
struct TimeMetric {
    first: Option<i64>,
    last: Option<i64>,
}

impl TrackMetric for TimeMetric {
    type Score = (i64, i64);
    fn next_fix<C>(&mut self, fix: &Fix<C>) {
        if self.first.is_none() {
            self.first = Some(fix.time);
        }
        self.last = Some(fix.time);
    }

    fn finish(&mut self) -> (i64, i64) {
        (self.first.unwrap_or_default(), self.last.unwrap_or_default())
    }
}

#[derive(Debug, Clone, Default)]
struct AltitudeMetric {
    take_off: Option<i32>,
    min: Option<i32>,
    max: Option<i32>,
}

impl TrackMetric for AltitudeMetric {
    type Score = (i32, i32, i32);
    fn next_fix<C>(&mut self, fix: &Fix<C>) {
        self.take_off.get_or_insert(fix.alt);
        self.min = Some(self.min.map_or(fix.alt, |m| m.min(fix.alt)));
        self.max = Some(self.max.map_or(fix.alt, |m| m.max(fix.alt)));
    }

    fn finish(&mut self) -> (i32, i32, i32) {
        (
            self.take_off.unwrap_or_default(),
            self.min.unwrap_or_default(),
            self.max.unwrap_or_default(),
        )
    }
}

#[derive(Debug, Clone, Default)]
struct AltitudeGainMetric {
    running_min: Option<i32>,
    running_max: Option<i32>,
    last_alt: Option<i32>,
    max_gain: i32,
    accumulated: i32,
}

impl TrackMetric for AltitudeGainMetric {
    type Score = (i32, i32);
    fn next_fix<C>(&mut self, fix: &Fix<C>) {
        let alt = fix.alt;
        match (self.running_min, self.running_max) {
            (Some(min), Some(max)) => {
                if alt < min {
                    self.running_min = Some(alt);
                } else if alt > max {
                    self.running_max = Some(alt);
                    self.max_gain = self.max_gain.max(alt.saturating_sub(min));
                }
            }
            _ => {
                self.running_min = Some(alt);
                self.running_max = Some(alt);
            }
        }
        if let Some(last) = self.last_alt {
            let change = alt.saturating_sub(last);
            if change > 0 {
                self.accumulated = self.accumulated.saturating_add(change);
            }
        }
        self.last_alt = Some(alt);
    }

    fn finish(&mut self) -> (i32, i32) {
        (self.max_gain, self.accumulated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bounds::Span, coord::PlanarCoord};

    fn track(alts: &[i32]) -> Vec<Fix<PlanarCoord>> {
        alts.iter()
            .enumerate()
            .map(|(i, &alt)| Fix::new(1000 + 10 * i as i64, PlanarCoord::new(0.0, 0.0), alt))
            .collect()
    }

    #[test]
    fn test_summary() {
        let fixes = track(&[1500, 1400, 1900, 1200, 2100, 1000]);
        let mut bounds = Bounds::new();
        bounds.set(Dimension::Climb, Some(Span::new(-3.5, 4.2)));

        let summary = summarize(&fixes, &bounds);
        assert_eq!(summary.take_off_time, 1000);
        assert_eq!(summary.landing_time, 1050);
        assert_eq!(summary.duration, 50);
        assert_eq!(summary.take_off_alt, 1500);
        assert_eq!(summary.min_alt, 1000);
        assert_eq!(summary.max_alt, 2100);
        assert_eq!(summary.max_alt_above_take_off, 600);
        assert_eq!(summary.accumulated_alt_gain, 500 + 900);
        assert_eq!(summary.max_climb, 4.2);
        assert_eq!(summary.max_sink, -3.5);
    }

    #[test]
    fn test_max_alt_gain_tracks_running_minimum() {
        // Low of 1400 then new high 1900 gives 500; later 1200 -> 2100 gives 900
        let fixes = track(&[1500, 1400, 1900, 1200, 2100, 1000]);
        let summary = summarize(&fixes, &Bounds::new());
        assert_eq!(summary.max_alt_gain, 900);
    }

    #[test]
    fn test_gain_needs_a_new_high() {
        // Dropping to 800 and climbing back to 1400 never exceeds the 1500 high
        let fixes = track(&[1500, 800, 1400]);
        assert_eq!(summarize(&fixes, &Bounds::new()).max_alt_gain, 0);
    }

    #[test]
    fn test_full_range_altitudes_saturate() {
        let fixes = track(&[0, i32::MIN, i32::MAX, i32::MIN, i32::MAX]);
        let summary = summarize(&fixes, &Bounds::new());
        assert_eq!(summary.max_alt_above_take_off, i32::MAX);
        assert_eq!(summary.max_alt_gain, i32::MAX);
        assert_eq!(summary.accumulated_alt_gain, i32::MAX);
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize::<PlanarCoord>(&[], &Bounds::new());
        assert_eq!(summary, FlightSummary::default());
    }
}
