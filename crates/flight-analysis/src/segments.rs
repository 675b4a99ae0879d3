//! Thermal and glide statistics between consecutive altitude extrema.

use serde::{Deserialize, Serialize};

use crate::{
    coord::Coord,
    models::{Average, Extreme, ExtremeKind, Fix},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Minimum to the following maximum.
    Thermal,
    /// Maximum to the following minimum.
    Glide,
}

/// Summary of the flight between two consecutive extrema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment<C> {
    pub kind: SegmentKind,
    pub start: Fix<C>,
    pub finish: Fix<C>,
    /// Altitude change in meters, positive for thermals.
    pub dz: i32,
    /// Duration in seconds.
    pub dt: i64,
    /// Straight-line distance between start and finish in meters.
    pub ds: f64,
    pub average_climb: f64,
    pub average_speed: f64,
    /// Distance covered per meter lost; `None` without altitude change.
    pub glide_ratio: Option<f64>,
    pub max_climb: f64,
    /// Strongest sink, zero or negative.
    pub min_climb: f64,
    pub max_speed: f64,
    pub accumulated_gain: i32,
    pub accumulated_loss: i32,
}

/// Builds one [`Segment`] per consecutive pair of `extremes`.
///
/// `fixes` and `averages` must be index-aligned; extrema are located in them
/// by time.
pub fn segments<C: Coord>(
    fixes: &[Fix<C>],
    averages: &[Average],
    extremes: &[Extreme<C>],
) -> Vec<Segment<C>> {
    extremes
        .windows(2)
        .map(|pair| segment(fixes, averages, &pair[0], &pair[1]))
        .collect()
}

/// Index of the first fix whose time is at or after `time`.
fn first_at_or_after<C>(fixes: &[Fix<C>], time: i64) -> usize {
    fixes.partition_point(|f| f.time < time)
}

fn segment<C: Coord>(
    fixes: &[Fix<C>],
    averages: &[Average],
    extreme0: &Extreme<C>,
    extreme1: &Extreme<C>,
) -> Segment<C> {
    let (start, finish) = (extreme0.fix(), extreme1.fix());
    let dz = finish.alt.saturating_sub(start.alt);
    let dt = finish.time - start.time;
    let ds = start.distance_to(finish);
    let kind = match extreme0.kind() {
        ExtremeKind::Minimum => SegmentKind::Thermal,
        ExtremeKind::Maximum => SegmentKind::Glide,
    };

    let mut max_climb = 0.0_f64;
    let mut min_climb = 0.0_f64;
    let mut max_speed = 0.0_f64;
    let mut accumulated_gain = 0_i32;
    let mut accumulated_loss = 0_i32;

    let from = first_at_or_after(fixes, start.time);
    let to = first_at_or_after(fixes, finish.time).min(averages.len());
    for i in from..to {
        let avg = &averages[i];
        max_climb = max_climb.max(avg.climb);
        min_climb = min_climb.min(avg.climb);
        max_speed = max_speed.max(avg.speed);
        if let Some(next) = fixes.get(i + 1) {
            let change = next.alt.saturating_sub(fixes[i].alt);
            if change > 0 {
                accumulated_gain = accumulated_gain.saturating_add(change);
            } else {
                accumulated_loss = accumulated_loss.saturating_sub(change);
            }
        }
    }

    let per_second = |value: f64| if dt == 0 { 0.0 } else { value / dt as f64 };
    Segment {
        kind,
        start: start.clone(),
        finish: finish.clone(),
        dz,
        dt,
        ds,
        average_climb: per_second(f64::from(dz)),
        average_speed: per_second(ds),
        glide_ratio: (dz != 0).then(|| -ds / f64::from(dz)),
        max_climb,
        min_climb,
        max_speed,
        accumulated_gain,
        accumulated_loss,
    }
}
