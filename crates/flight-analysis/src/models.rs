use serde::{Deserialize, Serialize};

use crate::coord::{Coord, GeoCoord};

/// A single timestamped position and altitude sample along a flight track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fix<C = GeoCoord> {
    /// Seconds; non-decreasing across a track, duplicates allowed.
    pub time: i64,
    pub position: C,
    /// Meters.
    pub alt: i32,
}

impl<C: Coord> Fix<C> {
    pub fn new(time: i64, position: C, alt: i32) -> Self {
        Self {
            time,
            position,
            alt,
        }
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        self.position.distance(&other.position)
    }
}

/// Windowed motion statistics for one fix.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Average {
    /// Along-track speed in m/s.
    pub speed: f64,
    /// Vertical speed in m/s, positive when climbing.
    pub climb: f64,
    /// Glide angle in radians, `atan2(dz, ds)`.
    pub glide: f64,
    /// Chord distance over along-track distance in `[0, 1]`, 0 when nothing
    /// was traveled.
    pub progress: f64,
}

impl Average {
    pub fn new(ds: f64, dz: f64, dt: f64, dp: f64) -> Self {
        Self {
            speed: ds / dt,
            climb: dz / dt,
            glide: dz.atan2(ds),
            // Interpolated edges can put the chord a rounding error past the arc
            progress: if ds == 0.0 { 0.0 } else { (dp / ds).clamp(0.0, 1.0) },
        }
    }

    /// Climb rate when climbing, otherwise the glide ratio (`1 / tan(glide)`).
    pub fn climb_or_glide(&self) -> f64 {
        if self.climb >= 0.0 {
            self.climb
        } else {
            1.0 / self.glide.tan()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtremeKind {
    Minimum,
    Maximum,
}

/// An altitude turning point of a track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "fix", rename_all = "lowercase")]
pub enum Extreme<C = GeoCoord> {
    Minimum(Fix<C>),
    Maximum(Fix<C>),
}

impl<C> Extreme<C> {
    pub fn new(kind: ExtremeKind, fix: Fix<C>) -> Self {
        match kind {
            ExtremeKind::Minimum => Extreme::Minimum(fix),
            ExtremeKind::Maximum => Extreme::Maximum(fix),
        }
    }

    pub fn kind(&self) -> ExtremeKind {
        match self {
            Extreme::Minimum(_) => ExtremeKind::Minimum,
            Extreme::Maximum(_) => ExtremeKind::Maximum,
        }
    }

    pub fn fix(&self) -> &Fix<C> {
        match self {
            Extreme::Minimum(fix) | Extreme::Maximum(fix) => fix,
        }
    }

    pub fn alt(&self) -> i32 {
        self.fix().alt
    }

    pub fn time(&self) -> i64 {
        self.fix().time
    }

    /// Whether `self` lies further in its own direction than `other`:
    /// higher for maxima, lower for minima.
    pub fn more_extreme_than(&self, other: &Self) -> bool {
        match self.kind() {
            ExtremeKind::Maximum => self.alt() > other.alt(),
            ExtremeKind::Minimum => self.alt() < other.alt(),
        }
    }
}
