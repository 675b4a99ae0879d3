//! Position primitives consumed by the analysis engines.
//!
//! The engines never look inside a position; everything they need is a
//! distance in meters and a point a given fraction of the way between two
//! positions. [`GeoCoord`] answers both on the sphere, [`PlanarCoord`] on a
//! flat projected plane.

use geo::{Distance as _, Euclidean, Haversine, InterpolatePoint as _, geometry::Point};
use serde::{Deserialize, Serialize};

/// A horizontal position that can measure and interpolate against another.
pub trait Coord: Clone {
    /// Surface distance to `other` in meters.
    fn distance(&self, other: &Self) -> f64;

    /// Position at `fraction` of the way from `self` to `other`.
    ///
    /// `interpolate(a, b, 0.0)` is `a` and `interpolate(a, b, 1.0)` is `b`.
    fn interpolate(&self, other: &Self, fraction: f64) -> Self;

    /// North/south component, used when folding bounds.
    fn lat(&self) -> f64;

    /// East/west component, used when folding bounds.
    fn lon(&self) -> f64;
}

/// WGS84 position in decimal degrees, measured on a mean-radius sphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoord {
    pub lat: f64,
    pub lon: f64,
}

impl GeoCoord {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    fn point(&self) -> Point {
        Point::new(self.lon, self.lat)
    }
}

impl Coord for GeoCoord {
    fn distance(&self, other: &Self) -> f64 {
        Haversine.distance(self.point(), other.point())
    }

    fn interpolate(&self, other: &Self, fraction: f64) -> Self {
        if fraction <= 0.0 {
            return *self;
        }
        if fraction >= 1.0 {
            return *other;
        }
        let p = Haversine.point_at_ratio_between(self.point(), other.point(), fraction);
        Self::new(p.y(), p.x())
    }

    fn lat(&self) -> f64 {
        self.lat
    }

    fn lon(&self) -> f64 {
        self.lon
    }
}

/// Position on a local plane, in meters.
///
/// `lat()` reports `y` and `lon()` reports `x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanarCoord {
    pub x: f64,
    pub y: f64,
}

impl PlanarCoord {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl Coord for PlanarCoord {
    fn distance(&self, other: &Self) -> f64 {
        Euclidean.distance(self.point(), other.point())
    }

    fn interpolate(&self, other: &Self, fraction: f64) -> Self {
        if fraction <= 0.0 {
            return *self;
        }
        if fraction >= 1.0 {
            return *other;
        }
        let p = Euclidean.point_at_ratio_between(self.point(), other.point(), fraction);
        Self::new(p.x(), p.y())
    }

    fn lat(&self) -> f64 {
        self.y
    }

    fn lon(&self) -> f64 {
        self.x
    }
}

/// Linear altitude blend matching [`Coord::interpolate`]'s fraction.
pub fn interpolate_alt(alt0: f64, alt1: f64, fraction: f64) -> f64 {
    (1.0 - fraction) * alt0 + fraction * alt1
}
