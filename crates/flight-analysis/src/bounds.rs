//! Per-dimension value ranges used to scale downstream visualizations.

use enum_map::{Enum, EnumMap};
use serde::{Deserialize, Serialize};

use crate::{
    coord::Coord,
    models::{Average, Fix},
};

/// Inclusive range `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Smallest range covering `values` and the optional seeds.
    ///
    /// Returns `None` when there is nothing to cover.
    pub fn of(
        values: impl IntoIterator<Item = f64>,
        seed_min: Option<f64>,
        seed_max: Option<f64>,
    ) -> Option<Self> {
        let (mut min, mut max) = (seed_min, seed_max);
        for value in values {
            if min.is_none_or(|m| value < m) {
                min = Some(value);
            }
            if max.is_none_or(|m| value > m) {
                max = Some(value);
            }
        }
        Some(Self::new(min?, max?))
    }

    /// Narrows the range to lie within `[lower, upper]`.
    pub fn constrain(self, lower: f64, upper: f64) -> Self {
        Self::new(self.min.max(lower), self.max.min(upper))
    }

    /// Union of both ranges.
    pub fn merge(self, other: Self) -> Self {
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Lat,
    Lon,
    Alt,
    Time,
    Speed,
    Climb,
    Glide,
    Progress,
}

/// Named ranges, one optional [`Span`] per [`Dimension`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    ranges: EnumMap<Dimension, Option<Span>>,
}

impl Bounds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds a track and its averages into ranges.
    ///
    /// Speed never extends below zero. Climb always covers `±climb_floor` and
    /// never extends past `±climb_clamp`. Progress is fixed at `[0, 1]`.
    pub fn from_track<C: Coord>(
        fixes: &[Fix<C>],
        averages: &[Average],
        climb_clamp: f64,
        climb_floor: f64,
    ) -> Self {
        let mut bounds = Self::new();
        let (Some(first), Some(last)) = (fixes.first(), fixes.last()) else {
            return bounds;
        };

        bounds.set(Dimension::Lat, Span::of(fixes.iter().map(|f| f.position.lat()), None, None));
        bounds.set(Dimension::Lon, Span::of(fixes.iter().map(|f| f.position.lon()), None, None));
        bounds.set(Dimension::Alt, Span::of(fixes.iter().map(|f| f64::from(f.alt)), None, None));
        bounds.set(Dimension::Time, Some(Span::new(first.time as f64, last.time as f64)));

        bounds.set(
            Dimension::Speed,
            Span::of(averages.iter().map(|a| a.speed), Some(0.0), None)
                .map(|s| s.constrain(0.0, f64::INFINITY)),
        );
        bounds.set(
            Dimension::Climb,
            Span::of(
                averages.iter().map(|a| a.climb),
                Some(-climb_floor),
                Some(climb_floor),
            )
            .map(|s| s.constrain(-climb_clamp, climb_clamp)),
        );
        bounds.set(Dimension::Glide, Span::of(averages.iter().map(|a| a.glide), None, None));
        bounds.set(Dimension::Progress, Some(Span::new(0.0, 1.0)));
        bounds
    }

    pub fn get(&self, dimension: Dimension) -> Option<Span> {
        self.ranges[dimension]
    }

    pub fn set(&mut self, dimension: Dimension, span: Option<Span>) {
        self.ranges[dimension] = span;
    }

    /// Unions every dimension with `other`; a dimension missing on one side
    /// is taken from the other.
    pub fn merge(&mut self, other: &Bounds) -> &mut Self {
        for (dimension, theirs) in other.ranges.iter() {
            let merged = match (self.ranges[dimension], *theirs) {
                (Some(ours), Some(theirs)) => Some(ours.merge(theirs)),
                (ours, theirs) => ours.or(theirs),
            };
            self.ranges[dimension] = merged;
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, Span)> + '_ {
        self.ranges
            .iter()
            .filter_map(|(dimension, span)| span.map(|s| (dimension, s)))
    }
}
