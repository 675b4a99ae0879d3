//! JSON track layout: an array of `{time, lat, lon, alt}` objects.

use serde::{Deserialize, Serialize};

use crate::{
    coord::GeoCoord,
    errors::{AnalysisError, Result},
    models::Fix,
};

/// One sample of a track file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    /// Unix seconds.
    pub time: i64,
    pub lat: f64,
    pub lon: f64,
    /// Meters.
    pub alt: i32,
}

impl From<&Fix<GeoCoord>> for TrackPoint {
    fn from(fix: &Fix<GeoCoord>) -> Self {
        Self {
            time: fix.time,
            lat: fix.position.lat,
            lon: fix.position.lon,
            alt: fix.alt,
        }
    }
}

impl From<TrackPoint> for Fix<GeoCoord> {
    fn from(point: TrackPoint) -> Self {
        Fix::new(point.time, GeoCoord::new(point.lat, point.lon), point.alt)
    }
}

pub fn to_track_points(fixes: &[Fix<GeoCoord>]) -> Vec<TrackPoint> {
    fixes.iter().map(TrackPoint::from).collect()
}

/// Parses a JSON track into fixes, in file order.
pub fn parse_track(json: &str) -> Result<Vec<Fix<GeoCoord>>> {
    let points: Vec<TrackPoint> =
        serde_json::from_str(json).map_err(|e| AnalysisError::MalformedInput(e.to_string()))?;
    Ok(points.into_iter().map(Fix::from).collect())
}
