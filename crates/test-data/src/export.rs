//! JSON track export.
//!
//! Writes fixes in the [`TrackPoint`] layout the `flight-analysis` binary
//! reads.

use std::{fs, path::Path};

use anyhow::Context;
use flight_analysis::{Fix, GeoCoord};

pub use flight_analysis::track::{TrackPoint, parse_track, to_track_points};

pub fn write_track(path: &Path, fixes: &[Fix<GeoCoord>]) -> anyhow::Result<()> {
    let json = serde_json::to_string(&to_track_points(fixes))?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}

pub fn read_track(path: &Path) -> anyhow::Result<Vec<Fix<GeoCoord>>> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_track(&raw).with_context(|| format!("parsing {}", path.display()))
}
