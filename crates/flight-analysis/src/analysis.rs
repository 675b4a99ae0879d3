//! End-to-end analysis of one or many tracks.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    averages::compute_averages,
    bounds::Bounds,
    config::AnalysisConfig,
    coord::{Coord, GeoCoord},
    errors::{AnalysisError, Result},
    extremes::simplify_extremes,
    filter::validate_fixes,
    models::{Average, Extreme, Fix},
    segments::{Segment, SegmentKind, segments},
    summary::{FlightSummary, summarize},
};

/// Everything derived from a single track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightAnalysis<C = GeoCoord> {
    /// Index-aligned with the analysed fixes.
    pub averages: Vec<Average>,
    pub extremes: Vec<Extreme<C>>,
    pub segments: Vec<Segment<C>>,
    pub bounds: Bounds,
    pub summary: FlightSummary,
    /// Simplification passes needed to reach a fixed point.
    pub passes: usize,
}

impl<C: Coord> FlightAnalysis<C> {
    pub fn analyse(fixes: &[Fix<C>], config: &AnalysisConfig) -> Result<Self> {
        config.validate()?;
        if fixes.is_empty() {
            return Err(AnalysisError::EmptyTrack);
        }
        validate_fixes(fixes)?;

        let averages = compute_averages(fixes, config.window_secs)?;
        let simplification = simplify_extremes(fixes, &config.thresholds)?;
        let segments = segments(fixes, &averages, &simplification.extremes);
        let bounds = Bounds::from_track(fixes, &averages, config.climb_clamp, config.climb_floor);
        let summary = summarize(fixes, &bounds);

        tracing::debug!(
            "Analysed {} fixes: {} extremes, {} segments",
            fixes.len(),
            simplification.extremes.len(),
            segments.len()
        );

        Ok(Self {
            averages,
            extremes: simplification.extremes,
            segments,
            bounds,
            summary,
            passes: simplification.passes,
        })
    }

    pub fn thermals(&self) -> impl Iterator<Item = &Segment<C>> {
        self.segments
            .iter()
            .filter(|s| s.kind == SegmentKind::Thermal)
    }

    pub fn glides(&self) -> impl Iterator<Item = &Segment<C>> {
        self.segments
            .iter()
            .filter(|s| s.kind == SegmentKind::Glide)
    }
}

/// Analyses independent tracks in parallel; results keep the input order.
pub fn analyse_many<C: Coord + Send + Sync>(
    tracks: &[Vec<Fix<C>>],
    config: &AnalysisConfig,
) -> Vec<Result<FlightAnalysis<C>>> {
    tracks
        .par_iter()
        .map(|track| FlightAnalysis::analyse(track, config))
        .collect()
}

/// Union of the bounds of every successful analysis.
pub fn merged_bounds<'a, C: 'a>(analyses: impl IntoIterator<Item = &'a FlightAnalysis<C>>) -> Bounds {
    let mut bounds = Bounds::new();
    for analysis in analyses {
        bounds.merge(&analysis.bounds);
    }
    bounds
}
