//! Windowed flight statistics and altitude extremum simplification.
//!
//! Given a time-ordered track of [`Fix`]es this crate derives:
//! - per-fix sliding-window [`Average`]s of speed, climb, glide and progress,
//! - a denoised, strictly alternating list of altitude [`Extreme`]s with the
//!   thermals and glides between them,
//! - [`Bounds`] of every dimension for scaling visualizations.

pub mod analysis;
pub mod averages;
pub mod bounds;
pub mod config;
pub mod coord;
pub mod errors;
pub mod extremes;
pub mod filter;
pub mod models;
pub mod segments;
pub mod summary;
pub mod track;

pub use analysis::{FlightAnalysis, analyse_many, merged_bounds};
pub use bounds::{Bounds, Dimension, Span};
pub use config::{AnalysisConfig, ExtremeThresholds, ZeroContrast};
pub use coord::{Coord, GeoCoord, PlanarCoord};
pub use errors::{AnalysisError, Result};
pub use models::{Average, Extreme, ExtremeKind, Fix};
pub use segments::{Segment, SegmentKind};
pub use track::{TrackPoint, parse_track, to_track_points};
