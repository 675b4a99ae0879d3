//! Synthetic flight generation for flight-analysis.
//!
//! This crate produces realistic soaring flights (glides, thermals, GPS
//! noise) with a known phase script, so analysis results can be checked
//! against what was actually flown.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use test_data::prelude::*;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let flight = FlightGenerator::new(Site::ANNECY, 7)
//!     .with_thermals(4)
//!     .generate(&ParagliderProfile::default(), &mut rng);
//!
//! let analysis = FlightAnalysis::analyse(&flight.fixes, &AnalysisConfig::default())?;
//! ```

pub mod atmosphere;
pub mod config;
pub mod export;
pub mod profiles;
pub mod sources;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::atmosphere::LiftField;
    pub use crate::config::{FlightConfig, Site};
    pub use crate::export::{TrackPoint, read_track, to_track_points, write_track};
    pub use crate::profiles::{
        GliderProfile, HangGliderProfile, ParagliderProfile, SailplaneProfile, sample_variance,
    };
    pub use crate::sources::{FlightGenerator, FlightScript, Phase, PhaseKind, SimulatedFlight};
    pub use flight_analysis::{AnalysisConfig, Fix, FlightAnalysis, GeoCoord};
    pub use rand::{SeedableRng, rngs::StdRng};
}
