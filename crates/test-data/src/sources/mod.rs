//! Flight sources for analysis testing.
//!
//! [`FlightGenerator`] flies a scripted sequence of glides and thermals and
//! logs it the way a noisy GPS receiver would, keeping the script as ground
//! truth.

mod procedural;

pub use procedural::{FlightGenerator, FlightScript, Phase, PhaseKind, SimulatedFlight};
