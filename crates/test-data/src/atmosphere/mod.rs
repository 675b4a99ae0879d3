//! Atmosphere modelling.
//!
//! Lift and sink strength vary smoothly in space and time; this module
//! models that variation with Perlin noise.

mod lift;

pub use lift::LiftField;
