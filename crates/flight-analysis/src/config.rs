//! Analysis parameters.

use std::{env, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::{AnalysisError, Result};

/// How the four-window test treats two outer extrema at identical altitude.
///
/// With `dz03 == 0` the relative contrast `dz12 / dz03` has no meaningful
/// value. The absolute test still applies in both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroContrast {
    /// The contrast is infinite and never falls below the relative threshold.
    #[default]
    Significant,
    /// The middle pair is always discardable.
    Insignificant,
}

/// Thresholds for discarding insignificant altitude extrema.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtremeThresholds {
    /// Minimum altitude swing in meters.
    pub absolute: f64,
    /// Minimum ratio of an inner swing to its enclosing swing, in `(0, 1)`.
    pub relative: f64,
    pub zero_contrast: ZeroContrast,
}

impl Default for ExtremeThresholds {
    fn default() -> Self {
        Self {
            absolute: 64.0,
            relative: 1.0 / 8.0,
            zero_contrast: ZeroContrast::default(),
        }
    }
}

impl ExtremeThresholds {
    pub fn new(absolute: f64, relative: f64) -> Self {
        Self {
            absolute,
            relative,
            ..Default::default()
        }
    }

    pub fn with_zero_contrast(mut self, zero_contrast: ZeroContrast) -> Self {
        self.zero_contrast = zero_contrast;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.absolute.is_finite() || self.absolute < 0.0 {
            return Err(AnalysisError::InvalidArgument(format!(
                "absolute threshold must be a non-negative number of meters, got {}",
                self.absolute
            )));
        }
        if !(self.relative > 0.0 && self.relative < 1.0) {
            return Err(AnalysisError::InvalidArgument(format!(
                "relative threshold must lie strictly between 0 and 1, got {}",
                self.relative
            )));
        }
        Ok(())
    }
}

/// Full parameter set for [`crate::analysis::FlightAnalysis::analyse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Width of the averaging window in seconds.
    pub window_secs: f64,
    pub thresholds: ExtremeThresholds,
    /// Climb bounds never extend past `±climb_clamp` m/s.
    pub climb_clamp: f64,
    /// Climb bounds always cover at least `±climb_floor` m/s.
    pub climb_floor: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_secs: 15.0,
            thresholds: ExtremeThresholds::default(),
            climb_clamp: 5.0,
            climb_floor: 0.5,
        }
    }
}

impl AnalysisConfig {
    /// Defaults overridden by `FLIGHT_*` environment variables where set.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            window_secs: env_or("FLIGHT_WINDOW_SECS", defaults.window_secs)?,
            thresholds: ExtremeThresholds {
                absolute: env_or("FLIGHT_EXTREME_ABSOLUTE", defaults.thresholds.absolute)?,
                relative: env_or("FLIGHT_EXTREME_RELATIVE", defaults.thresholds.relative)?,
                zero_contrast: defaults.thresholds.zero_contrast,
            },
            climb_clamp: env_or("FLIGHT_CLIMB_CLAMP", defaults.climb_clamp)?,
            climb_floor: defaults.climb_floor,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if !self.window_secs.is_finite() || self.window_secs <= 0.0 {
            return Err(AnalysisError::InvalidArgument(format!(
                "averaging window must be positive, got {}",
                self.window_secs
            )));
        }
        if !(self.climb_clamp > 0.0) || !(self.climb_floor >= 0.0) {
            return Err(AnalysisError::InvalidArgument(format!(
                "climb band must be positive, got clamp {} floor {}",
                self.climb_clamp, self.climb_floor
            )));
        }
        self.thresholds.validate()
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> Result<T> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| AnalysisError::InvalidArgument(format!("{key}={raw:?} does not parse"))),
        Err(_) => Ok(default),
    }
}
