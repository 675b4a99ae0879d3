//! Perlin noise-based lift strength.

use noise::{NoiseFn, Perlin};

/// Smoothly varying multiplier on climb and sink rates.
///
/// Multiple octaves of Perlin noise over (east, north, time) give thermals
/// that pulse and glides through patches of stronger or weaker sink.
#[derive(Debug, Clone)]
pub struct LiftField {
    perlin: Perlin,
    /// Largest deviation from 1.0, in `[0, 1)`.
    amplitude: f64,
    /// Spatial frequency per meter.
    frequency: f64,
    /// Temporal frequency per second.
    time_frequency: f64,
    octaves: u32,
}

impl LiftField {
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            amplitude: 0.4,
            frequency: 0.0005,
            time_frequency: 0.01,
            octaves: 3,
        }
    }

    /// A field with no variation; every factor is exactly 1.0.
    pub fn calm(seed: u32) -> Self {
        Self::new(seed).with_amplitude(0.0)
    }

    /// Sets the variation amplitude, clamped to `[0, 0.9]`.
    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude.clamp(0.0, 0.9);
        self
    }

    pub fn with_frequency(mut self, freq: f64) -> Self {
        self.frequency = freq;
        self
    }

    pub fn with_octaves(mut self, octaves: u32) -> Self {
        self.octaves = octaves.max(1);
        self
    }

    /// Strength multiplier at a local position (meters from launch) and
    /// time (seconds since take-off).
    ///
    /// Always within `[1 - amplitude, 1 + amplitude]`, so it never flips the
    /// sign of the rate it scales.
    pub fn factor_at(&self, east_m: f64, north_m: f64, t_secs: f64) -> f64 {
        if self.amplitude == 0.0 {
            return 1.0;
        }

        // Fractal Brownian motion
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = self.frequency;
        let mut time_frequency = self.time_frequency;
        let mut max_amplitude = 0.0;

        for _ in 0..self.octaves {
            total += amplitude
                * self
                    .perlin
                    .get([east_m * frequency, north_m * frequency, t_secs * time_frequency]);
            max_amplitude += amplitude;
            amplitude *= 0.5;
            frequency *= 2.0;
            time_frequency *= 2.0;
        }

        let normalized = (total / max_amplitude).clamp(-1.0, 1.0);
        1.0 + normalized * self.amplitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_consistency() {
        let field = LiftField::new(42);
        let a = field.factor_at(1234.0, -567.0, 89.0);
        let b = field.factor_at(1234.0, -567.0, 89.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_factor_range() {
        let field = LiftField::new(7).with_amplitude(0.5);
        for i in 0..500 {
            let x = i as f64 * 97.0;
            let factor = field.factor_at(x, -x / 3.0, i as f64 * 11.0);
            assert!((0.5..=1.5).contains(&factor), "factor {factor} out of range");
        }
    }

    #[test]
    fn test_calm_field() {
        let field = LiftField::calm(1);
        assert_eq!(field.factor_at(100.0, 200.0, 300.0), 1.0);
    }

    #[test]
    fn test_amplitude_is_clamped() {
        let field = LiftField::new(1).with_amplitude(3.0);
        assert!(field.factor_at(5000.0, 300.0, 40.0) >= 0.1);
    }
}
