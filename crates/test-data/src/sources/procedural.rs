//! Procedural flight generation.

use std::f64::consts::{FRAC_PI_2, TAU};

use flight_analysis::{Fix, GeoCoord};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::Serialize;

use crate::atmosphere::LiftField;
use crate::config::{FlightConfig, Site};
use crate::profiles::{self, GliderProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseKind {
    Glide,
    Thermal,
}

/// One scripted climb or descent, as actually flown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Phase {
    pub kind: PhaseKind,
    /// Unix seconds.
    pub start: i64,
    pub finish: i64,
    pub start_alt: i32,
    pub finish_alt: i32,
}

impl Phase {
    pub fn dz(&self) -> i32 {
        self.finish_alt - self.start_alt
    }
}

/// The ground truth behind a generated flight.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FlightScript {
    pub phases: Vec<Phase>,
}

impl FlightScript {
    pub fn thermals(&self) -> impl Iterator<Item = &Phase> {
        self.phases.iter().filter(|p| p.kind == PhaseKind::Thermal)
    }

    pub fn thermal_count(&self) -> usize {
        self.thermals().count()
    }

    /// Altitude at take-off followed by the altitude at the end of every phase.
    pub fn turning_altitudes(&self) -> Vec<i32> {
        let mut alts: Vec<i32> = self.phases.first().map(|p| p.start_alt).into_iter().collect();
        alts.extend(self.phases.iter().map(|p| p.finish_alt));
        alts
    }

    pub fn duration(&self) -> i64 {
        match (self.phases.first(), self.phases.last()) {
            (Some(first), Some(last)) => last.finish - first.start,
            _ => 0,
        }
    }
}

/// A generated track together with the script it was flown from.
#[derive(Debug, Clone)]
pub struct SimulatedFlight {
    /// Ground fixes first, then the airborne part.
    pub fixes: Vec<Fix<GeoCoord>>,
    pub script: FlightScript,
    /// Stationary fixes logged on launch before take-off.
    pub ground_fixes: usize,
}

impl SimulatedFlight {
    pub fn airborne(&self) -> &[Fix<GeoCoord>] {
        &self.fixes[self.ground_fixes..]
    }
}

/// Position and altitude of the glider relative to launch.
#[derive(Debug, Clone, Copy)]
struct State {
    /// Seconds since take-off.
    t: i64,
    east: f64,
    north: f64,
    alt: f64,
    heading: f64,
}

/// Turns true [`State`]s into logged fixes, adding receiver noise and
/// dropouts.
struct Receiver<'a> {
    site: &'a Site,
    take_off: i64,
    position_jitter: Option<Normal<f64>>,
    alt_jitter: Option<Normal<f64>>,
    dropout_probability: f64,
    dropout_secs: (i64, i64),
    drop_until: i64,
    fixes: Vec<Fix<GeoCoord>>,
}

impl Receiver<'_> {
    fn log(&mut self, state: &State, rng: &mut impl Rng) {
        if state.t < self.drop_until {
            return;
        }
        if state.t > 0 && rng.r#gen::<f64>() < self.dropout_probability {
            let (min, max) = self.dropout_secs;
            self.drop_until = state.t + rng.gen_range(min..=max.max(min));
            return;
        }

        let mut sample = |normal: &Option<Normal<f64>>| normal.as_ref().map_or(0.0, |n| n.sample(rng));
        let east = state.east + sample(&self.position_jitter);
        let north = state.north + sample(&self.position_jitter);
        let alt = state.alt + sample(&self.alt_jitter);

        let (lat, lon) = self.site.offset(east, north);
        self.fixes.push(Fix::new(
            self.take_off + state.t,
            GeoCoord::new(lat, lon),
            alt.round() as i32,
        ));
    }
}

fn gaussian(std_dev: f64) -> Option<Normal<f64>> {
    if std_dev > 0.0 {
        Normal::new(0.0, std_dev).ok()
    } else {
        None
    }
}

fn sample_range(rng: &mut impl Rng, (min, max): (f64, f64)) -> f64 {
    if max > min {
        rng.gen_range(min..=max)
    } else {
        min
    }
}

/// Ground velocity (east, north) added by a wind blowing from `from_deg`.
fn wind_drift(speed: f64, from_deg: f64) -> (f64, f64) {
    let towards = from_deg.to_radians() + std::f64::consts::PI;
    (speed * towards.sin(), speed * towards.cos())
}

/// Generates synthetic flights with a known phase script.
///
/// Every flight opens with a glide off launch, then alternates thermal and
/// glide for the configured number of thermals and ends on a glide.
pub struct FlightGenerator {
    config: FlightConfig,
    lift: LiftField,
}

impl FlightGenerator {
    /// Creates a new generator with default configuration at `launch`.
    pub fn new(launch: Site, seed: u32) -> Self {
        Self {
            config: FlightConfig {
                launch,
                ..Default::default()
            },
            lift: LiftField::new(seed),
        }
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: FlightConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_thermals(mut self, thermals: usize) -> Self {
        self.config.thermals = thermals;
        self
    }

    pub fn with_lift(mut self, lift: LiftField) -> Self {
        self.lift = lift;
        self
    }

    pub fn with_wind(mut self, speed_mps: f64, from_deg: f64) -> Self {
        self.config.wind_speed_mps = speed_mps;
        self.config.wind_from_deg = from_deg;
        self
    }

    /// Sets GPS position jitter amount.
    pub fn with_gps_jitter(mut self, meters: f64) -> Self {
        self.config.gps_jitter_m = meters;
        self
    }

    /// Sets GPS altitude jitter amount.
    pub fn with_alt_jitter(mut self, meters: f64) -> Self {
        self.config.alt_jitter_m = meters;
        self
    }

    /// Sets dropout parameters.
    pub fn with_dropouts(mut self, probability: f64, min_secs: i64, max_secs: i64) -> Self {
        self.config.dropout_probability = probability;
        self.config.dropout_secs = (min_secs, max_secs);
        self
    }

    pub fn with_ground_time(mut self, secs: i64) -> Self {
        self.config.ground_secs = secs;
        self
    }

    pub fn with_fix_interval(mut self, secs: i64) -> Self {
        self.config.fix_interval_secs = secs.max(1);
        self
    }

    pub fn config(&self) -> &FlightConfig {
        &self.config
    }

    /// Altitude changes for each phase, whole meters.
    fn plan(&self, rng: &mut impl Rng) -> Vec<(PhaseKind, f64)> {
        let (gain, loss) = (self.config.thermal_gain_m, self.config.glide_loss_m);
        let mut plan = vec![(PhaseKind::Glide, -sample_range(rng, loss).round())];
        for _ in 0..self.config.thermals {
            plan.push((PhaseKind::Thermal, sample_range(rng, gain).round()));
            plan.push((PhaseKind::Glide, -sample_range(rng, loss).round()));
        }
        plan
    }

    /// Generates a flight using the specified glider profile.
    pub fn generate(&self, profile: &dyn GliderProfile, rng: &mut impl Rng) -> SimulatedFlight {
        let config = &self.config;
        let interval = config.fix_interval_secs.max(1);
        let take_off = config.take_off.unix_timestamp();
        let launch_alt = config.launch.alt.round();

        let ground_fixes = (config.ground_secs.max(0) / interval) as usize;
        let launch = GeoCoord::new(config.launch.lat, config.launch.lon);
        let mut fixes: Vec<Fix<GeoCoord>> = (1..=ground_fixes as i64)
            .rev()
            .map(|i| Fix::new(take_off - i * interval, launch, launch_alt as i32))
            .collect();

        let mut receiver = Receiver {
            site: &config.launch,
            take_off,
            position_jitter: gaussian(config.gps_jitter_m),
            alt_jitter: gaussian(config.alt_jitter_m),
            dropout_probability: config.dropout_probability,
            dropout_secs: config.dropout_secs,
            drop_until: 0,
            fixes: Vec::new(),
        };

        let course = rng.gen_range(0.0..TAU);
        let mut state = State {
            t: 0,
            east: 0.0,
            north: 0.0,
            alt: launch_alt,
            heading: course,
        };
        receiver.log(&state, rng);

        let drift = wind_drift(config.wind_speed_mps, config.wind_from_deg);
        let mut phases = Vec::new();
        for (kind, dz) in self.plan(rng) {
            let (start, start_alt) = (state.t, state.alt);
            let target = state.alt + dz;
            match kind {
                PhaseKind::Glide => {
                    state.heading = course;
                    self.glide(&mut state, target, profile, drift, &mut receiver, rng);
                }
                PhaseKind::Thermal => {
                    let variance = profiles::sample_variance(profile, rng);
                    self.thermal(&mut state, target, variance, profile, drift, &mut receiver, rng);
                }
            }
            phases.push(Phase {
                kind,
                start: take_off + start,
                finish: take_off + state.t,
                start_alt: start_alt as i32,
                finish_alt: target as i32,
            });
        }

        tracing::debug!(
            "Generated {} fixes over {} phases ({} ground fixes)",
            receiver.fixes.len(),
            phases.len(),
            ground_fixes
        );

        fixes.append(&mut receiver.fixes);
        SimulatedFlight {
            fixes,
            script: FlightScript { phases },
            ground_fixes,
        }
    }

    /// Flies on course at trim speed until down to `target`.
    fn glide(
        &self,
        state: &mut State,
        target: f64,
        profile: &dyn GliderProfile,
        drift: (f64, f64),
        receiver: &mut Receiver<'_>,
        rng: &mut impl Rng,
    ) {
        let interval = self.config.fix_interval_secs.max(1);
        let dt = interval as f64;
        let airspeed = profile.trim_speed_mps();
        let sink = profile.polar().sink_at(airspeed);

        while state.alt > target {
            // Random walk around the course line
            state.heading += rng.gen_range(-0.05..0.05);
            let factor = self.lift.factor_at(state.east, state.north, state.t as f64);
            state.east += (airspeed * state.heading.sin() + drift.0) * dt;
            state.north += (airspeed * state.heading.cos() + drift.1) * dt;
            state.alt = (state.alt - sink * factor * dt).max(target);
            state.t += interval;
            receiver.log(state, rng);
        }
    }

    /// Circles right in a core drifting with the wind until up to `target`.
    #[allow(clippy::too_many_arguments)]
    fn thermal(
        &self,
        state: &mut State,
        target: f64,
        variance: f64,
        profile: &dyn GliderProfile,
        drift: (f64, f64),
        receiver: &mut Receiver<'_>,
        rng: &mut impl Rng,
    ) {
        let interval = self.config.fix_interval_secs.max(1);
        let dt = interval as f64;
        let radius = profiles::circle_radius_m(profile);
        let omega = TAU / profile.circle_period_secs();
        let climb = profile.typical_climb_mps() * variance;

        // Core sits off the right wing; angle is measured like a heading
        let mut angle = state.heading - FRAC_PI_2;
        let mut centre = (
            state.east - radius * angle.sin(),
            state.north - radius * angle.cos(),
        );

        while state.alt < target {
            let factor = self.lift.factor_at(centre.0, centre.1, state.t as f64);
            angle += omega * dt;
            centre.0 += drift.0 * dt;
            centre.1 += drift.1 * dt;
            state.east = centre.0 + radius * angle.sin();
            state.north = centre.1 + radius * angle.cos();
            state.heading = angle + FRAC_PI_2;
            state.alt = (state.alt + climb * factor * dt).min(target);
            state.t += interval;
            receiver.log(state, rng);
        }
    }
}
