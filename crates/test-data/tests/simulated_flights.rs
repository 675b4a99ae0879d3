//! End-to-end checks of flight-analysis against generated flights.
//!
//! Every flight here comes with the script it was flown from, so the
//! analysed extrema and segments can be compared with what actually
//! happened rather than with hand-computed numbers.
//!
//! Run with: `cargo nextest run -p test-data simulated`

use flight_analysis::{
    AnalysisConfig, Dimension, ExtremeKind, FlightAnalysis, analyse_many,
    averages::compute_averages,
    extremes::{raw_extremes, simplify},
    filter::filter_duplicate_fixes,
    merged_bounds,
};
use rand::{SeedableRng, rngs::StdRng};
use test_data::prelude::*;

fn gliders() -> Vec<Box<dyn GliderProfile>> {
    vec![
        Box::new(ParagliderProfile::default()),
        Box::new(HangGliderProfile::default()),
        Box::new(SailplaneProfile::default()),
    ]
}

fn clean_flight(seed: u64, thermals: usize, profile: &dyn GliderProfile) -> SimulatedFlight {
    let site = Site::ALL[seed as usize % Site::ALL.len()];
    FlightGenerator::new(site, seed as u32)
        .with_config(FlightConfig {
            launch: site,
            ..FlightConfig::clean()
        })
        .with_thermals(thermals)
        .generate(profile, &mut StdRng::seed_from_u64(seed))
}

fn noisy_flight(seed: u64, profile: &dyn GliderProfile) -> SimulatedFlight {
    FlightGenerator::new(Site::BASSANO, seed as u32)
        .with_alt_jitter(3.0)
        .with_dropouts(0.005, 5, 30)
        .generate(profile, &mut StdRng::seed_from_u64(seed))
}

#[test]
fn test_clean_flights_recover_the_script() {
    let config = AnalysisConfig::default();
    for seed in 0..6 {
        for profile in gliders() {
            let thermals = seed as usize % 4;
            let flight = clean_flight(seed, thermals, profile.as_ref());
            let fixes = filter_duplicate_fixes(flight.fixes.clone());
            let analysis = FlightAnalysis::analyse(&fixes, &config).unwrap();

            let alts: Vec<i32> = analysis.extremes.iter().map(|e| e.alt()).collect();
            assert_eq!(alts, flight.script.turning_altitudes(), "seed {seed}");
            assert_eq!(analysis.extremes[0].kind(), ExtremeKind::Maximum);
            assert_eq!(analysis.thermals().count(), thermals);
            assert_eq!(analysis.segments.len(), flight.script.phases.len());

            for (segment, phase) in analysis.segments.iter().zip(&flight.script.phases) {
                assert_eq!(segment.dz, phase.dz());
            }
        }
    }
}

#[test]
fn test_ground_fixes_are_filtered() {
    let flight = clean_flight(3, 2, &ParagliderProfile::default());
    assert!(flight.ground_fixes > 0);

    // The first airborne fix still sits on launch and goes with them
    let fixes = filter_duplicate_fixes(flight.fixes.clone());
    assert_eq!(fixes.len(), flight.fixes.len() - flight.ground_fixes);
    assert_eq!(fixes[0], flight.fixes[0]);
}

#[test]
fn test_summary_matches_script() {
    let flight = clean_flight(2, 3, &HangGliderProfile::default());
    let fixes = filter_duplicate_fixes(flight.fixes.clone());
    let analysis = FlightAnalysis::analyse(&fixes, &AnalysisConfig::default()).unwrap();
    let summary = &analysis.summary;

    let turning = flight.script.turning_altitudes();
    assert_eq!(summary.take_off_alt, turning[0]);
    assert_eq!(summary.max_alt, *turning.iter().max().unwrap());
    assert_eq!(summary.min_alt, *turning.iter().min().unwrap());
    assert_eq!(
        summary.accumulated_alt_gain,
        flight.script.thermals().map(|p| p.dz()).sum::<i32>()
    );
    assert_eq!(summary.landing_time, flight.script.phases.last().unwrap().finish);
}

#[test]
fn test_noisy_flights_keep_invariants() {
    let config = AnalysisConfig::default();
    for seed in 10..14 {
        for profile in gliders() {
            let flight = noisy_flight(seed, profile.as_ref());
            let fixes = filter_duplicate_fixes(flight.fixes.clone());
            let analysis = FlightAnalysis::analyse(&fixes, &config).unwrap();

            assert_eq!(analysis.averages.len(), fixes.len());
            for pair in analysis.extremes.windows(2) {
                assert_ne!(pair[0].kind(), pair[1].kind(), "seed {seed}");
            }
            assert!(analysis.passes <= raw_extremes(&fixes).len() + 1);
            assert!(analysis.passes <= fixes.len());

            for average in &analysis.averages {
                assert!(average.speed >= 0.0);
                assert!((0.0..=1.0).contains(&average.progress), "seed {seed}: {}", average.progress);
            }

            let climb = analysis.bounds.get(Dimension::Climb).unwrap();
            assert!(climb.min >= -config.climb_clamp && climb.max <= config.climb_clamp);
            assert_eq!(analysis.bounds.get(Dimension::Speed).unwrap().min, 0.0);
        }
    }
}

#[test]
fn test_simplification_is_idempotent() {
    let config = AnalysisConfig::default();
    for seed in 20..24 {
        let flight = noisy_flight(seed, &ParagliderProfile::default());
        let analysis = FlightAnalysis::analyse(&flight.fixes, &config).unwrap();

        let again = simplify(analysis.extremes.clone(), &config.thresholds).unwrap();
        assert_eq!(again.extremes, analysis.extremes);
        assert_eq!(again.passes, 1);
    }
}

#[test]
fn test_averages_depend_only_on_time() {
    let flight = noisy_flight(40, &HangGliderProfile::default());
    let mut fixes = filter_duplicate_fixes(flight.fixes);

    // A second sample at an existing timestamp, somewhere else entirely
    let k = fixes.len() / 2;
    let mut twin = fixes[k].clone();
    twin.alt += 150;
    twin.position = GeoCoord::new(twin.position.lat + 0.01, twin.position.lon);
    fixes.insert(k + 1, twin);

    for window in [5.0, 15.0, 60.0] {
        let averages = compute_averages(&fixes, window).unwrap();
        assert_eq!(averages[k], averages[k + 1], "window {window}s");
    }
}

#[test]
fn test_analyse_many_matches_sequential() {
    let config = AnalysisConfig::default();
    let tracks: Vec<_> = (30..36)
        .map(|seed| noisy_flight(seed, &SailplaneProfile::default()).fixes)
        .collect();

    let parallel = analyse_many(&tracks, &config);
    for (track, result) in tracks.iter().zip(&parallel) {
        let sequential = FlightAnalysis::analyse(track, &config).unwrap();
        assert_eq!(result.as_ref().unwrap(), &sequential);
    }

    let analyses: Vec<_> = parallel.iter().map(|r| r.as_ref().unwrap()).collect();
    let merged = merged_bounds(analyses.iter().copied());
    let alt = merged.get(Dimension::Alt).unwrap();
    for analysis in &analyses {
        let own = analysis.bounds.get(Dimension::Alt).unwrap();
        assert!(alt.contains(own.min) && alt.contains(own.max));
    }
}
