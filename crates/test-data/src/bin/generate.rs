//! Writes synthetic flights as JSON track files.
//!
//! Run with:
//! ```
//! cargo run -p test-data --bin generate -- flights/
//! ```
//!
//! `FLIGHT_COUNT` (default 6) and `FLIGHT_SEED` (default 12345) control
//! how many flights are written and how they are randomised.

use std::{env, fs, path::PathBuf};

use anyhow::Context;
use rand::{Rng, SeedableRng, rngs::StdRng};
use test_data::{
    config::{FlightConfig, Site},
    export::write_track,
    profiles::{GliderProfile, HangGliderProfile, ParagliderProfile, SailplaneProfile},
    sources::FlightGenerator,
};
use tracing_subscriber::EnvFilter;

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> anyhow::Result<T> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| anyhow::anyhow!("{key}={raw} is not a valid value")),
        Err(_) => Ok(default),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let out_dir = env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("flights"));
    let count: usize = env_or("FLIGHT_COUNT", 6)?;
    let seed: u64 = env_or("FLIGHT_SEED", 12345)?;

    fs::create_dir_all(&out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    let gliders: [(&str, &dyn GliderProfile); 3] = [
        ("paraglider", &ParagliderProfile::default()),
        ("hang_glider", &HangGliderProfile::default()),
        ("sailplane", &SailplaneProfile::default()),
    ];

    let mut rng = StdRng::seed_from_u64(seed);
    for i in 0..count {
        let site = Site::ALL[i % Site::ALL.len()];
        let (glider, profile) = gliders[i % gliders.len()];
        let config = FlightConfig {
            launch: site,
            thermals: rng.gen_range(1..=5),
            wind_from_deg: rng.gen_range(0.0..360.0),
            ..Default::default()
        };

        let flight = FlightGenerator::new(site, rng.r#gen())
            .with_config(config)
            .generate(profile, &mut rng);

        let path = out_dir.join(format!("{:02}-{}-{}.json", i + 1, site.name, glider));
        write_track(&path, &flight.fixes)?;
        tracing::info!(
            "{}: {} fixes, {} thermals, {} min",
            path.display(),
            flight.fixes.len(),
            flight.script.thermal_count(),
            flight.script.duration() / 60
        );
    }

    tracing::info!("Wrote {count} flights to {}", out_dir.display());
    Ok(())
}
