use std::{env, fs, path::PathBuf};

use anyhow::{Context, bail};
use flight_analysis::{
    AnalysisConfig, Average, Bounds, Extreme, Fix, FlightAnalysis, GeoCoord, Segment,
    analyse_many, filter::filter_duplicate_fixes, merged_bounds, parse_track,
    summary::FlightSummary,
};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Serialize)]
struct TrackReport {
    path: PathBuf,
    fixes: usize,
    summary: FlightSummary,
    bounds: Bounds,
    extremes: Vec<Extreme>,
    segments: Vec<Segment<GeoCoord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    averages: Option<Vec<Average>>,
}

#[derive(Debug, Serialize)]
struct Report {
    config: AnalysisConfig,
    tracks: Vec<TrackReport>,
    bounds: Bounds,
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_track(path: &PathBuf) -> anyhow::Result<Vec<Fix>> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let fixes = parse_track(&raw).with_context(|| format!("parsing {}", path.display()))?;
    Ok(filter_duplicate_fixes(fixes))
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let paths: Vec<PathBuf> = env::args_os().skip(1).map(PathBuf::from).collect();
    if paths.is_empty() {
        bail!("usage: flight-analysis <fixes.json> [more.json ...]");
    }

    let config = AnalysisConfig::from_env().context("reading FLIGHT_* configuration")?;
    let emit_averages = env::var("FLIGHT_EMIT_AVERAGES").is_ok_and(|v| v == "1");

    let tracks = paths
        .iter()
        .map(load_track)
        .collect::<anyhow::Result<Vec<_>>>()?;

    tracing::info!(
        "Analysing {} tracks (window {}s, thresholds {}m / {})",
        tracks.len(),
        config.window_secs,
        config.thresholds.absolute,
        config.thresholds.relative
    );

    let mut analyses: Vec<FlightAnalysis> = Vec::with_capacity(tracks.len());
    for (path, result) in paths.iter().zip(analyse_many(&tracks, &config)) {
        let analysis = result.with_context(|| format!("analysing {}", path.display()))?;
        tracing::info!(
            "{}: {} extremes, max altitude {}m in {} passes",
            path.display(),
            analysis.extremes.len(),
            analysis.summary.max_alt,
            analysis.passes
        );
        analyses.push(analysis);
    }

    let bounds = merged_bounds(&analyses);
    let reports = paths
        .into_iter()
        .zip(tracks.iter().map(Vec::len))
        .zip(analyses)
        .map(|((path, fixes), analysis)| TrackReport {
            path,
            fixes,
            summary: analysis.summary,
            bounds: analysis.bounds,
            extremes: analysis.extremes,
            segments: analysis.segments,
            averages: emit_averages.then_some(analysis.averages),
        })
        .collect();

    let report = Report {
        config,
        tracks: reports,
        bounds,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
