//! Altitude extremum extraction and simplification.
//!
//! A raw scan records every altitude turning point of the track. The raw
//! list is then filtered to a fixed point: each pass applies three discard
//! rules in turn, removing marked extrema and re-merging whatever same-kind
//! neighbours that leaves behind, until a whole pass discards nothing. What
//! remains alternates strictly between minima and maxima, one per thermal
//! base and top.

use std::cmp::Ordering;

use crate::{
    config::{ExtremeThresholds, ZeroContrast},
    errors::{AnalysisError, Result},
    filter::validate_fixes,
    models::{Extreme, ExtremeKind, Fix},
};

/// Outcome of [`simplify_extremes`].
#[derive(Debug, Clone, PartialEq)]
pub struct Simplification<C> {
    pub extremes: Vec<Extreme<C>>,
    /// Passes run, including the final pass that discarded nothing.
    pub passes: usize,
}

/// Every altitude turning point of `fixes`, strictly alternating in kind.
///
/// Flat stretches never change direction, so a constant-altitude track has
/// no extrema at all.
pub fn raw_extremes<C: Clone>(fixes: &[Fix<C>]) -> Vec<Extreme<C>> {
    let Some(first) = fixes.first() else {
        return Vec::new();
    };

    let mut extremes = Vec::new();
    let mut last_extreme_fix = first;
    let mut direction = Ordering::Equal;

    for pair in fixes.windows(2) {
        let (fix0, fix1) = (&pair[0], &pair[1]);
        let cmp = fix1.alt.cmp(&fix0.alt);
        if cmp == Ordering::Equal {
            continue;
        }
        if cmp != direction {
            // Leaving the running extreme in the opposite sense
            let kind = match cmp {
                Ordering::Less => ExtremeKind::Maximum,
                _ => ExtremeKind::Minimum,
            };
            extremes.push(Extreme::new(kind, last_extreme_fix.clone()));
            direction = cmp;
        }
        last_extreme_fix = fix1;
    }

    match direction {
        Ordering::Less => extremes.push(Extreme::Minimum(last_extreme_fix.clone())),
        Ordering::Greater => extremes.push(Extreme::Maximum(last_extreme_fix.clone())),
        Ordering::Equal => {}
    }
    extremes
}

/// Removes the marked extrema, then collapses each run of same-kind
/// neighbours to its most extreme member (first one wins ties).
pub fn discard_and_remerge<C: Clone>(extremes: &[Extreme<C>], discard: &[bool]) -> Vec<Extreme<C>> {
    debug_assert_eq!(extremes.len(), discard.len());
    if !discard.iter().any(|&d| d) {
        return extremes.to_vec();
    }

    let mut result: Vec<Extreme<C>> = Vec::with_capacity(extremes.len());
    let mut best: Option<&Extreme<C>> = None;
    for (extreme, _) in extremes.iter().zip(discard).filter(|(_, d)| !**d) {
        best = match best {
            None => Some(extreme),
            Some(b) if b.kind() == extreme.kind() => {
                if extreme.more_extreme_than(b) {
                    Some(extreme)
                } else {
                    Some(b)
                }
            }
            Some(b) => {
                result.push(b.clone());
                Some(extreme)
            }
        };
    }
    if let Some(b) = best {
        result.push(b.clone());
    }
    result
}

/// Of two same-kind extrema, the index of the one to drop: the one that is
/// not further out. Comparison is strict, so on a tie `i` is dropped.
fn less_extreme<C>(extremes: &[Extreme<C>], i: usize, j: usize) -> usize {
    if extremes[i].more_extreme_than(&extremes[j]) {
        j
    } else {
        i
    }
}

/// Four-window test: a middle swing that is small in absolute terms, or
/// small compared with the swing enclosing it, is judged noise.
fn mark_insignificant_swings<C>(extremes: &[Extreme<C>], thresholds: &ExtremeThresholds) -> Vec<bool> {
    let mut discard = vec![false; extremes.len()];
    for i in 0..extremes.len().saturating_sub(3) {
        let dz03 = f64::from(extremes[i + 3].alt().abs_diff(extremes[i].alt()));
        let dz12 = f64::from(extremes[i + 2].alt().abs_diff(extremes[i + 1].alt()));
        let weak_contrast = if dz03 == 0.0 {
            thresholds.zero_contrast == ZeroContrast::Insignificant
        } else {
            dz12 / dz03 < thresholds.relative
        };
        if dz12 < thresholds.absolute || weak_contrast {
            discard[less_extreme(extremes, i, i + 2)] = true;
            discard[less_extreme(extremes, i + 1, i + 3)] = true;
        }
    }
    discard
}

/// Local-extremum test: after merging, a maximum lower than a neighbour or
/// a minimum higher than one is no longer a turning point.
fn mark_invalid_turns<C>(extremes: &[Extreme<C>]) -> Vec<bool> {
    let mut discard = vec![false; extremes.len()];
    for i in 1..extremes.len().saturating_sub(1) {
        let (prev, curr, next) = (extremes[i - 1].alt(), extremes[i].alt(), extremes[i + 1].alt());
        discard[i] = match extremes[i].kind() {
            ExtremeKind::Maximum => curr < prev || curr < next,
            ExtremeKind::Minimum => curr > prev || curr > next,
        };
    }
    discard
}

/// Endpoint test: a first or last swing smaller than `absolute` is launch or
/// landing noise.
fn mark_endpoint_noise<C>(extremes: &[Extreme<C>], absolute: f64) -> Vec<bool> {
    let n = extremes.len();
    let mut discard = vec![false; n];
    if n > 2 {
        let swing = |a: usize, b: usize| f64::from(extremes[b].alt().abs_diff(extremes[a].alt()));
        if swing(0, 1) < absolute {
            discard[0] = true;
        }
        if swing(n - 2, n - 1) < absolute {
            discard[n - 1] = true;
        }
    }
    discard
}

fn count(discard: &[bool]) -> usize {
    discard.iter().filter(|&&d| d).count()
}

/// Filters a raw extremum list until no discard rule applies.
///
/// Each pass removes at least one extremum or ends the loop, so a list of
/// `n` extrema converges within `n + 1` passes; running longer is reported
/// as [`AnalysisError::AnalysisDidNotConverge`].
pub fn simplify<C: Clone>(
    mut extremes: Vec<Extreme<C>>,
    thresholds: &ExtremeThresholds,
) -> Result<Simplification<C>> {
    thresholds.validate()?;

    let max_passes = extremes.len() + 1;
    let mut passes = 0;
    loop {
        if passes == max_passes {
            tracing::warn!("Extreme simplification hit its cap of {max_passes} passes");
            return Err(AnalysisError::AnalysisDidNotConverge { passes });
        }
        passes += 1;

        let discard = mark_insignificant_swings(&extremes, thresholds);
        let swings = count(&discard);
        extremes = discard_and_remerge(&extremes, &discard);

        let discard = mark_invalid_turns(&extremes);
        let turns = count(&discard);
        extremes = discard_and_remerge(&extremes, &discard);

        let discard = mark_endpoint_noise(&extremes, thresholds.absolute);
        let endpoints = count(&discard);
        extremes = discard_and_remerge(&extremes, &discard);

        tracing::debug!(
            "Pass {passes}: discarded {swings} swings, {turns} turns, {endpoints} endpoints ({} remain)",
            extremes.len()
        );
        if swings == 0 && turns == 0 && endpoints == 0 {
            break;
        }
    }

    Ok(Simplification { extremes, passes })
}

/// Extracts and simplifies the altitude extrema of a track.
pub fn simplify_extremes<C: Clone>(
    fixes: &[Fix<C>],
    thresholds: &ExtremeThresholds,
) -> Result<Simplification<C>> {
    thresholds.validate()?;
    validate_fixes(fixes)?;

    let raw = raw_extremes(fixes);
    let raw_count = raw.len();
    let simplification = simplify(raw, thresholds)?;
    tracing::debug!(
        "Simplified {raw_count} raw extremes to {} in {} passes",
        simplification.extremes.len(),
        simplification.passes
    );
    Ok(simplification)
}
