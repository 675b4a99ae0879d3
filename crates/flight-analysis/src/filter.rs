//! Input hygiene applied before analysis.

use crate::{
    coord::Coord,
    errors::{AnalysisError, Result},
    models::Fix,
};

/// Rejects tracks whose timestamps ever go backwards.
pub fn validate_fixes<C>(fixes: &[Fix<C>]) -> Result<()> {
    match fixes.windows(2).position(|w| w[1].time < w[0].time) {
        Some(i) => Err(AnalysisError::MalformedInput(format!(
            "fix {} at t={} precedes fix {} at t={}",
            i + 1,
            fixes[i + 1].time,
            i,
            fixes[i].time
        ))),
        None => Ok(()),
    }
}

/// Drops fixes that repeat the position of the fix immediately before them.
///
/// Receivers often log the same position for minutes before take-off; those
/// samples carry no motion and only dilute the averages.
pub fn filter_duplicate_fixes<C: Coord + PartialEq>(fixes: Vec<Fix<C>>) -> Vec<Fix<C>> {
    let before = fixes.len();
    let mut filtered: Vec<Fix<C>> = Vec::with_capacity(before);
    let mut previous: Option<C> = None;

    for fix in fixes {
        let duplicate = previous.as_ref().is_some_and(|p| *p == fix.position);
        previous = Some(fix.position.clone());
        if !duplicate {
            filtered.push(fix);
        }
    }

    if filtered.len() != before {
        tracing::debug!(
            "Dropped {} duplicate fixes ({} remain)",
            before - filtered.len(),
            filtered.len()
        );
    }
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::PlanarCoord;

    fn fix(time: i64, x: f64) -> Fix<PlanarCoord> {
        Fix::new(time, PlanarCoord::new(x, 0.0), 1000)
    }

    #[test]
    fn test_validate_accepts_duplicate_times() {
        let fixes = vec![fix(0, 0.0), fix(1, 1.0), fix(1, 2.0), fix(2, 3.0)];
        assert!(validate_fixes(&fixes).is_ok());
        assert!(validate_fixes::<PlanarCoord>(&[]).is_ok());
    }

    #[test]
    fn test_validate_rejects_backwards_time() {
        let fixes = vec![fix(0, 0.0), fix(5, 1.0), fix(4, 2.0)];
        match validate_fixes(&fixes) {
            Err(AnalysisError::MalformedInput(msg)) => assert!(msg.contains("fix 2")),
            other => panic!("expected MalformedInput, got {other:?}"),
        }
    }

    #[test]
    fn test_filter_duplicate_fixes() {
        let fixes = vec![
            fix(0, 0.0),
            fix(1, 0.0),
            fix(2, 0.0),
            fix(3, 5.0),
            fix(4, 5.0),
            fix(5, 0.0),
        ];
        let filtered = filter_duplicate_fixes(fixes);
        let times: Vec<i64> = filtered.iter().map(|f| f.time).collect();
        assert_eq!(times, vec![0, 3, 5]);
    }

    #[test]
    fn test_filter_empty() {
        assert!(filter_duplicate_fixes::<PlanarCoord>(Vec::new()).is_empty());
    }
}
