//! Ranking of match results across patterns and methods.
//!
//! Scores are compared as-is, so a large `TM_SQDIFF` value outranks a perfect
//! `TM_CCOEFF_NORMED` of 1.0. The six methods live on different scales and
//! half of them prefer low values; this ordering is kept for compatibility
//! with existing reports rather than normalized.

use crate::search::MatchResult;
use std::cmp::Ordering;

/// Number of results printed in the final report.
pub const DEFAULT_TOP_K: usize = 5;

fn score_cmp_desc(a: &MatchResult, b: &MatchResult) -> Ordering {
    b.score().total_cmp(&a.score())
}

/// Sorts by descending score; equal scores keep their insertion order.
pub fn sort_by_score_desc(results: &mut [MatchResult]) {
    results.sort_by(score_cmp_desc);
}

/// Returns the best `min(k, results.len())` results, highest score first.
pub fn top_k(results: &[MatchResult], k: usize) -> Vec<MatchResult> {
    let mut ranked = results.to_vec();
    sort_by_score_desc(&mut ranked);
    ranked.truncate(k);
    ranked
}

#[cfg(test)]
mod tests {
    use super::top_k;
    use crate::method::MatchMethod;
    use crate::search::{MatchResult, Peak};
    use std::time::Duration;

    fn result(name: &str, method: MatchMethod, score: f64) -> MatchResult {
        let peak = Peak { x: 0, y: 0, score };
        MatchResult::new(name, method, peak, (1, 1), Duration::ZERO)
    }

    #[test]
    fn raw_scores_are_compared_across_methods() {
        let results = vec![
            result("a", MatchMethod::CcoeffNormed, 1.0),
            result("a", MatchMethod::Sqdiff, 5000.0),
            result("a", MatchMethod::SqdiffNormed, 0.0),
        ];
        let ranked = top_k(&results, 5);
        let methods: Vec<_> = ranked.iter().map(|r| r.method()).collect();
        assert_eq!(
            methods,
            vec![
                MatchMethod::Sqdiff,
                MatchMethod::CcoeffNormed,
                MatchMethod::SqdiffNormed
            ]
        );
    }
}
