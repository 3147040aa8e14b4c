use starmatch::{sort_by_score_desc, top_k, MatchMethod, MatchResult, Peak};
use std::time::Duration;

fn result(name: &str, method: MatchMethod, score: f64) -> MatchResult {
    let peak = Peak { x: 1, y: 1, score };
    MatchResult::new(name, method, peak, (2, 2), Duration::from_millis(3))
}

fn sample() -> Vec<MatchResult> {
    vec![
        result("a", MatchMethod::Ccoeff, 12.0),
        result("a", MatchMethod::CcoeffNormed, 0.9),
        result("b", MatchMethod::Ccoeff, 12.0),
        result("b", MatchMethod::SqdiffNormed, 0.1),
        result("c", MatchMethod::Ccorr, 40.0),
        result("c", MatchMethod::CcoeffNormed, 0.9),
        result("d", MatchMethod::Sqdiff, 3.0),
    ]
}

#[test]
fn top_k_returns_min_of_k_and_len_in_descending_order() {
    let results = sample();
    let top = top_k(&results, 5);
    assert_eq!(top.len(), 5);
    for pair in top.windows(2) {
        assert!(pair[0].score() >= pair[1].score());
    }

    assert_eq!(top_k(&results[..3], 5).len(), 3);
    assert!(top_k(&[], 5).is_empty());
}

#[test]
fn ties_keep_insertion_order() {
    let top = top_k(&sample(), 5);
    let order: Vec<_> = top.iter().map(|r| (r.pattern(), r.score())).collect();
    assert_eq!(
        order,
        vec![("c", 40.0), ("a", 12.0), ("b", 12.0), ("d", 3.0), ("a", 0.9)]
    );
}

#[test]
fn sorting_twice_is_idempotent() {
    let mut once = sample();
    sort_by_score_desc(&mut once);
    let mut twice = once.clone();
    sort_by_score_desc(&mut twice);
    assert_eq!(once, twice);
}
