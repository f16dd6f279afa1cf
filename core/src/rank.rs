use crate::scorer::ScoredMatch;
use std::collections::HashSet;

/// Order matches by descending score, ties by ascending document id, keep the
/// first match per coordinate and truncate to `limit`.
pub fn rank(mut matches: Vec<ScoredMatch>, limit: usize) -> Vec<ScoredMatch> {
    if limit == 0 {
        return Vec::new();
    }
    matches.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.doc_id.cmp(&b.doc_id)));

    let mut seen = HashSet::new();
    let mut ranked = Vec::with_capacity(limit.min(matches.len()));
    for m in matches {
        if ranked.len() == limit {
            break;
        }
        if seen.insert(m.coordinate.clone()) {
            ranked.push(m);
        }
    }
    ranked
}
