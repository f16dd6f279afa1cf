use cpe2pkg_core::{evaluate, parse, rank, search, InvertedIndex, PackageCoordinate, QuerySyntaxError};
use std::collections::HashSet;
use std::sync::Arc;

fn index(rows: &[(&str, &str)]) -> InvertedIndex {
    InvertedIndex::build(rows.iter().map(|(v, p)| PackageCoordinate::new(*v, *p))).unwrap()
}

fn displays(hits: &[cpe2pkg_core::ScoredMatch]) -> Vec<String> {
    hits.iter().map(|h| h.display()).collect()
}

fn vertx_catalog() -> InvertedIndex {
    index(&[
        ("io.vertx", "vertx-core"),
        ("io.vertx", "vertx-auth"),
        ("io.vertx", "vertx-codegen"),
        ("io.vertx", "vertx-codetrans"),
        ("io.vertx", "vertx-core"),
        ("org.apache.poi", "poi"),
        ("org.apache.poi", "poi-ooxml"),
        ("org.apache.commons", "commons-io"),
        ("com.example", "ApachePOI"),
    ])
}

#[test]
fn scenario_top_one() {
    let index = index(&[("org.apache.poi", "poi"), ("other", "poiwidget")]);
    let hits = search(&index, "vendor:( apache poi ) AND product:( poi )", 1).unwrap();
    assert_eq!(displays(&hits), vec!["org.apache.poi:poi"]);
    assert!(hits[0].score > 0.0);
}

#[test]
fn and_requires_both_fields() {
    let index = index(&[("apache", "poi"), ("apache", "commons-io"), ("mycompany", "poi")]);
    let hits = search(&index, "vendor:( apache ) AND product:( poi )", 10).unwrap();
    assert_eq!(displays(&hits), vec!["apache:poi"]);
}

#[test]
fn compound_product_matches_sub_token() {
    let index = index(&[("com.example", "ApachePOI"), ("other", "widget")]);
    let hits = search(&index, "product:( poi )", 10).unwrap();
    assert_eq!(displays(&hits), vec!["com.example:ApachePOI"]);
}

#[test]
fn no_match_is_empty_not_error() {
    let hits = search(&vertx_catalog(), "vendor:( nonexistentvendor )", 10).unwrap();
    assert!(hits.is_empty());
}

#[test]
fn syntax_error_is_reported() {
    let err = search(&vertx_catalog(), "vendor:( apache", 10).unwrap_err();
    assert!(matches!(err, QuerySyntaxError::UnbalancedParenthesis { .. }));
}

#[test]
fn results_are_unique_and_ordered() {
    let index = vertx_catalog();
    let query = "vendor:( vertx ) AND product:( vertx io core framework )";
    let hits = search(&index, query, 10).unwrap();

    let unique: HashSet<&PackageCoordinate> = hits.iter().map(|h| &h.coordinate).collect();
    assert_eq!(unique.len(), hits.len());
    assert_eq!(hits.len(), 4);
    assert_eq!(hits[0].display(), "io.vertx:vertx-core");
    for pair in hits.windows(2) {
        assert!(pair[0].score >= pair[1].score);
        if pair[0].score == pair[1].score {
            assert!(pair[0].doc_id < pair[1].doc_id);
        }
    }
}

#[test]
fn limit_is_respected() {
    let index = vertx_catalog();
    let node = parse("vendor:( vertx )").unwrap();
    let distinct: HashSet<PackageCoordinate> = evaluate(&index, &node).into_iter().map(|m| m.coordinate).collect();
    for limit in 0..8 {
        let ranked = rank(evaluate(&index, &node), limit);
        assert_eq!(ranked.len(), limit.min(distinct.len()));
    }
}

#[test]
fn repeated_queries_are_identical() {
    let index = vertx_catalog();
    let query = "vendor:( apache poi vertx ) AND product:( poi core )";
    let first = search(&index, query, 10).unwrap();
    for _ in 0..5 {
        let again = search(&index, query, 10).unwrap();
        assert_eq!(first, again);
    }
}

#[test]
fn rebuilt_index_gives_same_output() {
    let query = "vendor:( apache ) AND product:( poi ooxml )";
    let a = search(&vertx_catalog(), query, 10).unwrap();
    let b = search(&vertx_catalog(), query, 10).unwrap();
    assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
}

#[test]
fn built_index_is_shared_across_threads() {
    let index = Arc::new(vertx_catalog());
    let expected = search(&index, "vendor:( vertx ) AND product:( core )", 10).unwrap();
    std::thread::scope(|s| {
        for _ in 0..4 {
            let index = Arc::clone(&index);
            let expected = &expected;
            s.spawn(move || {
                let hits = search(&index, "vendor:( vertx ) AND product:( core )", 10).unwrap();
                assert_eq!(&hits, expected);
                assert_eq!(displays(&hits), vec!["io.vertx:vertx-core"]);
            });
        }
    });
}
