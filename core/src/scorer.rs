//! TF-IDF scoring of a query tree against the index.

use crate::index::InvertedIndex;
use crate::query::QueryNode;
use crate::{DocId, Field, PackageCoordinate};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredMatch {
    pub doc_id: DocId,
    pub score: f32,
    pub coordinate: PackageCoordinate,
}

impl ScoredMatch {
    /// `"<vendor>:<product>"`
    pub fn display(&self) -> String {
        self.coordinate.to_string()
    }
}

/// Score every document matched by `query`. The result is in no particular order.
pub fn evaluate(index: &InvertedIndex, query: &QueryNode) -> Vec<ScoredMatch> {
    score_node(index, query)
        .into_iter()
        .filter_map(|(doc_id, score)| {
            index.resolve(doc_id).map(|coordinate| ScoredMatch { doc_id, score, coordinate: coordinate.clone() })
        })
        .collect()
}

fn score_node(index: &InvertedIndex, node: &QueryNode) -> HashMap<DocId, f32> {
    match node {
        QueryNode::TermGroup { field, terms } => score_group(index, *field, terms),
        QueryNode::And(children) => intersect(index, children),
        QueryNode::Or(children) => union(index, children),
    }
}

/// Sum of `tf * ln(1 + N / df)` over the group's terms present in each document.
fn score_group(index: &InvertedIndex, field: Field, terms: &[String]) -> HashMap<DocId, f32> {
    let n = index.document_count() as f32;
    let mut scores: HashMap<DocId, f32> = HashMap::new();
    for term in terms {
        let df = index.document_frequency(field, term);
        if df == 0 {
            continue;
        }
        let idf = (1.0 + n / df as f32).ln();
        for p in index.postings(field, term) {
            *scores.entry(p.doc_id).or_insert(0.0) += p.term_frequency as f32 * idf;
        }
    }
    scores
}

/// Documents present in every child, scored by the sum of the child scores.
fn intersect(index: &InvertedIndex, children: &[QueryNode]) -> HashMap<DocId, f32> {
    let mut children = children.iter();
    let Some(first) = children.next() else {
        return HashMap::new();
    };
    let mut acc = score_node(index, first);
    for child in children {
        if acc.is_empty() {
            break;
        }
        let scores = score_node(index, child);
        acc.retain(|doc_id, score| match scores.get(doc_id) {
            Some(s) => {
                *score += s;
                true
            }
            None => false,
        });
    }
    acc
}

fn union(index: &InvertedIndex, children: &[QueryNode]) -> HashMap<DocId, f32> {
    let mut acc: HashMap<DocId, f32> = HashMap::new();
    for child in children {
        for (doc_id, s) in score_node(index, child) {
            *acc.entry(doc_id).or_insert(0.0) += s;
        }
    }
    acc
}
