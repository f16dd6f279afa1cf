//! Fuzzy lookup of package coordinates from advisory vendor/product text.
//!
//! The catalog is analyzed once into an immutable [`InvertedIndex`]; queries in the
//! `vendor:( .. ) AND product:( .. )` language are then parsed, scored and ranked
//! against it.

use serde::Serialize;
use std::fmt;

pub mod candidate;
pub mod catalog;
pub mod error;
pub mod index;
pub mod query;
pub mod rank;
pub mod scorer;
pub mod tokenizer;

pub use candidate::{result_line, PackageCandidate};
pub use error::{CandidateError, IndexBuildError, QuerySyntaxError, UnknownFieldError};
pub use index::{InvertedIndex, Posting};
pub use query::{build_query, parse, QueryNode};
pub use rank::rank;
pub use scorer::{evaluate, ScoredMatch};
pub use tokenizer::{analyze, Token};

pub type DocId = u32;
pub type TermId = u32;

/// The two searchable fields of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Vendor,
    Product,
}

impl Field {
    pub const ALL: [Field; 2] = [Field::Vendor, Field::Product];

    pub fn name(self) -> &'static str {
        match self {
            Field::Vendor => "vendor",
            Field::Product => "product",
        }
    }

    /// Field names are matched exactly, they are not case-folded.
    pub fn from_name(name: &str) -> Option<Self> {
        Field::ALL.into_iter().find(|f| f.name() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A (vendor, product) pair as loaded from the catalog, before any normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PackageCoordinate {
    pub vendor: String,
    pub product: String,
}

impl PackageCoordinate {
    pub fn new(vendor: impl Into<String>, product: impl Into<String>) -> Self {
        Self { vendor: vendor.into(), product: product.into() }
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Vendor => &self.vendor,
            Field::Product => &self.product,
        }
    }
}

impl fmt::Display for PackageCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.vendor, self.product)
    }
}

/// Ranked hits of one query plus the number of documents that matched before
/// de-duplication and truncation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub total_hits: usize,
    pub hits: Vec<ScoredMatch>,
}

/// Parse `query`, evaluate it against `index` and rank at most `limit`
/// de-duplicated matches.
///
/// A syntax error is returned before the index is touched; empty `hits` means
/// nothing matched.
pub fn search_outcome(index: &InvertedIndex, query: &str, limit: usize) -> Result<SearchOutcome, QuerySyntaxError> {
    let node = parse(query)?;
    let matches = evaluate(index, &node);
    let total_hits = matches.len();
    tracing::debug!(query, total_hits, limit, "query evaluated");
    Ok(SearchOutcome { total_hits, hits: rank(matches, limit) })
}

/// Like [`search_outcome`], returning only the ranked hits.
pub fn search(index: &InvertedIndex, query: &str, limit: usize) -> Result<Vec<ScoredMatch>, QuerySyntaxError> {
    search_outcome(index, query, limit).map(|outcome| outcome.hits)
}
