//! In-memory inverted index over the two catalog fields.
//!
//! Built once from the full catalog and never mutated afterwards.

use crate::error::IndexBuildError;
use crate::tokenizer::analyze_terms;
use crate::{DocId, Field, PackageCoordinate, TermId};
use std::collections::HashMap;

/// Occurrences of one term in one document field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    pub doc_id: DocId,
    pub term_frequency: u32,
}

#[derive(Debug, Default)]
struct FieldIndex {
    dictionary: HashMap<String, TermId>,
    df: Vec<u32>,
    postings: Vec<Vec<Posting>>, // indexed by term id, doc ids ascending
}

impl FieldIndex {
    fn add_document(&mut self, doc_id: DocId, terms: Vec<String>) {
        let mut tf_counts: HashMap<TermId, u32> = HashMap::new();
        for term in terms {
            let next_id = self.df.len() as TermId;
            let tid = *self.dictionary.entry(term).or_insert(next_id);
            if tid == next_id {
                self.df.push(0);
                self.postings.push(Vec::new());
            }
            *tf_counts.entry(tid).or_insert(0) += 1;
        }
        for (tid, term_frequency) in tf_counts {
            self.df[tid as usize] += 1;
            self.postings[tid as usize].push(Posting { doc_id, term_frequency });
        }
    }

    fn term_id(&self, term: &str) -> Option<TermId> {
        self.dictionary.get(term).copied()
    }
}

#[derive(Debug, Default)]
pub struct InvertedIndex {
    docs: Vec<PackageCoordinate>,
    vendor: FieldIndex,
    product: FieldIndex,
}

impl InvertedIndex {
    /// Index every coordinate in catalog order; the n-th entry gets document id n.
    ///
    /// Fails with [`IndexBuildError::EmptyCatalog`] when there is nothing to index.
    pub fn build<I>(catalog: I) -> Result<Self, IndexBuildError>
    where
        I: IntoIterator<Item = PackageCoordinate>,
    {
        let mut index = Self::default();
        for coordinate in catalog {
            let doc_id = index.docs.len() as DocId;
            for field in Field::ALL {
                let terms = analyze_terms(coordinate.field(field));
                index.field_mut(field).add_document(doc_id, terms);
            }
            index.docs.push(coordinate);
        }
        if index.docs.is_empty() {
            return Err(IndexBuildError::EmptyCatalog);
        }
        tracing::info!(
            num_docs = index.docs.len(),
            vendor_terms = index.vendor.dictionary.len(),
            product_terms = index.product.dictionary.len(),
            "catalog indexed"
        );
        Ok(index)
    }

    fn field(&self, field: Field) -> &FieldIndex {
        match field {
            Field::Vendor => &self.vendor,
            Field::Product => &self.product,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut FieldIndex {
        match field {
            Field::Vendor => &mut self.vendor,
            Field::Product => &mut self.product,
        }
    }

    /// Posting list for `token` in `field`, empty when the token was never indexed.
    pub fn postings(&self, field: Field, token: &str) -> &[Posting] {
        let f = self.field(field);
        match f.term_id(token) {
            Some(tid) => f.postings[tid as usize].as_slice(),
            None => &[],
        }
    }

    /// Number of distinct documents whose `field` contains `token`.
    pub fn document_frequency(&self, field: Field, token: &str) -> u32 {
        let f = self.field(field);
        f.term_id(token).map_or(0, |tid| f.df[tid as usize])
    }

    pub fn document_count(&self) -> usize {
        self.docs.len()
    }

    pub fn resolve(&self, doc_id: DocId) -> Option<&PackageCoordinate> {
        self.docs.get(doc_id as usize)
    }

    /// Number of distinct terms indexed for `field`.
    pub fn term_count(&self, field: Field) -> usize {
        self.field(field).dictionary.len()
    }
}
