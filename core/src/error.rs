use crate::Field;
use std::io;
use std::num::ParseFloatError;
use std::path::PathBuf;
use thiserror::Error;

/// A malformed query string. Carries the offending fragment and its byte offset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuerySyntaxError {
    #[error("empty query")]
    Empty,
    #[error("unbalanced parenthesis at byte {position}: `{fragment}`")]
    UnbalancedParenthesis { fragment: String, position: usize },
    #[error("missing field name at byte {position}: `{fragment}`")]
    MissingField { fragment: String, position: usize },
    #[error("empty term group for field `{field}` at byte {position}: `{fragment}`")]
    EmptyGroup { field: Field, fragment: String, position: usize },
    #[error("expected {expected} at byte {position}: `{fragment}`")]
    Unexpected { expected: &'static str, fragment: String, position: usize },
    #[error(transparent)]
    UnknownField(#[from] UnknownFieldError),
}

impl QuerySyntaxError {
    /// The part of the query the parser rejected.
    pub fn fragment(&self) -> &str {
        match self {
            QuerySyntaxError::Empty => "",
            QuerySyntaxError::UnbalancedParenthesis { fragment, .. }
            | QuerySyntaxError::MissingField { fragment, .. }
            | QuerySyntaxError::EmptyGroup { fragment, .. }
            | QuerySyntaxError::Unexpected { fragment, .. } => fragment,
            QuerySyntaxError::UnknownField(e) => &e.field,
        }
    }

    pub fn position(&self) -> usize {
        match self {
            QuerySyntaxError::Empty => 0,
            QuerySyntaxError::UnbalancedParenthesis { position, .. }
            | QuerySyntaxError::MissingField { position, .. }
            | QuerySyntaxError::EmptyGroup { position, .. }
            | QuerySyntaxError::Unexpected { position, .. } => *position,
            QuerySyntaxError::UnknownField(e) => e.position,
        }
    }
}

/// A clause named a field other than `vendor` or `product`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field `{field}` at byte {position}, expected `vendor` or `product`")]
pub struct UnknownFieldError {
    pub field: String,
    pub position: usize,
}

#[derive(Debug, Error)]
pub enum IndexBuildError {
    #[error("failed to read catalog `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("catalog contains no package coordinates")]
    EmptyCatalog,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CandidateError {
    #[error("missing package in result line `{0}`")]
    MissingPackage(String),
    #[error("invalid score `{score}` in result line")]
    InvalidScore {
        score: String,
        #[source]
        source: ParseFloatError,
    },
    #[error("empty package name in result line `{0}`")]
    EmptyPackage(String),
}
