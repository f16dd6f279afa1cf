//! The line-oriented result format, `"<score> <vendor>:<product>"`, and its parser
//! for consumers of that output.

use crate::error::CandidateError;
use crate::scorer::ScoredMatch;
use std::cmp::Ordering;

/// Ecosystem whose package names keep their group id prefix.
const JAVA_ECOSYSTEM: &str = "java";

/// `"<score> <vendor>:<product>"`.
///
/// The score uses `f32` `Display`: the shortest decimal that reads back to the
/// same value, never in exponent form, and without a trailing `.0` on whole
/// numbers (`2`, not the `2.0` older float-printing tools emit). Any float parser,
/// including [`PackageCandidate::from_output_line`], accepts both.
pub fn result_line(m: &ScoredMatch) -> String {
    format!("{} {}", m.score, m.coordinate)
}

/// A package name read back from a result line, with its score.
#[derive(Debug, Clone)]
pub struct PackageCandidate {
    pub package: String,
    pub score: f32,
}

impl PackageCandidate {
    /// Parse one result line. Tokens after the package are ignored.
    ///
    /// Outside the java ecosystem catalog vendors are just the ecosystem name, so
    /// the `"<ecosystem>:"` prefix is stripped from the package.
    pub fn from_output_line(line: &str, ecosystem: &str) -> Result<Self, CandidateError> {
        let mut parts = line.split_whitespace();
        let (Some(score_str), Some(package)) = (parts.next(), parts.next()) else {
            return Err(CandidateError::MissingPackage(line.to_string()));
        };
        let score = score_str
            .parse::<f32>()
            .map_err(|source| CandidateError::InvalidScore { score: score_str.to_string(), source })?;

        let package = if ecosystem == JAVA_ECOSYSTEM {
            package
        } else {
            package.get(ecosystem.len() + 1..).unwrap_or_default()
        };
        if package.is_empty() {
            return Err(CandidateError::EmptyPackage(line.to_string()));
        }
        Ok(Self { package: package.to_string(), score })
    }
}

impl PartialEq for PackageCandidate {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score
    }
}

impl PartialOrd for PackageCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.score.partial_cmp(&other.score)
    }
}
