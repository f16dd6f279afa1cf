use crate::Field;
use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref SEGMENT: Regex = Regex::new(r"[\p{L}\p{N}]+").expect("valid regex");
}

/// A normalized term tagged with the field it was produced for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub field: Field,
    pub term: String,
}

/// Analyze `text` for `field`. Both fields share the same normalization, so the
/// field only tags the output.
pub fn analyze(field: Field, text: &str) -> Vec<Token> {
    analyze_terms(text).into_iter().map(|term| Token { field, term }).collect()
}

/// Split text into lowercase terms, in emission order and without de-duplication.
///
/// Every alphanumeric run becomes one whole-segment term. When the run contains
/// case or digit/letter transitions, its parts follow it as extra terms, so
/// `ApachePOI` yields `apachepoi`, `apache`, `poi`.
pub fn analyze_terms(text: &str) -> Vec<String> {
    let normalized = text.nfkc().collect::<String>();
    let mut terms = Vec::new();
    for segment in SEGMENT.find_iter(&normalized) {
        let segment = segment.as_str();
        terms.push(segment.to_lowercase());
        let parts = split_compound(segment);
        if parts.len() > 1 {
            terms.extend(parts.into_iter().map(str::to_lowercase));
        }
    }
    terms.retain(|t| !t.is_empty());
    terms
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Upper,
    Lower,
    Digit,
}

fn class_of(c: char) -> CharClass {
    if c.is_numeric() {
        CharClass::Digit
    } else if c.is_uppercase() {
        CharClass::Upper
    } else {
        // caseless letters group with lowercase
        CharClass::Lower
    }
}

/// Split one alphanumeric run on camelCase and digit/letter boundaries.
/// An uppercase run followed by a lowercase letter keeps its last capital for the
/// next part (`POIFile` -> `POI`, `File`).
fn split_compound(segment: &str) -> Vec<&str> {
    let chars: Vec<(usize, CharClass)> = segment.char_indices().map(|(i, c)| (i, class_of(c))).collect();
    let mut parts = Vec::new();
    let mut start = 0;
    for i in 1..chars.len() {
        let prev = chars[i - 1].1;
        let cur = chars[i].1;
        let next = chars.get(i + 1).map(|&(_, class)| class);
        let boundary = match (prev, cur) {
            (CharClass::Digit, CharClass::Digit) => false,
            (CharClass::Digit, _) | (_, CharClass::Digit) => true,
            (CharClass::Lower, CharClass::Upper) => true,
            (CharClass::Upper, CharClass::Upper) => next == Some(CharClass::Lower),
            _ => false,
        };
        if boundary {
            let at = chars[i].0;
            parts.push(&segment[start..at]);
            start = at;
        }
    }
    parts.push(&segment[start..]);
    parts
}
