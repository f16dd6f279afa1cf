//! Field-scoped boolean queries.
//!
//! ```text
//! query  := clause (AND clause)*
//! clause := field ':' '(' term+ ')'
//! field  := "vendor" | "product"
//! term   := any run of characters other than whitespace and parentheses
//! ```
//!
//! `AND` is case-insensitive. Terms inside one group are alternatives.

use crate::error::{QuerySyntaxError, UnknownFieldError};
use crate::tokenizer::analyze_terms;
use crate::Field;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryNode {
    /// Disjunction of normalized terms within one field.
    TermGroup { field: Field, terms: Vec<String> },
    And(Vec<QueryNode>),
    Or(Vec<QueryNode>),
}

impl QueryNode {
    /// A term group whose raw terms go through the index-time analyzer.
    pub fn group<S: AsRef<str>>(field: Field, raw_terms: &[S]) -> Self {
        let terms = raw_terms.iter().flat_map(|t| analyze_terms(t.as_ref())).collect();
        QueryNode::TermGroup { field, terms }
    }
}

/// Parse a query string into a query tree.
pub fn parse(query: &str) -> Result<QueryNode, QuerySyntaxError> {
    Parser { input: query, pos: 0 }.parse_query()
}

/// Render the query for a set of vendor and product candidates.
///
/// Colons are replaced by spaces so CPE fragments such as `apache::tomcat` stay
/// plain terms.
pub fn build_query<V, P>(vendors: &[V], products: &[P]) -> String
where
    V: AsRef<str>,
    P: AsRef<str>,
{
    let v = join_terms(vendors);
    let p = join_terms(products);
    format!("vendor:( {v} ) AND product:( {p} )")
}

fn join_terms<S: AsRef<str>>(parts: &[S]) -> String {
    parts.iter().map(|s| s.as_ref()).collect::<Vec<&str>>().join(" ").replace(':', " ")
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn parse_query(mut self) -> Result<QueryNode, QuerySyntaxError> {
        self.skip_whitespace();
        if self.at_end() {
            return Err(QuerySyntaxError::Empty);
        }

        let mut clauses = vec![self.parse_clause()?];
        loop {
            self.skip_whitespace();
            if self.at_end() {
                break;
            }
            let start = self.pos;
            if self.peek() == Some(')') {
                return Err(QuerySyntaxError::UnbalancedParenthesis { fragment: self.rest_from(start), position: start });
            }
            let word = self.read_term();
            if !word.eq_ignore_ascii_case("and") {
                return Err(QuerySyntaxError::Unexpected {
                    expected: "`AND`",
                    fragment: self.rest_from(start),
                    position: start,
                });
            }
            clauses.push(self.parse_clause()?);
        }

        if clauses.len() == 1 {
            Ok(clauses.remove(0))
        } else {
            Ok(QueryNode::And(clauses))
        }
    }

    /// clause := field ':' '(' term+ ')'
    fn parse_clause(&mut self) -> Result<QueryNode, QuerySyntaxError> {
        self.skip_whitespace();
        let start = self.pos;
        let name = self.read_while(|c| c.is_alphanumeric() || c == '_');
        self.skip_whitespace();
        if name.is_empty() || !self.eat(':') {
            let fragment = if name.is_empty() { self.rest_from(start) } else { name.to_string() };
            return Err(QuerySyntaxError::MissingField { fragment, position: start });
        }
        let field = Field::from_name(name).ok_or_else(|| UnknownFieldError { field: name.to_string(), position: start })?;

        self.skip_whitespace();
        let open = self.pos;
        if !self.eat('(') {
            return Err(QuerySyntaxError::Unexpected {
                expected: "`(`",
                fragment: self.rest_from(open),
                position: open,
            });
        }

        let mut raw_terms = 0usize;
        let mut terms = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => {
                    return Err(QuerySyntaxError::UnbalancedParenthesis { fragment: self.rest_from(open), position: open });
                }
                Some(')') => {
                    self.pos += 1;
                    break;
                }
                Some('(') => {
                    return Err(QuerySyntaxError::Unexpected {
                        expected: "a term or `)`",
                        fragment: self.rest_from(self.pos),
                        position: self.pos,
                    });
                }
                Some(_) => {
                    raw_terms += 1;
                    terms.extend(analyze_terms(self.read_term()));
                }
            }
        }

        if raw_terms == 0 {
            return Err(QuerySyntaxError::EmptyGroup {
                field,
                fragment: self.input[start..self.pos].to_string(),
                position: start,
            });
        }
        Ok(QueryNode::TermGroup { field, terms })
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn read_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        let input = self.input;
        &input[start..self.pos]
    }

    fn read_term(&mut self) -> &'a str {
        self.read_while(|c| !c.is_whitespace() && c != '(' && c != ')')
    }

    fn skip_whitespace(&mut self) {
        self.read_while(char::is_whitespace);
    }

    fn rest_from(&self, start: usize) -> String {
        self.input[start..].to_string()
    }
}
