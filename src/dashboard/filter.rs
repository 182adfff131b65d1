//! Game list text search

use regex::{Regex, RegexBuilder};
use tracing::warn;

/// Compiled size allowed for one search term
const TERM_SIZE_LIMIT: usize = 1 << 20;

/// One search term
#[derive(Debug, Clone)]
enum Term {
    /// Word-start match
    Pattern(Regex),
    /// Lowercase substring match, used when the pattern cannot be built
    Literal(String),
}

impl Term {
    fn compile(term: &str, size_limit: usize) -> Self {
        match RegexBuilder::new(&format!(r"\b{}", regex::escape(term)))
            .case_insensitive(true)
            .size_limit(size_limit)
            .build()
        {
            Ok(pattern) => Term::Pattern(pattern),
            Err(e) => {
                warn!("Search term {:?} matched literally: {}", term, e);
                Term::Literal(term.to_lowercase())
            }
        }
    }

    fn matches(&self, text: &str) -> bool {
        match self {
            Term::Pattern(pattern) => pattern.is_match(text),
            Term::Literal(term) => text.to_lowercase().contains(term.as_str()),
        }
    }
}

/// Case-insensitive rule: every whitespace-separated term must start at a
/// word boundary somewhere in the text
#[derive(Debug, Clone, Default)]
pub struct TextFilter {
    terms: Vec<Term>,
}

impl TextFilter {
    pub fn new(query: &str) -> Self {
        Self::with_size_limit(query, TERM_SIZE_LIMIT)
    }

    fn with_size_limit(query: &str, size_limit: usize) -> Self {
        let terms = query
            .split_whitespace()
            .map(|term| Term::compile(term, size_limit))
            .collect();
        Self { terms }
    }

    /// A filter without terms matches everything
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn matches(&self, text: &str) -> bool {
        self.terms.iter().all(|term| term.matches(text))
    }
}
