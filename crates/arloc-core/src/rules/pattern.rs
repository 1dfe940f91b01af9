//! Slash-delimited rule patterns and their segments
//!
//! Patterns are never rejected. A malformed segment (a bare `:` wildcard,
//! an empty literal) is kept as-is and simply fails to match input keys.
//!
//! Copyright (c) 2025 Arloc Team
//! Licensed under the Apache-2.0 license

use std::fmt;

/// Separator between pattern segments
pub const SEGMENT_SEPARATOR: char = '/';

/// Prefix marking a wildcard segment
pub const WILDCARD_PREFIX: char = ':';

/// One level of a rule pattern
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Matches a key equal to the literal text
    Literal(String),
    /// Matches any key and binds it to the named token
    Wildcard(String),
}

impl Segment {
    /// Parse a single segment from its textual form
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix(WILDCARD_PREFIX) {
            Some(token) => Self::Wildcard(token.to_string()),
            None => Self::Literal(raw.to_string()),
        }
    }

    /// Check whether an input key matches this segment
    pub fn matches(&self, key: &str) -> bool {
        match self {
            Self::Literal(literal) => literal == key,
            Self::Wildcard(token) => !token.is_empty(),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard(_))
    }

    /// Token bound by this segment, if it is a wildcard
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::Wildcard(token) => Some(token),
            Self::Literal(_) => None,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(literal) => f.write_str(literal),
            Self::Wildcard(token) => write!(f, "{}{}", WILDCARD_PREFIX, token),
        }
    }
}

/// A rule pattern such as `attributes/:attr/errors/:error`
///
/// The slash-joined string form is the pattern's identity; it is what rule
/// tables are keyed by and what the matcher prefix-matches against.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RulePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RulePattern {
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let segments = raw.split(SEGMENT_SEPARATOR).map(Segment::parse).collect();
        Self { raw, segments }
    }

    /// The slash-joined string form
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of nesting levels this pattern spans
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Tokens bound by wildcard segments along this pattern, outermost first
    pub fn bound_tokens(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(Segment::token)
    }
}

impl fmt::Display for RulePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for RulePattern {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<String> for RulePattern {
    fn from(raw: String) -> Self {
        Self::parse(raw)
    }
}
