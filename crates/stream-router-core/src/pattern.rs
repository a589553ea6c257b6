// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Route pattern segmentation.
//!
//! Patterns are `/`-delimited; a segment starting with `:` is a named capture.
//! A single leading empty segment (from a leading `/`) is dropped, so `/a/b`
//! and `a/b` describe the same route. Paths use the same segmentation.

use thiserror::Error;

/// Prefix that marks a parameter segment.
pub const PARAM_PREFIX: char = ':';

/// One `/`-delimited token of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Matched verbatim against the path segment.
    Literal(String),
    /// Captures the path segment under the given name.
    Param(String),
}

impl Segment {
    fn from_raw(raw: &str) -> Self {
        match raw.strip_prefix(PARAM_PREFIX) {
            Some(name) => Self::Param(name.to_string()),
            None => Self::Literal(raw.to_string()),
        }
    }
}

/// Strict validation failure for a pattern string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// Two consecutive slashes or a trailing slash.
    #[error("empty segment at index {index} in pattern `{pattern}`")]
    EmptySegment {
        /// Offending pattern.
        pattern: String,
        /// Zero-based segment index.
        index: usize,
    },
    /// A bare `:` with no parameter name.
    #[error("unnamed parameter at index {index} in pattern `{pattern}`")]
    UnnamedParam {
        /// Offending pattern.
        pattern: String,
        /// Zero-based segment index.
        index: usize,
    },
}

/// A segmented route template.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pattern {
    segments: Vec<Segment>,
}

impl Pattern {
    /// Segment without validation. Never fails; empty segments become empty
    /// literals.
    pub fn lenient(pattern: &str) -> Self {
        Self {
            segments: split_segments(pattern).map(Segment::from_raw).collect(),
        }
    }

    /// Segment and reject empty segments and unnamed parameters.
    ///
    /// The empty string is the root pattern (zero segments) and is accepted.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let parsed = Self::lenient(pattern);
        for (index, segment) in parsed.segments.iter().enumerate() {
            match segment {
                Segment::Literal(s) if s.is_empty() => {
                    return Err(PatternError::EmptySegment {
                        pattern: pattern.to_string(),
                        index,
                    });
                }
                Segment::Param(name) if name.is_empty() => {
                    return Err(PatternError::UnnamedParam {
                        pattern: pattern.to_string(),
                        index,
                    });
                }
                _ => {}
            }
        }
        Ok(parsed)
    }

    /// Segments in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Declared parameter names in declaration order.
    pub fn param_names(&self) -> Vec<String> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Param(name) => Some(name.clone()),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Number of segments (the depth of the pattern's terminal node).
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True for the root pattern.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Split on `/`, dropping one leading empty segment.
pub fn split_segments(input: &str) -> impl Iterator<Item = &str> {
    let mut parts = input.split('/').peekable();
    if parts.peek() == Some(&"") {
        parts.next();
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_slash_is_optional() {
        assert_eq!(Pattern::lenient("/user/:id"), Pattern::lenient("user/:id"));
    }

    #[test]
    fn param_names_follow_declaration_order() {
        let p = Pattern::lenient("/org/:org/repo/:repo");
        assert_eq!(p.param_names(), vec!["org", "repo"]);
        assert_eq!(p.len(), 4);
    }

    #[test]
    fn empty_string_is_root() {
        assert!(Pattern::lenient("").is_empty());
        assert!(Pattern::parse("").is_ok());
    }

    #[test]
    fn lone_slash_is_one_empty_literal() {
        let p = Pattern::lenient("/");
        assert_eq!(p.segments(), &[Segment::Literal(String::new())]);
        assert!(matches!(
            Pattern::parse("/"),
            Err(PatternError::EmptySegment { index: 0, .. })
        ));
    }

    #[test]
    fn strict_rejects_double_slash_and_bare_colon() {
        assert!(matches!(
            Pattern::parse("/a//b"),
            Err(PatternError::EmptySegment { index: 1, .. })
        ));
        assert!(matches!(
            Pattern::parse("/a/:"),
            Err(PatternError::UnnamedParam { index: 1, .. })
        ));
        assert!(matches!(
            Pattern::parse("/a/"),
            Err(PatternError::EmptySegment { index: 1, .. })
        ));
    }

    #[test]
    fn split_drops_only_one_leading_empty() {
        let parts: Vec<_> = split_segments("//a").collect();
        assert_eq!(parts, vec!["", "a"]);
        let parts: Vec<_> = split_segments("").collect();
        assert!(parts.is_empty());
    }
}
