//! Exclusion patterns and the path matcher that applies them.
//!
//! A pattern is one of three kinds, derived from its shape after
//! backslashes are converted to forward slashes:
//!
//! | Shape                 | Kind        | Matches                                  |
//! |-----------------------|-------------|------------------------------------------|
//! | `backend/database/`   | [`Subtree`] | any path starting with the pattern       |
//! | `backend/database`    | [`Prefix`]  | the path, or paths starting with it      |
//! | `node_modules`        | [`Segment`] | any path with an equal `/`-segment       |
//!
//! Every kind also matches a path that is exactly equal to the pattern.
//!
//! [`Subtree`]: PatternKind::Subtree
//! [`Prefix`]: PatternKind::Prefix
//! [`Segment`]: PatternKind::Segment

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Convert Windows separators to forward slashes.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// How a pattern is applied to a relative path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// Trailing slash: everything below the directory.
    Subtree,
    /// Contains a slash: a path prefix.
    Prefix,
    /// Bare name: any single segment.
    Segment,
}

/// How slash-containing patterns treat segment boundaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrefixMode {
    /// Plain string prefix: `backend/data` also matches `backend/database`.
    #[default]
    Literal,
    /// Prefix must end at a segment boundary: `backend/db` matches
    /// `backend/db` and `backend/db/x` only.
    SegmentBoundary,
}

/// A single normalized exclusion pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionPattern {
    raw: String,
    kind: PatternKind,
}

impl ExclusionPattern {
    pub fn new(pattern: impl AsRef<str>) -> Result<Self, DomainError> {
        let original = pattern.as_ref();
        let raw = normalize_separators(original.trim());

        if raw.is_empty() || raw == "/" {
            return Err(DomainError::InvalidPattern {
                pattern: original.to_string(),
                reason: "pattern cannot be empty".into(),
            });
        }

        let kind = if raw.ends_with('/') {
            PatternKind::Subtree
        } else if raw.contains('/') {
            PatternKind::Prefix
        } else {
            PatternKind::Segment
        };

        Ok(Self { raw, kind })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    /// Test a slash-normalized relative path against this pattern.
    pub fn matches(&self, path: &str, mode: PrefixMode) -> bool {
        if path == self.raw {
            return true;
        }

        match (self.kind, mode) {
            (PatternKind::Subtree, PrefixMode::Literal) => path.starts_with(&self.raw),
            (PatternKind::Subtree, PrefixMode::SegmentBoundary) => {
                path.starts_with(&self.raw) || path == self.raw.trim_end_matches('/')
            }
            (PatternKind::Prefix, PrefixMode::Literal) => path.starts_with(&self.raw),
            (PatternKind::Prefix, PrefixMode::SegmentBoundary) => path
                .strip_prefix(self.raw.as_str())
                .is_some_and(|rest| rest.starts_with('/')),
            (PatternKind::Segment, _) => path.split('/').any(|segment| segment == self.raw),
        }
    }
}

impl fmt::Display for ExclusionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Decides whether a relative path is left out of a snapshot.
///
/// The pattern list is fixed at construction; the matcher is a pure
/// function of `(path, patterns, mode)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathMatcher {
    patterns: Vec<ExclusionPattern>,
    mode: PrefixMode,
}

impl PathMatcher {
    pub fn new(patterns: Vec<ExclusionPattern>, mode: PrefixMode) -> Self {
        Self { patterns, mode }
    }

    /// Parse every pattern, failing on the first invalid one.
    pub fn from_patterns<I, S>(patterns: I, mode: PrefixMode) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(ExclusionPattern::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(patterns, mode))
    }

    /// Return a copy of this matcher with `pattern` appended, unless an equal
    /// pattern is already present.
    pub fn with_pattern(mut self, pattern: ExclusionPattern) -> Self {
        if !self.patterns.contains(&pattern) {
            self.patterns.push(pattern);
        }
        self
    }

    pub fn should_exclude(&self, relative_path: &str) -> bool {
        self.matching_pattern(relative_path).is_some()
    }

    /// The first pattern that excludes `relative_path`, if any.
    pub fn matching_pattern(&self, relative_path: &str) -> Option<&ExclusionPattern> {
        let path = normalize_separators(relative_path);
        self.patterns
            .iter()
            .find(|pattern| pattern.matches(&path, self.mode))
    }

    pub fn patterns(&self) -> &[ExclusionPattern] {
        &self.patterns
    }

    pub fn mode(&self) -> PrefixMode {
        self.mode
    }
}
