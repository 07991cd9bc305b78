//! Operator inference
//!
//! The caller never names an operator. The `%` wildcard embedded in the raw
//! value is the only signal:
//!
//! | value      | kind          |
//! |------------|---------------|
//! | `%abc%`    | `Contains`    |
//! | `abc%`     | `PrefixMatch` |
//! | `%abc`     | `SuffixMatch` |
//! | otherwise  | `Equals`      |
//!
//! Probes run in that order and the first match wins. The `Contains` probe
//! looks for a wildcard-delimited segment anywhere in the value, so `a%b%c`
//! is also `Contains`.
//!
//! Known limitation: `%` is a control character, so an equality search for a
//! literal `%` is not expressible.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// The wildcard character
pub const WILDCARD: char = '%';

static CONTAINS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"%([^%]+)%").unwrap());
static PREFIX_MATCH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^%]+%$").unwrap());
static SUFFIX_MATCH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^%[^%]+$").unwrap());

/// Comparison semantics inferred from a raw value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorKind {
    Contains,
    PrefixMatch,
    SuffixMatch,
    Equals,
}

impl OperatorKind {
    /// Classifies a raw value
    pub fn infer(raw: &str) -> Self {
        let probes: [(&Regex, OperatorKind); 3] = [
            (&*CONTAINS, OperatorKind::Contains),
            (&*PREFIX_MATCH, OperatorKind::PrefixMatch),
            (&*SUFFIX_MATCH, OperatorKind::SuffixMatch),
        ];

        probes
            .iter()
            .find(|(pattern, _)| pattern.is_match(raw))
            .map(|(_, kind)| *kind)
            .unwrap_or(OperatorKind::Equals)
    }

    /// Wraps an already-cleaned value in this operator's like pattern.
    ///
    /// `Equals` has no like form and returns `None`.
    pub fn like_pattern(&self, value: &str) -> Option<String> {
        match self {
            OperatorKind::Contains => Some(format!("%{}%", value)),
            OperatorKind::PrefixMatch => Some(format!("{}%", value)),
            OperatorKind::SuffixMatch => Some(format!("%{}", value)),
            OperatorKind::Equals => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OperatorKind::Contains => "contains",
            OperatorKind::PrefixMatch => "prefix_match",
            OperatorKind::SuffixMatch => "suffix_match",
            OperatorKind::Equals => "equals",
        }
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Removes every wildcard from a raw value
pub fn strip_wildcards(raw: &str) -> String {
    raw.replace(WILDCARD, "")
}
